use crate::config::profile::ProfileConfiguration;
use crate::core::redirection::{OvhRedirectConnector, REDIRECT_CONNECTOR_HINT};
use crate::core::subscriber::{OvhSubscriberConnector, SUBSCRIBER_CONNECTOR_HINT};
use crate::domain::ports::{ConfigurationSource, MailingListConnector};
use crate::utils::error::{MailingListError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// 設定鍵的命名空間：`mailinglist.<profile>.<key>`
pub const CONFIG_PREFIX: &str = "mailinglist";

/// 依 `connector` 提示字串查找連接器
#[derive(Clone, Default)]
pub struct ConnectorRegistry {
    connectors: HashMap<String, Arc<dyn MailingListConnector>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 註冊內建的 `ovh` 與 `ovh-redirect` 連接器
    pub fn with_default_connectors() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(
            SUBSCRIBER_CONNECTOR_HINT,
            Arc::new(OvhSubscriberConnector::new()?),
        );
        registry.register(
            REDIRECT_CONNECTOR_HINT,
            Arc::new(OvhRedirectConnector::new()?),
        );
        Ok(registry)
    }

    pub fn register(&mut self, hint: impl Into<String>, connector: Arc<dyn MailingListConnector>) {
        self.connectors.insert(hint.into(), connector);
    }

    pub fn get(&self, hint: &str) -> Result<Arc<dyn MailingListConnector>> {
        self.connectors
            .get(hint)
            .cloned()
            .ok_or_else(|| MailingListError::ConfigError {
                message: format!("Failed to get connector for hint [{}]", hint),
            })
    }

    pub fn hints(&self) -> Vec<&str> {
        let mut hints: Vec<&str> = self.connectors.keys().map(String::as_str).collect();
        hints.sort_unstable();
        hints
    }
}

impl std::fmt::Debug for ConnectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorRegistry")
            .field("hints", &self.hints())
            .finish()
    }
}

/// 以 profile 名稱操作郵件列表：讀設定、選連接器、轉交呼叫
pub struct MailingListManager<S: ConfigurationSource> {
    source: S,
    registry: ConnectorRegistry,
}

impl<S: ConfigurationSource> MailingListManager<S> {
    pub fn new(source: S) -> Result<Self> {
        Ok(Self::with_registry(
            source,
            ConnectorRegistry::with_default_connectors()?,
        ))
    }

    pub fn with_registry(source: S, registry: ConnectorRegistry) -> Self {
        Self { source, registry }
    }

    /// 收集 `mailinglist.<profile>.` 開頭的所有鍵，去掉前綴
    pub fn profile_configuration(&self, profile: &str) -> ProfileConfiguration {
        let prefix = format!("{}.{}.", CONFIG_PREFIX, profile);

        self.source
            .keys()
            .into_iter()
            .filter_map(|key| {
                let short = key.strip_prefix(&prefix)?.to_string();
                let value = self.source.property(&key)?;
                Some((short, value))
            })
            .collect()
    }

    fn resolve(&self, profile: &str) -> Result<(ProfileConfiguration, Arc<dyn MailingListConnector>)> {
        let configuration = self.profile_configuration(profile);
        if configuration.is_empty() {
            tracing::warn!("No configuration found for mailing list profile '{}'", profile);
        }

        let hint = configuration.connector_hint()?;
        let connector = self.registry.get(hint)?;
        tracing::debug!("Profile '{}' uses connector '{}'", profile, hint);

        Ok((configuration, connector))
    }

    pub async fn add(&self, profile: &str, mailing_list: &str, email: &str) -> Result<()> {
        let (configuration, connector) = self.resolve(profile)?;
        connector.add(&configuration, mailing_list, email).await
    }

    pub async fn delete(&self, profile: &str, mailing_list: &str, email: &str) -> Result<()> {
        let (configuration, connector) = self.resolve(profile)?;
        connector.delete(&configuration, mailing_list, email).await
    }

    pub async fn get_members(&self, profile: &str, mailing_list: &str) -> Result<Vec<String>> {
        let (configuration, connector) = self.resolve(profile)?;
        connector.get_members(&configuration, mailing_list).await
    }
}
