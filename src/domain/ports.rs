use crate::config::profile::ProfileConfiguration;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// 郵件列表成員操作的統一介面，每個後端 API 一個實作
#[async_trait]
pub trait MailingListConnector: Send + Sync {
    async fn add(&self, profile: &ProfileConfiguration, mailing_list: &str, email: &str)
        -> Result<()>;

    async fn delete(
        &self,
        profile: &ProfileConfiguration,
        mailing_list: &str,
        email: &str,
    ) -> Result<()>;

    async fn get_members(
        &self,
        profile: &ProfileConfiguration,
        mailing_list: &str,
    ) -> Result<Vec<String>>;
}

/// 外部鍵值設定來源（例如 `mailinglist.<profile>.<key>`）
pub trait ConfigurationSource: Send + Sync {
    fn keys(&self) -> Vec<String>;
    fn property(&self, key: &str) -> Option<String>;
}

impl ConfigurationSource for HashMap<String, String> {
    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).cloned().collect()
    }

    fn property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
