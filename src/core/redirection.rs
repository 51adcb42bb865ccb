use crate::config::profile::ProfileConfiguration;
use crate::core::executor::Params;
use crate::core::ovh::{decode_as, OvhClient};
use crate::core::path::{ApiMethod, PathTemplates};
use crate::domain::model::{MailingListAddress, RedirectionRecord};
use crate::domain::ports::MailingListConnector;
use crate::utils::error::{MailingListError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

pub const REDIRECT_CONNECTOR_HINT: &str = "ovh-redirect";

const REDIRECTIONS_PATH: &str = "/email/domain/{0}/redirection";
const REDIRECTION_PATH: &str = "/email/domain/{0}/redirection/{2}";

/// 以一對一的 email 轉寄規則模擬郵件列表
///
/// 所有 `from` 等於列表位址的轉寄規則構成成員；刪除前必須先以
/// `{from, to}` 查出後端 id，id 永遠不由呼叫端提供。
#[derive(Debug, Clone)]
pub struct OvhRedirectConnector {
    client: OvhClient,
}

impl OvhRedirectConnector {
    pub fn new() -> Result<Self> {
        let templates = PathTemplates::new(&[
            (ApiMethod::Get, REDIRECTIONS_PATH),
            (ApiMethod::Add, REDIRECTIONS_PATH),
            (ApiMethod::Delete, REDIRECTION_PATH),
            (ApiMethod::GetObject, REDIRECTION_PATH),
        ]);

        Ok(Self {
            client: OvhClient::new(templates)?,
        })
    }

    pub fn client(&self) -> &OvhClient {
        &self.client
    }

    /// 查詢符合條件的轉寄規則 id
    async fn find_ids(
        &self,
        profile: &ProfileConfiguration,
        list: &MailingListAddress,
        filter: &Params,
    ) -> Result<Vec<String>> {
        let value = self
            .client
            .call(profile, ApiMethod::Get, list, "", Some(filter))
            .await?;
        decode_as(value, "a list of redirection ids")
    }

    async fn get_record(
        &self,
        profile: &ProfileConfiguration,
        list: &MailingListAddress,
        id: &str,
    ) -> Result<RedirectionRecord> {
        let value = self
            .client
            .call(profile, ApiMethod::GetObject, list, id, None)
            .await?;
        decode_as(value, "a redirection object")
    }

    async fn delete_redirection(
        &self,
        profile: &ProfileConfiguration,
        mailing_list: &str,
        email: &str,
    ) -> Result<()> {
        let list = MailingListAddress::parse(mailing_list)?;
        let from = list.to_string();

        let mut filter = Params::new();
        filter.insert("from".to_string(), json!(from));
        filter.insert("to".to_string(), json!(email));

        let ids = self.find_ids(profile, &list, &filter).await?;
        let id = match ids.first() {
            Some(id) => id,
            None => {
                return Err(MailingListError::RedirectionNotFound {
                    from,
                    to: email.to_string(),
                })
            }
        };

        if ids.len() > 1 {
            tracing::warn!(
                "{} redirections from {} to {}, deleting only {}",
                ids.len(),
                from,
                email,
                id
            );
        }

        self.client
            .call(profile, ApiMethod::Delete, &list, id, None)
            .await?;
        Ok(())
    }

    async fn collect_members(
        &self,
        profile: &ProfileConfiguration,
        mailing_list: &str,
    ) -> Result<Vec<String>> {
        let list = MailingListAddress::parse(mailing_list)?;

        let mut filter = Params::new();
        filter.insert("from".to_string(), json!(list.to_string()));

        let ids = self.find_ids(profile, &list, &filter).await?;
        tracing::debug!("📡 Resolving {} redirections for {}", ids.len(), list);

        // 逐一取回，任何一筆失敗就放棄整個結果
        let mut members = Vec::with_capacity(ids.len());
        for id in &ids {
            let record = self.get_record(profile, &list, id).await.map_err(|e| {
                MailingListError::wrap(format!("Failed to get member email from id {}", id), e)
            })?;
            members.push(record.to);
        }

        Ok(members)
    }
}

#[async_trait]
impl MailingListConnector for OvhRedirectConnector {
    async fn add(&self, profile: &ProfileConfiguration, mailing_list: &str, email: &str) -> Result<()> {
        let result: Result<Value> = async {
            let list = MailingListAddress::parse(mailing_list)?;

            let mut body = Params::new();
            body.insert("from".to_string(), json!(list.to_string()));
            body.insert("localCopy".to_string(), json!(false));
            body.insert("to".to_string(), json!(email));

            self.client
                .call(profile, ApiMethod::Add, &list, email, Some(&body))
                .await
        }
        .await;

        result.map_err(|e| MailingListError::wrap("Failed to add member", e))?;
        tracing::info!("Added redirection from {} to {}", mailing_list, email);
        Ok(())
    }

    async fn delete(
        &self,
        profile: &ProfileConfiguration,
        mailing_list: &str,
        email: &str,
    ) -> Result<()> {
        self.delete_redirection(profile, mailing_list, email)
            .await
            .map_err(|e| MailingListError::wrap("Failed to delete member", e))?;
        tracing::info!("Removed redirection from {} to {}", mailing_list, email);
        Ok(())
    }

    async fn get_members(
        &self,
        profile: &ProfileConfiguration,
        mailing_list: &str,
    ) -> Result<Vec<String>> {
        self.collect_members(profile, mailing_list)
            .await
            .map_err(|e| MailingListError::wrap("Failed to get members", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirection_templates() {
        let connector = OvhRedirectConnector::new().unwrap();
        let templates = connector.client().templates();

        assert_eq!(
            templates.resolve(ApiMethod::Get, "example.com", "news", ""),
            "/email/domain/example.com/redirection"
        );
        assert_eq!(
            templates.resolve(ApiMethod::Delete, "example.com", "news", "12345"),
            "/email/domain/example.com/redirection/12345"
        );
        assert_eq!(
            templates.resolve(ApiMethod::GetObject, "example.com", "news", "12345"),
            "/email/domain/example.com/redirection/12345"
        );
    }
}
