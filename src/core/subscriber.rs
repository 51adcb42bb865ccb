use crate::config::profile::ProfileConfiguration;
use crate::core::executor::Params;
use crate::core::ovh::{decode_as, OvhClient};
use crate::core::path::{ApiMethod, PathTemplates};
use crate::domain::model::MailingListAddress;
use crate::domain::ports::MailingListConnector;
use crate::utils::error::{MailingListError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

pub const SUBSCRIBER_CONNECTOR_HINT: &str = "ovh";

const SUBSCRIBERS_PATH: &str = "/email/domain/{0}/mailingList/{1}/subscriber";
const SUBSCRIBER_PATH: &str = "/email/domain/{0}/mailingList/{1}/subscriber/{2}";

/// OVH 原生郵件列表：成員即訂閱者資源
#[derive(Debug, Clone)]
pub struct OvhSubscriberConnector {
    client: OvhClient,
}

impl OvhSubscriberConnector {
    pub fn new() -> Result<Self> {
        let templates = PathTemplates::new(&[
            (ApiMethod::Get, SUBSCRIBERS_PATH),
            (ApiMethod::Add, SUBSCRIBERS_PATH),
            (ApiMethod::Delete, SUBSCRIBER_PATH),
        ]);

        Ok(Self {
            client: OvhClient::new(templates)?,
        })
    }

    pub fn client(&self) -> &OvhClient {
        &self.client
    }
}

#[async_trait]
impl MailingListConnector for OvhSubscriberConnector {
    async fn add(&self, profile: &ProfileConfiguration, mailing_list: &str, email: &str) -> Result<()> {
        let result: Result<Value> = async {
            let list = MailingListAddress::parse(mailing_list)?;
            let mut body = Params::new();
            body.insert("email".to_string(), json!(email));

            self.client
                .call(profile, ApiMethod::Add, &list, email, Some(&body))
                .await
        }
        .await;

        result.map_err(|e| MailingListError::wrap("Failed to add member", e))?;
        tracing::info!("Subscribed {} to {}", email, mailing_list);
        Ok(())
    }

    async fn delete(
        &self,
        profile: &ProfileConfiguration,
        mailing_list: &str,
        email: &str,
    ) -> Result<()> {
        let result: Result<Value> = async {
            let list = MailingListAddress::parse(mailing_list)?;
            self.client
                .call(profile, ApiMethod::Delete, &list, email, None)
                .await
        }
        .await;

        result.map_err(|e| MailingListError::wrap("Failed to delete member", e))?;
        tracing::info!("Unsubscribed {} from {}", email, mailing_list);
        Ok(())
    }

    async fn get_members(
        &self,
        profile: &ProfileConfiguration,
        mailing_list: &str,
    ) -> Result<Vec<String>> {
        let result: Result<Vec<String>> = async {
            let list = MailingListAddress::parse(mailing_list)?;
            let value = self
                .client
                .call(profile, ApiMethod::Get, &list, "", None)
                .await?;
            decode_as::<Vec<String>>(value, "a list of subscriber emails")
        }
        .await;

        let members = result.map_err(|e| MailingListError::wrap("Failed to get members", e))?;
        tracing::debug!("{} has {} subscribers", mailing_list, members.len());
        Ok(members)
    }
}
