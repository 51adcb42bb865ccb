use crate::config::profile::ProfileConfiguration;
use crate::core::executor::{ApiExecutor, Params};
use crate::core::path::{ApiMethod, PathTemplates};
use crate::domain::model::MailingListAddress;
use crate::utils::error::{MailingListError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 兩種 OVH 連接器共用的部分：簽章執行器 + 路徑樣板
#[derive(Debug, Clone)]
pub struct OvhClient {
    executor: ApiExecutor,
    templates: PathTemplates,
}

impl OvhClient {
    pub fn new(templates: PathTemplates) -> Result<Self> {
        Ok(Self {
            executor: ApiExecutor::new()?,
            templates,
        })
    }

    pub fn templates(&self) -> &PathTemplates {
        &self.templates
    }

    /// 組出路徑後送出簽章請求；`target` 是樣板中的 `{2}`（email 或 id）
    pub async fn call(
        &self,
        profile: &ProfileConfiguration,
        method: ApiMethod,
        list: &MailingListAddress,
        target: &str,
        params: Option<&Params>,
    ) -> Result<Value> {
        let path = self
            .templates
            .resolve(method, list.domain(), list.local_part(), target);

        self.executor
            .execute(profile, method.http_method(), &path, params)
            .await
    }
}

/// 將通用 JSON 轉為預期的型別，形狀不符時回傳 DecodeError
pub fn decode_as<T: DeserializeOwned>(value: Value, expected: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| MailingListError::DecodeError {
        message: format!("Expected {}: {}", expected, e),
    })
}
