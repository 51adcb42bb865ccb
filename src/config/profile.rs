use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use std::collections::HashMap;

pub const KEY_ENDPOINT: &str = "endpoint";
pub const KEY_APP_KEY: &str = "appKey";
pub const KEY_APP_SECRET: &str = "appSecret";
pub const KEY_CONSUMER_KEY: &str = "consumerKey";
pub const KEY_CONNECTOR: &str = "connector";

/// 單一 profile 的扁平設定（鍵已去除 `mailinglist.<profile>.` 前綴）
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileConfiguration {
    values: HashMap<String, String>,
}

impl std::fmt::Debug for ProfileConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("ProfileConfiguration")
            .field("keys", &keys)
            .finish()
    }
}

/// 簽章請求所需的憑證，借用自 [`ProfileConfiguration`]
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub endpoint: &'a str,
    pub app_key: &'a str,
    pub app_secret: &'a str,
    pub consumer_key: &'a str,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("app_key", &self.app_key)
            .field("app_secret", &"***")
            .field("consumer_key", &"***")
            .finish()
    }
}

impl ProfileConfiguration {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn connector_hint(&self) -> Result<&str> {
        let hint = validate_required_field(KEY_CONNECTOR, self.values.get(KEY_CONNECTOR))?;
        validate_non_empty_string(KEY_CONNECTOR, hint)?;
        Ok(hint)
    }

    /// 取出並驗證四個必要的 API 欄位
    pub fn credentials(&self) -> Result<Credentials<'_>> {
        let endpoint = validate_required_field(KEY_ENDPOINT, self.values.get(KEY_ENDPOINT))?;
        validate_url(KEY_ENDPOINT, endpoint)?;

        let app_key = self.required_non_empty(KEY_APP_KEY)?;
        let app_secret = self.required_non_empty(KEY_APP_SECRET)?;
        let consumer_key = self.required_non_empty(KEY_CONSUMER_KEY)?;

        Ok(Credentials {
            endpoint,
            app_key,
            app_secret,
            consumer_key,
        })
    }

    fn required_non_empty(&self, key: &str) -> Result<&str> {
        let value = validate_required_field(key, self.values.get(key))?;
        validate_non_empty_string(key, value)?;
        Ok(value)
    }
}

impl From<HashMap<String, String>> for ProfileConfiguration {
    fn from(values: HashMap<String, String>) -> Self {
        Self::new(values)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProfileConfiguration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Validate for ProfileConfiguration {
    fn validate(&self) -> Result<()> {
        self.credentials()?;
        self.connector_hint()?;
        Ok(())
    }
}
