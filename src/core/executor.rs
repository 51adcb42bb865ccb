use crate::config::profile::{Credentials, ProfileConfiguration};
use crate::core::path::encode_component;
use crate::core::signer;
use crate::utils::error::{MailingListError, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

pub const HEADER_APPLICATION: &str = "X-Ovh-Application";
pub const HEADER_CONSUMER: &str = "X-Ovh-Consumer";
pub const HEADER_SIGNATURE: &str = "X-Ovh-Signature";
pub const HEADER_TIMESTAMP: &str = "X-Ovh-Timestamp";

/// 請求參數；GET 時放進 query string，其餘方法序列化為 JSON body。
/// 使用 BTreeMap 讓鍵的順序固定。
pub type Params = BTreeMap<String, Value>;

/// 單次請求的內容，簽章與實際送出的 URL/body 必須完全一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub body: String,
    pub timestamp: i64,
}

impl RequestSpec {
    pub fn build(
        endpoint: &str,
        method: Method,
        path: &str,
        params: Option<&Params>,
        timestamp: i64,
    ) -> Result<Self> {
        let mut url = String::with_capacity(endpoint.len() + path.len());
        url.push_str(endpoint);
        url.push_str(path);

        let mut body = String::new();
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            if method == Method::GET {
                let query = params
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, encode_component(&param_text(value))))
                    .collect::<Vec<_>>()
                    .join("&");
                url.push('?');
                url.push_str(&query);
            } else {
                body = serde_json::to_string(params).map_err(|e| MailingListError::EncodingError {
                    message: format!("Failed to serialize request body: {}", e),
                })?;
            }
        }

        Ok(Self {
            method,
            url,
            body,
            timestamp,
        })
    }

    pub fn signature(&self, credentials: &Credentials<'_>) -> String {
        signer::sign(
            credentials.app_secret,
            credentials.consumer_key,
            self.method.as_str(),
            &self.url,
            &self.body,
            self.timestamp,
        )
    }
}

fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 送出簽章請求並解碼回應
#[derive(Debug, Clone)]
pub struct ApiExecutor {
    client: Client,
}

impl ApiExecutor {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    pub async fn execute(
        &self,
        profile: &ProfileConfiguration,
        method: Method,
        path: &str,
        params: Option<&Params>,
    ) -> Result<Value> {
        let credentials = profile.credentials()?;

        // 同一個 timestamp 用於簽章與標頭
        let timestamp = signer::current_timestamp();
        let spec = RequestSpec::build(credentials.endpoint, method, path, params, timestamp)?;

        self.send(&credentials, &spec).await
    }

    async fn send(&self, credentials: &Credentials<'_>, spec: &RequestSpec) -> Result<Value> {
        let signature = spec.signature(credentials);

        tracing::debug!(method = %spec.method, url = %spec.url, "Sending signed request");

        let mut request = self
            .client
            .request(spec.method.clone(), &spec.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(HEADER_APPLICATION, credentials.app_key)
            .header(HEADER_CONSUMER, credentials.consumer_key)
            .header(HEADER_SIGNATURE, signature)
            .header(HEADER_TIMESTAMP, spec.timestamp.to_string());

        // 送出的位元組就是簽章雜湊的 UTF-8 位元組
        if !spec.body.is_empty() {
            request = request.body(spec.body.as_bytes().to_vec());
        }

        let response = request.send().await?;
        let status = response.status();

        // 無論成功與否都讀完整個 body，錯誤時作為診斷訊息
        let text = response.text().await?;

        tracing::debug!(method = %spec.method, url = %spec.url, status = status.as_u16(), "Received response");

        if status != StatusCode::OK {
            tracing::warn!(
                "API {} {} failed with status {}: {}",
                spec.method,
                spec.url,
                status,
                text
            );
            return Err(MailingListError::HttpStatusError {
                status: status.as_u16(),
                body: text,
            });
        }

        decode_body(&text)
    }
}

fn decode_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(text).map_err(|e| MailingListError::DecodeError {
        message: format!("Response is not valid JSON: {}", e),
    })
}
