use crate::domain::ports::ConfigurationSource;
use crate::utils::error::{MailingListError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

/// 以 TOML 檔案作為鍵值設定來源
///
/// 巢狀表格會攤平成以點分隔的鍵，例如
///
/// ```toml
/// [mailinglist.news]
/// endpoint = "https://eu.api.ovh.com/1.0"
/// ```
///
/// 會得到 `mailinglist.news.endpoint`。
#[derive(Debug, Clone, Default)]
pub struct TomlConfigSource {
    properties: BTreeMap<String, String>,
}

impl TomlConfigSource {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| MailingListError::ConfigError {
            message: format!(
                "Failed to read configuration file {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        let table: toml::Table =
            toml::from_str(&processed_content).map_err(|e| MailingListError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        let mut properties = BTreeMap::new();
        for (key, value) in &table {
            flatten(key, value, &mut properties);
        }

        Ok(Self { properties })
    }

    /// 替換環境變數 (例如 ${OVH_APP_SECRET})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MailingListError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

fn flatten(key: &str, value: &toml::Value, out: &mut BTreeMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (child, child_value) in table {
                flatten(&format!("{}.{}", key, child), child_value, out);
            }
        }
        other => {
            out.insert(key.to_string(), scalar_text(other));
        }
    }
}

fn scalar_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

impl ConfigurationSource for TomlConfigSource {
    fn keys(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
}
