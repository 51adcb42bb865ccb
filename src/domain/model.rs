use crate::utils::error::{MailingListError, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 郵件列表位址，由 `name@domain` 拆解而來
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailingListAddress {
    local_part: String,
    domain: String,
}

impl MailingListAddress {
    pub fn parse(address: &str) -> Result<Self> {
        let mut parts = address.split('@');
        let (local_part, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local_part), Some(domain), None) => (local_part, domain),
            _ => {
                return Err(MailingListError::EncodingError {
                    message: format!(
                        "Mailing list address [{}] must contain exactly one '@'",
                        address
                    ),
                })
            }
        };

        if local_part.is_empty() || domain.is_empty() {
            return Err(MailingListError::EncodingError {
                message: format!(
                    "Mailing list address [{}] has an empty name or domain",
                    address
                ),
            });
        }

        Ok(Self {
            local_part: local_part.to_string(),
            domain: domain.to_string(),
        })
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl FromStr for MailingListAddress {
    type Err = MailingListError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MailingListAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

/// 後端的轉寄規則物件，只取用轉寄目標；其他欄位忽略
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedirectionRecord {
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_parse_mailing_list_address() {
        let address = MailingListAddress::parse("list@example.com").unwrap();
        assert_eq!(address.local_part(), "list");
        assert_eq!(address.domain(), "example.com");
        assert_eq!(address.to_string(), "list@example.com");
    }

    #[test]
    fn test_parse_rejects_malformed_addresses() {
        for bad in ["list.example.com", "a@b@example.com", "@example.com", "list@", ""] {
            let err = MailingListAddress::parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Encoding, "{bad}");
        }
    }

    #[test]
    fn test_redirection_record_from_backend_json() {
        let record: RedirectionRecord = serde_json::from_value(serde_json::json!({
            "id": "1234",
            "from": "list@example.com",
            "to": "member@example.org"
        }))
        .unwrap();
        assert_eq!(record.to, "member@example.org");

        let missing_to = serde_json::from_value::<RedirectionRecord>(serde_json::json!({"id": "1"}));
        assert!(missing_to.is_err());
    }
}
