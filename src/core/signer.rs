//! OVH 請求簽章
//!
//! `$1$` + SHA-1(`secret+consumerKey+METHOD+url+body+timestamp`)，十六進位小寫。
//! 伺服器端會獨立計算同一字串，任何差異都會得到 403。
//! 雜湊的是 UTF-8 位元組，也就是 reqwest 實際送出的 body。

use sha1::{Digest, Sha1};

pub const SIGNATURE_VERSION: &str = "$1$";

/// 產生 `X-Ovh-Signature` 標頭的值
pub fn sign(
    app_secret: &str,
    consumer_key: &str,
    http_method: &str,
    url: &str,
    body: &str,
    timestamp: i64,
) -> String {
    let to_sign = format!(
        "{}+{}+{}+{}+{}+{}",
        app_secret, consumer_key, http_method, url, body, timestamp
    );

    let digest = Sha1::digest(to_sign.as_bytes());
    format!("{}{}", SIGNATURE_VERSION, hex::encode(digest))
}

/// 目前的 Unix 時間（秒）
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "EgWIz07P0HYwtQDs";
    const CONSUMER: &str = "MtSwSrPpNjqfVSmJhLbPyr2i45lSwPU1";
    const URL: &str = "https://eu.api.ovh.com/1.0/email/domain/example.com/redirection";
    const BODY: &str = r#"{"from":"list@example.com","localCopy":false,"to":"a@example.org"}"#;
    const TS: i64 = 1_700_000_000;

    #[test]
    fn test_signature_format() {
        let signature = sign(SECRET, CONSUMER, "POST", URL, BODY, TS);
        assert!(signature.starts_with("$1$"));

        let digest = &signature[3..];
        assert_eq!(digest.len(), 40);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signature_matches_known_sha1() {
        // 空字串欄位：簽章輸入為 "+++++0"
        let signature = sign("", "", "", "", "", 0);
        let expected = hex::encode(Sha1::digest(b"+++++0"));
        assert_eq!(signature, format!("$1${}", expected));

        // SHA-1("abc") 的標準測試向量
        assert_eq!(
            hex::encode(Sha1::digest(b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let first = sign(SECRET, CONSUMER, "POST", URL, BODY, TS);
        let second = sign(SECRET, CONSUMER, "POST", URL, BODY, TS);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_field_changes_the_signature() {
        let base = sign(SECRET, CONSUMER, "POST", URL, BODY, TS);
        let variants = [
            sign("other-secret", CONSUMER, "POST", URL, BODY, TS),
            sign(SECRET, "other-consumer", "POST", URL, BODY, TS),
            sign(SECRET, CONSUMER, "DELETE", URL, BODY, TS),
            sign(SECRET, CONSUMER, "POST", &format!("{}/1", URL), BODY, TS),
            sign(SECRET, CONSUMER, "POST", URL, "", TS),
            sign(SECRET, CONSUMER, "POST", URL, BODY, TS + 1),
        ];

        for (index, variant) in variants.iter().enumerate() {
            assert_ne!(&base, variant, "field #{} did not affect the signature", index);
        }

        let mut unique = variants.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), variants.len());
    }

    #[test]
    fn test_non_ascii_body_is_hashed_as_utf8() {
        let body = r#"{"email":"josé@example.org"}"#;
        let signature = sign(SECRET, CONSUMER, "POST", URL, body, TS);

        let mut wire = Vec::new();
        wire.extend_from_slice(format!("{}+{}+POST+{}+", SECRET, CONSUMER, URL).as_bytes());
        wire.extend_from_slice(body.as_bytes());
        wire.extend_from_slice(format!("+{}", TS).as_bytes());
        assert!(wire.windows(2).any(|w| w == [0xC3, 0xA9]));

        assert_eq!(signature, format!("$1${}", hex::encode(Sha1::digest(&wire))));

        // 不同的非 ASCII 字元不能被折疊成同一個簽章
        let other = sign(SECRET, CONSUMER, "POST", URL, r#"{"email":"jos€@example.org"}"#, TS);
        assert_ne!(signature, other);
    }
}
