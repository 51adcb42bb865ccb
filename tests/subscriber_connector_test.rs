use anyhow::Result;
use httpmock::prelude::*;
use mailinglist::{ErrorKind, MailingListConnector, OvhSubscriberConnector, ProfileConfiguration};
use serde_json::json;
use sha1::{Digest, Sha1};

const APP_SECRET: &str = "app-secret";
const CONSUMER_KEY: &str = "consumer-key";

fn profile(server: &MockServer) -> ProfileConfiguration {
    ProfileConfiguration::from_iter([
        ("endpoint", server.base_url()),
        ("appKey", "app-key".to_string()),
        ("appSecret", APP_SECRET.to_string()),
        ("consumerKey", CONSUMER_KEY.to_string()),
        ("connector", "ovh".to_string()),
    ])
}

fn header<'a>(req: &'a HttpMockRequest, name: &str) -> Option<&'a str> {
    req.headers
        .as_ref()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// 以收到的原始 body 位元組重新計算簽章，和後端的驗證方式相同
fn signature_covers_wire_bytes(req: &HttpMockRequest) -> bool {
    let (Some(host), Some(timestamp), Some(signature)) = (
        header(req, "host"),
        header(req, "x-ovh-timestamp"),
        header(req, "x-ovh-signature"),
    ) else {
        return false;
    };

    let mut signed = format!(
        "{}+{}+{}+http://{}{}+",
        APP_SECRET, CONSUMER_KEY, req.method, host, req.path
    )
    .into_bytes();
    signed.extend_from_slice(req.body.as_deref().unwrap_or_default());
    signed.extend_from_slice(format!("+{}", timestamp).as_bytes());

    signature == format!("$1${}", hex::encode(Sha1::digest(&signed)))
}

/// 同一個 email 連續加入兩次：不做用戶端去重，兩次 POST 內容相同
#[tokio::test]
async fn test_add_twice_sends_two_identical_posts() -> Result<()> {
    let server = MockServer::start_async().await;
    let add_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/email/domain/example.com/mailingList/news/subscriber")
                .header("x-ovh-application", "app-key")
                .header("x-ovh-consumer", "consumer-key")
                .header_exists("x-ovh-signature")
                .json_body(json!({"email": "a@example.org"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"action": "mailinglist/addSubscriber", "id": 1}));
        })
        .await;

    let connector = OvhSubscriberConnector::new()?;
    let profile = profile(&server);

    connector.add(&profile, "news@example.com", "a@example.org").await?;
    connector.add(&profile, "news@example.com", "a@example.org").await?;

    add_mock.assert_hits_async(2).await;
    Ok(())
}

/// 非 ASCII 的 email：簽章必須涵蓋實際送出的 body 位元組
#[tokio::test]
async fn test_signature_covers_non_ascii_body_on_the_wire() -> Result<()> {
    let server = MockServer::start_async().await;
    let add_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/email/domain/example.com/mailingList/news/subscriber")
                .body_contains("josé@example.org")
                .matches(signature_covers_wire_bytes);
            then.status(200).body("null");
        })
        .await;

    let connector = OvhSubscriberConnector::new()?;
    connector
        .add(&profile(&server), "news@example.com", "josé@example.org")
        .await?;

    add_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_delete_targets_subscriber_path() -> Result<()> {
    let server = MockServer::start_async().await;
    let delete_mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/email/domain/example.com/mailingList/news/subscriber/a%40example.org")
                .matches(signature_covers_wire_bytes);
            then.status(200).body("null");
        })
        .await;

    let connector = OvhSubscriberConnector::new()?;
    connector
        .delete(&profile(&server), "news@example.com", "a@example.org")
        .await?;

    delete_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_get_members_returns_subscribers_verbatim() -> Result<()> {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/email/domain/example.com/mailingList/news/subscriber");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!(["b@example.org", "a@example.org", "c@example.org"]));
        })
        .await;

    let connector = OvhSubscriberConnector::new()?;
    let members = connector
        .get_members(&profile(&server), "news@example.com")
        .await?;

    list_mock.assert_async().await;
    assert_eq!(members, vec!["b@example.org", "a@example.org", "c@example.org"]);
    Ok(())
}

#[tokio::test]
async fn test_get_members_of_empty_list() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/email/domain/example.com/mailingList/news/subscriber");
            then.status(200).json_body(json!([]));
        })
        .await;

    let connector = OvhSubscriberConnector::new()?;
    let members = connector
        .get_members(&profile(&server), "news@example.com")
        .await?;

    assert!(members.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_not_found_response_is_transport_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/email/domain/example.com/mailingList/missing/subscriber");
            then.status(404)
                .header("Content-Type", "application/json")
                .body(r#"{"message":"not found"}"#);
        })
        .await;

    let connector = OvhSubscriberConnector::new()?;
    let err = connector
        .get_members(&profile(&server), "missing@example.com")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("not found"));
    Ok(())
}

#[tokio::test]
async fn test_unexpected_response_shape_is_decode_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/email/domain/example.com/mailingList/news/subscriber");
            then.status(200).json_body(json!({"subscribers": ["a@example.org"]}));
        })
        .await;

    let connector = OvhSubscriberConnector::new()?;
    let err = connector
        .get_members(&profile(&server), "news@example.com")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    Ok(())
}

#[tokio::test]
async fn test_malformed_list_address_sends_nothing() -> Result<()> {
    let server = MockServer::start_async().await;
    let add_mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).body("null");
        })
        .await;

    let connector = OvhSubscriberConnector::new()?;
    let err = connector
        .add(&profile(&server), "news.example.com", "a@example.org")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Encoding);
    assert_eq!(add_mock.hits_async().await, 0);
    Ok(())
}
