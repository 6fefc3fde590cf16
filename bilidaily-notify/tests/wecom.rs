use std::time::Duration;

use bilidaily_config::{NetworkConfig, WechatWorkConfig};
use bilidaily_notify::{Notifier, NotifyError, WeComNotifier};
use bilidaily_utilities::memory::LogBuffer;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wecom(server: &MockServer, enabled: bool) -> WechatWorkConfig {
    WechatWorkConfig {
        enabled,
        corpid: "corp".into(),
        corpsecret: "secret".into(),
        agentid: 1000002,
        touser: "@all".into(),
        base_url: Some(server.uri()),
    }
}

#[tokio::test]
async fn sends_title_and_captured_logs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .and(query_param("corpid", "corp"))
        .and(query_param("corpsecret", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errcode": 0, "errmsg": "ok", "access_token": "tok"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/message/send"))
        .and(query_param("access_token", "tok"))
        .and(body_partial_json(json!({
            "touser": "@all",
            "msgtype": "text",
            "agentid": 1000002,
            "text": { "content": "BiliDaily\nlogged in as viewer\n2/2 tasks succeeded" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errcode": 0, "errmsg": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let logs = LogBuffer::new();
    logs.push("logged in as viewer");
    logs.push("");
    logs.push("2/2 tasks succeeded");

    let notifier = WeComNotifier::new(Some(wecom(&server, true)), &NetworkConfig::default(), logs).unwrap();
    assert!(notifier.notify("BiliDaily").await.unwrap());
}

#[tokio::test]
async fn disabled_channel_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = WeComNotifier::new(Some(wecom(&server, false)), &NetworkConfig::default(), LogBuffer::new()).unwrap();
    assert!(!notifier.notify("BiliDaily").await.unwrap());

    let unconfigured = WeComNotifier::new(None, &NetworkConfig::default(), LogBuffer::new()).unwrap();
    assert!(!unconfigured.notify("BiliDaily").await.unwrap());
}

#[tokio::test]
async fn token_errors_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errcode": 40013, "errmsg": "invalid corpid"
        })))
        .mount(&server)
        .await;

    let notifier = WeComNotifier::new(Some(wecom(&server, true)), &NetworkConfig::default(), LogBuffer::new()).unwrap();
    let err = notifier.notify("BiliDaily").await.unwrap_err();
    assert!(matches!(err, NotifyError::Service { stage: "gettoken", errcode: 40013, .. }));
}

#[tokio::test]
async fn stalled_channel_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "errcode": 0, "errmsg": "ok", "access_token": "tok" }))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let network = NetworkConfig {
        timeout: 200,
        ..NetworkConfig::default()
    };
    let notifier = WeComNotifier::new(Some(wecom(&server, true)), &network, LogBuffer::new()).unwrap();

    let outcome = tokio::time::timeout(Duration::from_secs(10), notifier.notify("BiliDaily")).await;
    let err = outcome.expect("notify should give up on its own").unwrap_err();
    assert!(matches!(err, NotifyError::Request(ref source) if source.is_timeout()));
}
