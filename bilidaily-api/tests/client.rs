use std::sync::Arc;

use bilidaily_api::{ApiError, BiliClient, Endpoints, ResponseExt, Session};
use bilidaily_config::Config;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, cookie: &str, retries: u32) -> BiliClient {
    let mut config = Config::default();
    config.network.retries = retries;
    BiliClient::new(&config, Arc::new(Session::new(cookie)))
        .unwrap()
        .with_endpoints(Endpoints::uniform(server.uri()))
}

#[tokio::test]
async fn nav_sends_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/nav"))
        .and(header("cookie", "SESSDATA=abc; bili_jct=tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "0",
            "data": {
                "isLogin": true,
                "uname": "viewer",
                "mid": 42,
                "level_info": { "current_level": 4 },
                "vipType": 1,
                "vipStatus": 1
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "SESSDATA=abc; bili_jct=tok", 0);
    let nav = client.nav().await.unwrap().into_data("nav").unwrap();
    assert!(nav.is_login);
    assert_eq!(nav.uname, "viewer");
    assert_eq!(nav.level_info.current_level, 4);
}

#[tokio::test]
async fn throttled_requests_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/ranking/v2"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/ranking/v2"))
        .and(query_param("rid", "0"))
        .and(query_param("type", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": { "list": [{ "aid": 1, "bvid": "BV1", "title": "one" }] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "", 1);
    let ranking = client.ranking().await.unwrap().into_data("ranking").unwrap();
    assert_eq!(ranking.list.len(), 1);
}

#[tokio::test]
async fn exhausted_retries_surface_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/site/getCoin"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, "", 1);
    let err = client.coin_balance().await.unwrap_err();
    match err {
        ApiError::Http { status, message, .. } => {
            assert_eq!(status.as_u16(), 502);
            assert_eq!(message, "bad gateway");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn coin_donation_posts_csrf_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/x/web-interface/coin/add"))
        .and(body_string_contains("aid=99"))
        .and(body_string_contains("multiply=2"))
        .and(body_string_contains("select_like=1"))
        .and(body_string_contains("csrf=tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 34005,
            "message": "over limit"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "bili_jct=tok", 0);
    let response = client.add_coin(99, 2, true).await.unwrap();
    let err = response.into_data("coin/add").unwrap_err();
    assert!(matches!(err, ApiError::Service { code: 34005, .. }));
}

#[tokio::test]
async fn qr_poll_collects_set_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/passport-login/web/qrcode/poll"))
        .and(query_param("qrcode_key", "key-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "SESSDATA=s1; Path=/; HttpOnly")
                .append_header("set-cookie", "bili_jct=j1; Path=/")
                .set_body_json(json!({
                    "code": 0,
                    "data": { "code": 0, "message": "", "refresh_token": "r", "timestamp": 1 }
                })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, "", 0);
    let poll = client.qrcode_poll("key-1").await.unwrap();
    assert_eq!(poll.cookie_string(), "SESSDATA=s1; bili_jct=j1");
    assert_eq!(poll.response.data.unwrap().code, 0);
}

#[tokio::test]
async fn non_json_bodies_are_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/nav"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, "", 0);
    assert!(matches!(client.nav().await, Err(ApiError::Decode { .. })));
}
