use farsight_http::{Auth, HttpClient, HttpError, RequestOpts};
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn post_json_sends_body_and_custom_auth_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "secret-key"))
        .and(body_json(json!({"q": "rust", "num": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let got: Value = client
        .post_json(
            "search",
            &json!({"q": "rust", "num": 3}),
            RequestOpts {
                auth: Some(Auth::Header {
                    name: HeaderName::from_static("x-api-key"),
                    value: HeaderValue::from_static("secret-key"),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(got, json!({"ok": true}));
}

#[tokio::test]
async fn post_json_applies_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/echo"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let _: Value = client
        .post_json(
            "v1/echo",
            &json!({}),
            RequestOpts {
                auth: Some(Auth::Bearer("tok123")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn non_success_status_becomes_api_error_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Unauthorized."})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .post_json::<_, Value>("search", &json!({}), RequestOpts::default())
        .await
        .unwrap_err();

    match err {
        HttpError::Api { status, message } => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(message, "Unauthorized.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_body_becomes_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .post_json::<_, Value>("search", &json!({}), RequestOpts::default())
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::Decode(_, _)));
}
