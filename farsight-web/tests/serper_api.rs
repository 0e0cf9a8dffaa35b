use farsight_web::serper::{SearchClient, SerperClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SerperClient {
    SerperClient::new(&server.uri(), "test-key".into()).expect("client should build")
}

#[tokio::test]
async fn search_parses_organic_results_in_provider_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "test-key"))
        .and(body_json(json!({"q": "rust ownership", "num": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [
                {"title": "The Rust Book", "link": "https://doc.rust-lang.org/book/", "snippet": "Ownership rules."},
                {"title": "Rust by Example", "link": "https://doc.rust-lang.org/rust-by-example/"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client(&server).search("rust ownership", 3).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "The Rust Book");
    assert_eq!(results[0].snippet, "Ownership rules.");
    assert_eq!(results[1].title, "Rust by Example");
    // Fields the provider omitted carry placeholders, never empty strings.
    assert_eq!(results[1].snippet, "No description available");
}

#[tokio::test]
async fn count_below_one_is_clamped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(json!({"q": "q", "num": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organic": []})))
        .expect(1)
        .mount(&server)
        .await;

    let results = client(&server).search("q", 0).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn missing_organic_key_is_no_results_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"searchParameters": {"q": "x"}})),
        )
        .mount(&server)
        .await;

    let results = client(&server).search("x", 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn unparseable_body_is_no_results_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>surprise</html>"))
        .mount(&server)
        .await;

    let results = client(&server).search("x", 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn http_failure_becomes_search_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "upstream down"})))
        .mount(&server)
        .await;

    let err = client(&server).search("x", 5).await.unwrap_err();
    assert!(err.message.contains("upstream down"));
}
