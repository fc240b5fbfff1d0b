//! ApiClient 与后端交互的行为测试

use clinic_client::{ApiClient, ApiError};
use serde::de::IgnoredAny;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> ApiClient {
    ApiClient::new(format!("{}/api/v1", server.uri()), token).unwrap()
}

#[tokio::test]
async fn test_sends_json_headers_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/patients"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(header("authorization", "Bearer abc123"))
        .and(body_json(json!({ "name": "Ana" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "p-1", "name": "Ana" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("abc123"));
    let created: Value = client.post("/patients", &json!({ "name": "Ana" })).await.unwrap();
    assert_eq!(created["id"], "p-1");
}

#[tokio::test]
async fn test_token_changes_apply_to_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/doctors"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token no permitido" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let doctors: Vec<Value> = client.get("/doctors").await.unwrap();
    assert!(doctors.is_empty());

    client.set_token("secret").await.unwrap();
    let err = client.get::<Vec<Value>>("/doctors").await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    client.remove_token().await;
    assert!(client.get::<Vec<Value>>("/doctors").await.is_ok());
}

#[tokio::test]
async fn test_error_message_comes_from_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/patients/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Paciente no encontrado" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.get::<Value>("/patients/missing").await.unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 404, .. }));
    assert_eq!(err.to_string(), "Paciente no encontrado");
}

#[tokio::test]
async fn test_error_message_fallback_for_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/invoices/inv-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client
        .put::<Value, _>("/invoices/inv-1", &json!({ "notes": "x" }))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(502));
    assert_eq!(err.to_string(), "Error de servidor 502");
}

#[tokio::test]
async fn test_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/treatments/t-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let _: IgnoredAny = client.delete("/treatments/t-1").await.unwrap();
}

#[tokio::test]
async fn test_invalid_json_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.get::<Vec<Value>>("/patients").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_network_failure_propagates() {
    let client = ApiClient::new("http://127.0.0.1:1/api/v1", None).unwrap();
    let err = client.get::<Value>("/patients").await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_single_attempt_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.get::<Vec<Value>>("/appointments").await.unwrap_err();
    assert_eq!(err.to_string(), "Error de servidor 503");
}
