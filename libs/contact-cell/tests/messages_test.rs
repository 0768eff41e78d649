// libs/contact-cell/tests/messages_test.rs
use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use contact_cell::models::{ContactError, SubmitMessageRequest};
use contact_cell::services::messages::ContactMessageService;
use shared_config::AppConfig;

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        supabase_url: server.uri(),
        supabase_anon_key: "test-anon-key".to_string(),
        supabase_jwt_secret: "test-secret".to_string(),
    }
}

fn message_row() -> serde_json::Value {
    json!({
        "id": "770e8400-e29b-41d4-a716-446655440002",
        "name": "João Pereira",
        "email": "joao@example.com",
        "phone": null,
        "message": "Gostaria de um orçamento",
        "read": false,
        "created_at": "2025-06-02T12:00:00Z"
    })
}

#[tokio::test]
async fn blank_submissions_are_rejected_before_any_request() {
    let server = MockServer::start().await;
    let service = ContactMessageService::new(&test_config(&server));

    let result = service
        .submit(SubmitMessageRequest {
            name: "  ".to_string(),
            email: None,
            phone: None,
            message: "Olá".to_string(),
        })
        .await;
    assert_matches!(result, Err(ContactError::ValidationError(_)));

    let result = service
        .submit(SubmitMessageRequest {
            name: "João".to_string(),
            email: None,
            phone: None,
            message: "   ".to_string(),
        })
        .await;
    assert_matches!(result, Err(ContactError::ValidationError(_)));
}

#[tokio::test]
async fn submission_stores_the_trimmed_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/contact_messages"))
        .and(body_partial_json(json!({
            "name": "João Pereira",
            "message": "Gostaria de um orçamento",
            "read": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([message_row()])))
        .mount(&server)
        .await;

    let service = ContactMessageService::new(&test_config(&server));
    let message = service
        .submit(SubmitMessageRequest {
            name: " João Pereira ".to_string(),
            email: Some("joao@example.com".to_string()),
            phone: None,
            message: " Gostaria de um orçamento ".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(message.name, "João Pereira");
    assert!(!message.read);
}

#[tokio::test]
async fn unread_filter_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/contact_messages"))
        .and(query_param("read", "eq.false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([message_row()])))
        .mount(&server)
        .await;

    let service = ContactMessageService::new(&test_config(&server));
    let messages = service.list(true, "admin-token").await.unwrap();
    assert_eq!(messages.len(), 1);
}

#[tokio::test]
async fn marking_a_missing_message_read_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/contact_messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let service = ContactMessageService::new(&test_config(&server));
    let result = service.mark_read("missing-id", "admin-token").await;
    assert_matches!(result, Err(ContactError::NotFound));
}
