use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use readysold_core::{create_app, AppConfig, AppState, EmailMessage, Mailer, MailerError, ResendMailer};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mailer_for(server: &MockServer) -> ResendMailer {
    ResendMailer::new("re_test_key", &server.uri(), Duration::from_secs(5)).unwrap()
}

fn message(reply_to: Option<&str>) -> EmailMessage {
    EmailMessage {
        from: "ReadySold <noreply@readysold.co.uk>".to_string(),
        to: "hello@readysold.co.uk".to_string(),
        subject: "New Valuation Request - AB12CDE".to_string(),
        html: "<p>lead</p>".to_string(),
        reply_to: reply_to.map(str::to_string),
    }
}

#[tokio::test]
async fn test_send_posts_payload_with_bearer_auth() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header_eq("authorization", "Bearer re_test_key"))
        .and(body_partial_json(json!({
            "from": "ReadySold <noreply@readysold.co.uk>",
            "to": ["hello@readysold.co.uk"],
            "subject": "New Valuation Request - AB12CDE",
            "html": "<p>lead</p>",
            "reply_to": "jane@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let receipt = mailer_for(&mock_server)
        .send(&message(Some("jane@example.com")))
        .await
        .unwrap();

    assert_eq!(receipt.id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");
}

#[tokio::test]
async fn test_reply_to_omitted_when_absent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    mailer_for(&mock_server).send(&message(None)).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("reply_to").is_none());
}

#[tokio::test]
async fn test_provider_error_message_passes_through() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "statusCode": 422,
            "name": "validation_error",
            "message": "Invalid `to` field."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = mailer_for(&mock_server).send(&message(None)).await.unwrap_err();

    match err {
        MailerError::Provider { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Invalid `to` field.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_provider_error_without_json_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = mailer_for(&mock_server).send(&message(None)).await.unwrap_err();
    assert_eq!(err.to_string(), "Service Unavailable");
}

#[tokio::test]
async fn test_unexpected_success_body_is_invalid_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = mailer_for(&mock_server).send(&message(None)).await.unwrap_err();
    assert!(matches!(err, MailerError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_send_email_endpoint_reports_provider_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "name": "validation_error",
            "message": "The readysold.co.uk domain is not verified."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = AppConfig::default();
    config.email.api_key = Some("re_test_key".to_string());
    config.email.api_base_url = mock_server.uri();
    config.email.send_confirmation = false;

    let app = create_app(AppState::from_config(&config).unwrap());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/send-email")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "type": "hero-form", "data": { "name": "Jane Doe" } }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({
            "error": "Failed to send email",
            "details": "The readysold.co.uk domain is not verified."
        })
    );
}
