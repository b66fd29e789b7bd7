//! End-to-end tests driving the router with a mocked document host and a
//! mocked chat completions API.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use httpmock::{Method::GET, Method::POST, MockServer};
use serde_json::{json, Value};
use tower::ServiceExt;

use doc_query::config::{AnswerMode, AppConfig, SelectorStrategy};
use doc_query::server::{routes, state::AppState};

const POLICY_TEXT: &str = "The first rule concerns quartz handling.\n\n\
    The second rule concerns basalt storage.\n\n\
    Passwords must be 8 characters. Renew every 90 days.";

fn test_config(mock_base_url: &str, mode: AnswerMode) -> AppConfig {
    let mut config = AppConfig::default();
    config.llm.api_base = format!("{mock_base_url}/llm");
    config.llm.api_key = Some("test-key".to_string());
    config.llm.answer_mode = mode;
    config.llm.timeout_secs = 5;
    config.retrieval.strategy = SelectorStrategy::Lexical;
    config.server.fetch_timeout_secs = 5;
    config
}

fn test_router(mock_base_url: &str, mode: AnswerMode) -> axum::Router {
    let state = AppState::new(test_config(mock_base_url, mode)).expect("state");
    routes::router(state)
}

/// OpenAI-style chat response whose assistant message is a JSON document.
fn chat_json_reply(inner: Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": inner.to_string()},
            "finish_reason": "stop"
        }]
    })
}

/// OpenAI-style chat response with a plain-text assistant message.
fn chat_text_reply(text: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn query_returns_one_answer_per_question_in_order() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/policy.txt");
            then.status(200).body(POLICY_TEXT);
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/llm/chat/completions")
                .body_contains("QID-ONE");
            then.status(200).json_body(chat_json_reply(json!({
                "decision": "answered",
                "amount": null,
                "justification": "Passwords must be 8 characters long.",
                "clauses_used": [{"text": "Passwords must be 8 characters.", "page": 1}]
            })));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/llm/chat/completions")
                .body_contains("QID-TWO");
            then.status(200).json_body(chat_json_reply(json!({
                "decision": "answered",
                "amount": null,
                "justification": "Renewal happens every 90 days.",
                "clauses_used": []
            })));
        })
        .await;

    let router = test_router(&server.base_url(), AnswerMode::Structured);
    let (status, body) = post_json(
        router,
        "/api/v1/query",
        json!({
            "documents": format!("{}/policy.txt", server.base_url()),
            "questions": [
                "QID-ONE What is the password length requirement?",
                "QID-TWO How often must passwords be renewed?"
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let answers = body["answers"].as_array().expect("answers array");
    assert_eq!(answers.len(), 2);

    assert_eq!(answers[0]["status"], "ok");
    assert_eq!(answers[0]["answer"]["decision"], "answered");
    assert!(answers[0]["answer"]["justification"]
        .as_str()
        .unwrap()
        .contains("8 characters"));

    assert_eq!(answers[1]["status"], "ok");
    assert!(answers[1]["answer"]["justification"]
        .as_str()
        .unwrap()
        .contains("90 days"));
}

#[tokio::test]
async fn one_failing_question_does_not_abort_the_batch() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/policy.txt");
            then.status(200).body(POLICY_TEXT);
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/llm/chat/completions")
                .body_contains("QID-ONE");
            then.status(200).json_body(chat_json_reply(json!({
                "decision": "answered",
                "amount": null,
                "justification": "Quartz is covered by the first rule.",
                "clauses_used": []
            })));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/llm/chat/completions")
                .body_contains("QID-FAIL");
            then.status(500).body("upstream exploded");
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/llm/chat/completions")
                .body_contains("QID-THREE");
            then.status(200).json_body(chat_json_reply(json!({
                "decision": "answered",
                "amount": null,
                "justification": "Basalt is covered by the second rule.",
                "clauses_used": []
            })));
        })
        .await;

    let router = test_router(&server.base_url(), AnswerMode::Structured);
    let (status, body) = post_json(
        router,
        "/api/v1/query",
        json!({
            "documents": format!("{}/policy.txt", server.base_url()),
            "questions": [
                "QID-ONE What does the first rule cover?",
                "QID-FAIL deliberate upstream failure",
                "QID-THREE What does the second rule cover?"
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let answers = body["answers"].as_array().expect("answers array");
    assert_eq!(answers.len(), 3);

    assert_eq!(answers[0]["status"], "ok");
    assert_eq!(answers[1]["status"], "error");
    assert!(answers[1]["error"].as_str().unwrap().contains("500"));
    assert_eq!(answers[2]["status"], "ok");
    assert!(answers[2]["answer"]["justification"]
        .as_str()
        .unwrap()
        .contains("second rule"));
}

#[tokio::test]
async fn document_fetch_failure_fails_the_whole_request() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing.pdf");
            then.status(404).body("not here");
        })
        .await;

    let router = test_router(&server.base_url(), AnswerMode::Structured);
    let (status, body) = post_json(
        router,
        "/api/v1/query",
        json!({
            "documents": format!("{}/missing.pdf", server.base_url()),
            "questions": ["Does this matter?"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "fetch_error");
    assert!(body["detail"].as_str().unwrap().contains("404"));
    assert!(body.get("answers").is_none());
}

#[tokio::test]
async fn unsupported_extension_fails_naming_the_extension() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/data.xyz");
            then.status(200).body("binary-ish content");
        })
        .await;

    let router = test_router(&server.base_url(), AnswerMode::Structured);
    let (status, body) = post_json(
        router,
        "/api/v1/query",
        json!({
            "documents": format!("{}/data.xyz", server.base_url()),
            "questions": ["Anything?"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "unsupported_format");
    assert!(body["detail"].as_str().unwrap().contains("xyz"));
}

#[tokio::test]
async fn upload_answers_in_plain_mode() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/llm/chat/completions");
            then.status(200)
                .json_body(chat_text_reply("  Badges are renewed every 90 days.  "));
        })
        .await;

    let boundary = "test-boundary";
    let questions = json!(["How often are badges renewed?"]).to_string();
    let multipart_body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"policy.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {POLICY_TEXT}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"questions\"\r\n\r\n\
         {questions}\r\n\
         --{boundary}--\r\n"
    );

    let router = test_router(&server.base_url(), AnswerMode::Plain);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(multipart_body))
        .expect("request");

    let response = router.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");

    let answers = body["answers"].as_array().expect("answers array");
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["status"], "ok");
    // Plain answers come back trimmed.
    assert_eq!(answers[0]["answer"], "Badges are renewed every 90 days.");
}

#[tokio::test]
async fn missing_api_key_degrades_per_question_instead_of_failing_the_request() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/policy.txt");
            then.status(200).body(POLICY_TEXT);
        })
        .await;

    let mut config = test_config(&server.base_url(), AnswerMode::Structured);
    config.llm.api_key = None;
    let state = AppState::new(config).expect("state");
    let router = routes::router(state);

    let (status, body) = post_json(
        router,
        "/api/v1/query",
        json!({
            "documents": format!("{}/policy.txt", server.base_url()),
            "questions": ["What is the password rule?"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let answers = body["answers"].as_array().expect("answers array");
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["status"], "error");
    assert!(answers[0]["error"].as_str().unwrap().contains("GROQ_API_KEY"));
}

#[tokio::test]
async fn health_and_home_are_served() {
    let server = MockServer::start_async().await;
    let router = test_router(&server.base_url(), AnswerMode::Structured);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("Document Query System"));
}
