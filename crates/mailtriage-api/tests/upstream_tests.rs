//! Tests against mocked upstream model APIs.
//!
//! wiremock stands in for OpenAI chat completions and Hugging Face
//! zero-shot inference. Each test checks either the request shape and
//! the use of the answer, or the local fallback when the upstream fails.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mailtriage_api::classifier::ZeroShotClassifier;
use mailtriage_api::config::{AppConfig, OpenAiConfig, ZeroShotConfig};
use mailtriage_api::state::AppState;
use mailtriage_api::upstream::{http_client, UpstreamError};
use mailtriage_core::replies::canned_replies;
use mailtriage_core::Category;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeroize::Zeroizing;

fn openai_config(server: &MockServer) -> OpenAiConfig {
    OpenAiConfig {
        api_key: Zeroizing::new("sk-test".into()),
        model: "gpt-3.5-turbo".into(),
        base_url: server.uri().parse().unwrap(),
    }
}

fn zero_shot_config(server: &MockServer) -> ZeroShotConfig {
    ZeroShotConfig {
        api_token: Zeroizing::new("hf-test".into()),
        model: "facebook/bart-large-mnli".into(),
        base_url: server.uri().parse().unwrap(),
    }
}

fn app_with(openai: Option<OpenAiConfig>, zero_shot: Option<ZeroShotConfig>) -> axum::Router {
    let config = AppConfig {
        frontend_dir: PathBuf::from("/nonexistent/mailtriage/frontend"),
        upstream_timeout_secs: 5,
        openai,
        zero_shot,
        ..AppConfig::default()
    };
    mailtriage_api::app(AppState::new(config).unwrap())
}

async fn post_text(app: axum::Router, text: &str) -> serde_json::Value {
    let request = Request::builder()
        .method("POST")
        .uri("/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "text": text }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// -- OpenAI replies -----------------------------------------------------------

#[tokio::test]
async fn chat_completion_becomes_suggested_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header_eq("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.5,
            "max_tokens": 200,
            "messages": [
                {"role": "system", "content": "Você é um assistente que responde emails de forma clara e cordial."},
                {"role": "user", "content": "Qual o status do meu pedido?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  Seu pedido está em análise.  "}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = post_text(
        app_with(Some(openai_config(&server)), None),
        "  Qual o status do meu pedido?  ",
    )
    .await;
    assert_eq!(body["suggested_response"], "Seu pedido está em análise.");
}

#[tokio::test]
async fn chat_failure_falls_back_to_canned_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let body = post_text(
        app_with(Some(openai_config(&server)), None),
        "Preciso de suporte com a fatura",
    )
    .await;
    assert_eq!(body["category"], "Produtivo");
    let reply = body["suggested_response"].as_str().unwrap();
    assert!(canned_replies(Category::Productive).contains(&reply));
}

#[tokio::test]
async fn empty_completion_falls_back_to_canned_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let body = post_text(
        app_with(Some(openai_config(&server)), None),
        "Feliz natal a todos!",
    )
    .await;
    let reply = body["suggested_response"].as_str().unwrap();
    assert!(canned_replies(Category::Unproductive).contains(&reply));
}

// -- Zero-shot classification -------------------------------------------------

#[tokio::test]
async fn zero_shot_label_decides_category() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/facebook/bart-large-mnli"))
        .and(header_eq("authorization", "Bearer hf-test"))
        .and(body_partial_json(serde_json::json!({
            "inputs": "Preciso de suporte",
            "parameters": {"candidate_labels": ["Produtivo", "Improdutivo"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sequence": "Preciso de suporte",
            "labels": ["Improdutivo", "Produtivo"],
            "scores": [0.75, 0.25]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = post_text(app_with(None, Some(zero_shot_config(&server))), "Preciso de suporte").await;
    assert_eq!(body["category"], "Improdutivo");
    assert_eq!(body["scores"]["Improdutivo"], 0.75);
    assert_eq!(body["scores"]["Produtivo"], 0.25);
}

#[tokio::test]
async fn zero_shot_failure_falls_back_to_keywords() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/facebook/bart-large-mnli"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": "Model facebook/bart-large-mnli is currently loading"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = post_text(
        app_with(None, Some(zero_shot_config(&server))),
        "Obrigado e boas festas!",
    )
    .await;
    assert_eq!(body["category"], "Improdutivo");
}

#[tokio::test]
async fn zero_shot_errors_name_the_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/facebook/bart-large-mnli"))
        .respond_with(ResponseTemplate::new(503).set_body_string("loading"))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = ZeroShotClassifier::new(&zero_shot_config(&server), http_client(5).unwrap());
    let err = classifier.classify("Qual o status?").await.unwrap_err();

    match &err {
        UpstreamError::Api {
            endpoint, status, ..
        } => {
            assert_eq!(endpoint, "POST /models/facebook/bart-large-mnli");
            assert_eq!(*status, 503);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.to_string().contains("{model}"));
}

#[tokio::test]
async fn health_reports_remote_model() {
    let server = MockServer::start().await;
    let app = app_with(None, Some(zero_shot_config(&server)));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["model_loaded"], true);
}
