//! # Integration Tests for mailtriage-api
//!
//! Drives the assembled router in-process: banner and health, text and
//! file classification, input rejection, body limits, the static front
//! end, CORS preflights, and OpenAPI generation. No remote model is
//! configured, so keyword classification and canned replies are in use.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mailtriage_api::config::AppConfig;
use mailtriage_api::routes::frontend::FRONTEND_MISSING;
use mailtriage_api::routes::status::BANNER;
use mailtriage_api::state::AppState;
use mailtriage_core::replies::canned_replies;
use mailtriage_core::Category;
use tower::ServiceExt;

const BOUNDARY: &str = "mailtriage-test-boundary";

/// Helper: build the test app with no front end deployed.
fn test_app() -> axum::Router {
    test_app_with(AppConfig {
        frontend_dir: PathBuf::from("/nonexistent/mailtriage/frontend"),
        ..AppConfig::default()
    })
}

fn test_app_with(config: AppConfig) -> axum::Router {
    mailtriage_api::app(AppState::new(config).unwrap())
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper: multipart request with a single part.
fn multipart_post(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/process-file")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// -- Status -------------------------------------------------------------------

#[tokio::test]
async fn test_root_banner() {
    let response = test_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, BANNER);
}

#[tokio::test]
async fn test_health_without_remote_model() {
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"status": "ok", "model_loaded": false}));
}

// -- POST /process ------------------------------------------------------------

#[tokio::test]
async fn test_process_text_productive() {
    let response = test_app()
        .oneshot(json_post(
            "/process",
            r#"{"text": "Preciso de suporte urgente com o chamado 4521, o acesso está com erro."}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["category"], "Produtivo");
    assert!(body["scores"]["Produtivo"].as_f64().unwrap() > 0.5);
    let reply = body["suggested_response"].as_str().unwrap();
    assert!(canned_replies(Category::Productive).contains(&reply));
    let preprocessed = body["preprocessed"].as_str().unwrap();
    assert!(!preprocessed.is_empty());
    assert!(!preprocessed.chars().any(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_process_text_unproductive() {
    let response = test_app()
        .oneshot(json_post(
            "/process",
            r#"{"text": "Feliz natal! Obrigado pela parceria, boas festas."}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["category"], "Improdutivo");
    let reply = body["suggested_response"].as_str().unwrap();
    assert!(canned_replies(Category::Unproductive).contains(&reply));
}

#[tokio::test]
async fn test_process_text_without_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/process")
        .body(Body::from(r#"{"text": "Qual o status do pedido?"}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_process_blank_text_returns_400() {
    let response = test_app()
        .oneshot(json_post("/process", r#"{"text": "   "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["message"], "field 'text' is empty or missing");
}

#[tokio::test]
async fn test_process_missing_text_returns_400() {
    let response = test_app()
        .oneshot(json_post("/process", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_invalid_json_returns_400() {
    let response = test_app()
        .oneshot(json_post("/process", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_process_body_over_limit_returns_413() {
    let app = test_app_with(AppConfig {
        frontend_dir: PathBuf::from("/nonexistent/mailtriage/frontend"),
        max_body_bytes: 64,
        ..AppConfig::default()
    });
    let text = "suporte ".repeat(50);
    let response = app
        .oneshot(json_post("/process", &format!(r#"{{"text": "{text}"}}"#)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_process_file_over_limit_returns_413() {
    let app = test_app_with(AppConfig {
        frontend_dir: PathBuf::from("/nonexistent/mailtriage/frontend"),
        max_body_bytes: 1024,
        ..AppConfig::default()
    });
    let content = "suporte ".repeat(512);
    let response = app
        .oneshot(multipart_post("file", "grande.txt", content.as_bytes()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}

// -- POST /process-file -------------------------------------------------------

#[tokio::test]
async fn test_process_file_txt() {
    let response = test_app()
        .oneshot(multipart_post(
            "file",
            "chamado.txt",
            "Olá, qual o andamento da solicitação de acesso?".as_bytes(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["category"], "Produtivo");
    assert!(body["suggested_response"].is_string());
}

#[tokio::test]
async fn test_process_file_without_file_field_returns_400() {
    let response = test_app()
        .oneshot(multipart_post("attachment", "chamado.txt", b"status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "send a file in the 'file' field");
}

#[tokio::test]
async fn test_process_file_with_empty_name_returns_400() {
    let response = test_app()
        .oneshot(multipart_post("file", "", b"status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_file_unsupported_format_returns_500() {
    let response = test_app()
        .oneshot(multipart_post("file", "relatorio.docx", b"PK\x03\x04"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("relatorio.docx"));
}

#[tokio::test]
async fn test_process_file_without_text_returns_400() {
    let response = test_app()
        .oneshot(multipart_post("file", "vazio.txt", b"  \n\t  "))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "could not extract any text from the file"
    );
}

#[tokio::test]
async fn test_process_file_requires_multipart() {
    let response = test_app()
        .oneshot(json_post("/process-file", r#"{"text": "status"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Front end ----------------------------------------------------------------

#[tokio::test]
async fn test_frontend_served_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>mailtriage</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('ok');").unwrap();

    let app = test_app_with(AppConfig {
        frontend_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    });

    let response = app.clone().oneshot(get("/app")).await.unwrap();
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/app/");

    let response = app.clone().oneshot(get("/app/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<h1>mailtriage</h1>");

    let response = app.clone().oneshot(get("/app/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/favicon.ico")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Pull the `src` of the first `<script>` tag out of a page.
fn script_src(html: &str) -> &str {
    let start = html.find("<script src=\"").unwrap() + "<script src=\"".len();
    let len = html[start..].find('"').unwrap();
    &html[start..start + len]
}

#[tokio::test]
async fn test_bundled_frontend_script_resolves_like_a_browser() {
    let app = test_app_with(AppConfig {
        frontend_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../frontend"),
        ..AppConfig::default()
    });

    let response = app.clone().oneshot(get("/app")).await.unwrap();
    assert!(response.status().is_redirection());
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();

    let response = app.clone().oneshot(get(&location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;

    let page = url::Url::parse("http://127.0.0.1:5000")
        .unwrap()
        .join(&location)
        .unwrap();
    let script = page.join(script_src(&html)).unwrap();
    assert_eq!(script.path(), "/app/app.js");

    let response = app.oneshot(get(script.path())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("/process-file"));
}

#[tokio::test]
async fn test_frontend_missing_returns_404() {
    let response = test_app().oneshot(get("/app")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, FRONTEND_MISSING);

    let response = test_app().oneshot(get("/app/index.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- CORS ---------------------------------------------------------------------

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/process")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let response = test_app()
        .oneshot(preflight("http://localhost:5173"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_cors_preflight_ignores_unknown_origin() {
    let response = test_app()
        .oneshot(preflight("https://evil.example.com"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_lists_endpoints() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/process"].is_object());
    assert!(body["paths"]["/process-file"].is_object());
    assert!(body["paths"]["/health"].is_object());
}
