use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use translator_domain::{DomainError, TranslationPort, TranslationRequest};
use translator_infra_translate_http::{HttpTranslationAdapter, HttpTranslationConfig};

type Requests = Arc<Mutex<Vec<Value>>>;

async fn start(reply: (StatusCode, Value), requests: Requests) -> SocketAddr {
    let app = Router::new()
        .route(
            "/translate",
            post(
                move |State(requests): State<Requests>, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        requests.lock().expect("lock").push(body);
                        (reply.0, Json(reply.1))
                    }
                },
            ),
        )
        .with_state(requests);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });
    addr
}

fn adapter(addr: SocketAddr, source_language: &str) -> HttpTranslationAdapter {
    HttpTranslationAdapter::new(HttpTranslationConfig {
        base_url: format!("http://{addr}"),
        api_key: Some("key-123".to_string()),
        source_language: source_language.to_string(),
        language_aliases: HashMap::from([("zh-cn".to_string(), "zh".to_string())]),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

fn request(text: &str, target: &str) -> TranslationRequest {
    TranslationRequest {
        text: text.to_string(),
        target_language: target.to_string(),
    }
}

#[tokio::test]
async fn translates_and_reports_detected_language() {
    let requests = Requests::default();
    let addr = start(
        (
            StatusCode::OK,
            json!({
                "translatedText": "Hola",
                "detectedLanguage": { "confidence": 92.0, "language": "en" }
            }),
        ),
        requests.clone(),
    )
    .await;

    let output = adapter(addr, "auto")
        .translate(request("Hello", "es"))
        .await
        .expect("translation succeeds");

    assert_eq!(output.text, "Hola");
    assert_eq!(output.source_language, "en");
    assert_eq!(output.pronunciation, None);

    let sent = requests.lock().expect("lock").clone();
    assert_eq!(
        sent,
        vec![json!({
            "q": "Hello",
            "source": "auto",
            "target": "es",
            "format": "text",
            "api_key": "key-123"
        })]
    );
}

#[tokio::test]
async fn aliased_target_and_pronunciation_pass_through() {
    let requests = Requests::default();
    let addr = start(
        (
            StatusCode::OK,
            json!({
                "translatedText": "你好",
                "detectedLanguage": { "language": "en" },
                "pronunciation": "Nǐ hǎo"
            }),
        ),
        requests.clone(),
    )
    .await;

    let output = adapter(addr, "auto")
        .translate(request("Hello", "zh-cn"))
        .await
        .expect("translation succeeds");

    assert_eq!(output.pronunciation.as_deref(), Some("Nǐ hǎo"));
    assert_eq!(requests.lock().expect("lock")[0]["target"], "zh");
}

#[tokio::test]
async fn fixed_source_language_is_reported_when_not_detected() {
    let addr = start(
        (StatusCode::OK, json!({ "translatedText": "Bonjour" })),
        Requests::default(),
    )
    .await;

    let output = adapter(addr, "en")
        .translate(request("Hello", "fr"))
        .await
        .expect("translation succeeds");

    assert_eq!(output.source_language, "en");
}

#[tokio::test]
async fn rejected_language_is_a_fault_with_provider_message() {
    let addr = start(
        (
            StatusCode::BAD_REQUEST,
            json!({ "error": "xx is not supported" }),
        ),
        Requests::default(),
    )
    .await;

    let error = adapter(addr, "auto")
        .translate(request("Hello", "xx"))
        .await
        .expect_err("unsupported language fails");

    assert_eq!(
        error.detail(),
        "HTTP 400 Bad Request: xx is not supported".to_string()
    );
    assert!(matches!(error, DomainError::ExternalService { .. }));
}

#[tokio::test]
async fn overloaded_translator_is_unavailable() {
    let addr = start(
        (StatusCode::TOO_MANY_REQUESTS, json!({ "error": "slow down" })),
        Requests::default(),
    )
    .await;

    let error = adapter(addr, "auto")
        .translate(request("Hello", "es"))
        .await
        .expect_err("429 fails");

    assert!(matches!(error, DomainError::ServiceUnavailable { .. }));
}

#[tokio::test]
async fn malformed_reply_is_a_fault() {
    let addr = start(
        (StatusCode::OK, json!({ "unexpected": true })),
        Requests::default(),
    )
    .await;

    let error = adapter(addr, "auto")
        .translate(request("Hello", "es"))
        .await
        .expect_err("missing translatedText fails");

    assert!(matches!(error, DomainError::ExternalService { .. }));
}
