use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use translator_domain::{AudioFormat, DomainError, RecognitionPort, RecognitionRequest};
use translator_infra_asr_http::{HttpRecognitionAdapter, HttpRecognitionConfig};

#[derive(Clone, Default)]
struct Captured {
    fields: Arc<Mutex<Vec<(String, String)>>>,
}

async fn start(reply: (StatusCode, Value), captured: Captured) -> SocketAddr {
    let app = Router::new()
        .route(
            "/v1/audio/transcriptions",
            post(
                move |State(captured): State<Captured>, mut multipart: Multipart| {
                    let reply = reply.clone();
                    async move {
                        while let Ok(Some(field)) = multipart.next_field().await {
                            let name = field.name().unwrap_or_default().to_string();
                            let value = if name == "file" {
                                let file_name = field.file_name().unwrap_or_default().to_string();
                                let content_type =
                                    field.content_type().unwrap_or_default().to_string();
                                let size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
                                format!("{file_name}|{content_type}|{size}")
                            } else {
                                field.text().await.unwrap_or_default()
                            };
                            captured.fields.lock().expect("lock").push((name, value));
                        }
                        (reply.0, Json(reply.1))
                    }
                },
            ),
        )
        .with_state(captured);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });
    addr
}

fn adapter(addr: SocketAddr) -> HttpRecognitionAdapter {
    HttpRecognitionAdapter::new(HttpRecognitionConfig {
        base_url: format!("http://{addr}"),
        model: "whisper-1".to_string(),
        api_key: Some("secret".to_string()),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

fn staged_audio(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("clip.wav");
    std::fs::write(&path, vec![1u8; 128]).expect("write audio");
    path
}

#[tokio::test]
async fn uploads_staged_audio_and_returns_trimmed_text() {
    let captured = Captured::default();
    let addr = start(
        (StatusCode::OK, json!({ "text": "  hello world \n" })),
        captured.clone(),
    )
    .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let output = adapter(addr)
        .recognize(RecognitionRequest {
            audio_path: staged_audio(&dir),
            format: AudioFormat::Wav,
            language_hint: Some("en".to_string()),
        })
        .await
        .expect("recognition succeeds");

    assert_eq!(output.text, "hello world");
    let fields = captured.fields.lock().expect("lock").clone();
    assert!(fields.contains(&("file".to_string(), "clip.wav|audio/wav|128".to_string())));
    assert!(fields.contains(&("model".to_string(), "whisper-1".to_string())));
    assert!(fields.contains(&("language".to_string(), "en".to_string())));
    assert!(fields.contains(&("response_format".to_string(), "json".to_string())));
}

#[tokio::test]
async fn auto_language_hint_is_not_forwarded() {
    let captured = Captured::default();
    let addr = start((StatusCode::OK, json!({ "text": "hola" })), captured.clone()).await;
    let dir = tempfile::tempdir().expect("tempdir");

    adapter(addr)
        .recognize(RecognitionRequest {
            audio_path: staged_audio(&dir),
            format: AudioFormat::Wav,
            language_hint: Some("auto".to_string()),
        })
        .await
        .expect("recognition succeeds");

    let fields = captured.fields.lock().expect("lock").clone();
    assert!(fields.iter().all(|(name, _)| name != "language"));
}

#[tokio::test]
async fn empty_transcript_is_unrecognized_speech() {
    let addr = start((StatusCode::OK, json!({ "text": "" })), Captured::default()).await;
    let dir = tempfile::tempdir().expect("tempdir");

    let error = adapter(addr)
        .recognize(RecognitionRequest {
            audio_path: staged_audio(&dir),
            format: AudioFormat::Wav,
            language_hint: None,
        })
        .await
        .expect_err("empty transcript fails");

    assert_eq!(error, DomainError::UnrecognizedSpeech);
}

#[tokio::test]
async fn server_errors_are_reported_as_unavailable() {
    let addr = start(
        (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "overloaded" })),
        Captured::default(),
    )
    .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let error = adapter(addr)
        .recognize(RecognitionRequest {
            audio_path: staged_audio(&dir),
            format: AudioFormat::Wav,
            language_hint: None,
        })
        .await
        .expect_err("503 fails");

    assert!(matches!(error, DomainError::ServiceUnavailable { .. }));
}

#[tokio::test]
async fn rejected_credentials_are_reported_as_unavailable() {
    let addr = start(
        (StatusCode::UNAUTHORIZED, json!({ "error": "invalid api key" })),
        Captured::default(),
    )
    .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let error = adapter(addr)
        .recognize(RecognitionRequest {
            audio_path: staged_audio(&dir),
            format: AudioFormat::Wav,
            language_hint: None,
        })
        .await
        .expect_err("401 fails");

    let DomainError::ServiceUnavailable { message, .. } = error else {
        panic!("expected service unavailable error");
    };
    assert!(message.contains("invalid api key"));
}

#[tokio::test]
async fn malformed_reply_is_a_fault() {
    let addr = start((StatusCode::OK, json!(["not", "an", "object"])), Captured::default()).await;
    let dir = tempfile::tempdir().expect("tempdir");

    let error = adapter(addr)
        .recognize(RecognitionRequest {
            audio_path: staged_audio(&dir),
            format: AudioFormat::Wav,
            language_hint: None,
        })
        .await
        .expect_err("undecodable body fails");

    assert!(matches!(error, DomainError::ExternalService { .. }));
}

#[tokio::test]
async fn unreachable_recognizer_is_unavailable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let dir = tempfile::tempdir().expect("tempdir");

    let error = adapter(addr)
        .recognize(RecognitionRequest {
            audio_path: staged_audio(&dir),
            format: AudioFormat::Wav,
            language_hint: None,
        })
        .await
        .expect_err("closed port fails");

    assert!(matches!(error, DomainError::ServiceUnavailable { .. }));
}
