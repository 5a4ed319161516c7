use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use translator_application::TranslationUseCase;
use translator_configuration::CorsConfig;

pub mod error;
pub mod handlers;

pub use error::HttpError;
pub use handlers::*;

#[derive(Clone)]
pub struct HttpState {
    pub usecase: Arc<dyn TranslationUseCase>,
}

impl HttpState {
    pub fn new(usecase: Arc<dyn TranslationUseCase>) -> Self {
        Self { usecase }
    }
}

pub fn create_router(
    state: HttpState,
    cors: &CorsConfig,
    max_request_bytes: usize,
) -> anyhow::Result<Router> {
    // Uploads ride in multipart bodies; the default 2MB cap is below the upload limit.
    let upload_limit = DefaultBodyLimit::max(max_request_bytes);

    Ok(Router::new()
        .route("/", get(service_root))
        .route("/health", get(health_check))
        .route("/languages", get(list_languages))
        .route("/translate/voice", post(translate_voice))
        .route("/translate/text", post(translate_text))
        .route("/test/upload", post(test_upload))
        .layer(upload_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors)?)
        .with_state(state))
}

fn cors_layer(cors: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin `{origin}`"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}
