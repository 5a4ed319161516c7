use axum::response::Json;
use translator_application::{
    describe, health, HealthResponse, LanguagesResponse, ServiceDescription,
};

pub async fn service_root() -> Json<ServiceDescription> {
    Json(describe())
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(health())
}

pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(translator_application::list_languages())
}
