use axum::{
    extract::{multipart::MultipartRejection, Multipart, Request, State},
    http::{header, StatusCode},
    response::Json,
    Form, RequestExt,
};
use translator_application::{
    default_target_language, ApplicationError, TranslateTextRequest, TranslateTextResponse,
    TranslateVoiceRequest, TranslateVoiceResponse, UploadProbeResponse,
};

use super::form::{multipart_rejection, read_upload_form};
use crate::error::HttpError;
use crate::HttpState;

pub async fn translate_voice(
    State(state): State<HttpState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<TranslateVoiceResponse>), HttpError> {
    let multipart = multipart.map_err(multipart_rejection)?;
    let max_upload_bytes = state.usecase.limits().max_upload_bytes;
    let mut form = read_upload_form(multipart, max_upload_bytes).await?;
    let target_language = form
        .field("target_language")
        .map(|code| code.trim().to_string())
        .unwrap_or_else(default_target_language);
    let file = form
        .file
        .take()
        .ok_or_else(|| HttpError::validation("No audio file provided"))?;

    tracing::info!(
        filename = file.filename.as_deref().unwrap_or("none"),
        content_type = file.content_type.as_deref().unwrap_or("none"),
        size = file.bytes.len(),
        target_language = %target_language,
        "received voice translation request"
    );

    let request = TranslateVoiceRequest {
        audio: file.bytes,
        content_type: file.content_type,
        filename: file.filename,
        target_language,
    };
    match state.usecase.translate_voice(request).await {
        Ok(response) => Ok((StatusCode::OK, Json(response))),
        Err(error) => {
            tracing::warn!(error = %error, "voice translation request failed");
            Err(error.into())
        }
    }
}

pub async fn translate_text(
    State(state): State<HttpState>,
    request: Request,
) -> Result<(StatusCode, Json<TranslateTextResponse>), HttpError> {
    let max_upload_bytes = state.usecase.limits().max_upload_bytes;
    let request = parse_text_request(request, max_upload_bytes).await?;

    tracing::info!(
        characters = request.text.chars().count(),
        target_language = %request.target_language,
        "received text translation request"
    );

    match state.usecase.translate_text(request).await {
        Ok(response) => Ok((StatusCode::OK, Json(response))),
        Err(error) => {
            tracing::warn!(error = %error, "text translation request failed");
            Err(error.into())
        }
    }
}

/// Echoes what the server saw of an uploaded file.
pub async fn test_upload(
    State(state): State<HttpState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadProbeResponse>, HttpError> {
    let multipart = multipart.map_err(multipart_rejection)?;
    let form = read_upload_form(multipart, state.usecase.limits().max_upload_bytes).await?;
    let file = form
        .file
        .ok_or_else(|| HttpError::validation("No audio file provided"))?;

    tracing::info!(
        filename = file.filename.as_deref().unwrap_or("none"),
        size = file.bytes.len(),
        "upload probe"
    );

    Ok(Json(UploadProbeResponse {
        filename: file.filename,
        content_type: file.content_type,
        size: file.bytes.len(),
    }))
}

/// Browsers post multipart; plain HTML forms and scripts post urlencoded.
async fn parse_text_request(
    request: Request,
    max_upload_bytes: usize,
) -> Result<TranslateTextRequest, HttpError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let mut parsed = if content_type.starts_with("multipart/form-data") {
        let multipart = request
            .extract::<Multipart, _>()
            .await
            .map_err(multipart_rejection)?;
        let form = read_upload_form(multipart, max_upload_bytes).await?;
        TranslateTextRequest {
            text: form.field("text").unwrap_or_default(),
            target_language: form
                .field("target_language")
                .unwrap_or_else(default_target_language),
        }
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(parsed) = request
            .extract::<Form<TranslateTextRequest>, _>()
            .await
            .map_err(|err| {
                if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    ApplicationError::file_too_large(max_upload_bytes).into()
                } else {
                    HttpError::validation(format!("Invalid form payload: {}", err.body_text()))
                }
            })?;
        parsed
    } else {
        return Err(HttpError::validation(format!(
            "Unsupported content type: {}",
            if content_type.is_empty() {
                "none"
            } else {
                content_type.as_str()
            }
        )));
    };

    parsed.target_language = match parsed.target_language.trim() {
        "" => default_target_language(),
        code => code.to_string(),
    };
    Ok(parsed)
}

