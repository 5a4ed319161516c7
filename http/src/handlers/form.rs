use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart,
    },
    http::StatusCode,
};
use translator_application::ApplicationError;

use crate::error::HttpError;

/// Multipart field names accepted for the uploaded clip.
const AUDIO_FIELDS: [&str; 2] = ["audio", "file"];

#[derive(Debug, Default)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    /// Last non-blank value of a text field.
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .rev()
            .find(|(field, value)| field == name && !value.trim().is_empty())
            .map(|(_, value)| value.clone())
    }
}

pub async fn read_upload_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<UploadForm, HttpError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(err, max_upload_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if AUDIO_FIELDS.contains(&name.as_str()) {
            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|err| multipart_error(err, max_upload_bytes))?;
            form.file = Some(UploadedFile {
                bytes: bytes.to_vec(),
                filename,
                content_type,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|err| multipart_error(err, max_upload_bytes))?;
            form.fields.push((name, value));
        }
    }

    Ok(form)
}

/// The body is not multipart at all, or carries no usable boundary.
pub fn multipart_rejection(rejection: MultipartRejection) -> HttpError {
    tracing::warn!(error = %rejection, "rejected non-multipart upload");
    HttpError::validation(format!("Invalid multipart payload: {}", rejection.body_text()))
}

pub fn multipart_error(err: MultipartError, max_upload_bytes: usize) -> HttpError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %err, "request body exceeded limit");
        return ApplicationError::file_too_large(max_upload_bytes).into();
    }
    tracing::warn!(error = %err, "failed reading multipart payload");
    HttpError::validation(format!("Invalid multipart payload: {}", err.body_text()))
}
