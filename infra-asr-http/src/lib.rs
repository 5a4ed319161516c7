use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use translator_domain::{DomainError, RecognitionOutput, RecognitionPort, RecognitionRequest};

const SERVICE: &str = "speech recognition";
const TRANSCRIPTIONS_PATH: &str = "/v1/audio/transcriptions";

#[derive(Debug, Clone)]
pub struct HttpRecognitionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Speech recognizer reached over an OpenAI-compatible transcription endpoint.
pub struct HttpRecognitionAdapter {
    client: Client,
    endpoint: String,
    config: HttpRecognitionConfig,
}

#[derive(Debug, Deserialize)]
struct TranscriptionBody {
    #[serde(default)]
    text: String,
}

impl HttpRecognitionAdapter {
    pub fn new(config: HttpRecognitionConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| {
                DomainError::internal_error(&format!("failed to build recognition client: {err}"))
            })?;
        let endpoint = format!(
            "{}{TRANSCRIPTIONS_PATH}",
            config.base_url.trim_end_matches('/')
        );

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecognitionPort for HttpRecognitionAdapter {
    async fn recognize(
        &self,
        request: RecognitionRequest,
    ) -> Result<RecognitionOutput, DomainError> {
        let audio = tokio::fs::read(&request.audio_path).await.map_err(|err| {
            DomainError::internal_error(&format!("failed to read staged audio: {err}"))
        })?;
        let file_name = request
            .audio_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("audio.{}", request.format.extension()));
        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = audio.len(),
            format = %request.format,
            language_hint = request.language_hint.as_deref().unwrap_or("auto"),
            "sending audio to recognizer"
        );

        let part = Part::bytes(audio)
            .file_name(file_name)
            .mime_str(request.format.mime_type())
            .map_err(|err| DomainError::internal_error(&format!("invalid audio mime: {err}")))?;
        let mut form = Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("response_format", "json");
        if let Some(language) = request
            .language_hint
            .filter(|language| !language.eq_ignore_ascii_case("auto"))
        {
            form = form.text("language", language);
        }

        let mut builder = self.client.post(&self.endpoint).multipart(form);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        let body: TranscriptionBody = response.json().await.map_err(|err| {
            DomainError::external_service_error(SERVICE, &format!("invalid response body: {err}"))
        })?;
        let text = body.text.trim().to_string();
        if text.is_empty() {
            return Err(DomainError::UnrecognizedSpeech);
        }

        tracing::debug!(characters = text.chars().count(), "recognizer returned transcript");
        Ok(RecognitionOutput { text })
    }
}

fn map_transport_error(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::service_unavailable(SERVICE, "request timed out")
    } else if err.is_connect() || err.is_request() {
        DomainError::service_unavailable(SERVICE, &err.to_string())
    } else {
        DomainError::external_service_error(SERVICE, &err.to_string())
    }
}

/// Any error reply from the recognizer means the capability is unavailable
/// for this request; local faults are reported separately.
fn map_status(status: StatusCode, body: &str) -> DomainError {
    let message = if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {}", body.trim())
    };
    DomainError::service_unavailable(SERVICE, &message)
}
