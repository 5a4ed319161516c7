use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use translator_domain::{DomainError, TranslationOutput, TranslationPort, TranslationRequest};

const SERVICE: &str = "translation";
const AUTO_SOURCE: &str = "auto";

#[derive(Debug, Clone)]
pub struct HttpTranslationConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Source language sent upstream; `"auto"` asks the provider to detect it.
    pub source_language: String,
    /// Catalogue code -> provider code, e.g. `zh-cn` -> `zh`.
    pub language_aliases: HashMap<String, String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Translator reached over a LibreTranslate-compatible `/translate` endpoint.
pub struct HttpTranslationAdapter {
    client: Client,
    endpoint: String,
    config: HttpTranslationConfig,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateReply {
    translated_text: String,
    #[serde(default)]
    detected_language: Option<DetectedLanguage>,
    #[serde(default)]
    pronunciation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguage {
    language: String,
}

impl HttpTranslationAdapter {
    pub fn new(config: HttpTranslationConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| {
                DomainError::internal_error(&format!("failed to build translation client: {err}"))
            })?;
        let endpoint = format!("{}/translate", config.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn provider_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.config
            .language_aliases
            .get(&code.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or(code)
    }
}

#[async_trait]
impl TranslationPort for HttpTranslationAdapter {
    async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationOutput, DomainError> {
        let target = self.provider_code(&request.target_language);
        let source = self.provider_code(&self.config.source_language);
        tracing::debug!(
            endpoint = %self.endpoint,
            source,
            target,
            characters = request.text.chars().count(),
            "sending text to translator"
        );

        let body = TranslateBody {
            q: &request.text,
            source,
            target,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_status(status, &text));
        }

        let reply: TranslateReply = response.json().await.map_err(|err| {
            DomainError::external_service_error(SERVICE, &format!("invalid response body: {err}"))
        })?;
        let source_language = reply
            .detected_language
            .map(|detected| detected.language)
            .filter(|language| !language.is_empty())
            .unwrap_or_else(|| {
                if self.config.source_language.eq_ignore_ascii_case(AUTO_SOURCE) {
                    "unknown".to_string()
                } else {
                    self.config.source_language.clone()
                }
            });

        Ok(TranslationOutput {
            text: reply.translated_text,
            source_language,
            pronunciation: reply.pronunciation.filter(|value| !value.is_empty()),
        })
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

/// LibreTranslate reports failures as `{"error": "..."}`.
fn map_status(status: StatusCode, body: &str) -> DomainError {
    #[derive(Deserialize)]
    struct ErrorReply {
        error: String,
    }

    let detail = serde_json::from_str::<ErrorReply>(body)
        .map(|reply| reply.error)
        .unwrap_or_else(|_| body.trim().to_string());
    let message = if detail.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {detail}")
    };
    if status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
    {
        DomainError::service_unavailable(SERVICE, &message)
    } else {
        DomainError::external_service_error(SERVICE, &message)
    }
}
