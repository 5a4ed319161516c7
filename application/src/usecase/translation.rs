use std::ffi::OsStr;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use translator_domain::{
    find_language, AudioFormat, DomainError, RecognitionPort, RecognitionRequest, TranslationPort,
    TranslationRequest,
};

use crate::{
    ApplicationError, FileInfo, StagedAudio, TranslateTextRequest, TranslateTextResponse,
    TranslateVoiceRequest, TranslateVoiceResponse,
};

const AUDIO_MEDIA_PREFIX: &str = "audio/";
const ONE_MIB: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct TranslationLimits {
    pub max_upload_bytes: usize,
    pub max_text_chars: usize,
    /// Upper bound for each outbound recognition or translation call.
    pub upstream_timeout: Duration,
}

impl Default for TranslationLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * ONE_MIB,
            max_text_chars: 5_000,
            upstream_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait]
pub trait TranslationUseCase: Send + Sync {
    async fn translate_voice(
        &self,
        request: TranslateVoiceRequest,
    ) -> Result<TranslateVoiceResponse, ApplicationError>;

    async fn translate_text(
        &self,
        request: TranslateTextRequest,
    ) -> Result<TranslateTextResponse, ApplicationError>;

    fn limits(&self) -> &TranslationLimits;
}

pub struct TranslationUseCaseImpl {
    recognition: Arc<dyn RecognitionPort>,
    translation: Arc<dyn TranslationPort>,
    limits: TranslationLimits,
    recognition_language: Option<String>,
    staging_dir: Option<PathBuf>,
}

impl TranslationUseCaseImpl {
    pub fn new(
        recognition: Arc<dyn RecognitionPort>,
        translation: Arc<dyn TranslationPort>,
        limits: TranslationLimits,
    ) -> Self {
        Self {
            recognition,
            translation,
            limits,
            recognition_language: None,
            staging_dir: None,
        }
    }

    /// Language hint forwarded to the recognizer; `None` lets it guess.
    pub fn with_recognition_language(mut self, language: Option<String>) -> Self {
        self.recognition_language = language.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn with_staging_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.staging_dir = dir;
        self
    }

    async fn bounded<T, F>(&self, service: &str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>> + Send,
    {
        let timeout = self.limits.upstream_timeout;
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::service_unavailable(
                service,
                &format!("request timed out after {}ms", timeout.as_millis()),
            )),
        }
    }

    /// Well-formed codes outside the catalogue are still forwarded; the
    /// provider has the final say.
    fn validate_target(request: &impl Validate, code: &str) -> Result<(), ApplicationError> {
        request.validate().map_err(|err| {
            tracing::warn!(target_language = code, error = %err, "rejected target language");
            ApplicationError::validation(format!("Invalid target language: {code}"))
        })?;
        match find_language(code) {
            Some(language) => {
                tracing::debug!(target_language = code, name = language.name, "catalogued target")
            }
            None => tracing::info!(
                target_language = code,
                "target language not in catalogue, forwarding to provider"
            ),
        }
        Ok(())
    }
}

#[async_trait]
impl TranslationUseCase for TranslationUseCaseImpl {
    async fn translate_voice(
        &self,
        request: TranslateVoiceRequest,
    ) -> Result<TranslateVoiceResponse, ApplicationError> {
        let request_id = Uuid::new_v4();
        let filename = request.filename.clone().unwrap_or_default();
        tracing::info!(
            %request_id,
            filename = %filename,
            target_language = %request.target_language,
            "processing audio upload"
        );

        let content_type = request.content_type.clone().unwrap_or_default();
        if !content_type.starts_with(AUDIO_MEDIA_PREFIX) {
            tracing::warn!(%request_id, content_type = %content_type, "rejected non-audio upload");
            return Err(ApplicationError::validation(format!(
                "File must be an audio file. Received type: {}",
                request.content_type.as_deref().unwrap_or("none")
            )));
        }

        let extension = file_extension(&filename);
        let Some(format) = extension.as_deref().and_then(AudioFormat::from_extension) else {
            let shown = extension.map(|ext| format!(".{ext}")).unwrap_or_default();
            tracing::warn!(%request_id, extension = %shown, "rejected unsupported audio format");
            return Err(ApplicationError::validation(format!(
                "Unsupported file format: {shown}. Supported formats: {}",
                supported_extensions()
            )));
        };

        let mut staged = StagedAudio::create(self.staging_dir.as_deref(), format).map_err(|err| {
            tracing::error!(%request_id, error = %err, "failed to reserve staging file");
            ApplicationError::unexpected()
        })?;

        let size = request.audio.len();
        if size > self.limits.max_upload_bytes {
            tracing::warn!(
                %request_id,
                size,
                max_upload_bytes = self.limits.max_upload_bytes,
                "rejected oversized upload"
            );
            return Err(ApplicationError::file_too_large(
                self.limits.max_upload_bytes,
            ));
        }
        Self::validate_target(&request, &request.target_language)?;

        staged.write(&request.audio).await.map_err(|err| {
            tracing::error!(%request_id, error = %err, "failed to stage audio upload");
            ApplicationError::unexpected()
        })?;

        tracing::info!(%request_id, format = %format, size, "converting speech to text");
        let recognized = self
            .bounded(
                "speech recognition",
                self.recognition.recognize(RecognitionRequest {
                    audio_path: staged.path().to_path_buf(),
                    format: staged.format(),
                    language_hint: self.recognition_language.clone(),
                }),
            )
            .await
            .map_err(|err| map_recognition_error(request_id, err))?;

        let original_text = recognized.text.trim().to_string();
        if original_text.is_empty() {
            return Err(map_recognition_error(
                request_id,
                DomainError::UnrecognizedSpeech,
            ));
        }
        tracing::info!(%request_id, text = %original_text, "recognized speech");

        tracing::info!(%request_id, target_language = %request.target_language, "translating text");
        let translation = self
            .bounded(
                "translation",
                self.translation.translate(TranslationRequest {
                    text: original_text.clone(),
                    target_language: request.target_language.clone(),
                }),
            )
            .await
            .map_err(|err| map_translation_error(request_id, err))?;
        tracing::info!(
            %request_id,
            source_language = %translation.source_language,
            target_language = %request.target_language,
            "translation complete"
        );

        Ok(TranslateVoiceResponse {
            success: true,
            original_text,
            translated_text: translation.text,
            target_language: request.target_language,
            source_language: translation.source_language,
            pronunciation: translation.pronunciation,
            file_info: FileInfo {
                filename,
                content_type,
                size: staged.size(),
                duration: None,
            },
        })
    }

    async fn translate_text(
        &self,
        request: TranslateTextRequest,
    ) -> Result<TranslateTextResponse, ApplicationError> {
        let request_id = Uuid::new_v4();
        let preview: String = request.text.chars().take(50).collect();
        tracing::info!(
            %request_id,
            preview = %preview,
            target_language = %request.target_language,
            "translating text"
        );

        let trimmed = request.text.trim();
        if trimmed.is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }
        if trimmed.chars().count() > self.limits.max_text_chars {
            tracing::warn!(%request_id, "rejected oversized text");
            return Err(ApplicationError::validation(format!(
                "Text too long. Maximum {} characters",
                self.limits.max_text_chars
            )));
        }
        Self::validate_target(&request, &request.target_language)?;

        let translation = self
            .bounded(
                "translation",
                self.translation.translate(TranslationRequest {
                    text: request.text.clone(),
                    target_language: request.target_language.clone(),
                }),
            )
            .await
            .map_err(|err| map_translation_error(request_id, err))?;

        let characters = request.text.chars().count();
        Ok(TranslateTextResponse {
            success: true,
            original_text: request.text,
            translated_text: translation.text,
            target_language: request.target_language,
            source_language: translation.source_language,
            pronunciation: translation.pronunciation,
            characters,
        })
    }

    fn limits(&self) -> &TranslationLimits {
        &self.limits
    }
}

fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
}

fn supported_extensions() -> String {
    AudioFormat::ALL
        .iter()
        .map(|format| format!(".{}", format.extension()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn map_recognition_error(request_id: Uuid, error: DomainError) -> ApplicationError {
    match error {
        DomainError::UnrecognizedSpeech => {
            tracing::warn!(%request_id, "speech recognition could not understand the audio");
            ApplicationError::UnrecognizedContent(
                "Speech recognition could not understand the audio. Please ensure the audio is clear and try again."
                    .to_string(),
            )
        }
        DomainError::ServiceUnavailable { .. } => {
            tracing::warn!(%request_id, error = %error, "speech recognition service unreachable");
            ApplicationError::UpstreamUnavailable(format!(
                "Speech recognition service error: {}. Please check your internet connection.",
                error.detail()
            ))
        }
        other => {
            tracing::error!(%request_id, error = %other, "speech recognition failed");
            ApplicationError::UpstreamFault(format!("Error processing audio: {}", other.detail()))
        }
    }
}

fn map_translation_error(request_id: Uuid, error: DomainError) -> ApplicationError {
    tracing::error!(%request_id, error = %error, "translation failed");
    let message = format!("Translation failed: {}", error.detail());
    match error {
        DomainError::ServiceUnavailable { .. } => ApplicationError::UpstreamUnavailable(message),
        _ => ApplicationError::UpstreamFault(message),
    }
}
