use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Validate)]
pub struct TranslateVoiceRequest {
    pub audio: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
    #[validate(length(min = 1, max = 16), custom(function = "validate_language_code"))]
    pub target_language: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TranslateTextRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_target_language")]
    #[validate(length(min = 1, max = 16), custom(function = "validate_language_code"))]
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub filename: String,
    pub content_type: String,
    pub size: usize,
    /// Not measured; always `null`.
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslateVoiceResponse {
    pub success: bool,
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
    pub source_language: String,
    pub pronunciation: Option<String>,
    pub file_info: FileInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslateTextResponse {
    pub success: bool,
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
    pub source_language: String,
    pub pronunciation: Option<String>,
    pub characters: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadProbeResponse {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

pub fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

fn validate_language_code(code: &str) -> Result<(), ValidationError> {
    let valid = code
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("language_code"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_request(target_language: &str) -> TranslateTextRequest {
        TranslateTextRequest {
            text: "hello".to_string(),
            target_language: target_language.to_string(),
        }
    }

    #[test]
    fn language_codes_with_region_are_accepted() {
        assert!(text_request("zh-cn").validate().is_ok());
        assert!(text_request("es").validate().is_ok());
    }

    #[test]
    fn malformed_language_codes_are_rejected() {
        assert!(text_request("").validate().is_err());
        assert!(text_request("e s").validate().is_err());
        assert!(text_request("../etc").validate().is_err());
        assert!(text_request(&"x".repeat(17)).validate().is_err());
    }

    #[test]
    fn missing_target_language_defaults_to_english() {
        let request: TranslateTextRequest =
            serde_json::from_value(serde_json::json!({ "text": "hola" })).expect("deserializes");
        assert_eq!(request.target_language, "en");
    }

    #[test]
    fn voice_response_keeps_null_fields() {
        let response = TranslateVoiceResponse {
            success: true,
            original_text: "hello".to_string(),
            translated_text: "hola".to_string(),
            target_language: "es".to_string(),
            source_language: "en".to_string(),
            pronunciation: None,
            file_info: FileInfo {
                filename: "clip.wav".to_string(),
                content_type: "audio/wav".to_string(),
                size: 4,
                duration: None,
            },
        };

        let value = serde_json::to_value(&response).expect("serializes");
        assert!(value["pronunciation"].is_null());
        assert!(value["file_info"]["duration"].is_null());
        assert_eq!(value["file_info"]["size"], 4);
    }
}
