use serde::Serialize;

use translator_domain::{AudioFormat, LanguageDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDescription {
    pub message: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: &'static [EndpointDescriptor],
    pub supported_audio_formats: Vec<AudioFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguagesResponse {
    pub languages: &'static [LanguageDescriptor],
}
