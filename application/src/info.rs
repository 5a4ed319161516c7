use translator_domain::{AudioFormat, LANGUAGES};

use crate::{EndpointDescriptor, HealthResponse, LanguagesResponse, ServiceDescription};

pub const SERVICE_NAME: &str = "voice-translator";

pub static ENDPOINTS: [EndpointDescriptor; 6] = [
    EndpointDescriptor {
        method: "GET",
        path: "/",
        description: "API information (this page)",
    },
    EndpointDescriptor {
        method: "GET",
        path: "/health",
        description: "Health check",
    },
    EndpointDescriptor {
        method: "GET",
        path: "/languages",
        description: "Get available languages",
    },
    EndpointDescriptor {
        method: "POST",
        path: "/translate/voice",
        description: "Upload audio file for translation",
    },
    EndpointDescriptor {
        method: "POST",
        path: "/translate/text",
        description: "Send text for translation",
    },
    EndpointDescriptor {
        method: "POST",
        path: "/test/upload",
        description: "Echo upload metadata (diagnostics)",
    },
];

pub fn describe() -> ServiceDescription {
    ServiceDescription {
        message: "Voice Translator API",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        endpoints: &ENDPOINTS,
        supported_audio_formats: AudioFormat::ALL.to_vec(),
    }
}

pub fn health() -> HealthResponse {
    HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    }
}

pub fn list_languages() -> LanguagesResponse {
    LanguagesResponse {
        languages: &LANGUAGES,
    }
}
