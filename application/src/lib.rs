pub mod dto;
pub mod error;
pub mod info;
pub mod staging;
pub mod usecase;

pub use dto::*;
pub use error::*;
pub use info::{describe, health, list_languages, ENDPOINTS, SERVICE_NAME};
pub use staging::StagedAudio;
pub use usecase::{TranslationLimits, TranslationUseCase, TranslationUseCaseImpl};
