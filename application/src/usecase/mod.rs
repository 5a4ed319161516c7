mod translation;

pub use translation::{TranslationLimits, TranslationUseCase, TranslationUseCaseImpl};
