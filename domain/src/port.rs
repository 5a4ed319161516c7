use async_trait::async_trait;

use crate::{
    DomainError, RecognitionOutput, RecognitionRequest, TranslationOutput, TranslationRequest,
};

#[async_trait]
pub trait RecognitionPort: Send + Sync {
    async fn recognize(&self, request: RecognitionRequest)
        -> Result<RecognitionOutput, DomainError>;
}

#[async_trait]
pub trait TranslationPort: Send + Sync {
    async fn translate(&self, request: TranslationRequest)
        -> Result<TranslationOutput, DomainError>;
}
