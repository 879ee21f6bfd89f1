use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unknown answer mode `{0}` (expected solfege, letter, number or piano)")]
    UnknownAnswerMode(String),
    #[error("unknown language `{0}` (expected en or zh)")]
    UnknownLanguage(String),
}

impl DomainError {
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }
}
