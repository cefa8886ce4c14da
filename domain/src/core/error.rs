//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid recommendation input: {0}")]
    InvalidRecommendationInput(String),

    #[error("Unknown meal time: {0}")]
    UnknownMealTime(String),
}

impl DomainError {
    /// Check if this error was caused by user input rather than the system
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidQuestion(_) | DomainError::InvalidRecommendationInput(_)
        )
    }
}
