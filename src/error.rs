//! Error types for the onboarding flow.

use crate::forms::FieldErrors;

/// Top-level error type for the flow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Code input error: {0}")]
    CodeInput(#[from] CodeInputError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Wizard sequencing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The current step's completion predicate is not satisfied.
    #[error("Step {step} is incomplete: {message}")]
    IncompleteStep { step: usize, message: String },

    /// `advance` was called after the terminal step completed.
    #[error("Wizard already completed")]
    AlreadyTerminal,

    #[error("Wizard has no steps")]
    NoSteps,

    #[error("Unknown interest: {0}")]
    UnknownInterest(String),
}

/// Form validation and submission errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {field} does not hold a {expected} value")]
    WrongValueKind { field: String, expected: &'static str },

    #[error("Submission already in progress")]
    SubmissionInProgress,
}

/// Segmented code entry errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeInputError {
    #[error("Cell index {index} out of range (length {length})")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("Cell {index} only accepts digits, got {input:?}")]
    NotNumeric { index: usize, input: String },

    #[error("Code incomplete: {filled} of {length} digits entered")]
    CodeIncomplete { filled: usize, length: usize },
}

/// Errors reported by the auth backend collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account {email} is not confirmed yet")]
    NotConfirmed { email: String },

    #[error("An account already exists for {email}")]
    AccountExists { email: String },

    #[error("No pending confirmation for {email}")]
    NoPendingConfirmation { email: String },

    #[error("Confirmation code is invalid")]
    InvalidCode,

    #[error("Auth backend unavailable: {0}")]
    Unavailable(String),
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for the flow.
pub type Result<T> = std::result::Result<T, Error>;
