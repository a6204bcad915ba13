//! The `AuthBackend` trait and the payloads it receives.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::AuthError;

/// Sent on login submit.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

/// Sent on registration submit.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Remote authentication service.
///
/// Calls are only made after the corresponding form validated.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<(), AuthError>;

    /// Create an account and send a confirmation code to its email.
    async fn register(&self, registration: &Registration) -> Result<(), AuthError>;

    /// Check the code sent to `email`.
    async fn confirm(&self, email: &str, code: &str) -> Result<(), AuthError>;

    async fn resend_code(&self, email: &str) -> Result<(), AuthError>;
}
