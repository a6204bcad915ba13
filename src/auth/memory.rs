//! In-process `AuthBackend` used by the terminal walkthrough and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::info;

use super::backend::{AuthBackend, LoginCredentials, Registration};
use crate::error::AuthError;

#[derive(Debug)]
struct Account {
    name: String,
    password: SecretString,
    confirmed: bool,
}

/// Accounts and pending confirmation codes held in memory.
#[derive(Debug)]
pub struct InMemoryAuthBackend {
    code_length: usize,
    accounts: RwLock<HashMap<String, Account>>,
    pending_codes: RwLock<HashMap<String, String>>,
}

impl InMemoryAuthBackend {
    pub fn new(code_length: usize) -> Self {
        Self {
            code_length,
            accounts: RwLock::new(HashMap::new()),
            pending_codes: RwLock::new(HashMap::new()),
        }
    }

    /// The code currently waiting for `email`, standing in for the email
    /// that would carry it.
    pub async fn pending_code(&self, email: &str) -> Option<String> {
        self.pending_codes.read().await.get(email).cloned()
    }

    pub async fn display_name(&self, email: &str) -> Option<String> {
        self.accounts.read().await.get(email).map(|a| a.name.clone())
    }

    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    async fn issue_code(&self, email: &str) {
        let code = self.generate_code();
        self.pending_codes
            .write()
            .await
            .insert(email.to_string(), code);
        info!(email, "Confirmation code issued");
    }
}

#[async_trait]
impl AuthBackend for InMemoryAuthBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<(), AuthError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&credentials.email)
            .ok_or(AuthError::InvalidCredentials)?;
        if account.password.expose_secret() != credentials.password.expose_secret() {
            return Err(AuthError::InvalidCredentials);
        }
        if !account.confirmed {
            return Err(AuthError::NotConfirmed {
                email: credentials.email.clone(),
            });
        }
        Ok(())
    }

    async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&registration.email) {
                return Err(AuthError::AccountExists {
                    email: registration.email.clone(),
                });
            }
            accounts.insert(
                registration.email.clone(),
                Account {
                    name: registration.name.clone(),
                    password: registration.password.clone(),
                    confirmed: false,
                },
            );
        }
        self.issue_code(&registration.email).await;
        Ok(())
    }

    async fn confirm(&self, email: &str, code: &str) -> Result<(), AuthError> {
        let mut pending = self.pending_codes.write().await;
        let expected = pending
            .get(email)
            .ok_or_else(|| AuthError::NoPendingConfirmation {
                email: email.to_string(),
            })?;
        if expected != code {
            return Err(AuthError::InvalidCode);
        }
        pending.remove(email);
        drop(pending);

        if let Some(account) = self.accounts.write().await.get_mut(email) {
            account.confirmed = true;
        }
        info!(email, "Account confirmed");
        Ok(())
    }

    async fn resend_code(&self, email: &str) -> Result<(), AuthError> {
        if !self.pending_codes.read().await.contains_key(email) {
            return Err(AuthError::NoPendingConfirmation {
                email: email.to_string(),
            });
        }
        self.issue_code(email).await;
        Ok(())
    }
}
