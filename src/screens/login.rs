//! Login screen.

use secrecy::SecretString;
use tracing::info;

use crate::auth::{AuthBackend, LoginCredentials};
use crate::config::FlowConfig;
use crate::error::Result;
use crate::forms::FormState;
use crate::forms::schemas::{fields, login_schema};
use crate::navigation::{NavigateTo, Screen};

use super::take_text;

pub struct LoginScreen {
    form: FormState,
}

impl LoginScreen {
    pub fn new(config: &FlowConfig) -> Self {
        Self {
            form: FormState::new(login_schema(config.min_password_length)),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// "Register now" link.
    pub fn register_link(&self) -> NavigateTo {
        NavigateTo(Screen::SignUp)
    }

    /// Validate, then send `(email, password)` to the backend.
    ///
    /// Nothing is sent when validation fails. The backend outcome is recorded
    /// in the form's submission status either way.
    pub async fn submit(&mut self, backend: &dyn AuthBackend) -> Result<NavigateTo> {
        let mut values = self.form.attempt_submit()?;
        let credentials = LoginCredentials {
            email: take_text(&mut values, fields::EMAIL)?,
            password: SecretString::from(take_text(&mut values, fields::PASSWORD)?),
        };

        self.form.begin_submission()?;
        let outcome = backend.login(&credentials).await;
        self.form
            .finish_submission(outcome.clone().map_err(|e| e.to_string()));
        outcome?;

        info!(email = %credentials.email, "Logged in");
        Ok(NavigateTo(Screen::Home))
    }
}
