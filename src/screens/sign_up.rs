//! Registration screen.

use secrecy::SecretString;
use tracing::info;

use crate::auth::{AuthBackend, Registration};
use crate::config::FlowConfig;
use crate::error::Result;
use crate::forms::FormState;
use crate::forms::schemas::{fields, sign_up_schema};
use crate::navigation::{NavigateTo, Screen};

use super::take_text;

pub struct SignUpScreen {
    form: FormState,
    registered_email: Option<String>,
}

impl SignUpScreen {
    pub fn new(config: &FlowConfig) -> Self {
        Self {
            form: FormState::new(sign_up_schema(config.min_password_length)),
            registered_email: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// The sign-up button stays disabled until the terms are accepted.
    pub fn submit_enabled(&self) -> bool {
        self.form.flag(fields::TERMS_ACCEPTED).unwrap_or(false) && !self.form.is_submitting()
    }

    /// Email of the account created by the last successful submit.
    pub fn registered_email(&self) -> Option<&str> {
        self.registered_email.as_deref()
    }

    /// Validate, then send `(name, email, password)` to the backend and move
    /// on to code confirmation.
    pub async fn submit(&mut self, backend: &dyn AuthBackend) -> Result<NavigateTo> {
        let mut values = self.form.attempt_submit()?;
        let registration = Registration {
            name: take_text(&mut values, fields::NAME)?,
            email: take_text(&mut values, fields::EMAIL)?,
            password: SecretString::from(take_text(&mut values, fields::PASSWORD)?),
        };

        self.form.begin_submission()?;
        let outcome = backend.register(&registration).await;
        self.form
            .finish_submission(outcome.clone().map_err(|e| e.to_string()));
        outcome?;

        info!(email = %registration.email, "Account registered");
        self.registered_email = Some(registration.email);
        Ok(NavigateTo(Screen::Confirmation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::InMemoryAuthBackend;
    use crate::error::{AuthError, Error, FormError};

    fn fill(screen: &mut SignUpScreen, name: &str, confirm: &str, terms: bool) {
        let form = screen.form_mut();
        form.set_value(fields::NAME, name).unwrap();
        form.set_value(fields::EMAIL, "a@b.com").unwrap();
        form.set_value(fields::PASSWORD, "abcdef").unwrap();
        form.set_value(fields::CONFIRM_PASSWORD, confirm).unwrap();
        form.set_value(fields::TERMS_ACCEPTED, terms).unwrap();
    }

    #[tokio::test]
    async fn missing_name_and_terms_block_submit() {
        let backend = InMemoryAuthBackend::new(4);
        let mut screen = SignUpScreen::new(&FlowConfig::default());
        fill(&mut screen, "", "abcdef", false);

        let err = screen.submit(&backend).await.unwrap_err();
        let Error::Form(FormError::ValidationFailed(errors)) = err else {
            panic!("Expected ValidationFailed, got {err:?}");
        };
        assert_eq!(errors.fields(), vec![fields::NAME, fields::TERMS_ACCEPTED]);
        assert_eq!(errors.get(fields::NAME), Some("Required"));
        assert_eq!(
            errors.get(fields::TERMS_ACCEPTED),
            Some("Terms must be accepted")
        );
        assert!(backend.pending_code("a@b.com").await.is_none());
    }

    #[tokio::test]
    async fn mismatched_passwords_are_not_registered() {
        let backend = InMemoryAuthBackend::new(4);
        let mut screen = SignUpScreen::new(&FlowConfig::default());
        fill(&mut screen, "Ada", "abcdeg", true);

        let err = screen.submit(&backend).await.unwrap_err();
        let Error::Form(FormError::ValidationFailed(errors)) = err else {
            panic!("Expected ValidationFailed, got {err:?}");
        };
        assert_eq!(
            errors.get(fields::CONFIRM_PASSWORD),
            Some("Passwords must match")
        );
        assert!(backend.display_name("a@b.com").await.is_none());
    }

    #[tokio::test]
    async fn valid_registration_goes_to_confirmation() {
        let backend = InMemoryAuthBackend::new(4);
        let mut screen = SignUpScreen::new(&FlowConfig::default());
        fill(&mut screen, "Ada", "abcdef", true);

        assert_eq!(
            screen.submit(&backend).await.unwrap(),
            NavigateTo(Screen::Confirmation)
        );
        assert_eq!(screen.registered_email(), Some("a@b.com"));
        assert!(backend.pending_code("a@b.com").await.is_some());
    }

    #[tokio::test]
    async fn duplicate_account_surfaces_auth_error() {
        let backend = InMemoryAuthBackend::new(4);
        let mut first = SignUpScreen::new(&FlowConfig::default());
        fill(&mut first, "Ada", "abcdef", true);
        first.submit(&backend).await.unwrap();

        let mut second = SignUpScreen::new(&FlowConfig::default());
        fill(&mut second, "Ada", "abcdef", true);
        let err = second.submit(&backend).await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::AccountExists { .. })));
        assert!(second.registered_email().is_none());
    }

    #[test]
    fn submit_button_follows_terms_checkbox() {
        let mut screen = SignUpScreen::new(&FlowConfig::default());
        assert!(!screen.submit_enabled());
        screen
            .form_mut()
            .set_value(fields::TERMS_ACCEPTED, true)
            .unwrap();
        assert!(screen.submit_enabled());
    }
}
