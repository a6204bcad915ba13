//! Confirmation-code screen.

use tracing::info;

use crate::auth::AuthBackend;
use crate::code_input::{CodeActions, SegmentedCodeInput};
use crate::error::{CodeInputError, Result};
use crate::forms::SubmissionStatus;
use crate::navigation::{NavigateTo, Screen};

pub struct ConfirmationScreen {
    email: String,
    code: SegmentedCodeInput,
    submission: SubmissionStatus,
}

impl ConfirmationScreen {
    pub fn new(email: impl Into<String>, code_length: usize) -> Self {
        Self {
            email: email.into(),
            code: SegmentedCodeInput::new(code_length),
            submission: SubmissionStatus::Idle,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Heading text, e.g. "A 4-digit code was sent to ada@example.com".
    pub fn prompt(&self) -> String {
        format!("A {}-digit code was sent to {}", self.code.len(), self.email)
    }

    pub fn code(&self) -> &SegmentedCodeInput {
        &self.code
    }

    pub fn set_digit(&mut self, index: usize, input: &str) -> std::result::Result<(), CodeInputError> {
        self.code.set_cell(index, input)
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.code.set_focused(focused);
    }

    pub fn actions(&self) -> CodeActions {
        self.code.actions()
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// Send the code once every cell is filled.
    pub async fn submit(&mut self, backend: &dyn AuthBackend) -> Result<NavigateTo> {
        let code = self.code.full_code().ok_or(CodeInputError::CodeIncomplete {
            filled: self.code.filled_count(),
            length: self.code.len(),
        })?;

        self.submission = SubmissionStatus::Pending;
        let outcome = backend.confirm(&self.email, &code).await;
        self.submission = match &outcome {
            Ok(()) => SubmissionStatus::Succeeded,
            Err(e) => SubmissionStatus::Failed {
                message: e.to_string(),
            },
        };
        outcome?;

        info!(email = %self.email, "Code confirmed");
        Ok(NavigateTo(Screen::Home))
    }

    /// Ask for a new code and clear what was typed.
    pub async fn resend(&mut self, backend: &dyn AuthBackend) -> Result<()> {
        backend.resend_code(&self.email).await?;
        self.code.clear();
        self.submission = SubmissionStatus::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{InMemoryAuthBackend, Registration};
    use crate::error::{AuthError, Error};
    use secrecy::SecretString;

    async fn registered() -> InMemoryAuthBackend {
        let backend = InMemoryAuthBackend::new(4);
        backend
            .register(&Registration {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: SecretString::from("abc123".to_string()),
            })
            .await
            .unwrap();
        backend
    }

    fn type_code(screen: &mut ConfirmationScreen, code: &str) {
        for (i, c) in code.chars().enumerate() {
            screen.set_digit(i, &c.to_string()).unwrap();
        }
    }

    #[test]
    fn prompt_mentions_length_and_email() {
        let screen = ConfirmationScreen::new("ada@example.com", 4);
        assert_eq!(screen.prompt(), "A 4-digit code was sent to ada@example.com");
    }

    #[tokio::test]
    async fn incomplete_code_is_not_sent() {
        let backend = registered().await;
        let mut screen = ConfirmationScreen::new("ada@example.com", 4);
        type_code(&mut screen, "123");

        let err = screen.submit(&backend).await.unwrap_err();
        assert!(matches!(
            err,
            Error::CodeInput(CodeInputError::CodeIncomplete {
                filled: 3,
                length: 4
            })
        ));
        assert_eq!(screen.submission(), &SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn correct_code_navigates_home() {
        let backend = registered().await;
        let code = backend.pending_code("ada@example.com").await.unwrap();
        let mut screen = ConfirmationScreen::new("ada@example.com", 4);
        type_code(&mut screen, &code);

        assert_eq!(
            screen.submit(&backend).await.unwrap(),
            NavigateTo(Screen::Home)
        );
        assert_eq!(screen.submission(), &SubmissionStatus::Succeeded);
    }

    #[tokio::test]
    async fn wrong_code_is_recorded() {
        let backend = registered().await;
        let code = backend.pending_code("ada@example.com").await.unwrap();
        let wrong: String = code
            .chars()
            .map(|c| if c == '0' { '1' } else { '0' })
            .collect();
        let mut screen = ConfirmationScreen::new("ada@example.com", 4);
        type_code(&mut screen, &wrong);

        let err = screen.submit(&backend).await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::InvalidCode)));
        assert!(matches!(
            screen.submission(),
            SubmissionStatus::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn zero_length_screen_never_sends_empty_code() {
        let backend = registered().await;
        let mut screen = ConfirmationScreen::new("ada@example.com", 0);
        let err = screen.submit(&backend).await.unwrap_err();
        assert!(matches!(
            err,
            Error::CodeInput(CodeInputError::CodeIncomplete {
                filled: 0,
                length: 1
            })
        ));
        assert_eq!(screen.submission(), &SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn resend_clears_cells() {
        let backend = registered().await;
        let mut screen = ConfirmationScreen::new("ada@example.com", 4);
        type_code(&mut screen, "12");
        screen.resend(&backend).await.unwrap();
        assert_eq!(screen.code().filled_count(), 0);
    }

    #[test]
    fn continue_only_while_focused() {
        let mut screen = ConfirmationScreen::new("ada@example.com", 4);
        assert!(screen.actions().resend_visible);
        assert!(!screen.actions().continue_visible);
        screen.set_focused(true);
        assert!(screen.actions().continue_visible);
    }
}
