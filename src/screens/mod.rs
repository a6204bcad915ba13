//! Screen controllers: wire the state components to the auth backend and
//! emit navigation signals.

pub mod confirmation;
pub mod login;
pub mod sign_up;

pub use confirmation::ConfirmationScreen;
pub use login::LoginScreen;
pub use sign_up::SignUpScreen;

use crate::error::FormError;
use crate::forms::{FieldValue, FormValues};

/// Move a text value out of submitted form values.
fn take_text(values: &mut FormValues, field: &str) -> Result<String, FormError> {
    match values.remove(field) {
        Some(FieldValue::Text(s)) => Ok(s),
        Some(FieldValue::Flag(_)) => Err(FormError::WrongValueKind {
            field: field.to_string(),
            expected: "text",
        }),
        None => Err(FormError::UnknownField(field.to_string())),
    }
}
