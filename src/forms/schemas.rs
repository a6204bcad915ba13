//! Login and registration form schemas.

use super::engine::FormSchema;
use super::rules::Rule;

/// Field names shared by the auth forms.
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const TERMS_ACCEPTED: &str = "termsAccepted";
}

pub const LOGIN_FORM: &str = "login";
pub const SIGN_UP_FORM: &str = "sign_up";

fn min_password_message(min: usize) -> String {
    format!("Password must be at least {min} characters")
}

/// Email + password.
pub fn login_schema(min_password_length: usize) -> FormSchema {
    FormSchema::new(LOGIN_FORM)
        .field(
            fields::EMAIL,
            "",
            vec![
                Rule::required("Email is required"),
                Rule::email("Invalid email address"),
            ],
        )
        .field(
            fields::PASSWORD,
            "",
            vec![
                Rule::required("Password is required"),
                Rule::min_length(min_password_length, min_password_message(min_password_length)),
            ],
        )
}

/// Name, email, password with confirmation, and terms acceptance.
pub fn sign_up_schema(min_password_length: usize) -> FormSchema {
    FormSchema::new(SIGN_UP_FORM)
        .field(fields::NAME, "", vec![Rule::required("Required")])
        .field(
            fields::EMAIL,
            "",
            vec![Rule::required("Required"), Rule::email("Invalid email")],
        )
        .field(
            fields::PASSWORD,
            "",
            vec![
                Rule::required("Required"),
                Rule::min_length(min_password_length, min_password_message(min_password_length)),
            ],
        )
        .field(
            fields::CONFIRM_PASSWORD,
            "",
            vec![
                Rule::required("Required"),
                Rule::equals_field(fields::PASSWORD, "Passwords must match"),
            ],
        )
        .field(
            fields::TERMS_ACCEPTED,
            false,
            vec![Rule::must_be_true("Terms must be accepted")],
        )
}
