//! Validation rules: pure checks of one field against the full value map.
//!
//! A field carries an ordered rule chain. Evaluation stops at the first rule
//! that fails; its message is the field's error.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::value::{FieldValue, FormValues};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Caller-supplied check: `(value, all values) -> error message`.
pub type CustomRule = Arc<dyn Fn(&FieldValue, &FormValues) -> Option<String> + Send + Sync>;

/// A single validation rule.
#[derive(Clone)]
pub enum Rule {
    /// Text must be non-empty; a flag must be true.
    Required { message: String },
    /// Non-empty text must match `regex`. Empty text is left to `Required`.
    Pattern { regex: Regex, message: String },
    /// Text must have at least `min` characters.
    MinLength { min: usize, message: String },
    /// Value must equal the value of field `other`.
    EqualsField { other: String, message: String },
    /// Flag must be true (e.g. terms acceptance).
    MustBeTrue { message: String },
    Custom(CustomRule),
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::Pattern {
            regex: EMAIL_PATTERN.clone(),
            message: message.into(),
        }
    }

    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::Pattern {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn equals_field(other: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EqualsField {
            other: other.into(),
            message: message.into(),
        }
    }

    pub fn must_be_true(message: impl Into<String>) -> Self {
        Self::MustBeTrue {
            message: message.into(),
        }
    }

    pub fn custom<F>(check: F) -> Self
    where
        F: Fn(&FieldValue, &FormValues) -> Option<String> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(check))
    }

    /// Check `value`. Returns the error message on failure.
    pub fn evaluate(&self, value: &FieldValue, values: &FormValues) -> Option<String> {
        let failed = match self {
            Self::Required { .. } => match value {
                FieldValue::Text(s) => s.is_empty(),
                FieldValue::Flag(b) => !b,
            },
            Self::Pattern { regex, .. } => match value {
                FieldValue::Text(s) => !s.is_empty() && !regex.is_match(s),
                FieldValue::Flag(_) => true,
            },
            Self::MinLength { min, .. } => match value {
                FieldValue::Text(s) => s.chars().count() < *min,
                FieldValue::Flag(_) => true,
            },
            Self::EqualsField { other, .. } => values.get(other) != Some(value),
            Self::MustBeTrue { .. } => value.as_flag() != Some(true),
            Self::Custom(check) => return check(value, values),
        };
        failed.then(|| self.message().to_string())
    }

    fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::Pattern { message, .. }
            | Self::MinLength { message, .. }
            | Self::EqualsField { message, .. }
            | Self::MustBeTrue { message } => message,
            Self::Custom(_) => "",
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required { message } => write!(f, "Required({message:?})"),
            Self::Pattern { regex, message } => write!(f, "Pattern({}, {message:?})", regex.as_str()),
            Self::MinLength { min, message } => write!(f, "MinLength({min}, {message:?})"),
            Self::EqualsField { other, message } => write!(f, "EqualsField({other}, {message:?})"),
            Self::MustBeTrue { message } => write!(f, "MustBeTrue({message:?})"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Run a rule chain, stopping at the first failure.
pub fn first_error(rules: &[Rule], value: &FieldValue, values: &FormValues) -> Option<String> {
    rules.iter().find_map(|rule| rule.evaluate(value, values))
}
