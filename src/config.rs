//! Configuration types.

use crate::error::ConfigError;
use crate::onboarding::model::DEFAULT_INTERESTS;

/// Default number of cells in the confirmation code.
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Default minimum password length for login and registration.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

/// Flow configuration.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Number of digits in the confirmation code.
    pub code_length: usize,
    /// Minimum password length enforced by the login and sign-up forms.
    pub min_password_length: usize,
    /// Interests offered on the personalization step.
    pub interests: Vec<String>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            min_password_length: DEFAULT_MIN_PASSWORD_LEN,
            interests: DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FlowConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// - `ONBOARD_CODE_LENGTH`: digits in the confirmation code
    /// - `ONBOARD_MIN_PASSWORD_LEN`: minimum password length
    /// - `ONBOARD_INTERESTS`: comma-separated interest catalog
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("ONBOARD_CODE_LENGTH") {
            config.code_length = parse_positive("ONBOARD_CODE_LENGTH", &raw)?;
        }

        if let Ok(raw) = std::env::var("ONBOARD_MIN_PASSWORD_LEN") {
            config.min_password_length = parse_positive("ONBOARD_MIN_PASSWORD_LEN", &raw)?;
        }

        if let Ok(raw) = std::env::var("ONBOARD_INTERESTS") {
            config.interests = parse_interests(&raw)?;
        }

        Ok(config)
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}

fn parse_interests(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut interests: Vec<String> = Vec::new();
    for label in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !interests.iter().any(|existing| existing == label) {
            interests.push(label.to_string());
        }
    }
    if interests.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "ONBOARD_INTERESTS".to_string(),
            message: "at least one interest is required".to_string(),
        });
    }
    Ok(interests)
}
