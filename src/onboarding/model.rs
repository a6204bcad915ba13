//! Onboarding copy, interest catalog, and the profile handed to the session
//! store when the flow completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Interests offered on the personalization step.
pub const DEFAULT_INTERESTS: [&str; 8] = [
    "User Interface",
    "User Experience",
    "User Research",
    "UX Writing",
    "User Testing",
    "Service Design",
    "Strategy",
    "Design Systems",
];

pub const INTRO_TITLE: &str = "Create a prototype in just a few minutes";
pub const INTRO_DESCRIPTION: &str =
    "Enjoy these pre-made components and worry only about creating the best product ever.";
pub const INTERESTS_TITLE: &str = "Personalize your experience";
pub const INTERESTS_SUBTITLE: &str = "Choose your interests";
pub const INTERESTS_REQUIRED: &str = "Please select at least one interest.";

/// What the onboarding flow produced.
///
/// Stored in the session store as JSON under key `"onboarding_profile"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    pub session_id: Uuid,
    /// Selected interests, sorted.
    pub interests: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// Settings keys used for onboarding persistence.
pub mod settings_keys {
    /// Key for the OnboardingProfile JSON blob.
    pub const ONBOARDING_PROFILE: &str = "onboarding_profile";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_no_duplicates() {
        let mut labels = DEFAULT_INTERESTS.to_vec();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), DEFAULT_INTERESTS.len());
    }

    #[test]
    fn profile_serde_roundtrip() {
        let profile = OnboardingProfile {
            session_id: Uuid::new_v4(),
            interests: vec!["Strategy".to_string(), "UX Writing".to_string()],
            completed_at: Utc::now(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["interests"][1], "UX Writing");

        let parsed: OnboardingProfile = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, profile);
    }
}
