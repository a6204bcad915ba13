//! OnboardingManager: coordinates the intro wizard, interest selection, and
//! the hand-off to the session store.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::FlowConfig;
use crate::error::{FlowError, Result, StoreError};
use crate::navigation::{NavigateTo, Screen};
use crate::store::SessionStore;

use super::model::{
    INTERESTS_REQUIRED, INTERESTS_SUBTITLE, INTERESTS_TITLE, INTRO_DESCRIPTION, INTRO_TITLE,
    OnboardingProfile, settings_keys,
};
use super::selection::SelectionSet;
use super::state::{Advance, Step, WizardState, WizardStepController};

/// Drives the onboarding screen: intro page, then interest picking.
pub struct OnboardingManager {
    wizard: WizardStepController<SelectionSet>,
    interests: SelectionSet,
    catalog: Vec<String>,
    store: Arc<dyn SessionStore>,
    session_id: Uuid,
    profile: Option<OnboardingProfile>,
}

impl OnboardingManager {
    pub fn new(
        config: &FlowConfig,
        store: Arc<dyn SessionStore>,
    ) -> std::result::Result<Self, FlowError> {
        let wizard = WizardStepController::builder(Screen::Login)
            .step(INTRO_TITLE)
            .gated_step(INTERESTS_TITLE, INTERESTS_REQUIRED, |selected: &SelectionSet| {
                !selected.is_empty()
            })
            .build()?;

        Ok(Self {
            wizard,
            interests: SelectionSet::new(),
            catalog: config.interests.clone(),
            store,
            session_id: Uuid::new_v4(),
            profile: None,
        })
    }

    /// Interests the user can pick from.
    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn interests(&self) -> &SelectionSet {
        &self.interests
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.interests.contains(label)
    }

    /// Toggle a catalog interest. Returns the new membership.
    pub fn toggle_interest(&mut self, label: &str) -> std::result::Result<bool, FlowError> {
        if !self.catalog.iter().any(|c| c == label) {
            return Err(FlowError::UnknownInterest(label.to_string()));
        }
        Ok(self.interests.toggle(label))
    }

    pub fn current_step(&self) -> &Step<SelectionSet> {
        self.wizard.current_step()
    }

    /// Body copy shown under the current step's title.
    pub fn step_description(&self) -> &'static str {
        if self.wizard.current_step().is_gated() {
            INTERESTS_SUBTITLE
        } else {
            INTRO_DESCRIPTION
        }
    }

    pub fn state(&self) -> WizardState {
        self.wizard.state()
    }

    pub fn progress(&self) -> f32 {
        self.wizard.progress()
    }

    pub fn is_complete(&self) -> bool {
        self.wizard.is_completed()
    }

    /// The profile produced when the flow completed, if it has.
    pub fn profile(&self) -> Option<&OnboardingProfile> {
        self.profile.as_ref()
    }

    /// Handle the Next/Finish button.
    ///
    /// Returns `Some(NavigateTo(Login))` when the final step completes, after
    /// handing the selected interests to the session store.
    pub async fn next(&mut self) -> Result<Option<NavigateTo>> {
        match self.wizard.advance(&self.interests)? {
            Advance::Moved { .. } => Ok(None),
            Advance::Finished(signal) => {
                let profile = OnboardingProfile {
                    session_id: self.session_id,
                    interests: self.interests.to_sorted_vec(),
                    completed_at: Utc::now(),
                };
                info!(
                    session_id = %profile.session_id,
                    interests = profile.interests.len(),
                    "Onboarding complete"
                );
                self.persist_profile(&profile).await;
                self.profile = Some(profile);
                Ok(Some(signal))
            }
        }
    }

    pub fn back(&mut self) -> bool {
        self.wizard.back()
    }

    /// Start over with a fresh session and no selections.
    pub fn restart(&mut self) {
        self.wizard.reset();
        self.interests.clear();
        self.session_id = Uuid::new_v4();
        self.profile = None;
    }

    /// Write the profile to the session store. Failures are logged; the
    /// profile stays available through `profile()`.
    async fn persist_profile(&self, profile: &OnboardingProfile) {
        if let Err(e) = self.write_profile(profile).await {
            warn!("Failed to persist onboarding profile: {}", e);
        }
    }

    async fn write_profile(
        &self,
        profile: &OnboardingProfile,
    ) -> std::result::Result<(), StoreError> {
        let value = serde_json::to_value(profile)?;
        self.store
            .set_setting(settings_keys::ONBOARDING_PROFILE, &value)
            .await
    }
}
