//! Onboarding system: first-launch introductory wizard.
//!
//! An intro page followed by an interest-selection page. The selection step
//! gates on at least one interest being picked; finishing hands the
//! selection to the session store and navigates to login.

pub mod manager;
pub mod model;
pub mod selection;
pub mod state;

pub use manager::OnboardingManager;
pub use model::OnboardingProfile;
pub use selection::SelectionSet;
pub use state::{Advance, Step, WizardState, WizardStepController};
