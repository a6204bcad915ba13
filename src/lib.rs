//! Onboarding Flow: interaction state for onboarding, login, registration,
//! and code confirmation.

pub mod auth;
pub mod code_input;
pub mod config;
pub mod error;
pub mod forms;
pub mod navigation;
pub mod onboarding;
pub mod screens;
pub mod store;
