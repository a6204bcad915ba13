//! End-to-end walk through onboarding, registration, confirmation and login
//! against the in-memory collaborators.

use std::sync::Arc;

use onboarding_flow::auth::InMemoryAuthBackend;
use onboarding_flow::config::FlowConfig;
use onboarding_flow::error::{Error, FlowError, FormError};
use onboarding_flow::forms::schemas::fields;
use onboarding_flow::navigation::{NavigateTo, Router, Screen, StackRouter};
use onboarding_flow::onboarding::model::settings_keys;
use onboarding_flow::onboarding::{OnboardingManager, OnboardingProfile};
use onboarding_flow::screens::{ConfirmationScreen, LoginScreen, SignUpScreen};
use onboarding_flow::store::{MemorySessionStore, SessionStore};

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "abc123";

#[tokio::test]
async fn full_journey_reaches_home() {
    let config = FlowConfig::default();
    let store = Arc::new(MemorySessionStore::new());
    let backend = InMemoryAuthBackend::new(config.code_length);
    let mut router = StackRouter::default();

    // Onboarding: intro, then the interest gate.
    let mut onboarding = OnboardingManager::new(&config, store.clone()).unwrap();
    assert_eq!(onboarding.next().await.unwrap(), None);
    assert!(matches!(
        onboarding.next().await,
        Err(Error::Flow(FlowError::IncompleteStep { .. }))
    ));
    onboarding.toggle_interest("User Research").unwrap();
    let signal = onboarding.next().await.unwrap().expect("navigates");
    router.navigate(signal);
    assert_eq!(router.current(), Screen::Login);

    let stored = store
        .get_setting(settings_keys::ONBOARDING_PROFILE)
        .await
        .unwrap()
        .unwrap();
    let profile: OnboardingProfile = serde_json::from_value(stored).unwrap();
    assert_eq!(profile.interests, vec!["User Research"]);

    // Login -> "Register now".
    let login = LoginScreen::new(&config);
    router.navigate(login.register_link());
    assert_eq!(router.current(), Screen::SignUp);

    // Sign up: first attempt misses name and terms.
    let mut sign_up = SignUpScreen::new(&config);
    {
        let form = sign_up.form_mut();
        form.set_value(fields::EMAIL, EMAIL).unwrap();
        form.set_value(fields::PASSWORD, PASSWORD).unwrap();
        form.set_value(fields::CONFIRM_PASSWORD, PASSWORD).unwrap();
    }
    let err = sign_up.submit(&backend).await.unwrap_err();
    let Error::Form(FormError::ValidationFailed(errors)) = err else {
        panic!("Expected ValidationFailed, got {err:?}");
    };
    assert_eq!(errors.fields(), vec![fields::NAME, fields::TERMS_ACCEPTED]);
    assert_eq!(
        sign_up.form().visible_error(fields::NAME),
        Some("Required"),
        "Untouched fields show errors after a submit attempt"
    );

    {
        let form = sign_up.form_mut();
        form.set_value(fields::NAME, "Ada").unwrap();
        form.set_value(fields::TERMS_ACCEPTED, true).unwrap();
    }
    assert!(sign_up.submit_enabled());
    router.navigate(sign_up.submit(&backend).await.unwrap());
    assert_eq!(router.current(), Screen::Confirmation);

    // Confirmation.
    let email = sign_up.registered_email().unwrap().to_string();
    let mut confirmation = ConfirmationScreen::new(&email, config.code_length);
    confirmation.set_focused(true);
    assert!(confirmation.actions().continue_visible);

    let code = backend.pending_code(&email).await.unwrap();
    for (i, digit) in code.chars().enumerate() {
        confirmation.set_digit(i, &digit.to_string()).unwrap();
    }
    router.navigate(confirmation.submit(&backend).await.unwrap());
    assert_eq!(router.current(), Screen::Home);

    // The confirmed account can now log in.
    let mut login = LoginScreen::new(&config);
    login.form_mut().set_value(fields::EMAIL, EMAIL).unwrap();
    login.form_mut().set_value(fields::PASSWORD, PASSWORD).unwrap();
    assert_eq!(
        login.submit(&backend).await.unwrap(),
        NavigateTo(Screen::Home)
    );

    assert_eq!(
        router.history(),
        &[
            Screen::Onboarding,
            Screen::Login,
            Screen::SignUp,
            Screen::Confirmation,
            Screen::Home
        ]
    );
}

#[tokio::test]
async fn unconfirmed_account_cannot_log_in() {
    let config = FlowConfig::default();
    let backend = InMemoryAuthBackend::new(config.code_length);

    let mut sign_up = SignUpScreen::new(&config);
    {
        let form = sign_up.form_mut();
        form.set_value(fields::NAME, "Ada").unwrap();
        form.set_value(fields::EMAIL, EMAIL).unwrap();
        form.set_value(fields::PASSWORD, PASSWORD).unwrap();
        form.set_value(fields::CONFIRM_PASSWORD, PASSWORD).unwrap();
        form.set_value(fields::TERMS_ACCEPTED, true).unwrap();
    }
    sign_up.submit(&backend).await.unwrap();

    let mut login = LoginScreen::new(&config);
    login.form_mut().set_value(fields::EMAIL, EMAIL).unwrap();
    login.form_mut().set_value(fields::PASSWORD, PASSWORD).unwrap();
    assert!(matches!(
        login.submit(&backend).await,
        Err(Error::Auth(_))
    ));
}
