use std::sync::Arc;

use anyhow::{Context, anyhow};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use onboarding_flow::auth::InMemoryAuthBackend;
use onboarding_flow::config::FlowConfig;
use onboarding_flow::error::{Error, FlowError, FormError};
use onboarding_flow::forms::FormState;
use onboarding_flow::forms::schemas::fields;
use onboarding_flow::navigation::{NavigateTo, Router, Screen, StackRouter};
use onboarding_flow::onboarding::OnboardingManager;
use onboarding_flow::screens::{ConfirmationScreen, LoginScreen, SignUpScreen};
use onboarding_flow::store::MemorySessionStore;

/// Line-oriented stdin reader.
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> anyhow::Result<String> {
        eprint!("{label}> ");
        let line = self
            .lines
            .next_line()
            .await
            .context("Failed to read stdin")?
            .ok_or_else(|| anyhow!("Input closed"))?;
        Ok(line.trim().to_string())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = FlowConfig::from_env()?;
    let store = Arc::new(MemorySessionStore::new());
    let backend = InMemoryAuthBackend::new(config.code_length);
    let mut onboarding = OnboardingManager::new(&config, store)?;
    let mut router = StackRouter::default();
    let mut prompt = Prompt::new();
    let mut pending_email: Option<String> = None;

    eprintln!("Onboarding Flow v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Code length: {}", config.code_length);
    eprintln!("   Interests: {}\n", config.interests.len());

    loop {
        let signal = match router.current() {
            Screen::Onboarding => run_onboarding(&mut onboarding, &mut prompt).await?,
            Screen::Login => run_login(&config, &backend, &mut prompt).await?,
            Screen::SignUp => {
                let (signal, email) = run_sign_up(&config, &backend, &mut prompt).await?;
                pending_email = email;
                signal
            }
            Screen::Confirmation => {
                let email = pending_email
                    .clone()
                    .ok_or_else(|| anyhow!("No account waiting for confirmation"))?;
                run_confirmation(&config, &backend, &email, &mut prompt).await?
            }
            Screen::Home => {
                if let Some(profile) = onboarding.profile() {
                    eprintln!("Welcome! Interests: {}", profile.interests.join(", "));
                }
                break;
            }
        };
        router.navigate(signal);
    }

    Ok(())
}

async fn run_onboarding(
    onboarding: &mut OnboardingManager,
    prompt: &mut Prompt,
) -> anyhow::Result<NavigateTo> {
    loop {
        let step = onboarding.current_step();
        eprintln!("\n== {} ({:.0}%)", step.title, onboarding.progress() * 100.0);
        eprintln!("{}", onboarding.step_description());

        let input = if step.is_gated() {
            for (i, label) in onboarding.catalog().iter().enumerate() {
                let mark = if onboarding.is_selected(label) { "x" } else { " " };
                eprintln!("  {}. [{mark}] {label}", i + 1);
            }
            prompt.ask("number to toggle, 'back', or Enter to finish").await?
        } else {
            prompt.ask("Enter for next").await?
        };

        if input == "back" {
            onboarding.back();
            continue;
        }
        if let Ok(n) = input.parse::<usize>() {
            if let Some(label) = onboarding.catalog().get(n.wrapping_sub(1)).cloned() {
                onboarding.toggle_interest(&label)?;
            }
            continue;
        }

        match onboarding.next().await {
            Ok(Some(signal)) => return Ok(signal),
            Ok(None) => {}
            Err(Error::Flow(FlowError::IncompleteStep { message, .. })) => {
                eprintln!("!! {message}");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read one text field, mark it blurred, and show its error if any.
async fn fill_text(
    form: &mut FormState,
    prompt: &mut Prompt,
    field: &str,
    label: &str,
) -> anyhow::Result<()> {
    let value = prompt.ask(label).await?;
    form.set_value(field, value)?;
    form.set_touched(field)?;
    if let Some(error) = form.visible_error(field) {
        eprintln!("   {error}");
    }
    Ok(())
}

fn report_submit_error(error: Error) -> anyhow::Result<()> {
    match error {
        Error::Form(FormError::ValidationFailed(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("!! {field}: {message}");
            }
            Ok(())
        }
        Error::Auth(e) => {
            eprintln!("!! {e}");
            Ok(())
        }
        other => Err(other.into()),
    }
}

async fn run_login(
    config: &FlowConfig,
    backend: &InMemoryAuthBackend,
    prompt: &mut Prompt,
) -> anyhow::Result<NavigateTo> {
    let mut screen = LoginScreen::new(config);
    eprintln!("\n== Welcome!");
    loop {
        if prompt.ask("[l]og in or [r]egister").await? == "r" {
            return Ok(screen.register_link());
        }
        fill_text(screen.form_mut(), prompt, fields::EMAIL, "Email Address").await?;
        fill_text(screen.form_mut(), prompt, fields::PASSWORD, "Password").await?;
        match screen.submit(backend).await {
            Ok(signal) => return Ok(signal),
            Err(e) => report_submit_error(e)?,
        }
    }
}

async fn run_sign_up(
    config: &FlowConfig,
    backend: &InMemoryAuthBackend,
    prompt: &mut Prompt,
) -> anyhow::Result<(NavigateTo, Option<String>)> {
    let mut screen = SignUpScreen::new(config);
    eprintln!("\n== Sign up");
    loop {
        fill_text(screen.form_mut(), prompt, fields::NAME, "Name").await?;
        fill_text(screen.form_mut(), prompt, fields::EMAIL, "Email Address").await?;
        fill_text(screen.form_mut(), prompt, fields::PASSWORD, "Password").await?;
        fill_text(screen.form_mut(), prompt, fields::CONFIRM_PASSWORD, "Confirm password").await?;
        let accepted = prompt.ask("Accept the Terms and Privacy Policy? [y/N]").await?;
        screen
            .form_mut()
            .set_value(fields::TERMS_ACCEPTED, accepted.eq_ignore_ascii_case("y"))?;

        if !screen.submit_enabled() {
            eprintln!("!! Terms must be accepted");
            continue;
        }
        match screen.submit(backend).await {
            Ok(signal) => {
                let email = screen.registered_email().map(str::to_string);
                return Ok((signal, email));
            }
            Err(e) => report_submit_error(e)?,
        }
    }
}

async fn run_confirmation(
    config: &FlowConfig,
    backend: &InMemoryAuthBackend,
    email: &str,
    prompt: &mut Prompt,
) -> anyhow::Result<NavigateTo> {
    let mut screen = ConfirmationScreen::new(email, config.code_length);
    eprintln!("\n== Enter confirmation code");
    eprintln!("{}", screen.prompt());
    loop {
        if let Some(code) = backend.pending_code(email).await {
            eprintln!("   (demo backend sent {code})");
        }

        screen.set_focused(true);
        let actions = screen.actions().available();
        let input = prompt
            .ask(&format!("code, or 'resend' (actions: {actions:?})"))
            .await?;
        screen.set_focused(false);

        if input == "resend" {
            if let Err(e) = screen.resend(backend).await {
                report_submit_error(e)?;
            }
            continue;
        }

        let mut digits = input.chars();
        for index in 0..screen.code().len() {
            let cell = digits.next().map(String::from).unwrap_or_default();
            if let Err(e) = screen.set_digit(index, &cell) {
                eprintln!("!! {e}");
            }
        }

        match screen.submit(backend).await {
            Ok(signal) => return Ok(signal),
            Err(Error::CodeInput(e)) => eprintln!("!! {e}"),
            Err(e) => report_submit_error(e)?,
        }
    }
}
