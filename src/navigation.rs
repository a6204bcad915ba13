//! Screen names and the navigation signal consumed by the router.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The closed set of screens in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Onboarding,
    Login,
    SignUp,
    Confirmation,
    /// The app's home screen, outside this flow.
    Home,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Onboarding => "Onboarding",
            Self::Login => "Login",
            Self::SignUp => "SignUp",
            Self::Confirmation => "Confirmation",
            Self::Home => "Home",
        };
        write!(f, "{s}")
    }
}

/// Signal asking the router to show another screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateTo(pub Screen);

impl NavigateTo {
    pub fn screen(&self) -> Screen {
        self.0
    }
}

/// Consumes navigation signals.
pub trait Router {
    /// Apply a navigation signal.
    fn navigate(&mut self, signal: NavigateTo);

    /// The screen currently shown.
    fn current(&self) -> Screen;
}

/// Stack-based router keeping the navigation history.
#[derive(Debug, Clone)]
pub struct StackRouter {
    stack: Vec<Screen>,
}

impl StackRouter {
    /// Create a router showing `initial`.
    pub fn new(initial: Screen) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    /// Pop back to the previous screen. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Screens visited, oldest first.
    pub fn history(&self) -> &[Screen] {
        &self.stack
    }
}

impl Default for StackRouter {
    fn default() -> Self {
        Self::new(Screen::Onboarding)
    }
}

impl Router for StackRouter {
    fn navigate(&mut self, signal: NavigateTo) {
        debug!(from = %self.current(), to = %signal.0, "Navigating");
        self.stack.push(signal.0);
    }

    fn current(&self) -> Screen {
        // The stack is never empty: `new` seeds it and `go_back` keeps the root.
        self.stack.last().copied().unwrap_or(Screen::Onboarding)
    }
}
