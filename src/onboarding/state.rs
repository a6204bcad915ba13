//! Wizard step controller. Decides when the user may advance and where the
//! flow ends.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::FlowError;
use crate::navigation::{NavigateTo, Screen};

/// Gate deciding whether a step's exit condition holds. Reads the injected
/// context, never writes it.
pub type CompletionPredicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// One page of the wizard.
pub struct Step<C> {
    /// Position in the sequence.
    pub index: usize,
    /// Heading shown for the step.
    pub title: String,
    /// Whether completing this step ends the wizard.
    pub is_terminal: bool,
    /// `None` means the step is always complete.
    predicate: Option<CompletionPredicate<C>>,
    incomplete_message: String,
}

impl<C> Step<C> {
    /// Evaluate the step's completion predicate against `ctx`.
    pub fn is_complete(&self, ctx: &C) -> bool {
        self.predicate.as_ref().is_none_or(|p| p(ctx))
    }

    /// User-facing notice shown when the step blocks advancing.
    pub fn incomplete_message(&self) -> &str {
        &self.incomplete_message
    }

    pub fn is_gated(&self) -> bool {
        self.predicate.is_some()
    }
}

impl<C> std::fmt::Debug for Step<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("index", &self.index)
            .field("title", &self.title)
            .field("is_terminal", &self.is_terminal)
            .field("gated", &self.is_gated())
            .finish()
    }
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next step.
    Moved { from: usize, to: usize },
    /// The terminal step completed; the router should show the destination.
    Finished(NavigateTo),
}

/// Serializable snapshot of the wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: usize,
    pub step_count: usize,
    pub completed: bool,
}

/// Collects steps before the sequence is frozen.
pub struct WizardBuilder<C> {
    destination: Screen,
    steps: Vec<(String, Option<CompletionPredicate<C>>, String)>,
}

impl<C> WizardBuilder<C> {
    /// Append a step the user can always leave.
    pub fn step(mut self, title: impl Into<String>) -> Self {
        self.steps.push((title.into(), None, String::new()));
        self
    }

    /// Append a step gated by `predicate`; `message` is surfaced when it fails.
    pub fn gated_step<P>(
        mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        predicate: P,
    ) -> Self
    where
        P: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.steps
            .push((title.into(), Some(Box::new(predicate)), message.into()));
        self
    }

    /// Freeze the sequence. The last step becomes terminal.
    pub fn build(self) -> Result<WizardStepController<C>, FlowError> {
        if self.steps.is_empty() {
            return Err(FlowError::NoSteps);
        }
        let last = self.steps.len() - 1;
        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, (title, predicate, incomplete_message))| Step {
                index,
                title,
                is_terminal: index == last,
                predicate,
                incomplete_message,
            })
            .collect();
        Ok(WizardStepController {
            steps,
            current: 0,
            completed: false,
            destination: self.destination,
        })
    }
}

/// Orchestrates an ordered, immutable sequence of steps.
///
/// Every transition is caller-initiated; there is no auto-advance.
pub struct WizardStepController<C> {
    steps: Vec<Step<C>>,
    current: usize,
    completed: bool,
    destination: Screen,
}

impl<C> WizardStepController<C> {
    /// Start describing a wizard that navigates to `destination` when done.
    pub fn builder(destination: Screen) -> WizardBuilder<C> {
        WizardBuilder {
            destination,
            steps: Vec::new(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &Step<C> {
        &self.steps[self.current]
    }

    pub fn steps(&self) -> &[Step<C>] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn destination(&self) -> Screen {
        self.destination
    }

    /// Whether the terminal step has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn state(&self) -> WizardState {
        WizardState {
            current_step: self.current,
            step_count: self.steps.len(),
            completed: self.completed,
        }
    }

    /// Fraction of the wizard reached, counting the current step as reached.
    pub fn progress(&self) -> f32 {
        (self.current + 1) as f32 / self.steps.len() as f32
    }

    /// Try to leave the current step.
    ///
    /// Fails with `IncompleteStep` (state unchanged) when the step's predicate
    /// is false, and with `AlreadyTerminal` once the wizard has finished.
    pub fn advance(&mut self, ctx: &C) -> Result<Advance, FlowError> {
        if self.completed {
            return Err(FlowError::AlreadyTerminal);
        }

        let step = &self.steps[self.current];
        if !step.is_complete(ctx) {
            debug!(step = step.index, title = %step.title, "Step incomplete, not advancing");
            return Err(FlowError::IncompleteStep {
                step: step.index,
                message: step.incomplete_message.clone(),
            });
        }

        if step.is_terminal {
            self.completed = true;
            info!(step = step.index, destination = %self.destination, "Wizard completed");
            return Ok(Advance::Finished(NavigateTo(self.destination)));
        }

        let from = self.current;
        self.current += 1;
        info!(from, to = self.current, "Wizard advanced");
        Ok(Advance::Moved {
            from,
            to: self.current,
        })
    }

    /// Step back one page. No-op at the first step or after completion.
    pub fn back(&mut self) -> bool {
        if self.completed || self.current == 0 {
            return false;
        }
        self.current -= 1;
        debug!(to = self.current, "Wizard stepped back");
        true
    }

    /// Restart the flow from the first step.
    pub fn reset(&mut self) {
        self.current = 0;
        self.completed = false;
    }
}
