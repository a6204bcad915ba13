//! Segmented code input: fixed-length digit cells plus a focus flag.
//!
//! Completeness is a query, not a state: the only transitions are the cell
//! writes and `Unfocused <-> Focused`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_CODE_LENGTH;
use crate::error::CodeInputError;

/// Buttons under the code cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeAction {
    Resend,
    Continue,
}

/// Which actions the screen shows. Resend is always reachable; Continue only
/// while the input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeActions {
    pub resend_visible: bool,
    pub continue_visible: bool,
}

impl CodeActions {
    pub fn available(&self) -> Vec<CodeAction> {
        let mut actions = Vec::with_capacity(2);
        if self.resend_visible {
            actions.push(CodeAction::Resend);
        }
        if self.continue_visible {
            actions.push(CodeAction::Continue);
        }
        actions
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedCodeInput {
    cells: Vec<Option<char>>,
    focused: bool,
}

impl SegmentedCodeInput {
    /// `length` cells, at least one.
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![None; length.max(1)],
            focused: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Write keyboard input into a cell.
    ///
    /// The last digit in `input` wins; empty input clears the cell. Input
    /// without any digit is rejected and the cell keeps its value.
    pub fn set_cell(&mut self, index: usize, input: &str) -> Result<(), CodeInputError> {
        let length = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(CodeInputError::IndexOutOfRange { index, length })?;

        if input.is_empty() {
            *cell = None;
        } else {
            let digit = input
                .chars()
                .rev()
                .find(char::is_ascii_digit)
                .ok_or_else(|| CodeInputError::NotNumeric {
                    index,
                    input: input.to_string(),
                })?;
            *cell = Some(digit);
        }
        debug!(index, filled = cell.is_some(), "Code cell updated");
        Ok(())
    }

    pub fn cell(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// Cell contents as strings, empty for unfilled cells.
    pub fn cells(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|c| c.map(String::from).unwrap_or_default())
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The whole code, only once every cell is filled.
    pub fn full_code(&self) -> Option<String> {
        self.cells.iter().copied().collect::<Option<String>>()
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn actions(&self) -> CodeActions {
        CodeActions {
            resend_visible: true,
            continue_visible: self.focused,
        }
    }
}

impl Default for SegmentedCodeInput {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(digits: [&str; 4]) -> SegmentedCodeInput {
        let mut input = SegmentedCodeInput::default();
        for (i, d) in digits.iter().enumerate() {
            input.set_cell(i, d).unwrap();
        }
        input
    }

    #[test]
    fn default_has_four_empty_cells() {
        let input = SegmentedCodeInput::default();
        assert_eq!(input.len(), 4);
        assert_eq!(input.filled_count(), 0);
        assert!(!input.is_focused());
    }

    #[test]
    fn zero_length_keeps_one_cell() {
        let mut input = SegmentedCodeInput::new(0);
        assert_eq!(input.len(), 1);
        assert_eq!(input.full_code(), None);
        input.set_cell(0, "7").unwrap();
        assert_eq!(input.full_code().as_deref(), Some("7"));
    }

    #[test]
    fn full_code_requires_every_cell() {
        let input = filled(["1", "2", "3", ""]);
        assert_eq!(input.full_code(), None);
        assert!(!input.is_complete());
        assert_eq!(input.cells(), vec!["1", "2", "3", ""]);

        let input = filled(["1", "2", "3", "4"]);
        assert_eq!(input.full_code().as_deref(), Some("1234"));
    }

    #[test]
    fn last_digit_wins() {
        let mut input = SegmentedCodeInput::default();
        input.set_cell(0, "5").unwrap();
        input.set_cell(0, "57").unwrap();
        assert_eq!(input.cell(0), Some('7'));
        input.set_cell(0, "8a").unwrap();
        assert_eq!(input.cell(0), Some('8'));
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        let mut input = SegmentedCodeInput::default();
        input.set_cell(1, "3").unwrap();
        assert_eq!(
            input.set_cell(1, "x"),
            Err(CodeInputError::NotNumeric {
                index: 1,
                input: "x".to_string()
            })
        );
        assert_eq!(input.cell(1), Some('3'));
    }

    #[test]
    fn empty_input_clears_cell() {
        let mut input = filled(["1", "2", "3", "4"]);
        input.set_cell(2, "").unwrap();
        assert_eq!(input.cell(2), None);
        assert_eq!(input.filled_count(), 3);
    }

    #[test]
    fn index_out_of_range() {
        let mut input = SegmentedCodeInput::default();
        assert_eq!(
            input.set_cell(4, "1"),
            Err(CodeInputError::IndexOutOfRange {
                index: 4,
                length: 4
            })
        );
        assert_eq!(input.cell(4), None);
    }

    #[test]
    fn focus_switches_action_layout() {
        let mut input = SegmentedCodeInput::default();
        input.set_focused(true);
        assert_eq!(
            input.actions().available(),
            vec![CodeAction::Resend, CodeAction::Continue]
        );

        input.set_focused(false);
        assert_eq!(input.actions().available(), vec![CodeAction::Resend]);
        assert!(input.actions().resend_visible);
    }

    #[test]
    fn focus_does_not_touch_cells() {
        let mut input = filled(["1", "2", "", ""]);
        input.set_focused(true);
        assert_eq!(input.cells(), vec!["1", "2", "", ""]);
    }

    #[test]
    fn clear_empties_all_cells() {
        let mut input = filled(["9", "9", "9", "9"]);
        input.clear();
        assert_eq!(input.filled_count(), 0);
    }
}
