//! Toggleable set of selected labels (interest picking).

use std::collections::HashSet;

use tracing::debug;

/// Set of unique labels with toggle semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    labels: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `label` if absent, remove it if present. Returns the new
    /// membership.
    pub fn toggle(&mut self, label: &str) -> bool {
        let selected = if self.labels.remove(label) {
            false
        } else {
            self.labels.insert(label.to_string());
            true
        };
        debug!(label, selected, size = self.labels.len(), "Selection toggled");
        selected
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Selected labels in sorted order, for persistence.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.labels.iter().cloned().collect();
        labels.sort();
        labels
    }
}
