//! Wing Selection
//!
//! Ordered list of candidate wing models plus the AI-suggestion flag.
//! Built interactively, handed to the analysis request once, then immutable.

use serde::{Deserialize, Serialize};

/// Maximum selection size for which the suggestion toggle is offered.
const SUGGESTION_TOGGLE_LIMIT: usize = 3;

/// Candidate wing models chosen by the pilot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WingSelection {
    wings: Vec<String>,
    /// Whether the AI should propose additional coherent models
    pub include_suggestions: bool,
}

impl Default for WingSelection {
    fn default() -> Self {
        Self {
            wings: Vec::new(),
            include_suggestions: true,
        }
    }
}

impl WingSelection {
    /// Add a wing name. Silently ignores empty input and case-sensitive
    /// duplicates of an already-added name. Leading and trailing whitespace
    /// is trimmed before the duplicate check.
    pub fn add(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.wings.iter().any(|w| w == name) {
            return;
        }
        self.wings.push(name.to_string());
    }

    /// Remove exactly one matching entry, leaving the order of the others
    /// unchanged. Unknown names are ignored.
    pub fn remove(&mut self, name: &str) {
        if let Some(pos) = self.wings.iter().position(|w| w == name) {
            self.wings.remove(pos);
        }
    }

    /// The selected names, in insertion order.
    pub fn wings(&self) -> &[String] {
        &self.wings
    }

    pub fn is_empty(&self) -> bool {
        self.wings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.wings.len()
    }

    /// The suggestion toggle is only offered for small selections; beyond
    /// that the report is already crowded.
    pub fn suggestion_toggle_available(&self) -> bool {
        self.wings.len() <= SUGGESTION_TOGGLE_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_dedups() {
        let mut sel = WingSelection::default();
        sel.add("  Epsilon ");
        sel.add("Epsilon");
        sel.add("");
        sel.add("   ");
        assert_eq!(sel.wings(), ["Epsilon"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut sel = WingSelection::default();
        sel.add("Epsilon");
        sel.add("epsilon");
        assert_eq!(sel.wings(), ["Epsilon", "epsilon"]);
    }

    #[test]
    fn test_remove_exactly_one_keeps_order() {
        let mut sel = WingSelection::default();
        sel.add("Epsilon");
        sel.add("Alpina 4");
        sel.add("Iota DLS");
        sel.remove("Alpina 4");
        assert_eq!(sel.wings(), ["Epsilon", "Iota DLS"]);
        sel.remove("absente");
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_suggestion_toggle_availability() {
        let mut sel = WingSelection::default();
        assert!(sel.suggestion_toggle_available());
        for name in ["A", "B", "C", "D"] {
            sel.add(name);
        }
        assert!(!sel.suggestion_toggle_available());
    }
}
