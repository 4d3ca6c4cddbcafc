// SPDX-License-Identifier: MPL-2.0
//! Multi-select combobox state (color picker).
//!
//! Same explicit-visibility discipline as the single-select combobox, but
//! the selection is a set: choosing an option toggles its membership, and
//! selected entries render as removable chips below the input.

use super::combobox::OptionsVisibility;

/// State for a multi-select combobox with type-ahead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSelectState {
    query: String,
    visibility: OptionsVisibility,
    selections: Vec<String>,
}

impl MultiSelectState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&mut self) {
        self.visibility = OptionsVisibility::Open;
    }

    pub fn close(&mut self) {
        self.visibility = OptionsVisibility::Closed;
    }

    /// The query text changed. Typing always reopens the panel.
    pub fn query_changed(&mut self, input: String) {
        self.query = input.trim().to_string();
        self.visibility = OptionsVisibility::Open;
    }

    /// Toggles an option in or out of the selection. Either way the query is
    /// cleared and the panel closes, ready for the next pick.
    pub fn toggle(&mut self, name: &str) {
        if let Some(index) = self.selections.iter().position(|s| s == name) {
            self.selections.remove(index);
        } else {
            self.selections.push(name.to_string());
        }
        self.query.clear();
        self.visibility = OptionsVisibility::Closed;
    }

    /// Removes a selection via its chip; the panel state is untouched.
    pub fn remove(&mut self, name: &str) {
        self.selections.retain(|s| s != name);
    }

    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        self.selections.iter().any(|s| s == name)
    }

    #[must_use]
    pub fn selections(&self) -> &[String] {
        &self.selections
    }

    #[must_use]
    pub fn shows_options(&self) -> bool {
        self.visibility == OptionsVisibility::Open
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Options matching the query, case-insensitively, by substring.
    #[must_use]
    pub fn filtered<'a>(&self, options: &'a [String]) -> Vec<&'a String> {
        if self.query.is_empty() {
            return options.iter().collect();
        }
        let needle = self.query.to_lowercase();
        options
            .iter()
            .filter(|option| option.to_lowercase().contains(&needle))
            .collect()
    }

    /// True when the panel should show the "no match" placeholder.
    #[must_use]
    pub fn no_match(&self, options: &[String]) -> bool {
        !self.query.is_empty() && self.filtered(options).is_empty()
    }
}
