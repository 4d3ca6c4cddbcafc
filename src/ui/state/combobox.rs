// SPDX-License-Identifier: MPL-2.0
//! Single-select combobox state.
//!
//! The dropdown's visibility is an explicit finite-state value instead of a
//! pair of booleans scattered through the widget tree, so every transition
//! (typing reopens, choosing closes, clicking away closes) is a pure reducer
//! that can be tested without rendering anything.

/// Whether the option panel is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionsVisibility {
    /// Panel hidden; the input may still hold a query.
    #[default]
    Closed,
    /// Panel visible, options filtered by the query.
    Open,
}

/// State for a single-select combobox with type-ahead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboboxState {
    query: String,
    visibility: OptionsVisibility,
    selection: Option<String>,
}

impl ComboboxState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The input gained focus or was clicked.
    pub fn opened(&mut self) {
        self.visibility = OptionsVisibility::Open;
    }

    /// The panel was dismissed (click-away, escape).
    pub fn close(&mut self) {
        self.visibility = OptionsVisibility::Closed;
    }

    /// The query text changed. Typing always reopens the panel.
    pub fn query_changed(&mut self, input: String) {
        self.query = input.trim().to_string();
        self.visibility = OptionsVisibility::Open;
    }

    /// An option was chosen: it becomes the selection, the query is cleared
    /// and the panel closes.
    pub fn select(&mut self, name: &str) {
        self.selection = Some(name.to_string());
        self.query.clear();
        self.visibility = OptionsVisibility::Closed;
    }

    /// Drops the selection without touching the panel (used when upstream
    /// data invalidates it, e.g. the category changed under a sub-category).
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    #[must_use]
    pub fn shows_options(&self) -> bool {
        self.visibility == OptionsVisibility::Open
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
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

    /// True when the query names an option that does not exist yet, so the
    /// panel should offer to create it.
    #[must_use]
    pub fn offers_add(&self, options: &[String]) -> bool {
        !self.query.is_empty()
            && !options
                .iter()
                .any(|option| option.eq_ignore_ascii_case(&self.query))
    }
}
