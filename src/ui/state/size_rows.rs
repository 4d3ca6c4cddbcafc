// SPDX-License-Identifier: MPL-2.0
//! Size/stock rows for the product form.
//!
//! Sizes behave like a multi-select whose entries carry an editable stock
//! field: choosing a size from the panel toggles its row, and a size the
//! catalog does not know yet can be added straight from the query.

use super::combobox::OptionsVisibility;

/// One selected size with its stock-units input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRow {
    pub size: String,
    /// Raw text of the stock field; parsed on validation.
    pub units_input: String,
}

/// State for the size picker and its stock rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeRowsState {
    query: String,
    visibility: OptionsVisibility,
    rows: Vec<SizeRow>,
}

impl SizeRowsState {
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

    pub fn query_changed(&mut self, input: String) {
        self.query = input.trim().to_string();
        self.visibility = OptionsVisibility::Open;
    }

    /// Toggles a size: adds a zero-stock row, or removes the existing one.
    /// The query is cleared and the panel closes either way.
    pub fn choose(&mut self, size: &str) {
        if let Some(index) = self.rows.iter().position(|row| row.size == size) {
            self.rows.remove(index);
        } else {
            self.rows.push(SizeRow {
                size: size.to_string(),
                units_input: "0".to_string(),
            });
        }
        self.query.clear();
        self.visibility = OptionsVisibility::Closed;
    }

    /// True when the query names a size absent from the catalog options,
    /// so the panel should offer to add it as a custom size.
    #[must_use]
    pub fn offers_custom(&self, options: &[String]) -> bool {
        !self.query.is_empty() && !options.iter().any(|option| option == &self.query)
    }

    /// Adds the queried size as a custom row and returns its name so the
    /// caller can extend its option list. `None` when there is no query.
    pub fn add_custom(&mut self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let size = std::mem::take(&mut self.query);
        if !self.rows.iter().any(|row| row.size == size) {
            self.rows.push(SizeRow {
                size: size.clone(),
                units_input: "0".to_string(),
            });
        }
        self.visibility = OptionsVisibility::Closed;
        Some(size)
    }

    /// Edits the stock field of one row.
    pub fn units_changed(&mut self, index: usize, value: String) {
        if let Some(row) = self.rows.get_mut(index) {
            row.units_input = value;
        }
    }

    /// Removes a row via its close button.
    pub fn remove(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    /// Parses one row's stock field. `None` means invalid input.
    #[must_use]
    pub fn units_of(&self, index: usize) -> Option<u32> {
        self.rows.get(index)?.units_input.trim().parse().ok()
    }

    /// True when every row holds a parseable stock value.
    #[must_use]
    pub fn all_units_valid(&self) -> bool {
        (0..self.rows.len()).all(|index| self.units_of(index).is_some())
    }

    #[must_use]
    pub fn is_chosen(&self, size: &str) -> bool {
        self.rows.iter().any(|row| row.size == size)
    }

    #[must_use]
    pub fn rows(&self) -> &[SizeRow] {
        &self.rows
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
