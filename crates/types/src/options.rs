//! Option model for the type selector.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One selectable entry of the type selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOption {
    /// Unique identifier used for comparison and controlled-state mapping
    pub value: String,
    /// Short text shown on the trigger and in the list
    pub label: String,
    /// Hint shown in the text field while it is empty
    pub placeholder: String,
}

impl TypeOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Case-insensitive check of whether the label starts with `ch`.
    pub fn label_starts_with(&self, ch: char) -> bool {
        let needle: String = ch.to_lowercase().collect();
        self.label.to_lowercase().starts_with(&needle)
    }
}

/// Rejected option sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("option set must contain at least one entry")]
    Empty,
    #[error("option value '{0}' appears more than once")]
    DuplicateValue(String),
}

/// Ordered, non-empty set of options with unique values.
///
/// Order determines both the visual order and the keyboard navigation
/// sequence. The set is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TypeOption>", into = "Vec<TypeOption>")]
pub struct TypeOptions {
    entries: Vec<TypeOption>,
}

impl TypeOptions {
    pub fn new(entries: Vec<TypeOption>) -> Result<Self, OptionsError> {
        if entries.is_empty() {
            return Err(OptionsError::Empty);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.value.as_str()) {
                return Err(OptionsError::DuplicateValue(entry.value.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn as_slice(&self) -> &[TypeOption] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeOption> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TypeOption> {
        self.entries.get(index)
    }

    pub fn first(&self) -> &TypeOption {
        &self.entries[0]
    }

    pub fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Index of the option carrying `value`.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.value == value)
    }

    /// Resolves `value` to its option, falling back to the first entry when
    /// the value is unknown.
    pub fn resolve(&self, value: &str) -> &TypeOption {
        self.entries.iter().find(|entry| entry.value == value).unwrap_or_else(|| self.first())
    }

    /// Index of the first option whose label starts with `ch`, ignoring case.
    pub fn find_by_initial(&self, ch: char) -> Option<usize> {
        self.entries.iter().position(|entry| entry.label_starts_with(ch))
    }
}

impl Default for TypeOptions {
    fn default() -> Self {
        Self {
            entries: vec![
                TypeOption::new("customerID", "Customer ID", "Enter your customer ID here..."),
                TypeOption::new("ticketID", "Ticket ID", "Enter your ticket ID here..."),
            ],
        }
    }
}

impl TryFrom<Vec<TypeOption>> for TypeOptions {
    type Error = OptionsError;

    fn try_from(entries: Vec<TypeOption>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<TypeOptions> for Vec<TypeOption> {
    fn from(options: TypeOptions) -> Self {
        options.entries
    }
}

impl<'a> IntoIterator for &'a TypeOptions {
    type Item = &'a TypeOption;
    type IntoIter = std::slice::Iter<'a, TypeOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
