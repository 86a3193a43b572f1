//! Accessibility relationships exposed by the type selector.
//!
//! Mirrors the popup-button/listbox/option contract that assistive tooling
//! relies on. Identifiers derive from the optional base id; without one they
//! are simply absent.

/// Popup-button semantics of the dropdown trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerA11y {
    pub id: Option<String>,
    pub haspopup: &'static str,
    pub expanded: bool,
    pub controls: Option<String>,
}

/// One entry of the listbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionA11y {
    pub role: &'static str,
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// Listbox semantics; only present while the list is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListA11y {
    pub role: &'static str,
    pub id: Option<String>,
    pub options: Vec<OptionA11y>,
}

/// The labeled text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputA11y {
    pub id: Option<String>,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSelectA11y {
    pub trigger: TriggerA11y,
    pub list: Option<ListA11y>,
    pub input: InputA11y,
}

pub fn trigger_id(base: &str) -> String {
    format!("{base}-type")
}

pub fn list_id(base: &str) -> String {
    format!("{base}-type-list")
}
