//! # Customer Feedback TUI Library
//!
//! This library provides the terminal front-end of the customer feedback
//! tool: a header, a feedback form built around a type selector (a dropdown
//! choosing the identifier kind paired with a free-text field), and a
//! thank-you page that returns home after a countdown.
//!
//! ## Architecture
//!
//! The TUI follows a component-based architecture where each UI element
//! (header, form, type selector, thank-you page) is a separate component that
//! handles events and renders itself. Cross-cutting input that does not
//! follow focus (outside clicks, deferred focus moves) flows through the UI
//! event bus in `ui::events`.

mod app;
mod ui;

use anyhow::Result;
use feedback_types::TypeOptions;
use feedback_util::FeedbackSettings;
use feedback_util::settings::DEFAULT_REDIRECT_SECONDS;

/// Resolved startup configuration for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuiConfig {
    /// Options offered by the type selector.
    pub options: TypeOptions,
    /// Countdown start on the thank-you page.
    pub redirect_seconds: u64,
    /// Base id for the type selector's accessibility relationships.
    pub dom_id: Option<String>,
    /// Preferred theme identifier (`TUI_THEME` still wins).
    pub theme: Option<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            options: TypeOptions::default(),
            redirect_seconds: DEFAULT_REDIRECT_SECONDS,
            dom_id: None,
            theme: None,
        }
    }
}

impl TuiConfig {
    /// Configuration described by a settings file, with built-in defaults
    /// for anything it leaves out.
    pub fn from_settings(settings: &FeedbackSettings) -> Self {
        Self {
            options: settings.options(),
            redirect_seconds: settings.redirect_seconds(),
            dom_id: settings.dom_id().map(str::to_string),
            theme: settings.theme().map(str::to_string),
        }
    }
}

/// Runs the main TUI application loop.
///
/// Initializes the terminal, runs the event loop until the user quits
/// (Ctrl+C), and restores the terminal.
///
/// # Errors
///
/// Terminal setup failures (raw mode, alternate screen) and drawing errors.
pub async fn run(config: TuiConfig) -> Result<()> {
    ui::runtime::run_app(config).await
}
