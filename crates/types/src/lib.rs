//! Shared types for the feedback TUI.
//!
//! The option model lives in [`options`]; this module holds the message and
//! effect vocabulary exchanged between the runtime and UI components.

use std::fmt;

pub mod options;

pub use options::{OptionsError, TypeOption, TypeOptions};

/// Identifies a widget instance on the UI event bus.
///
/// Keys are derived from a component's base identifier so that listeners and
/// scheduled frame tasks can be routed back to the instance that owns them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetKey(String);

impl WidgetKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Work deferred to the frame after the next draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// Move input focus into a freshly opened dropdown list.
    FocusList,
}

/// Messages that can be sent to update the application state.
///
/// This enum defines the user actions and system events that can trigger
/// state changes in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (countdowns)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// A left mouse-down somewhere on screen, delivered to a widget that
    /// subscribed to global pointer-down events.
    GlobalPointerDown { widget: WidgetKey, column: u16, row: u16 },
    /// A task scheduled for the next frame is due.
    NextFrame { widget: WidgetKey, action: FrameAction },
}

/// Side effects that can be triggered by state changes.
///
/// Components report effects rather than reaching into global state; the
/// runtime executes them after the event that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Change the main view
    SwitchTo(Route),
    /// The feedback form produced a submission for the enclosing page
    FeedbackSubmitted { kind: String, value: String },
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    ThankYou,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Feedback",
            Route::ThankYou => "Thank You",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_key_displays_inner_value() {
        let key = WidgetKey::new("support-lookup");
        assert_eq!(key.to_string(), "support-lookup");
        assert_eq!(key.as_str(), "support-lookup");
    }

    #[test]
    fn default_route_is_home() {
        assert_eq!(Route::default(), Route::Home);
    }
}
