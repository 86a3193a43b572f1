//! Component system for the feedback TUI.
//!
//! Components are self-contained UI elements: they keep their state on
//! [`App`], react to input and messages, and draw themselves into a `Rect`.
//! Anything with application-wide consequences (navigation, submissions) is
//! reported back as an [`Effect`] for the runtime to execute.

use crossterm::event::{KeyEvent, MouseEvent};
use feedback_types::{Effect, Msg};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A UI component with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Route entry**: `on_route_enter()` runs when the owning route becomes active
/// 2. **Event handling**: `handle_key_events()`, `handle_mouse_events()` and `handle_paste()`
/// 3. **Messages**: `handle_message()` receives ticks and UI event bus deliveries
/// 4. **Rendering**: `render()` draws the component into the provided frame area
/// 5. **Route exit**: `on_route_exit()` releases anything the component registered
pub(crate) trait Component {
    /// Handle an application message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events that land on or concern this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle bracketed paste while this component has focus.
    fn handle_paste(&mut self, _app: &mut App, _text: &str) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing,
    /// cursor placement and recording the areas they drew for hit testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hints bar while this component has focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Splits `area` into the sub-areas this component draws into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }

    fn on_route_enter(&mut self, _app: &mut App) -> Vec<Effect> {
        Vec::new()
    }

    fn on_route_exit(&mut self, _app: &mut App) -> Vec<Effect> {
        Vec::new()
    }
}

/// Returns the index of the area under `(x, y)`, if the point falls inside
/// `container` at all.
pub(crate) fn find_target_index_by_mouse_position(container: &Rect, areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = ratatui::layout::Position::new(x, y);
    if !container.contains(position) {
        return None;
    }
    areas.iter().position(|area| area.contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_area_under_the_pointer() {
        let container = Rect::new(0, 0, 20, 3);
        let areas = [Rect::new(0, 0, 10, 3), Rect::new(10, 0, 10, 3)];
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 12, 1), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 3, 2), Some(0));
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 30, 1), None);
    }
}
