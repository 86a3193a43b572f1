//! Layout helpers shared by the UI components.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// The sub-rectangle of `area` sized `percent_x` by `percent_y` percent and
/// centered in both directions.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
