use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::roles::Theme;
use crate::ui::theme::roles::ThemeRoles;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for input fields; caller sets the block border based on focus.
pub fn input_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    let style = Style::default().bg(surface).fg(text);
    if focused { style.add_modifier(Modifier::BOLD) } else { style }
}

/// Row style inside a dropdown list: the committed entry is filled with the
/// accent, the highlighted entry gets the subtle accent.
pub fn list_row_style<T: Theme + ?Sized>(theme: &T, is_selected: bool, is_highlighted: bool) -> Style {
    let ThemeRoles {
        surface,
        text,
        accent_subtle,
        ..
    } = *theme.roles();
    if is_selected {
        theme.selection_style()
    } else if is_highlighted {
        Style::default().bg(accent_subtle).fg(text)
    } else {
        Style::default().bg(surface).fg(text)
    }
}

/// Builds `key description` hint pairs for the hints bar.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}

/// Renders a standard button
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, is_focused: bool, theme: &T) {
    let style = if is_focused {
        theme.accent_fill_style().add_modifier(Modifier::BOLD)
    } else {
        theme.accent_emphasis_style()
    };
    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(theme.border_style(is_focused))
                    .padding(Padding::horizontal(1)),
            )
            .style(style),
        area,
    );
}
