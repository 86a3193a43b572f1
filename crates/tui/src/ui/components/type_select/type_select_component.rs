use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use feedback_types::Msg;
use rat_focus::Focus;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::state::{FocusTarget, TypeSelectState};
use crate::ui::events::UiEventBus;
use crate::ui::theme::{Theme, theme_helpers as th};

/// Rows shown before the list starts scrolling.
const MAX_VISIBLE_ROWS: u16 = 8;
const MIN_LIST_WIDTH: u16 = 16;

/// Input handling and drawing for [`TypeSelectState`].
///
/// The selector is embedded by other components, so every entry point takes
/// the state, the UI event bus and the focus tree explicitly instead of the
/// whole `App`.
#[derive(Debug, Default)]
pub struct TypeSelectComponent;

impl TypeSelectComponent {
    /// Handles a key press. Returns `true` when the key was consumed.
    pub fn handle_key(state: &mut TypeSelectState, bus: &mut UiEventBus, focus: &Focus, key: KeyEvent) -> bool {
        if state.is_open() && Self::handle_open_key(state, bus, focus, key) {
            return true;
        }

        if state.f_trigger.get() && !state.is_open() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Up | KeyCode::Down => {
                    state.open(bus);
                    true
                }
                _ => false,
            };
        }

        if state.f_input.get() {
            return Self::handle_input_key(state, key);
        }
        false
    }

    fn handle_open_key(state: &mut TypeSelectState, bus: &mut UiEventBus, focus: &Focus, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                let target = state.escape(bus);
                apply_focus(state, focus, target);
                return true;
            }
            // The list leaves the focus tree once closed, so move explicitly.
            KeyCode::Tab => {
                state.cancel(bus);
                focus.focus(&state.f_input);
                return true;
            }
            KeyCode::BackTab => {
                state.cancel(bus);
                focus.focus(&state.f_trigger);
                focus.prev();
                return true;
            }
            _ => {}
        }

        let on_list = state.f_list.get();
        if !on_list && !state.f_trigger.get() {
            return false;
        }
        match key.code {
            KeyCode::Down => state.move_focus(1),
            KeyCode::Up => state.move_focus(-1),
            KeyCode::Home => state.focus_first(),
            KeyCode::End => state.focus_last(),
            KeyCode::Enter => {
                let target = state.commit(bus);
                apply_focus(state, focus, target);
            }
            KeyCode::Char(' ') if on_list => {
                let target = state.commit(bus);
                apply_focus(state, focus, target);
            }
            KeyCode::Char(' ') => state.cancel(bus),
            KeyCode::Char(ch)
                if on_list
                    && !ch.is_control()
                    && !ch.is_whitespace()
                    && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                state.typeahead(ch);
            }
            _ => return false,
        }
        true
    }

    fn handle_input_key(state: &mut TypeSelectState, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                state.insert_char(ch)
            }
            KeyCode::Backspace => state.backspace(),
            KeyCode::Delete => state.delete(),
            KeyCode::Left => state.move_left(),
            KeyCode::Right => state.move_right(),
            KeyCode::Home => state.move_home(),
            KeyCode::End => state.move_end(),
            _ => return false,
        }
        true
    }

    /// Bracketed paste into the text field. Line breaks and other control
    /// characters are dropped.
    pub fn handle_paste(state: &mut TypeSelectState, text: &str) -> bool {
        if !state.f_input.get() {
            return false;
        }
        let cleaned: String = text.chars().filter(|ch| !ch.is_control()).collect();
        if !cleaned.is_empty() {
            state.paste(&cleaned);
        }
        true
    }

    /// Handles pointer input. Returns `true` when the event landed on the
    /// selector.
    pub fn handle_mouse(state: &mut TypeSelectState, bus: &mut UiEventBus, focus: &Focus, mouse: MouseEvent) -> bool {
        let position = Position::new(mouse.column, mouse.row);
        let row_hit = state
            .row_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(index, _)| *index);
        let on_list = state.is_open() && state.list_area.contains(position);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = row_hit {
                    let target = state.commit_index(index, bus);
                    apply_focus(state, focus, target);
                    return true;
                }
                if on_list {
                    return true;
                }
                if state.trigger_area.contains(position) {
                    focus.focus(&state.f_trigger);
                    state.toggle(bus);
                    return true;
                }
                if state.input_area.contains(position) {
                    focus.focus(&state.f_input);
                    let inner_x = state.input_area.x.saturating_add(1);
                    let column = mouse.column.saturating_sub(inner_x).saturating_add(state.input_scroll);
                    state.set_cursor_column(column);
                    return true;
                }
                false
            }
            MouseEventKind::Moved => {
                if let Some(index) = row_hit {
                    state.highlight(index);
                    return true;
                }
                false
            }
            MouseEventKind::ScrollDown if on_list => {
                state.move_focus(1);
                true
            }
            MouseEventKind::ScrollUp if on_list => {
                state.move_focus(-1);
                true
            }
            _ => false,
        }
    }

    /// Routes bus-originated messages addressed to this selector.
    pub fn handle_message(state: &mut TypeSelectState, bus: &mut UiEventBus, focus: &Focus, msg: &Msg) {
        match msg {
            Msg::GlobalPointerDown { widget, column, row } if widget == state.key() => {
                state.handle_global_pointer_down(*column, *row, bus);
            }
            Msg::NextFrame { widget, action } if widget == state.key() => {
                let target = state.on_next_frame(*action);
                apply_focus(state, focus, target);
            }
            _ => {}
        }
    }

    /// Height the trigger/input row wants.
    pub const fn preferred_height() -> u16 {
        3
    }

    /// Splits `area` into the trigger and text field.
    pub fn layout(state: &TypeSelectState, area: Rect) -> [Rect; 2] {
        let widest = state.options().iter().map(|option| option.label.width()).max().unwrap_or(0);
        let trigger_width = u16::try_from(widest).unwrap_or(u16::MAX).saturating_add(6);
        Layout::horizontal([Constraint::Length(trigger_width), Constraint::Min(8)]).areas(area)
    }

    /// Draws the trigger and the text field. The list is drawn separately by
    /// [`Self::render_popup`] so it can overlay later content.
    pub fn render(frame: &mut Frame, area: Rect, state: &mut TypeSelectState, theme: &dyn Theme) {
        let [trigger_area, input_area] = Self::layout(state, area);
        let a11y = state.a11y();

        let arrow = if a11y.trigger.expanded { "▴" } else { "▾" };
        let trigger_focused = state.f_trigger.get() || state.f_list.get();
        let label = Line::from(vec![Span::raw(format!(" {} ", state.trigger_label())), Span::raw(arrow)]);
        let trigger = Paragraph::new(label)
            .style(theme.accent_fill_style())
            .block(th::block(theme, None, trigger_focused));
        frame.render_widget(trigger, trigger_area);

        let input_focused = state.f_input.get();
        let block = th::block(theme, None, input_focused);
        let inner = block.inner(input_area);
        let cursor_column = state.cursor_column();
        state.input_scroll = scroll_for_cursor(state.input_scroll, cursor_column, inner.width);

        let content = if state.text_value().is_empty() {
            Line::from(Span::styled(state.placeholder().to_string(), theme.text_muted_style()))
        } else {
            Line::from(Span::styled(state.text_value().to_string(), th::input_style(theme, input_focused)))
        };
        let input = Paragraph::new(content)
            .style(th::input_style(theme, input_focused))
            .scroll((0, state.input_scroll))
            .block(block);
        frame.render_widget(input, input_area);

        if input_focused && inner.width > 0 {
            let x = inner.x + cursor_column.saturating_sub(state.input_scroll);
            frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
        }

        state.last_area = area;
        state.trigger_area = trigger_area;
        state.input_area = input_area;
    }

    /// Draws the open list under the trigger, clamped to `bounds`.
    pub fn render_popup(frame: &mut Frame, state: &mut TypeSelectState, theme: &dyn Theme, bounds: Rect) {
        if !state.is_open() {
            return;
        }
        let area = popup_area(state, bounds);
        if area.height < 3 {
            state.list_area = Rect::default();
            state.row_areas.clear();
            return;
        }
        frame.render_widget(Clear, area);
        let block = th::block(theme, None, state.f_list.get());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        state.sync_list_viewport(inner.height);
        let selected = state.selected_index().unwrap_or(0);
        let offset = usize::from(state.list_offset());
        let mut row_areas = Vec::with_capacity(usize::from(inner.height));
        for (row, (index, option)) in state
            .options()
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(inner.height))
            .enumerate()
        {
            let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
            let style = th::list_row_style(theme, index == selected, index == state.focus_index());
            let marker = if index == state.focus_index() { "› " } else { "  " };
            frame.render_widget(Paragraph::new(format!("{marker}{}", option.label)).style(style), row_area);
            row_areas.push((index, row_area));
        }

        state.list_area = area;
        state.row_areas = row_areas;
    }

    pub fn get_hint_spans<'a>(state: &TypeSelectState, theme: &dyn Theme) -> Vec<Span<'a>> {
        if state.is_open() {
            th::build_hint_spans(
                theme,
                &[(" ↑/↓", " Move "), ("Enter", " Select "), ("Esc", " Close "), ("A-Z", " Jump ")],
            )
        } else if state.f_trigger.get() {
            th::build_hint_spans(theme, &[(" Enter/Space", " Choose type "), ("Tab", " Next field ")])
        } else if state.f_input.get() {
            th::build_hint_spans(theme, &[(" Enter", " Submit "), ("Tab", " Next field ")])
        } else {
            Vec::new()
        }
    }
}

fn apply_focus(state: &TypeSelectState, focus: &Focus, target: Option<FocusTarget>) {
    match target {
        Some(FocusTarget::Trigger) => focus.focus(&state.f_trigger),
        Some(FocusTarget::List) => focus.focus(&state.f_list),
        None => {}
    }
}

fn popup_area(state: &TypeSelectState, bounds: Rect) -> Rect {
    let trigger = state.trigger_area;
    let widest = state.options().iter().map(|option| option.label.width()).max().unwrap_or(0);
    let width = u16::try_from(widest)
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .max(trigger.width)
        .max(MIN_LIST_WIDTH);
    let rows = u16::try_from(state.options().len()).unwrap_or(u16::MAX).min(MAX_VISIBLE_ROWS);
    let area = Rect::new(trigger.x, trigger.bottom(), width, rows.saturating_add(2));
    area.intersection(bounds)
}

/// Keeps the caret column inside a field `width` columns wide, moving the
/// scroll only as far as needed.
fn scroll_for_cursor(scroll: u16, cursor_column: u16, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    if cursor_column < scroll {
        cursor_column
    } else if cursor_column >= scroll.saturating_add(width) {
        cursor_column - width + 1
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::type_select::TypeSelectProps;
    use crate::ui::theme::BrandTheme;
    use feedback_types::{FrameAction, TypeOption, TypeOptions};
    use rat_focus::FocusBuilder;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(terminal: &mut Terminal<TestBackend>, state: &mut TypeSelectState) {
        let theme = BrandTheme::new();
        terminal
            .draw(|frame| {
                let bounds = frame.area();
                let area = Rect::new(0, 0, bounds.width, 3);
                TypeSelectComponent::render(frame, area, state, &theme);
                TypeSelectComponent::render_popup(frame, state, &theme, bounds);
            })
            .expect("draw");
    }

    fn focused_on_trigger(state: &TypeSelectState) -> Focus {
        let focus = FocusBuilder::build_for(state);
        focus.focus(&state.f_trigger);
        focus
    }

    #[test]
    fn arrow_down_on_trigger_opens_then_list_takes_focus_next_frame() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        let focus = focused_on_trigger(&state);

        assert!(TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Down)));
        assert!(state.is_open());
        assert_eq!(state.focus_index(), 0);

        let focus = FocusBuilder::rebuild_for(&state, Some(focus));
        for (widget, action) in bus.take_frame_tasks() {
            TypeSelectComponent::handle_message(&mut state, &mut bus, &focus, &Msg::NextFrame { widget, action });
        }
        assert!(state.f_list.get());

        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Down));
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Down));
        assert_eq!(state.focus_index(), 1);

        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Enter));
        assert!(!state.is_open());
        assert_eq!(state.trigger_label(), "Ticket ID");
        assert!(state.f_trigger.get());
    }

    #[test]
    fn escape_from_list_returns_focus_to_trigger() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        let focus = focused_on_trigger(&state);
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Enter));
        let focus = FocusBuilder::rebuild_for(&state, Some(focus));
        focus.focus(&state.f_list);
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Down));

        assert!(TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Esc)));
        assert!(!state.is_open());
        assert_eq!(state.selected_value(), "customerID");
        assert!(state.f_trigger.get());
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn space_on_trigger_toggles() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        let focus = focused_on_trigger(&state);
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Char(' ')));
        assert!(state.is_open());
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Char(' ')));
        assert!(!state.is_open());
        assert!(!bus.has_frame_tasks());
    }

    #[test]
    fn typing_in_the_field_writes_through() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        let focus = FocusBuilder::build_for(&state);
        focus.focus(&state.f_input);

        for ch in "AB".chars() {
            TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Char(ch)));
        }
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Left));
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Backspace));
        assert_eq!(state.text_value(), "B");

        assert!(TypeSelectComponent::handle_paste(&mut state, "12\n3"));
        assert_eq!(state.text_value(), "123B");
        assert!(!TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Enter)));
    }

    #[test]
    fn renders_label_arrow_and_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).expect("terminal");
        let mut state = TypeSelectState::default();
        draw(&mut terminal, &mut state);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Customer ID ▾"));
        assert!(text.contains("Enter your customer ID here..."));
        assert!(!text.contains("Ticket ID"));
    }

    #[test]
    fn open_list_renders_rows_and_pointer_selects() {
        let mut bus = UiEventBus::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).expect("terminal");
        let mut state = TypeSelectState::default();
        let focus = FocusBuilder::build_for(&state);
        draw(&mut terminal, &mut state);

        let trigger = state.trigger_area;
        assert!(TypeSelectComponent::handle_mouse(&mut state, &mut bus, &focus, click(trigger.x + 1, trigger.y + 1)));
        assert!(state.is_open());
        draw(&mut terminal, &mut state);

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Customer ID ▴"));
        assert!(text.contains("Ticket ID"));
        assert_eq!(state.row_areas.len(), 2);

        let (index, row) = state.row_areas[1];
        assert_eq!(index, 1);
        TypeSelectComponent::handle_mouse(&mut state, &mut bus, &focus, click(row.x + 2, row.y));
        assert!(!state.is_open());
        assert_eq!(state.selected_value(), "ticketID");
        assert!(state.row_areas.is_empty());
        assert_eq!(bus.listener_count(), 0);
    }

    fn pointer(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn hover_and_wheel_move_the_highlight_without_selecting() {
        let mut bus = UiEventBus::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).expect("terminal");
        let mut state = TypeSelectState::default();
        let focus = focused_on_trigger(&state);
        draw(&mut terminal, &mut state);
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Enter));
        draw(&mut terminal, &mut state);
        assert_eq!(state.focus_index(), 0);

        let (_, row) = state.row_areas[1];
        assert!(TypeSelectComponent::handle_mouse(
            &mut state,
            &mut bus,
            &focus,
            pointer(MouseEventKind::Moved, row.x + 1, row.y)
        ));
        assert_eq!(state.focus_index(), 1);
        assert!(state.is_open());
        assert_eq!(state.selected_value(), "customerID");

        TypeSelectComponent::handle_mouse(&mut state, &mut bus, &focus, pointer(MouseEventKind::ScrollDown, row.x + 1, row.y));
        assert_eq!(state.focus_index(), 1);

        let (_, first) = state.row_areas[0];
        for _ in 0..2 {
            assert!(TypeSelectComponent::handle_mouse(
                &mut state,
                &mut bus,
                &focus,
                pointer(MouseEventKind::ScrollUp, first.x + 1, first.y)
            ));
        }
        assert_eq!(state.focus_index(), 0);
        assert_eq!(state.selected_value(), "customerID");

        // hovering outside the rows leaves the highlight alone
        assert!(!TypeSelectComponent::handle_mouse(&mut state, &mut bus, &focus, pointer(MouseEventKind::Moved, 59, 9)));
        assert_eq!(state.focus_index(), 0);
    }

    #[test]
    fn outside_click_message_closes_the_list() {
        let mut bus = UiEventBus::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).expect("terminal");
        let mut state = TypeSelectState::default();
        let focus = focused_on_trigger(&state);
        draw(&mut terminal, &mut state);
        TypeSelectComponent::handle_key(&mut state, &mut bus, &focus, key(KeyCode::Enter));
        draw(&mut terminal, &mut state);

        for widget in bus.pointer_down_subscribers() {
            let msg = Msg::GlobalPointerDown { widget, column: 50, row: 11 };
            TypeSelectComponent::handle_message(&mut state, &mut bus, &focus, &msg);
        }
        assert!(!state.is_open());
        assert!(state.f_trigger.get());

        // the deferred focus task was cancelled with the list
        assert!(bus.take_frame_tasks().is_empty());
        assert_eq!(state.on_next_frame(FrameAction::FocusList), None);
    }

    #[test]
    fn long_lists_scroll_to_keep_the_highlight_visible() {
        let entries = (0..12)
            .map(|i| TypeOption::new(format!("v{i}"), format!("Option {i:02}"), format!("Enter option {i}")))
            .collect();
        let options = TypeOptions::new(entries).expect("options");
        let mut bus = UiEventBus::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
        let mut state = TypeSelectState::new(TypeSelectProps::new().options(options));
        draw(&mut terminal, &mut state);
        state.open(&mut bus);
        draw(&mut terminal, &mut state);
        assert_eq!(state.row_areas.len(), usize::from(MAX_VISIBLE_ROWS));

        state.focus_last();
        draw(&mut terminal, &mut state);
        assert_eq!(state.list_offset(), 12 - MAX_VISIBLE_ROWS);
        assert_eq!(state.row_areas.last().map(|(index, _)| *index), Some(11));
        assert!(buffer_text(terminal.backend().buffer()).contains("Option 11"));
    }

    #[test]
    fn caret_scroll_moves_minimally() {
        assert_eq!(scroll_for_cursor(0, 3, 10), 0);
        assert_eq!(scroll_for_cursor(0, 10, 10), 1);
        assert_eq!(scroll_for_cursor(5, 2, 10), 2);
        assert_eq!(scroll_for_cursor(4, 0, 0), 0);
    }
}
