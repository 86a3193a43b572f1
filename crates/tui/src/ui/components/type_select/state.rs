use std::sync::atomic::{AtomicU64, Ordering};

use feedback_types::{FrameAction, TypeOption, TypeOptions, WidgetKey};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::{Position, Rect};
use tracing::debug;

use super::a11y::{self, InputA11y, ListA11y, OptionA11y, TriggerA11y, TypeSelectA11y};
use super::controlled::{ChangeCallback, ControlledValue};
use crate::ui::components::common::{RowWindow, TextInputState};
use crate::ui::events::{FrameTaskId, ListenerId, UiEventBus};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Where input focus should move after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Trigger,
    List,
}

/// Configuration for a [`TypeSelectState`].
///
/// Supplying both `selected_value` and `on_type_change` puts type selection
/// in controlled mode; `text_value` and `on_value_change` do the same for the
/// free-text field.
#[derive(Default)]
pub struct TypeSelectProps {
    options: TypeOptions,
    selected_value: Option<String>,
    on_type_change: Option<ChangeCallback<String>>,
    text_value: Option<String>,
    on_value_change: Option<ChangeCallback<String>>,
    dom_id: Option<String>,
}

impl TypeSelectProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: TypeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn selected_value(mut self, value: impl Into<String>) -> Self {
        self.selected_value = Some(value.into());
        self
    }

    pub fn on_type_change(mut self, mut on_change: impl FnMut(&str) + 'static) -> Self {
        self.on_type_change = Some(Box::new(move |value: &String| on_change(value)));
        self
    }

    pub fn text_value(mut self, value: impl Into<String>) -> Self {
        self.text_value = Some(value.into());
        self
    }

    pub fn on_value_change(mut self, mut on_change: impl FnMut(&str) + 'static) -> Self {
        self.on_value_change = Some(Box::new(move |value: &String| on_change(value)));
        self
    }

    pub fn dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = Some(dom_id.into());
        self
    }
}

/// State for the type selector: a dropdown choosing the input type paired
/// with a free-text field whose placeholder follows the chosen type.
///
/// The dropdown is either closed or open. While open the state holds a
/// pointer-down subscription on the [`UiEventBus`] (to close on outside
/// clicks) and, until the list has been drawn once, a next-frame task that
/// moves focus into the list. Every close path releases both.
#[derive(Debug)]
pub struct TypeSelectState {
    options: TypeOptions,
    selected: ControlledValue<String>,
    text: ControlledValue<String>,
    cursor: usize,
    is_open: bool,
    focus_index: usize,
    dom_id: Option<String>,
    key: WidgetKey,
    listener: Option<ListenerId>,
    pending_focus: Option<FrameTaskId>,
    list_window: RowWindow,

    /// Container focus
    pub container_focus: FocusFlag,
    pub f_trigger: FocusFlag,
    pub f_list: FocusFlag,
    pub f_input: FocusFlag,

    /// Last rendered areas for hit testing.
    pub last_area: Rect,
    pub trigger_area: Rect,
    pub input_area: Rect,
    pub list_area: Rect,
    /// Visible list rows paired with the option index they display.
    pub row_areas: Vec<(usize, Rect)>,
    /// Horizontal scroll of the text field, in display columns.
    pub input_scroll: u16,
}

impl TypeSelectState {
    pub fn new(props: TypeSelectProps) -> Self {
        let TypeSelectProps {
            options,
            selected_value,
            on_type_change,
            text_value,
            on_value_change,
            dom_id,
        } = props;

        let base = dom_id
            .clone()
            .unwrap_or_else(|| format!("type-select-{}", NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)));
        let initial_type = options.first().value.clone();
        let selected = ControlledValue::new(initial_type, None, on_type_change);
        let text = ControlledValue::new(String::new(), None, on_value_change);

        let mut state = Self {
            options,
            selected,
            text,
            cursor: 0,
            is_open: false,
            focus_index: 0,
            dom_id,
            key: WidgetKey::new(base.clone()),
            listener: None,
            pending_focus: None,
            list_window: RowWindow::default(),
            container_focus: FocusFlag::new().with_name(&base),
            f_trigger: FocusFlag::new().with_name(&format!("{base}.trigger")),
            f_list: FocusFlag::new().with_name(&format!("{base}.list")),
            f_input: FocusFlag::new().with_name(&format!("{base}.input")),
            last_area: Rect::default(),
            trigger_area: Rect::default(),
            input_area: Rect::default(),
            list_area: Rect::default(),
            row_areas: Vec::new(),
            input_scroll: 0,
        };
        state.set_selected_value(selected_value);
        state.set_text_value(text_value);
        state.focus_index = state.selected_index().unwrap_or(0);
        state.cursor = state.text_value().len();
        state
    }

    // ----- Getters -----

    pub fn key(&self) -> &WidgetKey {
        &self.key
    }

    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    pub fn options(&self) -> &TypeOptions {
        &self.options
    }

    /// The selected option; unknown values resolve to the first option.
    pub fn selected_option(&self) -> &TypeOption {
        self.options.resolve(self.selected.get())
    }

    pub fn selected_value(&self) -> &str {
        &self.selected_option().value
    }

    /// Index of the effective selected value, `None` when it is not a member
    /// of the option set.
    pub fn selected_index(&self) -> Option<usize> {
        self.options.position(self.selected.get())
    }

    pub fn trigger_label(&self) -> &str {
        &self.selected_option().label
    }

    pub fn placeholder(&self) -> &str {
        &self.selected_option().placeholder
    }

    pub fn text_value(&self) -> &str {
        self.text.get()
    }

    /// Caret position, clamped onto the effective text.
    pub fn cursor(&self) -> usize {
        self.editor().cursor()
    }

    pub fn cursor_column(&self) -> u16 {
        self.editor().cursor_column()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    pub fn list_offset(&self) -> u16 {
        self.list_window.first()
    }

    pub fn is_type_controlled(&self) -> bool {
        self.selected.is_controlled()
    }

    pub fn is_text_controlled(&self) -> bool {
        self.text.is_controlled()
    }

    pub fn has_pointer_listener(&self) -> bool {
        self.listener.is_some()
    }

    pub fn has_pending_focus(&self) -> bool {
        self.pending_focus.is_some()
    }

    // ----- Controlled inputs -----

    /// Feeds the caller's selected type back in. `None` returns the slice to
    /// internal ownership.
    pub fn set_selected_value(&mut self, value: Option<String>) {
        if let Some(value) = value.as_deref()
            && self.options.position(value).is_none()
        {
            debug!(
                widget = %self.key,
                value,
                fallback = %self.options.first().value,
                "controlled type value not in option set; falling back to first option"
            );
        }
        self.selected.set_external(value);
    }

    /// Feeds the caller's text back in. `None` returns the slice to internal
    /// ownership.
    pub fn set_text_value(&mut self, value: Option<String>) {
        self.text.set_external(value);
    }

    // ----- Dropdown transitions -----

    /// Closed → Open. Highlights the selected option, subscribes to outside
    /// pointer-downs and schedules focus to move into the list next frame.
    pub fn open(&mut self, bus: &mut UiEventBus) {
        if self.is_open {
            return;
        }
        self.is_open = true;
        self.focus_index = self.selected_index().unwrap_or(0);
        self.list_window.set_rows(self.row_count());
        self.reveal_focus_row();
        self.listener = Some(bus.subscribe_pointer_down(&self.key));
        self.pending_focus = Some(bus.schedule_next_frame(&self.key, FrameAction::FocusList));
        debug!(widget = %self.key, focus_index = self.focus_index, "type list opened");
    }

    /// Pointer activation of the trigger.
    pub fn toggle(&mut self, bus: &mut UiEventBus) {
        if self.is_open {
            self.cancel(bus);
        } else {
            self.open(bus);
        }
    }

    /// Open → Closed, committing the highlighted row. Focus returns to the
    /// trigger.
    pub fn commit(&mut self, bus: &mut UiEventBus) -> Option<FocusTarget> {
        if !self.is_open {
            return None;
        }
        self.commit_index(self.focus_index, bus)
    }

    /// Open → Closed, committing row `index` (pointer selection).
    pub fn commit_index(&mut self, index: usize, bus: &mut UiEventBus) -> Option<FocusTarget> {
        let value = self.options.get(index)?.value.clone();
        debug!(widget = %self.key, value = %value, "type committed");
        self.selected.set(value);
        self.close(bus);
        Some(FocusTarget::Trigger)
    }

    /// Open → Closed without touching the selection.
    pub fn cancel(&mut self, bus: &mut UiEventBus) {
        if self.is_open {
            debug!(widget = %self.key, "type list dismissed");
        }
        self.close(bus);
    }

    /// Escape: cancel and return focus to the trigger.
    pub fn escape(&mut self, bus: &mut UiEventBus) -> Option<FocusTarget> {
        if !self.is_open {
            return None;
        }
        self.cancel(bus);
        Some(FocusTarget::Trigger)
    }

    /// A pointer-down anywhere on screen. Closes the list when the position
    /// is outside both the trigger and the list. Focus is left alone.
    pub fn handle_global_pointer_down(&mut self, column: u16, row: u16, bus: &mut UiEventBus) -> bool {
        if !self.is_open {
            return false;
        }
        let position = Position::new(column, row);
        if self.trigger_area.contains(position) || self.list_area.contains(position) {
            return false;
        }
        self.cancel(bus);
        true
    }

    /// The deferred focus task fired. Against a closed list it does nothing.
    pub fn on_next_frame(&mut self, action: FrameAction) -> Option<FocusTarget> {
        self.pending_focus = None;
        match action {
            FrameAction::FocusList if self.is_open => Some(FocusTarget::List),
            FrameAction::FocusList => None,
        }
    }

    /// Releases the bus resources held by this instance.
    pub fn teardown(&mut self, bus: &mut UiEventBus) {
        self.close(bus);
    }

    fn close(&mut self, bus: &mut UiEventBus) {
        self.is_open = false;
        if let Some(listener) = self.listener.take() {
            bus.unsubscribe(listener);
        }
        if let Some(task) = self.pending_focus.take() {
            bus.cancel(task);
        }
        self.list_area = Rect::default();
        self.row_areas.clear();
    }

    // ----- Highlight navigation (open only) -----

    /// Moves the highlight by `delta` rows, clamped to the list bounds.
    pub fn move_focus(&mut self, delta: isize) {
        if !self.is_open {
            return;
        }
        let last = self.options.last_index() as isize;
        let next = (self.focus_index as isize + delta).clamp(0, last);
        self.set_focus_index(next as usize);
    }

    pub fn focus_first(&mut self) {
        if self.is_open {
            self.set_focus_index(0);
        }
    }

    pub fn focus_last(&mut self) {
        if self.is_open {
            self.set_focus_index(self.options.last_index());
        }
    }

    /// Pointer hover over row `index`.
    pub fn highlight(&mut self, index: usize) {
        if self.is_open && index < self.options.len() {
            self.set_focus_index(index);
        }
    }

    /// Jumps to the first option whose label starts with `ch`. Returns
    /// `false` (and leaves the highlight alone) when nothing matches.
    pub fn typeahead(&mut self, ch: char) -> bool {
        if !self.is_open {
            return false;
        }
        match self.options.find_by_initial(ch) {
            Some(index) => {
                self.set_focus_index(index);
                true
            }
            None => false,
        }
    }

    /// Records the list viewport height measured at render time.
    pub fn sync_list_viewport(&mut self, height: u16) {
        self.list_window.set_rows(self.row_count());
        self.list_window.set_visible(height);
        self.reveal_focus_row();
    }

    fn set_focus_index(&mut self, index: usize) {
        if self.focus_index != index {
            self.focus_index = index;
            self.reveal_focus_row();
        }
    }

    fn reveal_focus_row(&mut self) {
        self.list_window.reveal(u16::try_from(self.focus_index).unwrap_or(u16::MAX));
    }

    fn row_count(&self) -> u16 {
        u16::try_from(self.options.len()).unwrap_or(u16::MAX)
    }

    // ----- Text field -----

    fn editor(&self) -> TextInputState {
        TextInputState::with_cursor(self.text_value(), self.cursor)
    }

    /// Applies an edit to the effective text and writes the result through
    /// the text slice.
    fn edit(&mut self, apply: impl FnOnce(&mut TextInputState)) {
        let mut editor = self.editor();
        let before = editor.input().to_string();
        apply(&mut editor);
        self.cursor = editor.cursor();
        if editor.input() != before {
            self.text.set(editor.into_input());
        }
    }

    fn move_caret(&mut self, apply: impl FnOnce(&mut TextInputState)) {
        let mut editor = self.editor();
        apply(&mut editor);
        self.cursor = editor.cursor();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.edit(|editor| editor.insert_char(ch));
    }

    pub fn paste(&mut self, text: &str) {
        self.edit(|editor| editor.insert_str(text));
    }

    pub fn backspace(&mut self) {
        self.edit(TextInputState::backspace);
    }

    pub fn delete(&mut self) {
        self.edit(TextInputState::delete);
    }

    pub fn move_left(&mut self) {
        self.move_caret(TextInputState::move_left);
    }

    pub fn move_right(&mut self) {
        self.move_caret(TextInputState::move_right);
    }

    pub fn move_home(&mut self) {
        self.move_caret(TextInputState::move_home);
    }

    pub fn move_end(&mut self) {
        self.move_caret(TextInputState::move_end);
    }

    /// Places the caret at display column `column` of the effective text.
    pub fn set_cursor_column(&mut self, column: u16) {
        let mut editor = self.editor();
        editor.move_home();
        while editor.cursor_column() < column && editor.cursor() < editor.input().len() {
            editor.move_right();
        }
        self.cursor = editor.cursor();
    }

    // ----- Accessibility -----

    pub fn a11y(&self) -> TypeSelectA11y {
        let base = self.dom_id.as_deref();
        let selected_index = self.selected_index();
        TypeSelectA11y {
            trigger: TriggerA11y {
                id: base.map(a11y::trigger_id),
                haspopup: "listbox",
                expanded: self.is_open,
                controls: base.map(a11y::list_id),
            },
            list: self.is_open.then(|| ListA11y {
                role: "listbox",
                id: base.map(a11y::list_id),
                options: self
                    .options
                    .iter()
                    .enumerate()
                    .map(|(index, option)| OptionA11y {
                        role: "option",
                        index,
                        label: option.label.clone(),
                        selected: Some(index) == selected_index || (selected_index.is_none() && index == 0),
                    })
                    .collect(),
            }),
            input: InputA11y {
                id: base.map(str::to_string),
                placeholder: self.placeholder().to_string(),
            },
        }
    }
}

impl Default for TypeSelectState {
    fn default() -> Self {
        Self::new(TypeSelectProps::default())
    }
}

impl HasFocus for TypeSelectState {
    /// The list is a focus target only while it is open.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_trigger);
        if self.is_open {
            builder.leaf_widget(&self.f_list);
        }
        builder.leaf_widget(&self.f_input);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn options(labels: &[(&str, &str)]) -> TypeOptions {
        TypeOptions::new(
            labels
                .iter()
                .map(|(value, label)| TypeOption::new(*value, *label, format!("Enter {label}")))
                .collect(),
        )
        .expect("valid options")
    }

    fn five_options() -> TypeOptions {
        options(&[
            ("customerID", "Customer ID"),
            ("ticketID", "Ticket ID"),
            ("orderID", "Order ID"),
            ("invoice", "invoice number"),
            ("tracking", "Tracking code"),
        ])
    }

    #[test]
    fn initial_render_uses_first_option() {
        let state = TypeSelectState::default();
        assert_eq!(state.trigger_label(), "Customer ID");
        assert_eq!(state.placeholder(), "Enter your customer ID here...");
        assert!(!state.is_open());
        assert_eq!(state.text_value(), "");
    }

    #[test]
    fn opening_focuses_the_selected_option() {
        let mut bus = UiEventBus::new();
        for selected in ["customerID", "ticketID", "orderID", "tracking"] {
            let mut state = TypeSelectState::new(TypeSelectProps::new().options(five_options()));
            let mut commit_bus = UiEventBus::new();
            state.open(&mut commit_bus);
            let index = state.options().position(selected).expect("member");
            state.commit_index(index, &mut commit_bus);

            state.open(&mut bus);
            assert_eq!(state.focus_index(), index);
            state.cancel(&mut bus);
        }
    }

    #[test]
    fn opening_with_unknown_selection_focuses_first_row() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::new(
            TypeSelectProps::new()
                .options(five_options())
                .selected_value("missing")
                .on_type_change(|_| {}),
        );
        assert_eq!(state.selected_value(), "customerID");
        assert_eq!(state.selected_index(), None);
        state.open(&mut bus);
        assert_eq!(state.focus_index(), 0);
    }

    #[test]
    fn arrow_navigation_clamps_without_wrapping() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        state.open(&mut bus);
        assert_eq!(state.focus_index(), 0);

        state.move_focus(1);
        assert_eq!(state.focus_index(), 1);
        state.move_focus(1);
        assert_eq!(state.focus_index(), 1);

        state.move_focus(-1);
        state.move_focus(-1);
        assert_eq!(state.focus_index(), 0);
    }

    #[test]
    fn navigation_is_ignored_while_closed() {
        let mut state = TypeSelectState::default();
        state.move_focus(1);
        state.focus_last();
        assert!(!state.typeahead('t'));
        assert_eq!(state.focus_index(), 0);
    }

    #[test]
    fn selecting_ticket_updates_label_and_keeps_text() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        for ch in "CUST-001".chars() {
            state.insert_char(ch);
        }

        state.open(&mut bus);
        let focus = state.commit_index(1, &mut bus);

        assert_eq!(focus, Some(FocusTarget::Trigger));
        assert!(!state.is_open());
        assert_eq!(state.trigger_label(), "Ticket ID");
        assert_eq!(state.placeholder(), "Enter your ticket ID here...");
        assert_eq!(state.text_value(), "CUST-001");
    }

    #[test]
    fn keyboard_commit_selects_exactly_the_highlighted_option() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::new(TypeSelectProps::new().options(five_options()));
        state.open(&mut bus);
        state.move_focus(1);
        state.move_focus(1);
        assert_eq!(state.commit(&mut bus), Some(FocusTarget::Trigger));
        assert_eq!(state.selected_value(), "orderID");
        assert!(!state.is_open());
    }

    #[test]
    fn escape_closes_without_changing_selection() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        state.open(&mut bus);
        state.move_focus(1);

        assert_eq!(state.escape(&mut bus), Some(FocusTarget::Trigger));
        assert!(!state.is_open());
        assert_eq!(state.selected_value(), "customerID");
    }

    #[test]
    fn outside_pointer_down_closes_without_focus_change() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        state.trigger_area = Rect::new(0, 0, 15, 3);
        state.open(&mut bus);
        state.list_area = Rect::new(0, 3, 20, 4);
        state.move_focus(1);

        assert!(!state.handle_global_pointer_down(2, 1, &mut bus));
        assert!(!state.handle_global_pointer_down(5, 4, &mut bus));
        assert!(state.is_open());

        assert!(state.handle_global_pointer_down(40, 10, &mut bus));
        assert!(!state.is_open());
        assert_eq!(state.selected_value(), "customerID");
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn typeahead_jumps_to_first_case_insensitive_match() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::new(TypeSelectProps::new().options(five_options()));
        state.open(&mut bus);

        assert!(state.typeahead('T'));
        assert_eq!(state.focus_index(), 1);
        assert!(state.typeahead('I'));
        assert_eq!(state.focus_index(), 3);
        assert!(!state.typeahead('x'));
        assert_eq!(state.focus_index(), 3);
    }

    #[test]
    fn type_and_text_slices_are_independent() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        state.paste("T-42");
        state.open(&mut bus);
        state.commit_index(1, &mut bus);
        assert_eq!(state.text_value(), "T-42");

        state.backspace();
        assert_eq!(state.selected_value(), "ticketID");
        assert_eq!(state.text_value(), "T-4");
    }

    #[test]
    fn listener_lives_exactly_as_long_as_the_open_list() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        for _ in 0..5 {
            state.open(&mut bus);
            state.open(&mut bus);
            assert_eq!(bus.listener_count(), 1);
            assert!(state.has_pointer_listener());
            state.escape(&mut bus);
            assert_eq!(bus.listener_count(), 0);
        }

        state.open(&mut bus);
        state.commit(&mut bus);
        assert_eq!(bus.listener_count(), 0);

        state.open(&mut bus);
        state.teardown(&mut bus);
        assert_eq!(bus.listener_count(), 0);
        assert!(!state.has_pointer_listener());
    }

    #[test]
    fn deferred_focus_is_cancelled_when_closed_first() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::default();
        state.open(&mut bus);
        assert!(state.has_pending_focus());
        state.cancel(&mut bus);
        assert!(!bus.has_frame_tasks());
        assert!(!state.has_pending_focus());

        // a task that slipped through still lands on a closed list as a no-op
        assert_eq!(state.on_next_frame(FrameAction::FocusList), None);

        state.open(&mut bus);
        let due = bus.take_frame_tasks();
        assert_eq!(due, vec![(state.key().clone(), FrameAction::FocusList)]);
        assert_eq!(state.on_next_frame(FrameAction::FocusList), Some(FocusTarget::List));
        assert!(!state.has_pending_focus());
    }

    #[test]
    fn controlled_type_never_writes_internal_state() {
        let mut bus = UiEventBus::new();
        let requested = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&requested);
        let mut state = TypeSelectState::new(
            TypeSelectProps::new()
                .selected_value("customerID")
                .on_type_change(move |value| sink.borrow_mut().push(value.to_string())),
        );
        assert!(state.is_type_controlled());

        state.open(&mut bus);
        state.commit_index(1, &mut bus);
        assert_eq!(requested.borrow().as_slice(), ["ticketID".to_string()]);
        assert_eq!(state.selected_value(), "customerID");

        state.set_selected_value(Some("ticketID".into()));
        assert_eq!(state.trigger_label(), "Ticket ID");
    }

    #[test]
    fn controlled_text_reports_every_keystroke() {
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let mut state = TypeSelectState::new(
            TypeSelectProps::new()
                .text_value("")
                .on_value_change(move |value| sink.borrow_mut().push(value.to_string())),
        );
        assert!(state.is_text_controlled());

        state.insert_char('4');
        assert_eq!(state.text_value(), "");
        state.set_text_value(Some("4".into()));
        state.insert_char('2');
        state.set_text_value(Some("42".into()));

        assert_eq!(seen.borrow().as_slice(), ["4".to_string(), "42".to_string()]);
        assert_eq!(state.text_value(), "42");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn focused_row_scrolls_into_view() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::new(TypeSelectProps::new().options(five_options()));
        state.open(&mut bus);
        state.sync_list_viewport(2);
        assert_eq!(state.list_offset(), 0);

        state.move_focus(1);
        assert_eq!(state.list_offset(), 0);
        state.move_focus(1);
        assert_eq!(state.list_offset(), 1);
        state.focus_last();
        assert_eq!(state.list_offset(), 3);
        state.focus_first();
        assert_eq!(state.list_offset(), 0);
    }

    #[test]
    fn accessibility_relationships_follow_dom_id() {
        let mut bus = UiEventBus::new();
        let mut state = TypeSelectState::new(TypeSelectProps::new().dom_id("lookup"));
        let closed = state.a11y();
        assert_eq!(closed.trigger.id.as_deref(), Some("lookup-type"));
        assert_eq!(closed.trigger.controls.as_deref(), Some("lookup-type-list"));
        assert_eq!(closed.trigger.haspopup, "listbox");
        assert!(!closed.trigger.expanded);
        assert!(closed.list.is_none());
        assert_eq!(closed.input.id.as_deref(), Some("lookup"));

        state.open(&mut bus);
        let open = state.a11y();
        assert!(open.trigger.expanded);
        let list = open.list.expect("list semantics while open");
        assert_eq!(list.id.as_deref(), Some("lookup-type-list"));
        assert_eq!(list.options.iter().filter(|o| o.selected).count(), 1);
        assert!(list.options[0].selected);

        let anonymous = TypeSelectState::default().a11y();
        assert!(anonymous.trigger.id.is_none());
        assert!(anonymous.trigger.controls.is_none());
        assert!(anonymous.input.id.is_none());
    }

    #[test]
    fn caret_follows_click_column() {
        let mut state = TypeSelectState::default();
        state.paste("TICKET");
        state.set_cursor_column(3);
        assert_eq!(state.cursor(), 3);
        state.insert_char('-');
        assert_eq!(state.text_value(), "TIC-KET");
        state.set_cursor_column(99);
        assert_eq!(state.cursor(), 7);
    }
}
