use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use feedback_types::{Effect, Msg};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::state::Submission;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::components::type_select::TypeSelectComponent;
use crate::ui::theme::theme_helpers::{self as th, render_button};

const SUBMIT_LABEL: &str = "Submit";

/// The home route: a type selector plus a Submit button.
#[derive(Debug, Default)]
pub struct FeedbackComponent;

impl FeedbackComponent {
    fn submit(app: &mut App) -> Vec<Effect> {
        match app.feedback.submit() {
            Some(Submission { kind, value }) => vec![Effect::FeedbackSubmitted { kind, value }],
            None => Vec::new(),
        }
    }
}

impl Component for FeedbackComponent {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        let App {
            feedback, events, focus, ..
        } = app;
        TypeSelectComponent::handle_message(&mut feedback.type_select, events, focus, msg);
        feedback.sync_from_draft();
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let handled = {
            let App {
                feedback, events, focus, ..
            } = &mut *app;
            let handled = TypeSelectComponent::handle_key(&mut feedback.type_select, events, focus, key);
            feedback.sync_from_draft();
            handled
        };
        if handled {
            return Vec::new();
        }

        let on_submit = app.feedback.f_submit.get();
        match key.code {
            KeyCode::Enter if on_submit || app.feedback.type_select.f_input.get() => Self::submit(app),
            KeyCode::Char(' ') if on_submit => Self::submit(app),
            KeyCode::Tab => {
                app.focus.next();
                Vec::new()
            }
            KeyCode::BackTab => {
                app.focus.prev();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        {
            let App {
                feedback, events, focus, ..
            } = &mut *app;
            let handled = TypeSelectComponent::handle_mouse(&mut feedback.type_select, events, focus, mouse);
            feedback.sync_from_draft();
            if handled {
                return Vec::new();
            }
        }

        let position = Position::new(mouse.column, mouse.row);
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) && app.feedback.submit_area.contains(position) {
            app.focus.focus(&app.feedback.f_submit);
            return Self::submit(app);
        }
        Vec::new()
    }

    fn handle_paste(&mut self, app: &mut App, text: &str) -> Vec<Effect> {
        if TypeSelectComponent::handle_paste(&mut app.feedback.type_select, text) {
            app.feedback.sync_from_draft();
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Feedback"), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = self.get_preferred_layout(app, inner);
        let prompt = Paragraph::new(Line::from(Span::styled(
            "How should we look up your request?",
            theme.text_secondary_style(),
        )));
        frame.render_widget(prompt, layout[0]);

        TypeSelectComponent::render(frame, layout[1], &mut app.feedback.type_select, theme);

        if let Some(error) = app.feedback.error.as_deref() {
            frame.render_widget(Paragraph::new(Span::styled(error, theme.status_error())), layout[2]);
        }

        render_button(frame, layout[3], SUBMIT_LABEL, app.feedback.f_submit.get(), theme);

        // the open list overlays everything below the selector
        TypeSelectComponent::render_popup(frame, &mut app.feedback.type_select, theme, inner);

        app.feedback.last_area = area;
        app.feedback.submit_area = layout[3];
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.ctx.theme;
        if app.feedback.f_submit.get() {
            return th::build_hint_spans(theme, &[(" Enter", " Submit "), ("Shift+Tab", " Back ")]);
        }
        TypeSelectComponent::get_hint_spans(&app.feedback.type_select, theme)
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let submit_width = u16::try_from(SUBMIT_LABEL.len()).unwrap_or(u16::MAX).saturating_add(6);
        let rows = Layout::vertical([
            Constraint::Length(1),                                     // Prompt
            Constraint::Length(TypeSelectComponent::preferred_height()), // Type selector
            Constraint::Length(1),                                     // Validation message
            Constraint::Length(3),                                     // Submit button
            Constraint::Min(0),
        ])
        .split(area);
        let [submit_area, _] = Layout::horizontal([Constraint::Length(submit_width), Constraint::Min(0)]).areas(rows[3]);
        vec![rows[0], rows[1], rows[2], submit_area]
    }

    fn on_route_exit(&mut self, app: &mut App) -> Vec<Effect> {
        app.feedback.type_select.teardown(&mut app.events);
        Vec::new()
    }
}
