use crossterm::event::{KeyEvent, MouseEvent};
use feedback_types::{Effect, Msg, Route};
use rat_focus::FocusBuilder;
use ratatui::{
    prelude::*,
    style::Style,
    widgets::Paragraph,
};

use super::components::Component;
use super::components::feedback::FeedbackComponent;
use super::components::nav_bar::NavBarComponent;
use super::components::thank_you::ThankYouComponent;
use super::theme::theme_helpers as th;
use crate::app::App;

/// Root view: header, the active route's content and the hints bar.
pub struct MainView {
    /// Current main view component
    pub content_view: Option<Box<dyn Component>>,
    /// Header component
    pub nav_bar_view: NavBarComponent,
}

impl Default for MainView {
    fn default() -> Self {
        Self::new(Some(Box::new(FeedbackComponent)))
    }
}

impl MainView {
    pub fn new(content_view: Option<Box<dyn Component>>) -> Self {
        Self {
            content_view,
            nav_bar_view: NavBarComponent::new(),
        }
    }

    /// Leaves the current route and enters `route`, running the exit and
    /// enter hooks of the views involved.
    pub fn switch_route(&mut self, app: &mut App, route: Route) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(mut view) = self.content_view.take() {
            effects.extend(view.on_route_exit(app));
        }
        self.set_current_route(app, route);
        if let Some(view) = self.content_view.as_mut() {
            effects.extend(view.on_route_enter(app));
        }
        effects
    }

    /// Installs the view for `route` and rebuilds focus around it. Prefer
    /// [`Self::switch_route`], which also runs the route hooks.
    pub fn set_current_route(&mut self, app: &mut App, route: Route) {
        let view: Box<dyn Component> = match route {
            Route::Home => Box::new(FeedbackComponent),
            Route::ThankYou => Box::new(ThankYouComponent),
        };
        tracing::debug!(from = ?app.current_route, to = ?route, "route changed");
        app.current_route = app.nav_bar.set_route(route);
        self.content_view = Some(view);

        app.focus = FocusBuilder::build_for(&*app);
        self.restore_focus(app);
    }

    /// Focuses the default widget of the current route. Used on route entry
    /// and whenever a rebuild leaves nothing focused (e.g. the list closed
    /// while it held focus).
    pub fn restore_focus(&mut self, app: &mut App) {
        match app.current_route {
            Route::Home => app.focus.focus(&app.feedback.type_select.f_trigger),
            Route::ThankYou => app.focus.focus(&app.thank_you.container_focus),
        }
    }

    /// Delivers a left pointer-down to every widget subscribed on the UI
    /// event bus, before normal mouse routing.
    pub fn broadcast_pointer_down(&mut self, app: &mut App, column: u16, row: u16) -> Vec<Effect> {
        let mut effects = Vec::new();
        for widget in app.events.pointer_down_subscribers() {
            effects.extend(self.handle_message(app, &Msg::GlobalPointerDown { widget, column, row }));
        }
        effects
    }

    /// Runs the next-frame tasks that became due with the last draw.
    pub fn run_frame_tasks(&mut self, app: &mut App) -> Vec<Effect> {
        let mut effects = Vec::new();
        for (widget, action) in app.events.take_frame_tasks() {
            effects.extend(self.handle_message(app, &Msg::NextFrame { widget, action }));
        }
        effects
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        let mut effects = app.update(msg);
        if let Some(content) = self.content_view.as_mut() {
            effects.extend(content.handle_message(app, msg));
        }
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.nav_bar.container_focus.get() {
            return self.nav_bar_view.handle_key_events(app, key);
        }
        if let Some(content) = self.content_view.as_mut() {
            return content.handle_key_events(app, key);
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let mut effects = self.nav_bar_view.handle_mouse_events(app, mouse);
        if let Some(content) = self.content_view.as_mut() {
            effects.extend(content.handle_mouse_events(app, mouse));
        }
        effects
    }

    fn handle_paste(&mut self, app: &mut App, text: &str) -> Vec<Effect> {
        match self.content_view.as_mut() {
            Some(content) => content.handle_paste(app, text),
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.nav_bar_view.render(frame, layout[0], app);
        if let Some(current) = self.content_view.as_mut() {
            current.render(frame, layout[1], app);
        }

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[2]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];

        if app.nav_bar.container_focus.get() {
            hint_spans.extend(self.nav_bar_view.get_hint_spans(app));
        } else if let Some(content) = self.content_view.as_ref() {
            hint_spans.extend(content.get_hint_spans(app));
        }

        hint_spans.extend(th::build_hint_spans(&*app.ctx.theme, &[(" Ctrl+C", " Quit ")]));
        hint_spans
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Route content
            Constraint::Length(1), // Hints bar
        ])
        .split(area)
        .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App, view: &mut MainView) -> String {
        app.rebuild_focus();
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, app);
            })
            .expect("draw");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn home_route_renders_header_and_form() {
        let mut app = App::for_tests();
        let mut view = MainView::default();
        view.switch_route(&mut app, Route::Home);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");

        let text = draw(&mut terminal, &mut app, &mut view);
        assert!(text.contains("[CS]"));
        assert!(text.contains("Customer Satisfaction"));
        assert!(text.contains("Customer ID ▾"));
        assert!(text.contains("Enter your customer ID here..."));
        assert!(text.contains("Submit"));
    }

    #[test]
    fn open_list_receives_focus_after_the_next_draw() {
        let mut app = App::for_tests();
        let mut view = MainView::default();
        view.switch_route(&mut app, Route::Home);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        draw(&mut terminal, &mut app, &mut view);

        assert!(app.feedback.type_select.f_trigger.get());
        view.handle_key_events(&mut app, key(KeyCode::Down));
        assert!(app.feedback.type_select.is_open());

        let text = draw(&mut terminal, &mut app, &mut view);
        assert!(text.contains("Ticket ID"));
        view.run_frame_tasks(&mut app);
        assert!(app.feedback.type_select.f_list.get());
    }

    #[test]
    fn outside_click_is_broadcast_to_the_open_list() {
        let mut app = App::for_tests();
        let mut view = MainView::default();
        view.switch_route(&mut app, Route::Home);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        draw(&mut terminal, &mut app, &mut view);
        view.handle_key_events(&mut app, key(KeyCode::Enter));
        draw(&mut terminal, &mut app, &mut view);

        view.broadcast_pointer_down(&mut app, 79, 18);
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 79,
            row: 18,
            modifiers: KeyModifiers::NONE,
        };
        view.handle_mouse_events(&mut app, mouse);

        assert!(!app.feedback.type_select.is_open());
        assert_eq!(app.feedback.type_select.selected_value(), "customerID");
        assert_eq!(app.events.listener_count(), 0);
    }

    #[test]
    fn switching_routes_tears_down_the_selector() {
        let mut app = App::for_tests();
        let mut view = MainView::default();
        view.switch_route(&mut app, Route::Home);
        view.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(app.events.listener_count(), 1);

        view.switch_route(&mut app, Route::ThankYou);
        assert_eq!(app.current_route, Route::ThankYou);
        assert_eq!(app.events.listener_count(), 0);
        assert!(!app.events.has_frame_tasks());
        assert!(app.needs_fast_ticks());

        view.switch_route(&mut app, Route::Home);
        assert!(!app.needs_fast_ticks());
    }
}
