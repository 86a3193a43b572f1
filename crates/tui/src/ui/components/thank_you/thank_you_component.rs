use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use feedback_types::{Effect, Msg, Route};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::centered_rect;

/// Confirmation page with a countdown back to the home route.
#[derive(Debug, Default)]
pub struct ThankYouComponent;

impl Component for ThankYouComponent {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        if matches!(msg, Msg::Tick) && app.thank_you.tick(Instant::now()) {
            tracing::debug!("countdown finished; returning home");
            return vec![Effect::SwitchTo(Route::Home)];
        }
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc if app.thank_you.finish() => vec![Effect::SwitchTo(Route::Home)],
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

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, None, app.thank_you.container_focus.get());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let body = centered_rect(80, 40, inner);
        let text = vec![
            Line::from(Span::styled(
                "Thank You!",
                theme.status_success().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(app.thank_you.message(), theme.text_primary_style())),
        ];
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true }),
            body,
        );
        app.thank_you.last_area = area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Enter/Esc", " Home now ")])
    }

    fn on_route_enter(&mut self, app: &mut App) -> Vec<Effect> {
        app.thank_you.start(Instant::now());
        Vec::new()
    }

    fn on_route_exit(&mut self, app: &mut App) -> Vec<Effect> {
        app.thank_you.stop();
        Vec::new()
    }
}
