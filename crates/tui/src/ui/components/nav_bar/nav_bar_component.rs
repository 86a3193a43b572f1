use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use feedback_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::{
    app::App,
    ui::theme::theme_helpers::{self as th, render_button},
};

/// Horizontal navigation header.
///
/// Renders the brand button and the application title. Activating the brand
/// (Enter while focused, or a left click) routes home.
#[derive(Debug, Default)]
pub struct NavBarComponent;

impl NavBarComponent {
    pub fn new() -> Self {
        Self
    }

    fn home_effect(app: &App) -> Effect {
        Effect::SwitchTo(app.nav_bar.home_route)
    }
}

impl Component for NavBarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') if app.nav_bar.f_brand.get() => vec![Self::home_effect(app)],
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
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let hit = find_target_index_by_mouse_position(
            &app.nav_bar.last_area,
            &[app.nav_bar.brand_area],
            mouse.column,
            mouse.row,
        );
        match hit {
            Some(_) => {
                app.focus.focus(&app.nav_bar.f_brand);
                vec![Self::home_effect(app)]
            }
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        frame.render_widget(Paragraph::new("").style(th::panel_style(theme)), area);

        let layout = self.get_preferred_layout(app, area);
        let brand_area = layout[0];
        render_button(frame, brand_area, &app.nav_bar.brand_icon, app.nav_bar.f_brand.get(), theme);

        let title = Line::from(vec![
            Span::styled(app.nav_bar.title.clone(), theme.accent_emphasis_style()),
            Span::styled(format!("  {}", app.nav_bar.current_route.title()), theme.text_muted_style()),
        ]);
        // title sits on the middle row of the brand button
        let title_area = Rect::new(layout[1].x, layout[1].y + layout[1].height / 2, layout[1].width, 1);
        frame.render_widget(Paragraph::new(title), title_area);

        app.nav_bar.last_area = area;
        app.nav_bar.brand_area = brand_area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Enter", " Home "), ("Tab", " Next field ")])
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let brand_width = u16::try_from(app.nav_bar.brand_icon.chars().count()).unwrap_or(u16::MAX).saturating_add(4);
        Layout::horizontal([
            Constraint::Length(brand_width), // Brand
            Constraint::Min(1),              // Title
            Constraint::Length(0),           // Reserved right-hand slot
        ])
        .spacing(1)
        .split(area)
        .to_vec()
    }
}
