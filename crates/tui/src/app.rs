//! Application state for the feedback TUI.
//!
//! `App` owns every component's state plus the cross-cutting pieces they
//! share: the theme, the UI event bus and the rat-focus tree. Components
//! receive `&mut App` and report side effects as [`Effect`]s.

use feedback_types::{Effect, Msg, Route};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::debug;

use crate::TuiConfig;
use crate::ui::components::feedback::FeedbackState;
use crate::ui::components::nav_bar::NavBarState;
use crate::ui::components::thank_you::ThankYouState;
use crate::ui::events::UiEventBus;
use crate::ui::theme::{self, Theme};

/// Cross-cutting shared context owned by the App.
#[derive(Debug)]
pub struct SharedCtx {
    /// Active UI theme
    pub theme: Box<dyn Theme>,
}

impl SharedCtx {
    pub fn new(preferred_theme: Option<&str>) -> Self {
        let loaded = theme::load(preferred_theme);
        debug!(
            theme = loaded.definition.id,
            label = loaded.definition.label,
            ansi = loaded.definition.is_ansi_fallback,
            "theme selected"
        );
        Self {
            theme: loaded.theme,
        }
    }
}

pub struct App {
    /// Shared, cross-cutting context (theme)
    pub ctx: SharedCtx,
    /// Header state
    pub nav_bar: NavBarState,
    /// Home route: the feedback form
    pub feedback: FeedbackState,
    /// Thank-you route: the countdown
    pub thank_you: ThankYouState,
    /// Global pointer subscriptions and next-frame tasks
    pub events: UiEventBus,
    /// Currently displayed route
    pub current_route: Route,
    /// Focus tree, rebuilt before every draw
    pub focus: Focus,
    /// Last known terminal size
    pub terminal_size: (u16, u16),

    container_focus: FocusFlag,
    last_area: Rect,
}

impl App {
    pub fn new(config: &TuiConfig) -> Self {
        let mut app = Self {
            ctx: SharedCtx::new(config.theme.as_deref()),
            nav_bar: NavBarState::default(),
            feedback: FeedbackState::new(config.options.clone(), config.dom_id.as_deref()),
            thank_you: ThankYouState::new(config.redirect_seconds),
            events: UiEventBus::new(),
            current_route: Route::Home,
            focus: Focus::default(),
            terminal_size: (0, 0),
            container_focus: FocusFlag::named("app"),
            last_area: Rect::default(),
        };
        app.focus = FocusBuilder::build_for(&app);
        app
    }

    /// Application-level reaction to a message. Component-specific handling
    /// happens in the components themselves.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        if let Msg::Resize(width, height) = msg {
            self.terminal_size = (*width, *height);
            self.last_area = Rect::new(0, 0, *width, *height);
        }
        Vec::new()
    }

    /// Whether the runtime should tick quickly.
    pub fn needs_fast_ticks(&self) -> bool {
        self.current_route == Route::ThankYou && self.thank_you.is_counting()
    }

    /// Rebuilds the focus tree, keeping the focused widget where possible.
    pub fn rebuild_focus(&mut self) {
        let old_focus = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(&*self, Some(old_focus));
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new(&TuiConfig::default())
    }
}

impl HasFocus for App {
    /// The header is always focusable; the body depends on the route.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.widget(&self.nav_bar);
        match self.current_route {
            Route::Home => builder.widget(&self.feedback),
            Route::ThankYou => builder.widget(&self.thank_you),
        };
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
