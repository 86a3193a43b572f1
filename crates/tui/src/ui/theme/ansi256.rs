//! ANSI 256-color fallback theme tailored for terminals without truecolor support.
//!
//! This palette approximates the brand theme using indexed colors so the UI
//! remains legible inside macOS Terminal and other 8-bit color terminals.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

/// ANSI 256-color approximation of the brand palette.
#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(231),
                surface: Color::Indexed(231),
                surface_muted: Color::Indexed(195),
                border: Color::Indexed(252),

                text: Color::Indexed(238),
                text_secondary: Color::Indexed(240),
                text_muted: Color::Indexed(248),

                accent_primary: Color::Indexed(25),
                on_accent: Color::Indexed(231),
                accent_subtle: Color::Indexed(189),

                success: Color::Indexed(34),
                error: Color::Indexed(160),

                selection_bg: Color::Indexed(25),
                selection_fg: Color::Indexed(231),
                focus: Color::Indexed(25),
            },
        }
    }
}

impl Default for Ansi256Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
