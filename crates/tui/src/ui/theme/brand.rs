use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Customer Satisfaction brand palette
pub const BRAND_BLUE: Color = Color::Rgb(0x00, 0x66, 0xB2); // #0066b2 - trigger, selection, focus ring
pub const BRAND_BLUE_TINT: Color = Color::Rgb(0xE5, 0xF0, 0xF7); // #0066b2 at 10% over white - focused row
pub const AZURE: Color = Color::Rgb(0xF0, 0xFF, 0xFF); // #f0ffff - thank-you backdrop on narrow screens
pub const WHITE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const GRAY_700: Color = Color::Rgb(0x37, 0x41, 0x51); // #374151 - headings and body copy
pub const GRAY_600: Color = Color::Rgb(0x4B, 0x55, 0x63); // #4b5563 - secondary copy
pub const NEUTRAL_400: Color = Color::Rgb(0xA3, 0xA3, 0xA3); // #a3a3a3 - placeholders
pub const NEUTRAL_300: Color = Color::Rgb(0xD4, 0xD4, 0xD4); // #d4d4d4 - borders
pub const GREEN_600: Color = Color::Rgb(0x16, 0xA3, 0x4A);
pub const RED_600: Color = Color::Rgb(0xDC, 0x26, 0x26);

/// Light brand theme matching the web front-end.
#[derive(Debug, Clone)]
pub struct BrandTheme {
    roles: ThemeRoles,
}

impl BrandTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: WHITE,
                surface: WHITE,
                surface_muted: AZURE,
                border: NEUTRAL_300,

                text: GRAY_700,
                text_secondary: GRAY_600,
                text_muted: NEUTRAL_400,

                accent_primary: BRAND_BLUE,
                on_accent: WHITE,
                accent_subtle: BRAND_BLUE_TINT,

                success: GREEN_600,
                error: RED_600,

                selection_bg: BRAND_BLUE,
                selection_fg: WHITE,
                focus: BRAND_BLUE,
            },
        }
    }
}

impl Default for BrandTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for BrandTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
