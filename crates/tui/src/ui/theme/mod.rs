//! Theme styling module for the TUI UI layer.
//!
//! Two palettes exist: the brand palette for truecolor terminals and an
//! indexed fallback. Widgets style themselves through the semantic roles in
//! [`roles`] and the builders in [`theme_helpers`].

use std::env;

use tracing::debug;

pub mod ansi256;
pub mod brand;
pub mod catalog;
pub mod roles;
pub mod theme_helpers;

use ansi256::Ansi256Theme;
pub use brand::BrandTheme;
use catalog::ThemeDefinition;
pub use roles::Theme;

/// Theme plus metadata describing how it was selected.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

/// Environment variable naming a theme; wins over the configured preference.
pub const THEME_ENV: &str = "TUI_THEME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorDepth {
    Full,
    Indexed,
}

/// Picks the palette. Terminals limited to 256 colors always get the
/// indexed palette; otherwise `TUI_THEME`, then `preferred_theme`, then the
/// brand default.
pub fn load(preferred_theme: Option<&str>) -> LoadedTheme {
    if color_depth() == ColorDepth::Indexed {
        debug!("terminal lacks truecolor; using the indexed palette");
        return LoadedTheme::from_definition(catalog::default_ansi());
    }

    let from_env = env::var(THEME_ENV).ok();
    let definition = [from_env.as_deref(), preferred_theme]
        .into_iter()
        .flatten()
        .find_map(|name| catalog::resolve(name.trim()))
        .unwrap_or_else(catalog::default_truecolor);
    LoadedTheme::from_definition(definition)
}

/// `TUI_COLOR_MODE` decides when set to a known value; otherwise
/// `COLORTERM`/`TERM` are sniffed for truecolor support.
fn color_depth() -> ColorDepth {
    let forced = env::var("TUI_COLOR_MODE").ok().and_then(|mode| parse_depth(&mode));
    if let Some(depth) = forced {
        return depth;
    }
    let advertises_truecolor = ["COLORTERM", "TERM"].iter().any(|name| {
        let value = env::var(name).unwrap_or_default().to_ascii_lowercase();
        value.contains("truecolor") || value.contains("24bit")
    });
    if advertises_truecolor { ColorDepth::Full } else { ColorDepth::Indexed }
}

fn parse_depth(value: &str) -> Option<ColorDepth> {
    match value.trim().to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" | "full" => Some(ColorDepth::Full),
        "ansi256" | "256" | "8bit" => Some(ColorDepth::Indexed),
        _ => None,
    }
}
