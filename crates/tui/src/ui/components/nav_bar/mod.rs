//! Top navigation header.
//!
//! A single row with the brand mark and the application title. The brand is
//! a rat-focus leaf; activating it maps to `Effect::SwitchTo(Route::Home)`.

mod nav_bar_component;
mod state;

pub use nav_bar_component::NavBarComponent;
pub use state::NavBarState;
