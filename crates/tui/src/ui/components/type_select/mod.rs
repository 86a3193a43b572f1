//! Type selector: a dropdown choosing the kind of identifier paired with a
//! free-text field whose placeholder follows the chosen kind.
//!
//! Either half can be controlled by the embedding component (supply a value
//! plus a change callback) or left to manage itself. The embedding component
//! owns a [`TypeSelectState`] and forwards input to [`TypeSelectComponent`].
//!
//! # Usage
//!
//! ```ignore
//! let state = TypeSelectState::new(
//!     TypeSelectProps::new()
//!         .dom_id("support-lookup")
//!         .selected_value("ticketID")
//!         .on_type_change(|value| tracing::debug!(value, "type changed")),
//! );
//! ```

pub mod a11y;
mod controlled;
mod state;
mod type_select_component;

pub use state::{TypeSelectProps, TypeSelectState};
pub use type_select_component::TypeSelectComponent;
