//! Feedback form shown on the home route.
//!
//! Owns the type selector in controlled mode: both change callbacks write
//! into a shared draft which the form feeds back after each handled event.

mod feedback_component;
mod state;

pub use feedback_component::FeedbackComponent;
pub use state::FeedbackState;
