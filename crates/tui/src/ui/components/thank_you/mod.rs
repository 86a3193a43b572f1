//! Thank-you page shown after a submission; counts down and routes home.

mod state;
mod thank_you_component;

pub use state::ThankYouState;
pub use thank_you_component::ThankYouComponent;
