//! UI components: header, feedback form, type selector, thank-you page.

pub mod common;
pub mod component;
pub mod feedback;
pub mod nav_bar;
pub mod thank_you;
pub mod type_select;

pub use component::*;
