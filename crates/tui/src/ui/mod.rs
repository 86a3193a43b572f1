//! UI rendering module for the TUI application.
//!
//! This module provides the components, the UI event bus, theming and the
//! runtime loop that ties them together.

pub mod components;
pub mod events;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
