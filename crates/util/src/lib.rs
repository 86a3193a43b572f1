//! Utilities shared by the feedback CLI and TUI: settings loading and path
//! helpers.

pub mod path_processing;
pub mod settings;

pub use path_processing::{default_log_path, expand_tilde};
pub use settings::{FeedbackSettings, SETTINGS_FILE_NAME, SETTINGS_PATH_ENV, SettingsError, SettingsPayload};
