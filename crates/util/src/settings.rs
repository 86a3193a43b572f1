//! Settings file for the feedback TUI.
//!
//! A small JSON document lets deployments swap the selectable option set,
//! the thank-you redirect delay, the accessibility base id and the theme
//! without rebuilding. The file lives in the standard configuration
//! directory (`~/.config/feedback/settings.json` on most platforms) unless
//! `FEEDBACK_SETTINGS_PATH` points elsewhere.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use feedback_types::TypeOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::path_processing::{APP_DIR_NAME, expand_tilde};

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "FEEDBACK_SETTINGS_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Seconds the thank-you page waits before returning home.
pub const DEFAULT_REDIRECT_SECONDS: u64 = 3;

/// Error surfaced when reading settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure (for example, permissions).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The document is valid JSON but does not describe valid settings.
    #[error("invalid settings: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Persisted setting values. Every field is optional; absent fields fall
/// back to built-in defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPayload {
    /// Replacement option set for the type selector.
    pub options: Option<TypeOptions>,
    /// Countdown start for the thank-you page.
    pub redirect_seconds: Option<u64>,
    /// Base identifier for the type selector's accessibility relationships.
    pub dom_id: Option<String>,
    /// Canonical theme identifier.
    pub theme: Option<String>,
}

/// Settings loaded from disk (or defaults when no file exists).
#[derive(Debug, Default, Clone)]
pub struct FeedbackSettings {
    path: PathBuf,
    payload: SettingsPayload,
}

impl FeedbackSettings {
    /// Load settings from `FEEDBACK_SETTINGS_PATH` or the default location.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(default_settings_path())
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        Ok(Self { path, payload })
    }

    /// Settings that never touched the filesystem.
    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn payload(&self) -> &SettingsPayload {
        &self.payload
    }

    /// Configured option set, or the built-in default set.
    pub fn options(&self) -> TypeOptions {
        self.payload.options.clone().unwrap_or_default()
    }

    pub fn redirect_seconds(&self) -> u64 {
        self.payload.redirect_seconds.unwrap_or(DEFAULT_REDIRECT_SECONDS)
    }

    pub fn dom_id(&self) -> Option<&str> {
        self.payload.dom_id.as_deref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.payload.theme.as_deref()
    }
}

fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(SETTINGS_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<SettingsPayload, SettingsError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No settings file; using defaults");
            return Ok(SettingsPayload::default());
        }
        Err(error) => return Err(SettingsError::Io(error)),
    };

    let document: serde_json::Value = match serde_json::from_str(&data) {
        Ok(document) => document,
        Err(error) => {
            warn!(
                path = %path.display(),
                error = %error,
                "Failed to parse settings file; using defaults"
            );
            return Ok(SettingsPayload::default());
        }
    };

    Ok(serde_json::from_value(document)?)
}
