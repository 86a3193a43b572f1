use std::path::PathBuf;

use dirs_next::{data_local_dir, home_dir};

/// Application directory name under the platform config/data roots.
pub const APP_DIR_NAME: &str = "feedback";

/// Expands a leading `~` (Unix or Windows separator) to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Default location of the TUI log file. The terminal is in raw mode while
/// the UI runs, so tracing output goes here instead of stdout.
pub fn default_log_path() -> PathBuf {
    data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("feedback.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde(" ~/feedback/settings.json "), home.join("feedback/settings.json"));
    }

    #[test]
    fn leaves_other_paths_untouched() {
        assert_eq!(expand_tilde("/etc/feedback.json"), PathBuf::from("/etc/feedback.json"));
        assert_eq!(expand_tilde("relative/~/x"), PathBuf::from("relative/~/x"));
    }

    #[test]
    fn log_path_ends_with_app_dir() {
        let path = default_log_path();
        assert!(path.ends_with("feedback/feedback.log"));
    }
}
