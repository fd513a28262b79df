pub mod schema;
pub mod watcher;

pub use schema::{ColorTheme, GlobalConfig, Position, StatusBarConfig, ThemeConfig, ThemeVariant};
pub use watcher::ConfigWatcher;

use statusbar_core::{Result, StatusBarError};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file. Returns `StatusBarConfig::default()`
/// if the file doesn't exist so the bar always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<StatusBarConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(StatusBarConfig::default());
    }

    let raw = std::fs::read_to_string(path)?;
    parse(&raw)
}

/// Parse a configuration document.
pub fn parse(raw: &str) -> Result<StatusBarConfig> {
    toml::from_str(raw).map_err(|e| StatusBarError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("statusbar").join("statusbar.toml")
}
