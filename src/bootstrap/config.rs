//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and hands the parsed value to
//! [`AppConfig::from_toml`], which owns the mapping and the defaults.
//! Nothing here interprets individual keys.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ob_core::config::AppConfig;
use tracing::{debug, info};

/// File name looked up in the platform config directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Directory under the platform config directory.
pub const APP_DIR_NAME: &str = "onboarding";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - A key holds the wrong type, a negative number or an unknown failure kind
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {} as TOML", config_path.display()))?;
    AppConfig::from_toml(&toml_value)
}

/// Pick the config file to read.
///
/// An explicit path always wins; otherwise `<config dir>/onboarding/config.toml`
/// is used if it exists.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    let candidate = dirs::config_dir()?
        .join(APP_DIR_NAME)
        .join(DEFAULT_CONFIG_FILE);
    candidate.exists().then_some(candidate)
}

/// Load the resolved config file, or fall back to defaults when there is none.
///
/// An explicitly named file that cannot be read is still an error.
pub fn load_config_or_default(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    match resolve_config_path(explicit) {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            load_config(&path)
        }
        None => {
            debug!("no configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}
