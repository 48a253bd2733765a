pub mod model;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::{AppConfig, LoggingConfig};

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nbmenu")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_from(&config_path())
}

/// Load `path`. A missing file is created with the defaults so there is
/// something to edit next time.
fn load_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let config = AppConfig::default();
        if let Err(e) = save_to(&config, path) {
            tracing::warn!(error = %e, "could not write default config");
        }
        return Ok(config);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config file")?;
    Ok(config)
}

fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}

/// Expand a leading `~/` against the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::Target;

    #[test]
    fn test_missing_file_is_written_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nbmenu").join("config.toml");
        let config = load_from(&path).unwrap();
        assert_eq!(config.server.base_url, "/");
        assert_eq!(config.ui.open_target, Target::Blank);
        assert!(config.ui.tour_enabled);
        assert_eq!(config.kernelspecs.len(), 2);

        assert!(path.exists());
        assert_eq!(load_from(&path).unwrap().kernelspecs, config.kernelspecs);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nbase_url = \"/user/ana/\"\n\n[ui]\nopen_target = \"self\"\n",
        )
        .unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.server.base_url, "/user/ana/");
        assert_eq!(config.server.notebook_path, "Untitled.ipynb");
        assert_eq!(config.ui.open_target, Target::SelfWindow);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.ui.tour_enabled = false;
        config.kernelspecs.truncate(1);
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert!(!loaded.ui.tour_enabled);
        assert_eq!(loaded.kernelspecs, config.kernelspecs);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\n").unwrap();
        assert!(load_from(&path).is_err());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/logs"), PathBuf::from("/tmp/logs"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/logs"), home.join("logs"));
        }
    }
}
