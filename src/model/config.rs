use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULTS: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub log_dir: String,
    pub log_filter: String,
    pub startup_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub left_column_percent: u16,
    pub show_full_help: bool,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    ///
    /// `explicit` replaces the platform config path; unlike the platform
    /// path it must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user_path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow!("config file not found: {}", path.display()));
                }
                Some(path.to_path_buf())
            }
            None => directories::ProjectDirs::from("", "", "claudectl")
                .map(|dirs| dirs.config_dir().join("config.toml"))
                .filter(|path| path.exists()),
        };

        let user_str = match &user_path {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?,
            ),
            None => None,
        };

        Self::from_layers(user_str.as_deref())
    }

    /// Parses the embedded defaults and deep-merges `user` over them.
    pub fn from_layers(user: Option<&str>) -> Result<Self> {
        let mut merged: toml::Value = toml::from_str(DEFAULTS)?;

        if let Some(user) = user {
            let overlay: toml::Value = toml::from_str(user).context("parsing user config")?;
            merge(&mut merged, overlay);
        }

        let mut config: AppConfig = merged.try_into()?;
        config.ui.left_column_percent = config.ui.left_column_percent.clamp(10, 90);

        // Expand ~ in log_dir
        if config.general.log_dir.starts_with('~') {
            let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
            config.general.log_dir =
                config
                    .general
                    .log_dir
                    .replacen('~', &home.to_string_lossy(), 1);
        }

        Ok(config)
    }

    pub fn log_dir(&self) -> PathBuf {
        if !self.general.log_dir.is_empty() {
            return PathBuf::from(&self.general.log_dir);
        }

        directories::ProjectDirs::from("", "", "claudectl")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("claudectl"))
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.general.startup_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.general.shutdown_timeout_secs)
    }
}

/// Tables merge key by key; everything else is replaced.
fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let config = AppConfig::from_layers(None).unwrap();

        assert_eq!(config.general.log_filter, "claudectl=info");
        assert_eq!(config.ui.left_column_percent, 40);
        assert_eq!(config.startup_timeout(), Duration::from_secs(30));
        assert!(!config.ui.show_full_help);
    }

    #[test]
    fn partial_user_config_keeps_other_defaults() {
        let config = AppConfig::from_layers(Some(
            "[general]\nlog_filter = \"claudectl=trace\"\n",
        ))
        .unwrap();

        assert_eq!(config.general.log_filter, "claudectl=trace");
        assert_eq!(config.general.shutdown_timeout_secs, 30);
        assert_eq!(config.ui.left_column_percent, 40);
    }

    #[test]
    fn left_column_percent_is_clamped() {
        let config = AppConfig::from_layers(Some("[ui]\nleft_column_percent = 99\n")).unwrap();
        assert_eq!(config.ui.left_column_percent, 90);
    }

    #[test]
    fn explicit_log_dir_wins() {
        let config = AppConfig::from_layers(Some("[general]\nlog_dir = \"/var/log/cc\"\n")).unwrap();
        assert_eq!(config.log_dir(), PathBuf::from("/var/log/cc"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn explicit_config_file_is_layered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\nshow_full_help = true\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert!(config.ui.show_full_help);
        assert_eq!(config.ui.left_column_percent, 40);
    }
}
