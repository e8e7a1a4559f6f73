use dirs_next::config_dir;
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::DEFAULT_PROGRAM;
use crate::error::{BetaError, Result};
use crate::form::DEFAULT_OUTPUT_DIR;

pub const CONFIG_ENV: &str = "BETA_GUI_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Executable name or path for BETA.
    pub beta_program: String,
    /// Output directory new forms start with.
    pub output_dir: PathBuf,
    /// How often run windows drain their relay.
    pub poll_interval_ms: u64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            beta_program: DEFAULT_PROGRAM.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            poll_interval_ms: 10,
            window_width: 750.0,
            window_height: 1100.0,
        }
    }
}

impl AppConfig {
    pub fn from_toml(path: &Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| BetaError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| BetaError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &contents)
    }

    /// An explicit path must exist. Otherwise `$BETA_GUI_CONFIG`, then the
    /// per-user config file, are tried; when neither exists the built-in
    /// defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::read(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => {
                debug!("no config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("beta-gui/config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AppConfig::from_toml(
            Path::new("inline.toml"),
            "beta_program = \"/opt/beta/BETA\"\npoll_interval_ms = 25\n",
        )
        .unwrap();
        assert_eq!(cfg.beta_program, "/opt/beta/BETA");
        assert_eq!(cfg.poll_interval(), Duration::from_millis(25));
        assert_eq!(cfg.output_dir, PathBuf::from("./"));
        assert_eq!(cfg.window_width, 750.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml(Path::new("bad.toml"), "beta_binary = \"BETA\"\n")
            .unwrap_err();
        assert!(matches!(err, BetaError::ConfigParse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(BetaError::ConfigRead { .. })
        ));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_dir = \"results\"\nwindow_height = 800.0\n").unwrap();
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("results"));
        assert_eq!(cfg.window_height, 800.0);
        assert_eq!(cfg.beta_program, "BETA");
    }

    #[test]
    fn zero_interval_is_clamped() {
        let cfg = AppConfig {
            poll_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(cfg.poll_interval(), Duration::from_millis(1));
    }
}
