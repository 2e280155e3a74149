use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::persistence::{ensure_dir, write_atomic, PathResolver};

/// Tunables for the recovery surface. Everything here is presentation
/// timing or a path override; the wizard core never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides the platform data directory for wallet records and the
    /// transient cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Fixed delay before navigating to the sign-in surface after a
    /// successful reset.
    pub redirect_delay_ms: u64,
    /// Pause shown after a successful mnemonic lookup before the next step
    /// renders. The wizard itself advances instantly.
    pub auto_advance_delay_ms: u64,
    /// Default visible duration of a transient notice.
    pub notice_duration_ms: u64,
    /// Visible duration of a rate-limit notice; longer, because the user
    /// has to wait before retrying.
    pub rate_limited_notice_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            redirect_delay_ms: 1500,
            auto_advance_delay_ms: 800,
            notice_duration_ms: 4000,
            rate_limited_notice_ms: 8000,
        }
    }
}

/// Loads and saves the configuration file under the platform config
/// location, creating defaults when nothing is on disk yet.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.redirect_delay_ms, 1500);
        assert_eq!(config.rate_limited_notice_ms, 8000);
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.redirect_delay_ms = 250;
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.redirect_delay_ms, 250);
        assert_eq!(loaded.notice_duration_ms, 4000);
    }

    #[test]
    fn unknown_and_missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(
            PathResolver::config_file_in(dir.path()),
            r#"{"redirect_delay_ms": 10}"#,
        )
        .unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.redirect_delay_ms, 10);
        assert_eq!(config.notice_duration_ms, 4000);
    }
}
