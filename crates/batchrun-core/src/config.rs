use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HTTP settings for the download task (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Seconds to wait for the TCP/TLS connection to be established.
    pub connect_timeout_secs: u64,
    /// Abort a transfer that stays below 1 byte/s for this many seconds.
    pub low_speed_time_secs: u64,
    /// Maximum number of HTTP redirects to follow.
    pub max_redirections: u32,
    /// Optional cap on the whole transfer in seconds (None = no cap).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            low_speed_time_secs: 10,
            max_redirections: 10,
            timeout_secs: None,
        }
    }
}

impl DownloadConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn low_speed_time(&self) -> Duration {
        Duration::from_secs(self.low_speed_time_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Global configuration loaded from `~/.config/batchrun/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Number of tasks run concurrently by the pool.
    pub workers: usize,
    /// Directory (relative to the working directory) for every file read or written by tasks.
    pub output_dir: PathBuf,
    /// Download task settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            output_dir: PathBuf::from("output"),
            download: DownloadConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("batchrun")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the default XDG location, creating a default file if none exists.
pub fn load_or_init() -> Result<AppConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, creating it with defaults if it does not exist.
pub fn load_or_init_at(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_cfg = AppConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AppConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.output_dir, PathBuf::from("output"));
        assert_eq!(cfg.download.connect_timeout_secs, 10);
        assert_eq!(cfg.download.max_redirections, 10);
        assert!(cfg.download.timeout().is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = AppConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_without_download_section() {
        let toml = r#"
            workers = 2
            output_dir = "out"
        "#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.workers, 2);
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.download, DownloadConfig::default());
    }

    #[test]
    fn config_toml_download_section() {
        let toml = r#"
            workers = 8
            output_dir = "/tmp/batchrun"

            [download]
            connect_timeout_secs = 3
            low_speed_time_secs = 20
            max_redirections = 2
            timeout_secs = 120
        "#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.download.connect_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.download.low_speed_time(), Duration::from_secs(20));
        assert_eq!(cfg.download.max_redirections, 2);
        assert_eq!(cfg.download.timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn load_or_init_at_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(path.exists());

        fs::write(&path, "workers = 1\noutput_dir = \"elsewhere\"\n").unwrap();
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.workers, 1);
        assert_eq!(cfg.output_dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn load_or_init_at_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "workers = \"many\"").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
