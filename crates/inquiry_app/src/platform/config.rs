use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

/// Settings read from `inquiry.ron`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub export_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            poll_interval_ms: 1000,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            export_dir: PathBuf::from("."),
            log_destination: LogDestination::Terminal,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Reads `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };

    ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inquiry.ron");
        fs::write(
            &path,
            r#"(base_url: "https://inquiries.example.com", poll_interval_ms: 250, log_destination: Both)"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.base_url, "https://inquiries.example.com");
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inquiry.ron");
        fs::write(&path, "(base_url: ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }
}
