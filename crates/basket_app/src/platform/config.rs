use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use basket_engine::GatewaySettings;
use serde::Deserialize;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "basket.ron";

/// Client settings read from `basket.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub search_path: String,
    pub compare_path: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: Option<u64>,
    pub max_bytes: u64,
    pub log_to_terminal: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gateway = GatewaySettings::default();
        Self {
            base_url: gateway.base_url,
            search_path: gateway.search_path,
            compare_path: gateway.compare_path,
            connect_timeout_ms: gateway.connect_timeout.as_millis() as u64,
            request_timeout_ms: gateway.request_timeout.map(|t| t.as_millis() as u64),
            max_bytes: gateway.max_bytes,
            log_to_terminal: false,
        }
    }
}

impl AppConfig {
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.base_url.clone(),
            search_path: self.search_path.clone(),
            compare_path: self.compare_path.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
            max_bytes: self.max_bytes,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_to_terminal {
            LogDestination::Both
        } else {
            LogDestination::File
        }
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };

    ron::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms, None);
        assert_eq!(config.log_destination(), LogDestination::File);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(base_url: "http://prices.example:9000", request_timeout_ms: Some(1500))"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.base_url, "http://prices.example:9000");
        assert_eq!(config.search_path, "/item-prices/");

        let settings = config.gateway_settings();
        assert_eq!(settings.request_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(
            settings.search_url("milk").unwrap().as_str(),
            "http://prices.example:9000/item-prices/?term=milk"
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(base_url: 42").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
