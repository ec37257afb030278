use crate::error::ClientError;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, read_to_string, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_url: String,
    pub static_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api/v1".to_string(),
            static_url: "http://localhost:8000".to_string(),
            token: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub poll_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { poll_interval_ms: 1000 }
    }
}

impl SessionConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub client: SessionConfig,
}

fn config_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|base| Path::new(base.config_dir()).join("PokeTD"))
}

impl ClientConfig {
    pub fn load() -> Result<ClientConfig, ClientError> {
        if let Some(dir) = config_dir() {
            let path = dir.join("Config.toml");
            if path.exists() {
                let string = read_to_string(path)?;
                return ClientConfig::parse(&string);
            }
        }
        Ok(ClientConfig::default())
    }

    pub fn parse(string: &str) -> Result<ClientConfig, ClientError> {
        let config = toml::from_str(string)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ClientError> {
        let string = toml::to_string_pretty(&self)?;
        if let Some(path) = config_dir() {
            if !path.exists() {
                create_dir_all(&path)?;
            }
            let path = path.join("Config.toml");
            let mut file = File::create(path)?;
            file.write_all(string.as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ClientConfig::parse("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.client.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ClientConfig::parse(
            r#"
            [server]
            token = "abc123"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.token.as_deref(), Some("abc123"));
        assert_eq!(config.server.api_url, "http://localhost:8000/api/v1");
        assert_eq!(config.client.poll_interval_ms, 1000);
    }

    #[test]
    fn written_config_reads_back() {
        let mut config = ClientConfig::default();
        config.server.static_url = "https://poketd.example".to_string();
        config.client.poll_interval_ms = 250;
        let string = toml::to_string_pretty(&config).unwrap();
        assert!(!string.contains("token"));
        assert_eq!(ClientConfig::parse(&string).unwrap(), config);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(
            ClientConfig::parse("[client]\npoll_interval_ms = \"soon\""),
            Err(ClientError::ConfigError)
        ));
    }
}
