use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOSTNAME: &str = "0.0.0.0";
pub const DEFAULT_API_BASE: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MANIFEST_PATH: &str = ".well-known/agent.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<DictionaryConfig>,

    #[serde(
        rename = "logLevel",
        alias = "log_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub log_level: Option<String>,

    #[serde(
        rename = "manifestPath",
        alias = "manifest_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub manifest_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DictionaryConfig {
    #[serde(
        rename = "apiBase",
        alias = "api_base",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_base: Option<String>,

    #[serde(
        rename = "timeoutSecs",
        alias = "timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Later sources win field-by-field; absent fields leave earlier values
    /// in place.
    pub fn merge(&mut self, other: Config) {
        if other.schema.is_some() {
            self.schema = other.schema;
        }
        if let Some(server) = other.server {
            let merged = self.server.get_or_insert_with(ServerConfig::default);
            if server.hostname.is_some() {
                merged.hostname = server.hostname;
            }
            if server.port.is_some() {
                merged.port = server.port;
            }
        }
        if let Some(dictionary) = other.dictionary {
            let merged = self.dictionary.get_or_insert_with(DictionaryConfig::default);
            if dictionary.api_base.is_some() {
                merged.api_base = dictionary.api_base;
            }
            if dictionary.timeout_secs.is_some() {
                merged.timeout_secs = dictionary.timeout_secs;
            }
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.manifest_path.is_some() {
            self.manifest_path = other.manifest_path;
        }
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn hostname(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.hostname.clone())
            .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string())
    }

    pub fn api_base(&self) -> String {
        self.dictionary
            .as_ref()
            .and_then(|d| d.api_base.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(
            self.dictionary
                .as_ref()
                .and_then(|d| d.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn manifest_path(&self) -> PathBuf {
        PathBuf::from(
            self.manifest_path
                .as_deref()
                .unwrap_or(DEFAULT_MANIFEST_PATH),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service_contract() {
        let config = Config::default();
        assert_eq!(config.port(), 8000);
        assert_eq!(config.hostname(), "0.0.0.0");
        assert_eq!(
            config.api_base(),
            "https://api.dictionaryapi.dev/api/v2/entries/en"
        );
        assert_eq!(config.lookup_timeout(), Duration::from_secs(10));
        assert_eq!(config.manifest_path(), PathBuf::from(".well-known/agent.json"));
    }

    #[test]
    fn merge_overrides_field_by_field() {
        let mut base = Config {
            server: Some(ServerConfig {
                hostname: Some("127.0.0.1".to_string()),
                port: Some(9000),
            }),
            ..Config::default()
        };

        base.merge(Config {
            server: Some(ServerConfig {
                hostname: None,
                port: Some(9100),
            }),
            log_level: Some("debug".to_string()),
            ..Config::default()
        });

        assert_eq!(base.hostname(), "127.0.0.1");
        assert_eq!(base.port(), 9100);
        assert_eq!(base.log_level.as_deref(), Some("debug"));
    }
}
