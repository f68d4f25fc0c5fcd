use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;

const ENV_PRODUCTION: &str = "production";
const ENV_PREFIX: &str = "FETCHER";
const LOG_FORMAT_JSON: &str = "json";
const LOG_FORMAT_PRETTY: &str = "pretty";

#[derive(Debug, Deserialize, Clone)]
pub struct Logger {
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    pub directory: bool,
    pub console: bool,
}

fn default_log_format() -> String {
    LOG_FORMAT_JSON.to_string()
}

impl Logger {
    /// Console output is JSON unless `format` asks for `pretty`.
    pub fn json_console(&self) -> bool {
        !self.format.eq_ignore_ascii_case(LOG_FORMAT_PRETTY)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NodeSettings {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub unsecured_certificate: bool,
    // Seconds, unbounded when absent
    #[serde(default)]
    pub connect_timeout: Option<u64>,
    #[serde(default)]
    pub request_timeout: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub logger: Logger,
    #[serde(default)]
    pub schedule: u64,
    #[serde(default)]
    pub nodes: Vec<NodeSettings>,
}

impl Settings {
    pub fn mode() -> String {
        env::var("FETCHER_ENV").unwrap_or_else(|_| ENV_PRODUCTION.into())
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = Self::mode();
        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Builds settings from a single YAML document, without files or environment.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Yaml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults_applied() {
        let settings = Settings::from_yaml(
            r#"
logger:
  level: debug
  console: true
  directory: false
nodes:
  - name: local
    url: http://127.0.0.1:8125
"#,
        )
        .unwrap();

        assert_eq!(settings.logger.format, "json");
        assert!(settings.logger.json_console());
        assert_eq!(settings.schedule, 0);
        assert_eq!(settings.nodes.len(), 1);
        let node = &settings.nodes[0];
        assert_eq!(node.name, "local");
        assert_eq!(node.url, "http://127.0.0.1:8125");
        assert!(!node.unsecured_certificate);
        assert_eq!(node.connect_timeout, None);
        assert_eq!(node.request_timeout, None);
    }

    #[test]
    fn test_node_overrides() {
        let settings = Settings::from_yaml(
            r#"
logger:
  level: info
  format: pretty
  console: false
  directory: true
schedule: 30
nodes:
  - name: mainnet
    url: https://node.example.org
    unsecured_certificate: true
    connect_timeout: 2
    request_timeout: 10
  - name: testnet
    url: http://localhost:6876
"#,
        )
        .unwrap();

        assert_eq!(settings.logger.format, "pretty");
        assert!(!settings.logger.json_console());
        assert_eq!(settings.schedule, 30);
        assert_eq!(settings.nodes.len(), 2);
        assert!(settings.nodes[0].unsecured_certificate);
        assert_eq!(settings.nodes[0].connect_timeout, Some(2));
        assert_eq!(settings.nodes[0].request_timeout, Some(10));
        assert_eq!(settings.nodes[1].name, "testnet");
    }

    #[test]
    fn test_missing_logger_rejected() {
        let result = Settings::from_yaml("schedule: 5\n");
        assert!(result.is_err());
    }
}
