//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use cafs_http::{StoreConfig, StoreProtocol};
use cafs_numeric::{ResponseShape, RoleTable};

#[derive(Debug, Clone, Parser)]
#[command(name = "cafs-numeric-server")]
#[command(about = "Numeric operations over resources in a content-addressable store")]
pub struct Config {
    /// Address to bind the server to
    #[arg(long, env = "BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the CAFS service, e.g. http://localhost:9000/api/cafs
    #[arg(long, env = "CAFS_BASE_URL")]
    pub cafs_base_url: String,

    /// Body shape of store requests: meta or resource
    #[arg(long, env = "CAFS_STORE_PROTOCOL", default_value_t = StoreProtocol::Meta)]
    pub store_protocol: StoreProtocol,

    /// Timeout for every store call, in seconds
    #[arg(long, env = "CAFS_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Response body shape: outputs or output-map
    #[arg(long, env = "RESPONSE_SHAPE", default_value_t = ResponseShape::Outputs)]
    pub response_shape: ResponseShape,

    /// JSON file overriding request keys per operation argument
    #[arg(long, env = "ROLE_TABLE")]
    pub role_table: Option<PathBuf>,
}

impl Config {
    pub fn store_config(&self) -> anyhow::Result<StoreConfig> {
        let config = StoreConfig::new(&self.cafs_base_url)
            .with_context(|| format!("invalid CAFS base URL '{}'", self.cafs_base_url))?
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_protocol(self.store_protocol);
        Ok(config)
    }

    /// The default role table, with overrides from `--role-table` applied.
    pub fn load_role_table(&self) -> anyhow::Result<RoleTable> {
        let Some(path) = &self.role_table else {
            return Ok(RoleTable::default());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read role table {}", path.display()))?;
        let table = RoleTable::default()
            .with_overrides_json(&json)
            .with_context(|| format!("failed to load role table {}", path.display()))?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafs_numeric::Operation;
    use std::io::Write;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["cafs-numeric-server"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&["--cafs-base-url", "http://localhost:9000/api/cafs"]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.store_protocol, StoreProtocol::Meta);
        assert_eq!(config.response_shape, ResponseShape::Outputs);

        let store = config.store_config().unwrap();
        assert_eq!(store.timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_flags() {
        let config = parse(&[
            "--cafs-base-url",
            "http://cafs:9000",
            "--store-protocol",
            "resource",
            "--response-shape",
            "output-map",
            "--request-timeout-secs",
            "5",
        ]);
        assert_eq!(config.store_protocol, StoreProtocol::Resource);
        assert_eq!(config.response_shape, ResponseShape::OutputMap);
        assert_eq!(
            config.store_config().unwrap().timeout,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        assert!(Config::try_parse_from([
            "cafs-numeric-server",
            "--cafs-base-url",
            "http://cafs:9000",
            "--store-protocol",
            "ftp",
        ])
        .is_err());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = parse(&["--cafs-base-url", "not a url"]);
        assert!(config.store_config().is_err());
    }

    #[test]
    fn role_table_file_overrides_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "add": {{ "sum": "RER-0LD9l1uRbrdQLkxGFc6k" }} }}"#).unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = parse(&["--cafs-base-url", "http://cafs:9000", "--role-table", &path]);

        let roles = config.load_role_table().unwrap();
        assert_eq!(roles.key(Operation::Add, "sum"), "RER-0LD9l1uRbrdQLkxGFc6k");
        assert_eq!(roles.key(Operation::Add, "addendOne"), "AddendOne");
    }

    #[test]
    fn missing_role_table_file_is_an_error() {
        let config = parse(&[
            "--cafs-base-url",
            "http://cafs:9000",
            "--role-table",
            "/nonexistent/roles.json",
        ]);
        assert!(config.load_role_table().is_err());
    }
}
