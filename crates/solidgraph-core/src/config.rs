//! Configuration for the Dgraph connection.
//!
//! Loaded from (in priority order):
//! 1. Environment variables (SOLIDGRAPH_ prefix)
//! 2. Defaults (localhost:9080, built-in schema)

use serde::{Deserialize, Serialize};

use crate::error::{AccessorError, Result};

/// Connection settings for the Dgraph alpha this accessor talks to.
///
/// `schema` overrides the accessor's built-in schema when set; `None`
/// means "apply the default schema on first use".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DgraphConfig {
    pub connection_uri: String,
    pub grpc_port: u16,
    pub schema: Option<String>,
}

impl Default for DgraphConfig {
    fn default() -> Self {
        Self {
            connection_uri: "localhost".to_string(),
            grpc_port: 9080,
            schema: None,
        }
    }
}

impl DgraphConfig {
    /// The gRPC endpoint URI for the configured alpha.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.connection_uri, self.grpc_port)
    }

    /// Load configuration from `SOLIDGRAPH_*` environment variables on
    /// top of the defaults.
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("connection_uri", "localhost")
            .map_err(|e| AccessorError::Config(e.to_string()))?
            .set_default("grpc_port", 9080_i64)
            .map_err(|e| AccessorError::Config(e.to_string()))?
            .add_source(config::Environment::with_prefix("SOLIDGRAPH"))
            .build()
            .map_err(|e| AccessorError::Config(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| AccessorError::Config(e.to_string()))?;
        tracing::debug!(
            uri = %config.connection_uri,
            port = config.grpc_port,
            custom_schema = config.schema.is_some(),
            "Loaded Dgraph configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DgraphConfig::default();
        assert_eq!(config.connection_uri, "localhost");
        assert_eq!(config.grpc_port, 9080);
        assert!(config.schema.is_none());
        assert_eq!(config.endpoint(), "http://localhost:9080");
    }

    #[test]
    fn from_env_falls_back_to_defaults() {
        let config = DgraphConfig::from_env().unwrap();
        assert_eq!(config.connection_uri, "localhost");
        assert_eq!(config.grpc_port, 9080);
    }
}
