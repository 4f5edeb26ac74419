//! Connector configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use cumulo_core::pipeline::ResponseEnvelope;

/// Configuration for the blob download operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectorConfig {
    /// Fixed storage connection string; leave unset when credentials are
    /// resolved from message context properties instead.
    pub connection_string: Option<String>,
    /// Envelope convention applied to every outgoing body.
    pub envelope: ResponseEnvelope,
    /// Base directory for per-invocation download spools.
    pub spool_dir: PathBuf,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            envelope: ResponseEnvelope::default(),
            spool_dir: std::env::temp_dir().join("cumulo-spool"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_family_envelope() {
        let config = ConnectorConfig::default();
        assert_eq!(config.envelope.root, "result");
        assert!(config.connection_string.is_none());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ConnectorConfig = serde_json::from_str(
            r#"{"connectionString": "AccountName=devaccount;AccountKey=ZGV2a2V5"}"#,
        )
        .unwrap();
        assert!(config.connection_string.is_some());
        assert_eq!(config.envelope, ResponseEnvelope::default());
    }
}
