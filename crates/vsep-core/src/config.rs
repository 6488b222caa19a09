//! Engine configuration loaded from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{InhibitPolicy, OperatingEnvelope};

/// Everything an [`Engine`](crate::app::Engine) can be configured with.
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub envelope: OperatingEnvelope,
    pub inhibit_policy: InhibitPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default_config() {
        let cfg = EngineConfig::from_json_str("{}").expect("parse");
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.inhibit_policy, InhibitPolicy::Degrade);
    }

    #[test]
    fn policy_and_partial_envelope_are_read() {
        let json = r#"
        {
          "inhibit_policy": "issue_and_report",
          "envelope": { "activation_separation": 650 }
        }"#;
        let cfg = EngineConfig::from_json_str(json).expect("parse");
        assert_eq!(cfg.inhibit_policy, InhibitPolicy::IssueAndReport);
        assert_eq!(cfg.envelope.activation_separation, 650);
        assert_eq!(cfg.envelope.inhibit_separation, 700);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{ inhibit_policy: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::from_path("/definitely/not/here/vsep.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here/vsep.json"));
    }
}
