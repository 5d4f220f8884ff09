//! CLI configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a payrun invocation.
///
/// Can be loaded from a TOML file (file values are the base, CLI flags and
/// env vars override them) or built programmatically for tests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the signing node.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// Sender account address. Required before any network activity.
    #[serde(default)]
    pub sender: Option<String>,

    /// Denomination every transfer is paid in.
    #[serde(default = "default_denom")]
    pub denom: String,

    /// Data directory for the settlement log and failure store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum recipients per batch transaction.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Retries per batch after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Seconds between attempts on the same batch.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            sender: None,
            denom: default_denom(),
            data_dir: default_data_dir(),
            batch_size: default_batch_size(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_node_url() -> String {
    "http://127.0.0.1:1317".to_string()
}

fn default_denom() -> String {
    "utoken".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./payrun_data")
}

fn default_batch_size() -> usize {
    400
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: Config = toml::from_str("sender = \"cosmos1abc\"").unwrap();
        assert_eq!(config.sender.as_deref(), Some("cosmos1abc"));
        assert_eq!(config.batch_size, 400);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.node_url, "http://127.0.0.1:1317");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            node_url = "http://node:26657"
            denom = "uatom"
            batch_size = 120
            retry_delay_secs = 9
            "#,
        )
        .unwrap();
        assert_eq!(config.node_url, "http://node:26657");
        assert_eq!(config.denom, "uatom");
        assert_eq!(config.batch_size, 120);
        assert_eq!(config.retry_delay_secs, 9);
    }
}
