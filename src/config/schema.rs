//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.
//! Both structs carry `#[serde(default)]`, so any key missing from a
//! document keeps the value from the `Default` impl; a key set to null takes
//! the zero value of its type (`stats: null` alone means "no stats block").

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration for the statsd relay.
///
/// Millisecond fields are kept as signed integers and passed through to the
/// proxy core untouched; no range checks happen here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// `"stdout"` or a filesystem path.
    #[serde(deserialize_with = "null_as_default")]
    pub log_file: String,

    /// Minimum log severity name (debug, info, notice, warning, error, critical).
    #[serde(deserialize_with = "null_as_default")]
    pub log_level: String,

    /// Bind address for the inbound UDP listener (e.g., ":8125").
    #[serde(deserialize_with = "null_as_default")]
    pub listen: String,

    /// Downstream statsd servers, in selection order.
    #[serde(rename = "servers", deserialize_with = "null_as_default")]
    pub backends: Vec<String>,

    /// Per-operation timeout in milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub timeout: i64,

    /// Delay between backend reconnection attempts in milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub reconnect_interval: i64,

    /// Maximum number of entries in the upstream cache.
    #[serde(deserialize_with = "null_as_default")]
    pub cache_size: i64,

    /// Latency threshold for switching upstreams in milliseconds.
    #[serde(rename = "switch_upstream_latency", deserialize_with = "null_as_default")]
    pub switch_latency: i64,

    /// Self-telemetry settings. `None` when the document sets `stats: null`.
    pub stats: Option<StatsConfig>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            log_file: "stdout".to_string(),
            log_level: "debug".to_string(),
            listen: ":8125".to_string(),
            backends: vec![
                "statsite1:8125".to_string(),
                "statsite2:8125".to_string(),
            ],
            timeout: 1000,
            reconnect_interval: 10_000,
            cache_size: 1_000_000,
            switch_latency: 10_000,
            stats: Some(StatsConfig::default()),
        }
    }
}

impl RelayConfig {
    pub fn timeout_duration(&self) -> Duration {
        millis(self.timeout)
    }

    pub fn reconnect_interval_duration(&self) -> Duration {
        millis(self.reconnect_interval)
    }

    pub fn switch_latency_duration(&self) -> Duration {
        millis(self.switch_latency)
    }

    /// True when a stats block is present and enabled.
    pub fn stats_enabled(&self) -> bool {
        self.stats.as_ref().is_some_and(|s| s.enabled)
    }
}

/// Reads an explicit YAML null (`key: ~`) as the field type's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// Negative values clamp to zero.
fn millis(value: i64) -> Duration {
    Duration::from_millis(u64::try_from(value).unwrap_or(0))
}

/// Self-telemetry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Emit relay metrics to Graphite.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,

    /// Graphite address (e.g., "localhost:2003").
    #[serde(deserialize_with = "null_as_default")]
    pub graphite_uri: String,

    /// Prefix for emitted metric names.
    #[serde(deserialize_with = "null_as_default")]
    pub graphite_prefix: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            graphite_uri: "localhost:2003".to_string(),
            graphite_prefix: "DevOps".to_string(),
        }
    }
}
