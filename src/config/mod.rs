//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! RelayConfig::default() (built-in baseline)
//!     → loader.rs reads the file (YAML, or TOML by extension)
//!     → serde overlays present keys onto the baseline
//!     → RelayConfig (immutable)
//!     → shared via Arc with the proxy core
//! ```
//!
//! # Design Decisions
//! - Every field has a default, so the relay starts with no config at all
//! - Overlay is per field; a partial `stats` block keeps its other defaults
//! - No semantic validation: values pass through to the proxy core as-is
//! - Read failures and parse failures are distinct error variants

pub mod loader;
pub mod schema;

pub use loader::{
    default_config, load_config, print_default_config, render_default_config, ConfigError,
    ConfigFormat, ParseError,
};
pub use schema::{RelayConfig, StatsConfig};
