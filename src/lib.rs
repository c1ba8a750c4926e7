//! statsd high-availability relay: configuration and logging bootstrap.
//!
//! The proxy core consumes the [`RelayConfig`] and [`Logger`] produced here.

pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::schema::RelayConfig;
pub use lifecycle::Runtime;
pub use observability::Logger;
