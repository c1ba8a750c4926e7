//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build logger → Log summary → Hand off to proxy core
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Resolve shutdown future
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is retried
//! - Config first, logger second (the logger is configured by the config)

pub mod signals;
pub mod startup;

pub use startup::{bootstrap, Runtime, StartupError};
