//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     log_file + log_level (from RelayConfig)
//!     → logging.rs resolves level, opens destination
//!     → Logger (tracing Dispatch with format.rs line layout)
//!
//! Runtime:
//!     components call Logger::{debug,info,...} or plain tracing macros
//!     inside Logger::in_scope
//!     → one line per event on stdout or the log file
//! ```
//!
//! # Design Decisions
//! - Six-step severity scale (level.rs) layered on tracing's five levels
//! - Unknown level names fall back to debug instead of failing startup
//! - Fixed tab-separated line format for log scrapers

pub mod format;
pub mod level;
pub mod logging;

pub use level::{Severity, UnknownSeverity};
pub use logging::{new_logger, LogDestination, LogError, Logger};
