//! Structured logging for Lamina services.
//!
//! Every Lamina crate logs through [`tracing`] macros. This crate installs a
//! global subscriber for binaries and demos:
//!
//! - JSON output for production, human-readable output for development
//! - Level filtering via [`tracing_subscriber::EnvFilter`] directives
//!
//! # Example
//!
//! ```rust,no_run
//! use lamina_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(addr = "127.0.0.1:8080", "starting");
//! # Ok::<(), lamina_telemetry::TelemetryError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/lamina-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
