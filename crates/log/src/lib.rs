//! # sift-log
//!
//! Subscriber setup for binaries and tests embedding the sift crates. The
//! library crates only emit `tracing` events; this crate decides where
//! they go.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> sift_log::LogResult<()> {
//!     // SIFT_LOG=sift_validator=trace SIFT_LOG_FORMAT=json
//!     let _guard = sift_log::init()?;
//!
//!     sift_log::info!("ready");
//!     Ok(())
//! }
//! ```

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Initialize from `SIFT_LOG` / `RUST_LOG` / `SIFT_LOG_FORMAT`
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::from_env())
}

/// Initialize with custom configuration
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
