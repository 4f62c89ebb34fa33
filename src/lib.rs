//! # BCS Backend
//!
//! Startup settings resolution for the Brayns Circuit Studio backend server.
//!
//! The backend is configured from the command line only. At startup the
//! process hands its arguments to [`config::resolve`], which parses them
//! against the settings schema, fills in defaults, checks the base directory
//! and returns a [`Settings`] value. That value is then passed explicitly to
//! the server bootstrap and every other consumer; it is never mutated again.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bcsb::config::resolve;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = resolve(["--port", "8080", "--log_level", "DEBUG"])?;
//!
//!     println!("binding {}", settings.bind_address());
//!     Ok(())
//! }
//! ```
//!
//! ## Resolution
//!
//! ```text
//! argv ──parse──▶ SettingsDraft ──validate──▶ Settings
//!          │                        │
//!     ParseError              ValidationError
//! ```
//!
//! See [`config::FIELDS`] for every recognized option.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Binary name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Program name shown in help and version output
pub const PROGRAM_NAME: &str = "Brayns Circuit Studio Backend";

/// Full version string with program name
pub const FULL_VERSION: &str = concat!("Brayns Circuit Studio Backend ", env!("CARGO_PKG_VERSION"));

/// Settings schema, command-line resolution and validation.
pub mod config;

pub use config::{ConfigError, LogLevel, Settings, SettingsDraft, TlsFiles};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bcsb::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{resolve, ConfigError, LogLevel, Settings};
    pub use crate::{FULL_VERSION, NAME, PROGRAM_NAME, VERSION};
}
