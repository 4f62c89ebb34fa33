//! Configuration module for the BCS backend.
//!
//! This module turns the process command line into a single [`Settings`]
//! value:
//! - Field declarations, types and defaults ([`schema`])
//! - Command-line parsing driven by the schema
//! - Validation and normalization of the base directory
//!
//! # Example
//!
//! ```rust,no_run
//! use bcsb::config::resolve;
//!
//! let settings = resolve(["--port", "9000", "--base_directory", "."]).unwrap();
//! assert_eq!(settings.port, 9000);
//! ```

mod error;
mod resolver;
pub mod schema;
mod settings;

pub use error::ConfigError;
pub use resolver::{build_command, parse, parse_boolean, resolve, validate};
pub use schema::{FieldDefault, FieldDescriptor, FieldKind, FIELDS};
pub use settings::{LogLevel, Settings, SettingsDraft, TlsFiles};
