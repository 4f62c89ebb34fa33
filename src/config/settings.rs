//! Resolved server settings.
//!
//! [`Settings`] is produced once at startup by the resolver and passed
//! explicitly to every consumer. [`SettingsDraft`] is the intermediate state
//! between parsing and validation.

use serde::{Serialize, Serializer};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use super::error::ConfigError;
use super::schema::{FieldDefault, FieldDescriptor, FIELDS};

/// Logging severity.
///
/// The five named levels are the ones advertised on the command line. Any
/// other token is kept as [`LogLevel::Other`] and only interpreted when the
/// logging subsystem is configured, see [`LogLevel::level_filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    /// Unrecognized token, passed through unchanged.
    Other(String),
}

impl LogLevel {
    /// Maps a command-line token onto a level, never failing.
    pub fn from_token(token: &str) -> Self {
        match token {
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARNING" => LogLevel::Warning,
            "ERROR" => LogLevel::Error,
            "CRITICAL" => LogLevel::Critical,
            other => LogLevel::Other(other.to_string()),
        }
    }

    /// Returns the command-line token for this level.
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Other(value) => value,
        }
    }

    /// Maps the severity onto a tracing filter.
    ///
    /// Besides the named levels, the aliases `WARN`, `FATAL` and `NOTSET`
    /// and numeric severities (10 = DEBUG ... 50 = CRITICAL) are understood.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLogLevel`] for any other value.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        match self {
            LogLevel::Debug => Ok(LevelFilter::DEBUG),
            LogLevel::Info => Ok(LevelFilter::INFO),
            LogLevel::Warning => Ok(LevelFilter::WARN),
            LogLevel::Error | LogLevel::Critical => Ok(LevelFilter::ERROR),
            LogLevel::Other(value) => match value.as_str() {
                "WARN" => Ok(LevelFilter::WARN),
                "FATAL" => Ok(LevelFilter::ERROR),
                "NOTSET" => Ok(LevelFilter::TRACE),
                other => other
                    .parse::<i64>()
                    .map(|severity| match severity {
                        i64::MIN..=0 => LevelFilter::TRACE,
                        1..=10 => LevelFilter::DEBUG,
                        11..=20 => LevelFilter::INFO,
                        21..=30 => LevelFilter::WARN,
                        _ => LevelFilter::ERROR,
                    })
                    .map_err(|_| ConfigError::UnknownLogLevel(other.to_string())),
            },
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// TLS material handed to the server when `secure` is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    /// Server certificate file.
    pub certificate: String,
    /// Server private key file.
    pub key: String,
    /// Private key password, empty if none.
    pub password: String,
}

/// Runtime settings of the backend server.
///
/// Built once by [`resolve`](super::resolve); after that it is only read.
/// A default instance needs no input at all, its `base_directory` being the
/// relative current directory until validated.
///
/// # Example
///
/// ```rust
/// use bcsb::config::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.bind_address(), "0.0.0.0:8001");
/// assert!(settings.tls().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Server allowed hosts.
    pub host: String,

    /// Server port. Any base-10 `i64` literal, not range checked.
    pub port: i64,

    /// Enable SSL.
    pub secure: bool,

    /// Server certificate file.
    pub certificate: String,

    /// Server private key file.
    pub key: String,

    /// Server private key password.
    #[serde(skip_serializing)]
    pub password: String,

    /// Websocket max frame size in bytes. Any base-10 `i64` literal, not
    /// range checked.
    pub max_frame_size: i64,

    /// Logging severity.
    pub log_level: LogLevel,

    /// Filesystem root for file operations. Absolute and canonical once
    /// validated.
    pub base_directory: PathBuf,
}

impl Default for Settings {
    /// Builds the settings from the defaults declared in [`FIELDS`].
    fn default() -> Self {
        let mut settings = Self {
            host: String::new(),
            port: 0,
            secure: false,
            certificate: String::new(),
            key: String::new(),
            password: String::new(),
            max_frame_size: 0,
            log_level: LogLevel::Other(String::new()),
            base_directory: PathBuf::new(),
        };
        for field in FIELDS {
            settings.apply_default(field);
        }
        settings
    }
}

impl Settings {
    /// Sets one field to the default its descriptor declares.
    fn apply_default(&mut self, field: &FieldDescriptor) {
        match (field.name, field.default) {
            ("host", FieldDefault::Text(host)) => self.host = host.to_string(),
            ("port", FieldDefault::Integer(port)) => self.port = port,
            ("secure", FieldDefault::Boolean(secure)) => self.secure = secure,
            ("certificate", FieldDefault::Text(path)) => self.certificate = path.to_string(),
            ("key", FieldDefault::Text(path)) => self.key = path.to_string(),
            ("password", FieldDefault::Text(password)) => self.password = password.to_string(),
            ("max_frame_size", FieldDefault::Integer(size)) => self.max_frame_size = size,
            ("log_level", FieldDefault::Severity(level)) => {
                self.log_level = LogLevel::from_token(level)
            }
            ("base_directory", FieldDefault::CurrentDirectory) => {
                self.base_directory = PathBuf::from(".")
            }
            (name, default) => {
                debug_assert!(false, "no setting {} with default {:?}", name, default)
            }
        }
    }

    /// Returns the `host:port` address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the TLS files if SSL is enabled.
    pub fn tls(&self) -> Option<TlsFiles> {
        self.secure.then(|| TlsFiles {
            certificate: self.certificate.clone(),
            key: self.key.clone(),
            password: self.password.clone(),
        })
    }
}

/// Settings after parsing, before the base directory has been checked.
///
/// Only [`validate`](super::validate) turns a draft into [`Settings`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsDraft(pub(crate) Settings);

impl SettingsDraft {
    /// Read access to the unvalidated values.
    pub fn settings(&self) -> &Settings {
        &self.0
    }
}
