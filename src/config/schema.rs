//! Declaration of every recognized setting.
//!
//! The schema is plain data: names, kinds, defaults and help texts. The
//! resolver builds its command-line parser from [`FIELDS`], and
//! [`Settings::default`](super::Settings) is built from the defaults declared
//! here.

/// Semantic type of a setting, selecting how its command-line value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form string, kept verbatim.
    Text,
    /// Base-10 signed integer.
    Integer,
    /// Exactly `true` or `false`.
    Boolean,
    /// Filesystem path, not checked at parse time.
    Path,
    /// Logging severity name, or an opaque value for the logging subsystem.
    Severity,
}

/// Default value of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Text(&'static str),
    Integer(i64),
    Boolean(bool),
    /// Severity token, as accepted on the command line.
    Severity(&'static str),
    /// The working directory of the process.
    CurrentDirectory,
}

/// Description of one recognized setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, also the long option name (`--<name>`).
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
    /// Help text shown in `--help`.
    pub help: &'static str,
    /// Placeholder for the option value in usage output.
    pub value_name: &'static str,
}

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: i64 = 8001;
pub const DEFAULT_MAX_FRAME_SIZE: i64 = 1 << 31;
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Every recognized setting, in declaration order.
pub const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: "host",
        kind: FieldKind::Text,
        default: FieldDefault::Text(DEFAULT_HOST),
        help: "Server allowed hosts",
        value_name: "HOST",
    },
    FieldDescriptor {
        name: "port",
        kind: FieldKind::Integer,
        default: FieldDefault::Integer(DEFAULT_PORT),
        help: "Server port",
        value_name: "PORT",
    },
    FieldDescriptor {
        name: "secure",
        kind: FieldKind::Boolean,
        default: FieldDefault::Boolean(false),
        help: "Enable SSL if true",
        value_name: "true|false",
    },
    FieldDescriptor {
        name: "certificate",
        kind: FieldKind::Text,
        default: FieldDefault::Text(""),
        help: "Server certificate file",
        value_name: "FILE",
    },
    FieldDescriptor {
        name: "key",
        kind: FieldKind::Text,
        default: FieldDefault::Text(""),
        help: "Server private key file",
        value_name: "FILE",
    },
    FieldDescriptor {
        name: "password",
        kind: FieldKind::Text,
        default: FieldDefault::Text(""),
        help: "Server private key password",
        value_name: "PASSWORD",
    },
    FieldDescriptor {
        name: "max_frame_size",
        kind: FieldKind::Integer,
        default: FieldDefault::Integer(DEFAULT_MAX_FRAME_SIZE),
        help: "Websocket max frame size",
        value_name: "BYTES",
    },
    FieldDescriptor {
        name: "log_level",
        kind: FieldKind::Severity,
        default: FieldDefault::Severity(DEFAULT_LOG_LEVEL),
        help: "[DEBUG, INFO, WARNING, ERROR, CRITICAL]",
        value_name: "LEVEL",
    },
    FieldDescriptor {
        name: "base_directory",
        kind: FieldKind::Path,
        default: FieldDefault::CurrentDirectory,
        help: "Filesystem base directory",
        value_name: "PATH",
    },
];
