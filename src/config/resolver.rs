//! Command-line settings resolution.
//!
//! Resolution runs in two steps: [`parse`] coerces the raw tokens into a
//! [`SettingsDraft`], keeping the schema default for every option not given,
//! and [`validate`] checks and normalizes the base directory. [`resolve`]
//! chains both and is what the binary calls.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

use super::error::ConfigError;
use super::schema::{FieldKind, FIELDS};
use super::settings::{LogLevel, Settings, SettingsDraft};
use crate::{NAME, PROGRAM_NAME, VERSION};

/// Parses the boolean literal accepted by `--secure`.
///
/// Only `true` and `false` are valid, case-sensitive.
///
/// # Example
///
/// ```rust
/// use bcsb::config::parse_boolean;
///
/// assert_eq!(parse_boolean("true"), Ok(true));
/// assert!(parse_boolean("yes").is_err());
/// ```
pub fn parse_boolean(value: &str) -> Result<bool, String> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format!("Expected 'true' or 'false', not {}", other)),
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel, std::convert::Infallible> {
    value.parse()
}

/// An empty path names the current directory.
fn parse_path(value: &str) -> Result<PathBuf, std::convert::Infallible> {
    Ok(if value.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(value)
    })
}

/// Builds the command-line parser from the settings schema.
///
/// Every field becomes an optional `--<name> <value>` option. Unambiguous
/// prefixes of long options are accepted. `--version` and `-v` print the
/// program name and version.
pub fn build_command() -> Command {
    let command = Command::new(PROGRAM_NAME)
        .display_name(PROGRAM_NAME)
        .bin_name(NAME)
        .version(VERSION)
        .about("Backend used by Brayns front-end BCS.")
        .disable_version_flag(true)
        .args_override_self(true)
        .infer_long_args(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Print version")
                .action(ArgAction::Version),
        );

    FIELDS.iter().fold(command, |command, field| {
        let arg = Arg::new(field.name)
            .long(field.name)
            .value_name(field.value_name)
            .help(field.help)
            .action(ArgAction::Set);

        let arg = match field.kind {
            FieldKind::Text => arg.value_parser(clap::value_parser!(String)),
            FieldKind::Integer => arg
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true),
            FieldKind::Boolean => arg.value_parser(parse_boolean),
            FieldKind::Path => arg.value_parser(parse_path),
            FieldKind::Severity => arg.value_parser(parse_log_level),
        };

        command.arg(arg)
    })
}

/// Overwrites the draft with every option present in `matches`.
fn apply_matches(settings: &mut Settings, matches: &ArgMatches) {
    if let Some(host) = matches.get_one::<String>("host") {
        settings.host = host.clone();
    }
    if let Some(port) = matches.get_one::<i64>("port") {
        settings.port = *port;
    }
    if let Some(secure) = matches.get_one::<bool>("secure") {
        settings.secure = *secure;
    }
    if let Some(certificate) = matches.get_one::<String>("certificate") {
        settings.certificate = certificate.clone();
    }
    if let Some(key) = matches.get_one::<String>("key") {
        settings.key = key.clone();
    }
    if let Some(password) = matches.get_one::<String>("password") {
        settings.password = password.clone();
    }
    if let Some(size) = matches.get_one::<i64>("max_frame_size") {
        settings.max_frame_size = *size;
    }
    if let Some(level) = matches.get_one::<LogLevel>("log_level") {
        settings.log_level = level.clone();
    }
    if let Some(directory) = matches.get_one::<PathBuf>("base_directory") {
        settings.base_directory = directory.clone();
    }
}

/// Parses command-line tokens, program name excluded, into a draft.
///
/// Options not given keep their default value. An option given several
/// times keeps the last value.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] on unknown options, missing values or
/// values that cannot be coerced. Help and version requests are reported
/// the same way; check [`ConfigError::is_informational`].
pub fn parse<I, T>(tokens: I) -> Result<SettingsDraft, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv = std::iter::once(OsString::from(NAME))
        .chain(tokens.into_iter().map(Into::into));
    let matches = build_command().try_get_matches_from(argv)?;

    let mut settings = Settings::default();
    apply_matches(&mut settings, &matches);
    Ok(SettingsDraft(settings))
}

/// Checks the base directory and rewrites it to its canonical absolute form.
///
/// No other field is inspected.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] if the base directory does not exist
/// or is not a directory.
pub fn validate(draft: SettingsDraft) -> Result<Settings, ConfigError> {
    let SettingsDraft(mut settings) = draft;

    if !settings.base_directory.is_dir() {
        return Err(ConfigError::Validation(
            "Base directory is not a directory".to_string(),
        ));
    }

    settings.base_directory =
        settings
            .base_directory
            .canonicalize()
            .map_err(|source| ConfigError::Io {
                path: settings.base_directory.clone(),
                source,
            })?;

    Ok(settings)
}

/// Resolves the final settings from command-line tokens, program name
/// excluded.
///
/// # Example
///
/// ```rust,no_run
/// use bcsb::config::resolve;
///
/// let settings = resolve(std::env::args_os().skip(1)).unwrap();
/// println!("listening on {}", settings.bind_address());
/// ```
pub fn resolve<I, T>(tokens: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    validate(parse(tokens)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn draft(tokens: &[&str]) -> Settings {
        parse(tokens.iter().copied()).unwrap().settings().clone()
    }

    fn parse_error_kind(tokens: &[&str]) -> ErrorKind {
        match parse(tokens.iter().copied()) {
            Err(ConfigError::Parse(err)) => err.kind(),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_command_is_consistent() {
        build_command().debug_assert();
    }

    #[test]
    fn test_no_arguments_gives_defaults() {
        assert_eq!(draft(&[]), Settings::default());
    }

    #[test]
    fn test_every_option_round_trips() {
        let settings = draft(&[
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--secure",
            "true",
            "--certificate",
            "cert.pem",
            "--key",
            "key.pem",
            "--password",
            "secret",
            "--max_frame_size",
            "1024",
            "--log_level",
            "DEBUG",
            "--base_directory",
            "/tmp",
        ]);

        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 9000);
        assert!(settings.secure);
        assert_eq!(settings.certificate, "cert.pem");
        assert_eq!(settings.key, "key.pem");
        assert_eq!(settings.password, "secret");
        assert_eq!(settings.max_frame_size, 1024);
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.base_directory, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_unset_fields_keep_defaults() {
        let settings = draft(&["--port", "9000"]);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.host, "0.0.0.0"); // Unchanged
        assert_eq!(settings.max_frame_size, 2_147_483_648);
    }

    #[test]
    fn test_boolean_literals() {
        assert!(draft(&["--secure", "true"]).secure);
        assert!(!draft(&["--secure", "false"]).secure);

        for invalid in ["yes", "1", "True", "FALSE"] {
            assert_eq!(
                parse_error_kind(&["--secure", invalid]),
                ErrorKind::ValueValidation
            );
        }
    }

    #[test]
    fn test_boolean_error_names_value() {
        let err = parse(["--secure", "yes"]).unwrap_err();
        assert!(err.to_string().contains("Expected 'true' or 'false', not yes"));
    }

    #[test]
    fn test_integer_options_reject_garbage() {
        assert_eq!(
            parse_error_kind(&["--port", "abc"]),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse_error_kind(&["--max_frame_size", "1.5"]),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_integer_literal_syntax() {
        assert_eq!(draft(&["--port", "+5"]).port, 5);

        for invalid in ["1_000", " 12", "9223372036854775808"] {
            assert_eq!(
                parse_error_kind(&["--max_frame_size", invalid]),
                ErrorKind::ValueValidation
            );
        }
    }

    #[test]
    fn test_integers_are_not_range_checked() {
        let settings = draft(&["--port", "-1", "--max_frame_size", "0"]);
        assert_eq!(settings.port, -1);
        assert_eq!(settings.max_frame_size, 0);
    }

    #[test]
    fn test_log_level_passthrough() {
        assert_eq!(draft(&["--log_level", "ERROR"]).log_level, LogLevel::Error);
        assert_eq!(
            draft(&["--log_level", "verbose"]).log_level,
            LogLevel::Other("verbose".to_string())
        );
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            parse_error_kind(&["--verbose"]),
            ErrorKind::UnknownArgument
        );
        assert_eq!(parse_error_kind(&["8001"]), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse_error_kind(&["--port"]),
            ErrorKind::InvalidValue
        );
    }

    #[test]
    fn test_long_option_prefixes() {
        assert_eq!(draft(&["--po", "9000"]).port, 9000);
        assert_eq!(draft(&["--max", "1024"]).max_frame_size, 1024);
        assert_eq!(
            draft(&["--base", "/tmp"]).base_directory,
            PathBuf::from("/tmp")
        );
        // --p matches both --port and --password
        assert_eq!(
            parse_error_kind(&["--p", "1"]),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn test_empty_path_is_current_directory() {
        assert_eq!(
            draft(&["--base_directory", ""]).base_directory,
            PathBuf::from(".")
        );
        assert_eq!(
            draft(&["--base_directory", "data"]).base_directory,
            PathBuf::from("data")
        );
    }

    #[test]
    fn test_last_occurrence_wins() {
        assert_eq!(draft(&["--port", "1", "--port", "2"]).port, 2);
    }

    #[test]
    fn test_version_short_circuits() {
        assert_eq!(parse_error_kind(&["--version"]), ErrorKind::DisplayVersion);
        assert_eq!(parse_error_kind(&["-v"]), ErrorKind::DisplayVersion);
        assert_eq!(
            parse_error_kind(&["-v", "--base_directory", "/does/not/exist"]),
            ErrorKind::DisplayVersion
        );

        let err = resolve(["--version"]).unwrap_err();
        assert!(err.is_informational());
        assert_eq!(
            err.to_string().trim_end(),
            format!("{} {}", PROGRAM_NAME, VERSION)
        );
    }

    #[test]
    fn test_help_lists_every_field() {
        let err = parse(["--help"]).unwrap_err();
        assert!(err.is_informational());

        let help = err.to_string();
        for field in FIELDS {
            assert!(help.contains(&format!("--{}", field.name)));
            assert!(help.contains(field.help));
        }
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(parse_boolean("true"), Ok(true));
        assert_eq!(parse_boolean("false"), Ok(false));
        assert_eq!(
            parse_boolean("yes"),
            Err("Expected 'true' or 'false', not yes".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_missing_directory() {
        let mut settings = Settings::default();
        settings.base_directory = PathBuf::from("/does/not/exist/anywhere");

        let err = validate(SettingsDraft(settings)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ref message) if message == "Base directory is not a directory"
        ));
    }

    #[test]
    fn test_validate_canonicalizes_current_directory() {
        let settings = validate(SettingsDraft::default()).unwrap();
        assert!(settings.base_directory.is_absolute());
        assert_eq!(
            settings.base_directory,
            std::env::current_dir().unwrap().canonicalize().unwrap()
        );
    }
}
