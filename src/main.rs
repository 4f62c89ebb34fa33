//! BCS Backend - Main Entry Point
//!
//! Resolves the server settings from the command line, sets up logging and
//! prints the configuration the server bootstrap will run with.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bcsb::{
    config::{resolve, ConfigError},
    LogLevel, Settings, FULL_VERSION,
};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
}

/// Print the startup banner with version
fn print_banner() {
    println!(
        "\n{cyan}{bold}  {name}{reset}\n{dim}  Backend used by Brayns front-end BCS{reset}\n",
        cyan = colors::CYAN,
        bold = colors::BOLD,
        reset = colors::RESET,
        dim = colors::DIM,
        name = FULL_VERSION
    );
}

/// Print configuration summary
fn print_config_summary(settings: &Settings) {
    println!(
        "{bold}{blue}Configuration:{reset}",
        bold = colors::BOLD,
        blue = colors::BLUE,
        reset = colors::RESET
    );
    println!(
        "  {dim}Address:{reset}        {}",
        settings.bind_address(),
        dim = colors::DIM,
        reset = colors::RESET
    );
    println!(
        "  {dim}SSL:{reset}            {}",
        match settings.tls() {
            Some(tls) => format!(
                "{green}enabled{reset} (certificate: {}, key: {})",
                tls.certificate,
                tls.key,
                green = colors::GREEN,
                reset = colors::RESET
            ),
            None => format!("{yellow}disabled{reset}", yellow = colors::YELLOW, reset = colors::RESET),
        },
        dim = colors::DIM,
        reset = colors::RESET
    );
    println!(
        "  {dim}Max Frame Size:{reset} {} bytes",
        settings.max_frame_size,
        dim = colors::DIM,
        reset = colors::RESET
    );
    println!(
        "  {dim}Log Level:{reset}      {}",
        settings.log_level,
        dim = colors::DIM,
        reset = colors::RESET
    );
    println!(
        "  {dim}Base Directory:{reset} {}",
        settings.base_directory.display(),
        dim = colors::DIM,
        reset = colors::RESET
    );
    println!();
}

/// Initialize the tracing/logging subsystem from the resolved severity
fn init_tracing(log_level: &LogLevel) -> Result<()> {
    let level = log_level
        .level_filter()
        .context("Failed to configure logging")?;

    let filter = EnvFilter::default().add_directive(level.into());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    // Help, version and usage errors follow the parser's exit conventions
    let settings = match resolve(std::env::args_os().skip(1)) {
        Ok(settings) => settings,
        Err(ConfigError::Parse(err)) => err.exit(),
        Err(err) => return Err(err).context("Failed to resolve settings"),
    };

    init_tracing(&settings.log_level)?;

    print_banner();
    print_config_summary(&settings);

    match serde_json::to_string(&settings) {
        Ok(snapshot) => debug!(%snapshot, "Resolved settings"),
        Err(e) => warn!("Failed to serialize settings: {}", e),
    }

    if settings.secure && (settings.certificate.is_empty() || settings.key.is_empty()) {
        warn!("SSL is enabled but the certificate or key file is not set");
    }

    info!(
        address = %settings.bind_address(),
        base_directory = %settings.base_directory.display(),
        "Settings resolved, handing over to server bootstrap"
    );

    Ok(())
}
