//! Diagnostic logging for `dupguard`.
//!
//! The duplicate report is the program's output and goes to stdout, where
//! CI jobs capture or pipe it. Everything emitted through `tracing` is a
//! diagnostic and is written to stderr so it never mixes into a JSON
//! report. By default only warnings show; `-v` raises the level and
//! `DUPGUARD_LOG_LEVEL` takes a full filter directive such as
//! `dupguard::batch=debug`.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding an explicit filter directive.
pub const LOG_LEVEL_ENV: &str = "DUPGUARD_LOG_LEVEL";

/// Rendering of diagnostic lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Plain text, colored when stderr is a terminal.
    #[default]
    Human,
    /// One JSON object per line, for log collectors.
    Json,
}

/// Filter directive for a `-v` count (saturates at `trace`).
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Whether diagnostic lines on stderr should carry ANSI colors.
///
/// `auto` honors `NO_COLOR` and only colors a terminal.
fn stderr_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    }
}

/// Installs the global subscriber writing diagnostics to stderr.
///
/// A directive in `DUPGUARD_LOG_LEVEL` wins over `verbosity`. Module
/// targets are shown from `-vv` up. A second call leaves the first
/// subscriber in place.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human => builder.with_ansi(stderr_ansi(color)).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_is_the_default_format() {
        assert_eq!(LogFormat::default(), LogFormat::Human);
    }

    #[test]
    fn repeated_init_is_ignored() {
        init_logging(LogFormat::Human, 0, ColorChoice::Auto);
        init_logging(LogFormat::Json, 3, ColorChoice::Never);
    }

    #[test]
    fn explicit_color_choice_wins() {
        assert!(stderr_ansi(ColorChoice::Always));
        assert!(!stderr_ansi(ColorChoice::Never));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(3), "trace");
        assert_eq!(verbosity_to_directive(u8::MAX), "trace");
    }
}
