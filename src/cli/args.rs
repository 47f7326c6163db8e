//! CLI argument definitions
//!
//! Clap derive structs for `dupguard` command-line parsing.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::CheckConfig;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Detect duplicate entries in YAML configuration arrays.
#[derive(Parser, Debug)]
#[command(name = "dupguard", author, version, about)]
pub struct Cli {
    /// Files or directories to check. Directories are searched recursively.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Also print a line for every passing file.
    #[arg(short = 'p', long)]
    pub show_passed: bool,

    /// Report format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Field checked with the layout/recordType rule [default: layoutAssignments].
    #[arg(long, value_name = "NAME", env = "DUPGUARD_SPECIAL_FIELD")]
    pub special_field: Option<String>,

    /// Maximum number of files validated concurrently [default: 50].
    #[arg(short = 'j', long, value_name = "N", env = "DUPGUARD_CONCURRENCY")]
    pub concurrency: Option<NonZeroUsize>,

    /// File extension to match inside directories (repeatable) [default: yaml, yml].
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", env = "DUPGUARD_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Builds the run configuration: [`CheckConfig`] defaults overridden by
    /// any options given on the command line or through their `DUPGUARD_*`
    /// variables.
    #[must_use]
    pub fn check_config(&self) -> CheckConfig {
        let mut config = CheckConfig::default();

        if let Some(field) = &self.special_field {
            config.special_field.clone_from(field);
        }
        if let Some(n) = self.concurrency {
            config.concurrency = n.get();
        }
        if !self.extensions.is_empty() {
            config.extensions.clone_from(&self.extensions);
        }
        config.show_passed = self.show_passed;
        config
    }
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// A single JSON document.
    Json,
}

// ============================================================================
// Tests
// ============================================================================
