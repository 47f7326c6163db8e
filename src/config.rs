//! Run configuration
//!
//! Defaults are read from `DUPGUARD_*` environment variables when set;
//! command-line options override them.

use crate::detect::DEFAULT_SPECIAL_FIELD;

/// Default number of validations in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Default maximum size of a single input file (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// File extensions picked up when expanding directories.
pub const DEFAULT_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Settings for one checking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Field checked with the layout/recordType rule.
    pub special_field: String,

    /// Extensions (without the leading dot) matched inside directories.
    pub extensions: Vec<String>,

    /// Maximum number of concurrent file validations.
    pub concurrency: usize,

    /// Files larger than this many bytes are rejected unread.
    pub max_file_size: usize,

    /// Print a line for every passing file.
    pub show_passed: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            special_field: std::env::var("DUPGUARD_SPECIAL_FIELD")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SPECIAL_FIELD.to_string()),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            concurrency: env_or("DUPGUARD_CONCURRENCY", DEFAULT_CONCURRENCY).max(1),
            max_file_size: env_or("DUPGUARD_MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE),
            show_passed: false,
        }
    }
}

/// Reads and parses an environment variable, falling back to `default`
/// when it is unset or malformed.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
