//! Run pipeline
//!
//! Discovers input files, validates them in a bounded batch and writes the
//! report to stdout.

use std::io::Write as _;

use tokio_util::sync::CancellationToken;

use crate::batch::BatchScheduler;
use crate::cli::args::{Cli, OutputFormat};
use crate::detect::Detector;
use crate::discovery::discover;
use crate::error::{DupGuardError, Result};
use crate::report::{self, Summary};
use crate::validator::YamlFileValidator;

/// Checks every file the CLI paths resolve to and prints the report.
///
/// Returns the run summary; the caller maps it to an exit code. Per-file
/// failures are part of the summary, not errors.
///
/// # Errors
///
/// Returns [`DupGuardError::EmptyInput`] if no candidate file was found,
/// or an I/O error if the report cannot be written.
pub async fn run(cli: &Cli, cancel: CancellationToken) -> Result<Summary> {
    let config = cli.check_config();
    tracing::debug!(?config, "resolved configuration");

    let paths = cli.paths.clone();
    let extensions = config.extensions.clone();
    let discovered = tokio::task::spawn_blocking(move || discover(&paths, &extensions))
        .await
        .map_err(|e| DupGuardError::Io(std::io::Error::other(e)))?;

    if cli.format == OutputFormat::Human {
        for err in &discovered.errors {
            eprintln!("skipped: {err}");
        }
    }

    if discovered.is_empty() {
        return Err(DupGuardError::EmptyInput {
            errors: discovered.errors,
        });
    }

    let validator = YamlFileValidator::new(
        Detector::new(config.special_field.as_str()),
        config.max_file_size,
    );
    let scheduler = BatchScheduler::new(validator, config.concurrency);
    let result = scheduler.run(discovered.files, &cancel).await;

    let mut stdout = std::io::stdout().lock();
    let summary = match cli.format {
        OutputFormat::Human => {
            let report = report::summarize(&result, config.show_passed);
            for line in &report.lines {
                writeln!(stdout, "{line}")?;
            }
            report.summary
        }
        OutputFormat::Json => {
            writeln!(stdout, "{}", report::render_json(&result, &discovered.errors)?)?;
            Summary::of(&result)
        }
    };
    stdout.flush()?;

    Ok(summary)
}
