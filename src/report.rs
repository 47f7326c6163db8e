//! Result aggregation and rendering.
//!
//! The full batch is summarized in one step after every task has joined;
//! outcomes are sorted by path so output does not depend on completion
//! order.

use serde::Serialize;

use crate::batch::BatchResult;
use crate::error::{DiscoveryError, ExitCode};
use crate::validator::{FileOutcome, OutcomeStatus};

/// Pass/fail tallies for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Files with an outcome.
    pub total: usize,
    /// Files that failed parsing or validation.
    pub failed: usize,
    /// Files that passed.
    pub passed: usize,
    /// The run was cancelled before every file was checked.
    pub interrupted: bool,
}

impl Summary {
    /// Tallies a batch result.
    #[must_use]
    pub const fn of(result: &BatchResult) -> Self {
        Self {
            total: result.total,
            failed: result.failed,
            passed: result.passed(),
            interrupted: result.interrupted,
        }
    }

    /// Exit code for this run: failure if any file failed or the run was
    /// cut short.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.failed > 0 || self.interrupted {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files checked, {} failed, {} passed",
            self.total, self.failed, self.passed
        )?;
        if self.interrupted {
            write!(f, " (interrupted)")?;
        }
        Ok(())
    }
}

/// Rendered human-readable report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Process exit code for the run.
    pub exit_code: i32,
    /// Tallies behind the exit code.
    pub summary: Summary,
    /// Output lines, ending with the summary line.
    pub lines: Vec<String>,
}

/// Summarizes a batch into display lines and an exit code.
///
/// Failing files are always listed with every violation or the parse
/// message; passing files only when `show_passed` is set.
#[must_use]
pub fn summarize(result: &BatchResult, show_passed: bool) -> Report {
    let summary = Summary::of(result);
    let mut lines = Vec::new();

    for outcome in sorted(&result.outcomes) {
        match &outcome.status {
            OutcomeStatus::Success => {
                if show_passed {
                    lines.push(format!("PASS {}", outcome.path.display()));
                }
            }
            OutcomeStatus::ParseError { message } => {
                lines.push(format!("FAIL {}", outcome.path.display()));
                lines.push(format!("  parse error: {message}"));
            }
            OutcomeStatus::ValidationFailed { violations } => {
                lines.push(format!("FAIL {}", outcome.path.display()));
                lines.extend(violations.iter().map(|v| format!("  {v}")));
            }
        }
    }

    lines.push(summary.to_string());

    Report {
        exit_code: summary.exit_code(),
        summary,
        lines,
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<&'a FileOutcome>,
    skipped: Vec<JsonSkipped>,
    summary: Summary,
}

#[derive(Serialize)]
struct JsonSkipped {
    path: String,
    error: String,
}

/// Renders the batch and discovery errors as a single JSON document.
///
/// Every file is included, passing or not.
///
/// # Errors
///
/// Returns an error if serialization fails (a path that is not valid
/// UTF-8, for example).
pub fn render_json(
    result: &BatchResult,
    skipped: &[DiscoveryError],
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        files: sorted(&result.outcomes),
        skipped: skipped
            .iter()
            .map(|e| JsonSkipped {
                path: e.path().display().to_string(),
                error: e.to_string(),
            })
            .collect(),
        summary: Summary::of(result),
    };
    serde_json::to_string_pretty(&report)
}

fn sorted(outcomes: &[FileOutcome]) -> Vec<&FileOutcome> {
    let mut sorted: Vec<_> = outcomes.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::detect::Violation;

    fn violation(field: &str, description: &str) -> Violation {
        Violation {
            field: field.to_string(),
            index: 1,
            first_index: 0,
            description: description.to_string(),
        }
    }

    fn mixed_batch() -> BatchResult {
        BatchResult::from_outcomes(
            vec![
                FileOutcome::from_violations("c.yaml", vec![violation("items", "dup one")]),
                FileOutcome::success("a.yaml"),
                FileOutcome::parse_error("b.yaml", "did not find expected key"),
            ],
            false,
        )
    }

    #[test]
    fn failures_are_listed_in_path_order() {
        let report = summarize(&mixed_batch(), false);
        assert_eq!(
            report.lines,
            vec![
                "FAIL b.yaml",
                "  parse error: did not find expected key",
                "FAIL c.yaml",
                "  items: dup one",
                "3 files checked, 2 failed, 1 passed",
            ]
        );
        assert_eq!(report.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn show_passed_adds_success_lines() {
        let report = summarize(&mixed_batch(), true);
        assert_eq!(report.lines[0], "PASS a.yaml");
    }

    #[test]
    fn all_passing_exits_zero() {
        let result = BatchResult::from_outcomes(vec![FileOutcome::success("a.yaml")], false);
        let report = summarize(&result, false);
        assert_eq!(report.exit_code, ExitCode::SUCCESS);
        assert_eq!(report.lines, vec!["1 files checked, 0 failed, 1 passed"]);
    }

    #[test]
    fn every_violation_is_listed() {
        let violations = (0..5)
            .map(|i| violation("tags", &format!("dup {i}")))
            .collect();
        let result =
            BatchResult::from_outcomes(vec![FileOutcome::from_violations("x.yaml", violations)], false);
        let report = summarize(&result, false);
        assert_eq!(report.lines.iter().filter(|l| l.starts_with("  tags:")).count(), 5);
    }

    #[test]
    fn interrupted_run_fails() {
        let result = BatchResult::from_outcomes(vec![FileOutcome::success("a.yaml")], true);
        let report = summarize(&result, false);
        assert_eq!(report.exit_code, ExitCode::FAILURE);
        assert!(report.lines.last().unwrap().ends_with("(interrupted)"));
    }

    #[test]
    fn json_report_has_files_skipped_and_summary() {
        let skipped = vec![DiscoveryError::NotFound {
            path: PathBuf::from("gone"),
        }];
        let json = render_json(&mixed_batch(), &skipped).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["files"].as_array().unwrap().len(), 3);
        assert_eq!(parsed["files"][0]["path"], "a.yaml");
        assert_eq!(parsed["files"][0]["status"], "success");
        assert_eq!(parsed["files"][2]["status"], "validation_failed");
        assert_eq!(parsed["files"][2]["violations"][0]["field"], "items");
        assert_eq!(parsed["skipped"][0]["path"], "gone");
        assert_eq!(parsed["summary"]["total"], 3);
        assert_eq!(parsed["summary"]["failed"], 2);
        assert_eq!(parsed["summary"]["passed"], 1);
    }
}
