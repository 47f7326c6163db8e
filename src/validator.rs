//! Single-file validation.
//!
//! Provides the [`FileCheck`] trait used by the batch scheduler and the
//! YAML implementation of it. A check never fails: read errors, parse
//! errors and duplicates all come back as a [`FileOutcome`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::detect::{Detector, Violation};
use crate::document::Document;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Result of validating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    /// File that was checked.
    pub path: PathBuf,
    /// What the check found.
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

/// Per-file verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Parsed cleanly with no duplicates.
    Success,
    /// The file could not be read or parsed.
    ParseError {
        /// Reader or parser message.
        message: String,
    },
    /// Duplicates were found; the list is never truncated.
    ValidationFailed {
        /// Every duplicate found, in document order.
        violations: Vec<Violation>,
    },
}

impl FileOutcome {
    /// Creates a passing outcome.
    #[must_use]
    pub fn success(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: OutcomeStatus::Success,
        }
    }

    /// Creates a read/parse failure outcome.
    #[must_use]
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: OutcomeStatus::ParseError {
                message: message.into(),
            },
        }
    }

    /// Creates an outcome from detection results: success when empty.
    #[must_use]
    pub fn from_violations(path: impl Into<PathBuf>, violations: Vec<Violation>) -> Self {
        let status = if violations.is_empty() {
            OutcomeStatus::Success
        } else {
            OutcomeStatus::ValidationFailed { violations }
        };
        Self {
            path: path.into(),
            status,
        }
    }

    /// Returns `true` unless the file passed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !matches!(self.status, OutcomeStatus::Success)
    }
}

/// Validates one file.
///
/// Implementations must capture every failure in the returned outcome.
#[async_trait::async_trait]
pub trait FileCheck: Send + Sync {
    /// Checks `path` and reports what was found.
    async fn check(&self, path: &Path) -> FileOutcome;
}

/// Reads a YAML file, parses every document in it and runs duplicate
/// detection on each.
#[derive(Debug, Clone)]
pub struct YamlFileValidator {
    detector: Detector,
    max_file_size: usize,
}

impl YamlFileValidator {
    /// Creates a validator using `detector` and rejecting files over
    /// `max_file_size` bytes.
    #[must_use]
    pub const fn new(detector: Detector, max_file_size: usize) -> Self {
        Self {
            detector,
            max_file_size,
        }
    }

    /// The detector applied to each parsed document.
    #[must_use]
    pub const fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Parses `bytes` and runs detection, without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns the parser message if any document in the stream is malformed.
    pub fn check_bytes(&self, bytes: &[u8]) -> Result<Vec<Violation>, String> {
        let documents = parse_documents(bytes)?;
        let multi = documents.len() > 1;

        let mut violations = Vec::new();
        for (idx, doc) in documents.iter().enumerate() {
            let found = self.detector.detect(doc);
            if multi {
                violations.extend(found.into_iter().map(|mut v| {
                    v.description = format!("document {}: {}", idx + 1, v.description);
                    v
                }));
            } else {
                violations.extend(found);
            }
        }
        Ok(violations)
    }

    async fn read_limited(&self, path: &Path) -> Result<Vec<u8>, String> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| format!("cannot read file: {e}"))?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.max_file_size {
            return Err(format!(
                "file is {file_size} bytes, larger than the {} byte limit",
                self.max_file_size
            ));
        }

        tokio::fs::read(path)
            .await
            .map_err(|e| format!("cannot read file: {e}"))
    }
}

#[async_trait::async_trait]
impl FileCheck for YamlFileValidator {
    async fn check(&self, path: &Path) -> FileOutcome {
        tracing::debug!(file = %path.display(), "validating");

        let bytes = match self.read_limited(path).await {
            Ok(bytes) => bytes,
            Err(message) => {
                tracing::debug!(file = %path.display(), %message, "read failed");
                return FileOutcome::parse_error(path, message);
            }
        };

        match self.check_bytes(&bytes) {
            Ok(violations) => {
                tracing::debug!(
                    file = %path.display(),
                    violations = violations.len(),
                    "validated"
                );
                FileOutcome::from_violations(path, violations)
            }
            Err(message) => {
                tracing::debug!(file = %path.display(), %message, "parse failed");
                FileOutcome::parse_error(path, message)
            }
        }
    }
}

/// Parses a YAML stream into one [`Document`] per `---` separated document.
///
/// A leading UTF-8 BOM is skipped. An empty stream yields no documents.
///
/// # Errors
///
/// Returns the parser message, including its line and column when known.
pub fn parse_documents(bytes: &[u8]) -> Result<Vec<Document>, String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    serde_yaml::Deserializer::from_slice(bytes)
        .map(|de| {
            serde_yaml::Value::deserialize(de)
                .map(Document::from)
                .map_err(|e| e.to_string())
        })
        .collect()
}
