//! Input discovery
//!
//! Expands command-line paths into the flat list of files to check.
//! Directories are searched recursively for the configured extensions;
//! regular files are taken as given whatever their extension. A path that
//! does not exist or cannot be inspected is recorded and skipped; the
//! caller reports it, so it is only logged at debug level here.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::error::DiscoveryError;

/// Files found and per-path errors recorded by [`discover`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Discovered {
    /// Candidate files, deduplicated, in discovery order.
    pub files: Vec<PathBuf>,
    /// One entry per input path that could not be used.
    pub errors: Vec<DiscoveryError>,
}

impl Discovered {
    /// Returns `true` if no candidate file was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Expands `paths` into candidate files.
///
/// `extensions` are matched without their leading dot (`yaml`, `yml`).
/// Errors for individual paths are collected; they never stop the
/// remaining paths from being expanded.
#[must_use]
pub fn discover(paths: &[PathBuf], extensions: &[String]) -> Discovered {
    let mut files = IndexSet::new();
    let mut errors = Vec::new();

    for path in paths {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => match expand_dir(path, extensions) {
                Ok(found) => {
                    tracing::debug!(dir = %path.display(), files = found.len(), "expanded directory");
                    files.extend(found);
                }
                Err(err) => {
                    tracing::debug!(error = %err, "skipping input path");
                    errors.push(err);
                }
            },
            Ok(_) => {
                files.insert(path.clone());
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping input path");
                errors.push(metadata_error(path, &e));
            }
        }
    }

    tracing::info!(
        files = files.len(),
        skipped = errors.len(),
        "discovery complete"
    );

    Discovered {
        files: files.into_iter().collect(),
        errors,
    }
}

fn metadata_error(path: &Path, err: &std::io::Error) -> DiscoveryError {
    if err.kind() == std::io::ErrorKind::NotFound {
        DiscoveryError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        DiscoveryError::Inaccessible {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Recursively lists files under `dir` whose extension is in `extensions`.
fn expand_dir(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy()));
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut found = Vec::new();
    for ext in extensions {
        let ext = glob::Pattern::escape(ext.trim_start_matches('.'));
        let pattern = root.join("**").join(format!("*.{ext}"));

        let entries = glob::glob_with(&pattern.to_string_lossy(), options).map_err(|e| {
            DiscoveryError::Expand {
                path: dir.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => found.push(path),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %e.path().display(), error = %e.error(), "skipping unreadable entry");
                }
            }
        }
    }

    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_extensions() -> Vec<String> {
        vec!["yaml".to_string(), "yml".to_string()]
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "a: 1\n").unwrap();
    }

    #[test]
    fn nested_directory_yields_only_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("one").join("two");
        touch(&nested.join("a.yaml"));
        touch(&nested.join("b.yml"));
        touch(&nested.join("c.txt"));

        let discovered = discover(&[dir.path().to_path_buf()], &default_extensions());
        assert!(discovered.errors.is_empty());

        let mut names: Vec<_> = discovered
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }

    #[test]
    fn explicit_file_is_kept_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.conf");
        touch(&path);

        let discovered = discover(std::slice::from_ref(&path), &default_extensions());
        assert_eq!(discovered.files, vec![path]);
    }

    #[test]
    fn missing_path_is_recorded_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("ok.yaml");
        touch(&present);
        let missing = dir.path().join("missing.yaml");

        let discovered = discover(&[missing.clone(), present.clone()], &default_extensions());
        assert_eq!(discovered.files, vec![present]);
        assert_eq!(
            discovered.errors,
            vec![DiscoveryError::NotFound { path: missing }]
        );
    }

    #[test]
    fn all_missing_paths_yield_empty_result() {
        let discovered = discover(
            &[
                PathBuf::from("/nonexistent/dupguard/a"),
                PathBuf::from("/nonexistent/dupguard/b.yaml"),
            ],
            &default_extensions(),
        );
        assert!(discovered.is_empty());
        assert_eq!(discovered.errors.len(), 2);
    }

    #[test]
    fn unreadable_path_is_not_reported_as_missing() {
        let path = Path::new("locked.yaml");
        let err = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let recorded = metadata_error(path, &err);

        assert!(matches!(recorded, DiscoveryError::Inaccessible { .. }));
        assert_eq!(recorded.path(), path);
        assert!(recorded.to_string().starts_with("cannot access locked.yaml:"));

        let missing = std::io::Error::from(std::io::ErrorKind::NotFound);
        assert_eq!(
            metadata_error(path, &missing),
            DiscoveryError::NotFound {
                path: path.to_path_buf()
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn path_below_a_file_is_inaccessible() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.yaml");
        touch(&file);
        // a regular file used as a directory fails with ENOTDIR, not ENOENT
        let below = file.join("child.yaml");

        let discovered = discover(std::slice::from_ref(&below), &default_extensions());
        assert!(discovered.is_empty());
        assert!(matches!(
            discovered.errors.as_slice(),
            [DiscoveryError::Inaccessible { .. }]
        ));
    }

    #[test]
    fn overlapping_inputs_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.yaml");
        touch(&file);

        let discovered = discover(
            &[file.clone(), dir.path().to_path_buf(), file.clone()],
            &default_extensions(),
        );
        assert_eq!(discovered.files, vec![file]);
    }

    #[test]
    fn directories_with_yaml_names_are_not_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("looks.yaml")).unwrap();

        let discovered = discover(&[dir.path().to_path_buf()], &default_extensions());
        assert!(discovered.is_empty());
        assert!(discovered.errors.is_empty());
    }

    #[test]
    fn extensions_accept_leading_dot() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.json"));

        let discovered = discover(&[dir.path().to_path_buf()], &[".json".to_string()]);
        assert_eq!(discovered.files.len(), 1);
    }
}
