//! Finds solution files waiting in the staging directory.

use crate::config::CompiledFilters;
use std::fmt;
use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};

/// A file waiting in staging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name including the extension, e.g. `two_sum.py`.
    pub name: String,
    /// Full path inside the staging directory.
    pub path: PathBuf,
}

impl Candidate {
    /// File name without its extension, e.g. `two_sum`.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(self.name.as_str())
    }
}

#[derive(Debug)]
pub enum ScanError {
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFailed { path, source } => {
                write!(
                    f,
                    "Failed to create staging directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::ReadFailed { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateFailed { source, .. } | Self::ReadFailed { source, .. } => Some(source),
        }
    }
}

pub struct StagingScanner {
    staging_dir: PathBuf,
    extension: String,
    filters: CompiledFilters,
}

impl StagingScanner {
    pub fn new(staging_dir: PathBuf, extension: &str, filters: CompiledFilters) -> Self {
        Self {
            staging_dir,
            extension: extension.to_string(),
            filters,
        }
    }

    /// Creates the staging directory if it is missing.
    pub fn ensure_dir(&self) -> Result<(), ScanError> {
        fs::create_dir_all(&self.staging_dir).map_err(|e| ScanError::CreateFailed {
            path: self.staging_dir.clone(),
            source: e,
        })
    }

    /// Lists regular files directly inside staging that carry the configured
    /// extension and pass the exclude filters, sorted by name.
    ///
    /// A missing or empty staging directory yields an empty list.
    pub fn list_candidates(&self) -> Result<Vec<Candidate>, ScanError> {
        if !self.staging_dir.exists() {
            tracing::debug!(dir = %self.staging_dir.display(), "staging directory missing");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.staging_dir).map_err(|e| ScanError::ReadFailed {
            path: self.staging_dir.clone(),
            source: e,
        })?;

        let mut candidates: Vec<Candidate> =
            entries.filter_map(|entry| self.accept(entry)).collect();

        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candidates)
    }

    /// Turns one directory entry into a candidate, or `None` if it does not qualify.
    fn accept(&self, entry: io::Result<DirEntry>) -> Option<Candidate> {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    dir = %self.staging_dir.display(),
                    error = %e,
                    "skipping unreadable staging entry"
                );
                return None;
            }
        };

        if !entry.file_type().is_ok_and(|t| t.is_file()) {
            return None;
        }

        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping non UTF-8 file name");
            return None;
        };
        if !self.has_extension(&path) {
            return None;
        }
        if !self.filters.should_include(name) {
            tracing::debug!(file = name, "excluded by filter");
            return None;
        }

        Some(Candidate {
            name: name.to_string(),
            path: path.clone(),
        })
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension)
    }
}
