/// Moves classified solutions out of staging into their topic directory.
///
/// A move never overwrites: if the topic directory already holds a file with
/// the same name the move is refused, so a file that leaves staging always
/// ends up in exactly one topic directory.
use crate::scanner::Candidate;
use crate::topic::Topic;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Record of one completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Path of the file in staging before the move.
    pub original_path: PathBuf,
    /// Path of the file inside its topic directory.
    pub new_path: PathBuf,
    /// Topic the file was filed under.
    pub topic: Topic,
}

/// Errors that can occur while moving a file.
#[derive(Debug)]
pub enum RelocateError {
    /// The staged file no longer exists.
    SourceMissing { path: PathBuf },
    /// The topic directory was not created beforehand.
    TopicDirMissing { path: PathBuf },
    /// A file with the same name is already filed under the topic.
    DestinationExists { path: PathBuf },
    /// The filesystem refused the move.
    MoveFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
}

impl std::fmt::Display for RelocateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceMissing { path } => {
                write!(f, "Staged file {} does not exist", path.display())
            }
            Self::TopicDirMissing { path } => {
                write!(f, "Topic directory {} does not exist", path.display())
            }
            Self::DestinationExists { path } => {
                write!(f, "Refusing to overwrite existing file {}", path.display())
            }
            Self::MoveFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for RelocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MoveFailed { source_error, .. } => Some(source_error),
            _ => None,
        }
    }
}

/// Result type for relocation.
pub type RelocateResult<T> = Result<T, RelocateError>;

pub struct Relocator {
    topics_root: PathBuf,
}

impl Relocator {
    /// Creates a relocator filing into `topics_root/<topic>/`.
    pub fn new(topics_root: PathBuf) -> Self {
        Self { topics_root }
    }

    /// Where `candidate` would land under `topic`.
    pub fn destination(&self, candidate: &Candidate, topic: &Topic) -> PathBuf {
        self.topics_root.join(topic.as_str()).join(&candidate.name)
    }

    /// Moves `candidate` into the directory of `topic`.
    ///
    /// # Errors
    ///
    /// Fails without touching anything if the source is gone, the topic
    /// directory is missing or the destination already exists. Otherwise
    /// returns `MoveFailed` if the filesystem rejects the move.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use probsort::relocator::Relocator;
    /// use probsort::scanner::Candidate;
    /// use probsort::topic::TopicRegistry;
    /// use std::path::PathBuf;
    ///
    /// let registry = TopicRegistry::neetcode();
    /// let relocator = Relocator::new(PathBuf::from("NeetCode"));
    /// let candidate = Candidate {
    ///     name: "two_sum.py".to_string(),
    ///     path: PathBuf::from("new_probs/two_sum.py"),
    /// };
    ///
    /// match relocator.move_to_topic(&candidate, registry.get(0).unwrap()) {
    ///     Ok(moved) => println!("Moved to {}", moved.new_path.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_to_topic(&self, candidate: &Candidate, topic: &Topic) -> RelocateResult<Relocation> {
        if !candidate.path.is_file() {
            return Err(RelocateError::SourceMissing {
                path: candidate.path.clone(),
            });
        }

        let topic_dir = self.topics_root.join(topic.as_str());
        if !topic_dir.is_dir() {
            return Err(RelocateError::TopicDirMissing { path: topic_dir });
        }

        let destination = topic_dir.join(&candidate.name);
        if destination.exists() {
            return Err(RelocateError::DestinationExists { path: destination });
        }

        move_file(&candidate.path, &destination).map_err(|e| RelocateError::MoveFailed {
            source: candidate.path.clone(),
            destination: destination.clone(),
            source_error: e,
        })?;

        tracing::debug!(
            from = %candidate.path.display(),
            to = %destination.display(),
            "file relocated"
        );

        Ok(Relocation {
            original_path: candidate.path.clone(),
            new_path: destination,
            topic: topic.clone(),
        })
    }
}

/// Rename, falling back to copy and remove when source and destination sit on
/// different filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}
