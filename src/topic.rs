//! Topic registry for grouping solved problems.
//!
//! A topic is a plain folder label such as `0_Arrays_Hashing`. The registry
//! holds a fixed, ordered list of them for the lifetime of a run; the same
//! order is used to create directories and to present choices.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The NeetCode roadmap topics, in roadmap order.
pub const NEETCODE_TOPICS: [&str; 18] = [
    "0_Arrays_Hashing",
    "1_Stack",
    "2_Two_Pointers",
    "3_Binary_Search",
    "4_Sliding_Window",
    "5_Linked_List",
    "6_Trees",
    "7_Tries",
    "8_Backtracking",
    "9_Heap_Priority_Queue",
    "10_Intervals",
    "11_Greedy",
    "12_Advanced_Graphs",
    "13_Graphs",
    "14_1-DP",
    "15_2-DP",
    "16_Bit_Manipulation",
    "17_Math_Geometry",
];

/// A single topic label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    /// Returns the label, which is also the directory name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while building the registry or creating its directories.
#[derive(Debug)]
pub enum TopicError {
    /// The topic list was empty.
    Empty,
    /// A label is blank or cannot be used as a single directory name.
    InvalidLabel(String),
    /// The same label appears twice.
    Duplicate(String),
    /// A topic directory could not be created.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for TopicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Topic list is empty"),
            Self::InvalidLabel(label) => {
                write!(f, "Invalid topic label '{}': must be a plain folder name", label)
            }
            Self::Duplicate(label) => write!(f, "Duplicate topic label '{}'", label),
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create topic directory {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for TopicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Ordered, immutable set of topics.
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    topics: Vec<Topic>,
    labels: Vec<String>,
}

impl TopicRegistry {
    /// Builds a registry from labels, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::Empty` for an empty list, `TopicError::InvalidLabel`
    /// for blank labels or labels containing path components, and
    /// `TopicError::Duplicate` when a label repeats.
    pub fn new<I, S>(labels: I) -> Result<Self, TopicError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut topics = Vec::new();

        for label in labels {
            let label = label.into();
            if !is_plain_dir_name(&label) {
                return Err(TopicError::InvalidLabel(label));
            }
            if !seen.insert(label.clone()) {
                return Err(TopicError::Duplicate(label));
            }
            topics.push(Topic(label));
        }

        if topics.is_empty() {
            return Err(TopicError::Empty);
        }

        let labels = topics.iter().map(|t| t.0.clone()).collect();
        Ok(Self { topics, labels })
    }

    /// The default NeetCode roadmap registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use probsort::topic::TopicRegistry;
    ///
    /// let registry = TopicRegistry::neetcode();
    /// assert_eq!(registry.len(), 18);
    /// assert_eq!(registry.get(0).map(|t| t.as_str()), Some("0_Arrays_Hashing"));
    /// assert!(registry.find("6_Trees").is_some());
    /// ```
    pub fn neetcode() -> Self {
        let topics: Vec<Topic> = NEETCODE_TOPICS.iter().map(|t| Topic(t.to_string())).collect();
        let labels = NEETCODE_TOPICS.iter().map(|t| t.to_string()).collect();
        Self { topics, labels }
    }

    /// Labels in registry order, ready to hand to a selection prompt.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    pub fn find(&self, label: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.0 == label)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Creates `base/<topic>` for every topic. Existing directories are left alone.
    ///
    /// Returns the directory paths in registry order.
    pub fn ensure_dirs(&self, base: &Path) -> Result<Vec<PathBuf>, TopicError> {
        let mut created = Vec::with_capacity(self.topics.len());
        for topic in &self.topics {
            let dir = base.join(topic.as_str());
            fs::create_dir_all(&dir).map_err(|e| TopicError::DirectoryCreationFailed {
                path: dir.clone(),
                source: e,
            })?;
            tracing::debug!(dir = %dir.display(), "topic directory ready");
            created.push(dir);
        }
        Ok(created)
    }
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self::neetcode()
    }
}

fn is_plain_dir_name(label: &str) -> bool {
    !label.trim().is_empty()
        && label != "."
        && label != ".."
        && !label.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_neetcode_registry_order() {
        let registry = TopicRegistry::neetcode();
        assert_eq!(registry.len(), 18);
        assert_eq!(registry.labels()[0], "0_Arrays_Hashing");
        assert_eq!(registry.labels()[14], "14_1-DP");
        assert_eq!(registry.labels()[17], "17_Math_Geometry");
    }

    #[test]
    fn test_custom_registry_keeps_order() {
        let registry = TopicRegistry::new(["b", "a", "c"]).unwrap();
        assert_eq!(registry.labels(), &["b", "a", "c"]);
        assert_eq!(registry.get(1).unwrap().as_str(), "a");
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn test_rejects_empty_duplicate_and_path_labels() {
        assert!(matches!(
            TopicRegistry::new(Vec::<String>::new()),
            Err(TopicError::Empty)
        ));
        assert!(matches!(
            TopicRegistry::new(["a", "a"]),
            Err(TopicError::Duplicate(_))
        ));
        assert!(matches!(
            TopicRegistry::new(["a/b"]),
            Err(TopicError::InvalidLabel(_))
        ));
        assert!(matches!(
            TopicRegistry::new([".."]),
            Err(TopicError::InvalidLabel(_))
        ));
        assert!(matches!(
            TopicRegistry::new(["  "]),
            Err(TopicError::InvalidLabel(_))
        ));
    }

    #[test]
    fn test_ensure_dirs_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path().join("NeetCode");
        let registry = TopicRegistry::neetcode();

        let first = registry.ensure_dirs(&base).expect("first ensure_dirs failed");
        let second = registry.ensure_dirs(&base).expect("second ensure_dirs failed");

        assert_eq!(first, second);
        let count = fs::read_dir(&base).unwrap().count();
        assert_eq!(count, 18);
        for dir in first {
            assert!(dir.is_dir());
        }
    }

    #[test]
    fn test_ensure_dirs_keeps_existing_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = TopicRegistry::new(["1_Stack"]).unwrap();
        let existing = temp_dir.path().join("1_Stack");
        fs::create_dir(&existing).unwrap();
        fs::write(existing.join("valid_parens.py"), "pass").unwrap();

        registry.ensure_dirs(temp_dir.path()).unwrap();

        assert!(existing.join("valid_parens.py").exists());
    }
}
