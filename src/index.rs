//! Append-only README index of solved problems.
//!
//! Each relocated file adds one line of the form
//!
//! ```text
//! - [two_sum](https://github.com/yourusername/NeetCode/0_Arrays_Hashing/two_sum.py) - **Topic:** 0_Arrays_Hashing
//! ```
//!
//! Existing content is never rewritten.

use crate::topic::Topic;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// One index line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    /// Problem name, the file name without extension.
    pub name: String,
    pub link: String,
    pub topic: Topic,
}

impl fmt::Display for IndexRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- [{}]({}) - **Topic:** {}",
            self.name, self.link, self.topic
        )
    }
}

#[derive(Debug)]
pub enum IndexError {
    OpenFailed { path: PathBuf, source: io::Error },
    WriteFailed { path: PathBuf, source: io::Error },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFailed { path, source } => {
                write!(f, "Failed to open index {}: {}", path.display(), source)
            }
            Self::WriteFailed { path, source } => {
                write!(f, "Failed to append to index {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OpenFailed { source, .. } | Self::WriteFailed { source, .. } => Some(source),
        }
    }
}

pub struct IndexWriter {
    index_path: PathBuf,
    link_base: String,
    extension: String,
}

impl IndexWriter {
    pub fn new(index_path: PathBuf, link_base: &str, extension: &str) -> Self {
        Self {
            index_path,
            link_base: link_base.trim_end_matches('/').to_string(),
            extension: extension.to_string(),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Builds the record for `name` (without extension) filed under `topic`.
    pub fn record_for(&self, name: &str, topic: &Topic) -> IndexRecord {
        IndexRecord {
            name: name.to_string(),
            link: format!(
                "{}/{}/{}.{}",
                self.link_base, topic, name, self.extension
            ),
            topic: topic.clone(),
        }
    }

    /// Appends the record for `name` to the index, creating the file if needed.
    ///
    /// If the current content does not end with a newline one is added first,
    /// so the new record always starts on its own line.
    pub fn append_record(&self, name: &str, topic: &Topic) -> Result<IndexRecord, IndexError> {
        let record = self.record_for(name, topic);

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.index_path)
            .map_err(|e| IndexError::OpenFailed {
                path: self.index_path.clone(),
                source: e,
            })?;

        let write_err = |e| IndexError::WriteFailed {
            path: self.index_path.clone(),
            source: e,
        };

        let mut line = String::new();
        if needs_leading_newline(&mut file).map_err(write_err)? {
            line.push('\n');
        }
        line.push_str(&record.to_string());
        line.push('\n');

        file.write_all(line.as_bytes()).map_err(write_err)?;

        tracing::debug!(index = %self.index_path.display(), record = %record, "index updated");
        Ok(record)
    }

    /// Reads all lines currently in the index. A missing index reads as empty.
    pub fn read_lines(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.index_path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

fn needs_leading_newline(file: &mut fs::File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::TopicRegistry;
    use tempfile::TempDir;

    const LINK_BASE: &str = "https://github.com/yourusername/NeetCode";

    fn writer(dir: &Path) -> IndexWriter {
        IndexWriter::new(dir.join("README.md"), LINK_BASE, "py")
    }

    #[test]
    fn test_record_format() {
        let registry = TopicRegistry::neetcode();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let record = writer(temp_dir.path()).record_for("two_sum", registry.get(0).unwrap());

        assert_eq!(
            record.to_string(),
            "- [two_sum](https://github.com/yourusername/NeetCode/0_Arrays_Hashing/two_sum.py) - **Topic:** 0_Arrays_Hashing"
        );
    }

    #[test]
    fn test_trailing_slash_in_link_base() {
        let registry = TopicRegistry::neetcode();
        let writer = IndexWriter::new(PathBuf::from("README.md"), "https://example.com/", "py");
        let record = writer.record_for("lru_cache", registry.find("5_Linked_List").unwrap());
        assert_eq!(record.link, "https://example.com/5_Linked_List/lru_cache.py");
    }

    #[test]
    fn test_append_keeps_existing_bytes() {
        let registry = TopicRegistry::neetcode();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let writer = writer(temp_dir.path());
        let original = "# Solutions\n\nSome intro.\n";
        fs::write(writer.index_path(), original).unwrap();

        writer
            .append_record("two_sum", registry.get(0).unwrap())
            .unwrap();
        writer
            .append_record("valid_parentheses", registry.get(1).unwrap())
            .unwrap();

        let content = fs::read_to_string(writer.index_path()).unwrap();
        assert!(content.starts_with(original));
        let lines = writer.read_lines().unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with("- [two_sum]("));
        assert!(lines[4].starts_with("- [valid_parentheses]("));
        assert!(content.ends_with("**Topic:** 1_Stack\n"));
    }

    #[test]
    fn test_append_creates_missing_index() {
        let registry = TopicRegistry::neetcode();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let writer = writer(temp_dir.path());
        assert!(writer.read_lines().unwrap().is_empty());

        writer
            .append_record("climbing_stairs", registry.find("14_1-DP").unwrap())
            .unwrap();

        assert_eq!(writer.read_lines().unwrap().len(), 1);
    }

    #[test]
    fn test_append_after_missing_trailing_newline() {
        let registry = TopicRegistry::neetcode();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let writer = writer(temp_dir.path());
        fs::write(writer.index_path(), "# Solutions").unwrap();

        writer
            .append_record("two_sum", registry.get(0).unwrap())
            .unwrap();

        let content = fs::read_to_string(writer.index_path()).unwrap();
        assert!(content.starts_with("# Solutions\n- [two_sum]("));
    }

    #[test]
    fn test_append_to_directory_fails() {
        let registry = TopicRegistry::neetcode();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let writer = IndexWriter::new(temp_dir.path().to_path_buf(), LINK_BASE, "py");

        let result = writer.append_record("two_sum", registry.get(0).unwrap());
        assert!(matches!(result, Err(IndexError::OpenFailed { .. })));
    }
}
