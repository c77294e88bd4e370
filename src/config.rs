//! Run configuration.
//!
//! Every path, the topic list and the git target live in one [`Config`] value
//! that is handed to each component. Values come from a TOML file when one is
//! found, otherwise from built-in defaults that reproduce the NeetCode layout:
//!
//! ```toml
//! topics_dir = "NeetCode"
//! staging_dir = "new_probs"
//! index_file = "README.md"
//! extension = "py"
//! link_base = "https://github.com/yourusername/NeetCode"
//! remote = "origin"
//! branch = "main"
//! on_cancel = "skip"
//!
//! [exclude]
//! filenames = ["__init__.py"]
//! patterns = ["scratch_*.py"]
//! regex = []
//! ```
//!
//! All relative paths are resolved against the project root passed to
//! [`Config::load`].

use crate::classifier::CancelPolicy;
use crate::topic::{NEETCODE_TOPICS, TopicRegistry};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file looked up in the root.
pub const LOCAL_CONFIG_FILE: &str = ".probsortrc.toml";

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// The topic list cannot form a registry.
    InvalidTopics(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::InvalidTopics(msg) => write!(f, "Invalid topic list: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Complete configuration for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Project root. Never read from the file; set by [`Config::load`].
    #[serde(skip)]
    pub root: PathBuf,

    /// Directory holding one sub-directory per topic.
    pub topics_dir: PathBuf,

    /// Staging directory scanned for new solutions.
    pub staging_dir: PathBuf,

    /// Append-only index file.
    pub index_file: PathBuf,

    /// The one file extension considered a candidate, without the dot.
    pub extension: String,

    /// Prefix of the generated links; `/<topic>/<name>.<ext>` is appended.
    pub link_base: String,

    /// Ordered topic labels.
    pub topics: Vec<String>,

    /// Git remote to push to.
    pub remote: String,

    /// Git branch to push.
    pub branch: String,

    /// What to do when the operator cancels a topic prompt.
    pub on_cancel: CancelPolicy,

    /// Staging files to ignore.
    pub exclude: ExcludeRules,
}

/// Rules for leaving staging files alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExcludeRules {
    /// Whether hidden files (starting with ".") are candidates. Defaults to false.
    pub hidden_files: bool,

    /// Exact filenames to exclude (e.g., "__init__.py").
    pub filenames: Vec<String>,

    /// Glob patterns matched against the file name (e.g., "scratch_*.py").
    pub patterns: Vec<String>,

    /// Regex patterns matched against the file name.
    pub regex: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            topics_dir: PathBuf::from("NeetCode"),
            staging_dir: PathBuf::from("new_probs"),
            index_file: PathBuf::from("README.md"),
            extension: "py".to_string(),
            link_base: "https://github.com/yourusername/NeetCode".to_string(),
            topics: NEETCODE_TOPICS.iter().map(|t| t.to_string()).collect(),
            remote: "origin".to_string(),
            branch: "main".to_string(),
            on_cancel: CancelPolicy::Skip,
            exclude: ExcludeRules::default(),
        }
    }
}

impl Config {
    /// Default configuration rooted at `root`.
    pub fn with_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ..Self::default()
        }
    }

    /// Load configuration for `root`, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.probsortrc.toml` in the project root
    /// 3. Look for `~/.config/probsort/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot be
    /// read, or if any file found is not valid.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::locate(root, config_path)?;
        config.root = root.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    fn locate(root: &Path, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = root.join(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("probsort")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        tracing::debug!(path = %path.display(), "loading configuration");
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text. The root is left at its default.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(ConfigError::ConfigInvalid(format!(
                "extension must be a bare suffix like \"py\", got {:?}",
                self.extension
            )));
        }
        if self.remote.trim().is_empty() || self.branch.trim().is_empty() {
            return Err(ConfigError::ConfigInvalid(
                "remote and branch must not be empty".to_string(),
            ));
        }
        self.registry()?;
        Ok(())
    }

    /// Builds the topic registry from the configured labels.
    pub fn registry(&self) -> Result<TopicRegistry, ConfigError> {
        TopicRegistry::new(self.topics.iter().cloned())
            .map_err(|e| ConfigError::InvalidTopics(e.to_string()))
    }

    /// Compile the exclude rules into matchers.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob patterns are invalid.
    pub fn compile_filters(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(&self.exclude)
    }

    pub fn topics_root(&self) -> PathBuf {
        self.root.join(&self.topics_dir)
    }

    pub fn staging_path(&self) -> PathBuf {
        self.root.join(&self.staging_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index_file)
    }
}

/// Compiled exclude rules for matching staging file names.
pub struct CompiledFilters {
    hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl CompiledFilters {
    fn new(rules: &ExcludeRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = rules
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            hidden_files: rules.hidden_files,
            exclude_filenames: rules.filenames.iter().cloned().collect(),
            exclude_patterns,
            exclude_regexes,
        })
    }

    /// Check if a staging file should be offered for classification.
    ///
    /// Checks are performed in this order, with early termination:
    /// 1. Hidden file filter
    /// 2. Exact filename match
    /// 3. Glob pattern match
    /// 4. Regex pattern match
    pub fn should_include(&self, file_name: &str) -> bool {
        if !self.hidden_files && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name) {
            return false;
        }

        if self.exclude_patterns.iter().any(|p| p.matches(file_name)) {
            return false;
        }

        !self.exclude_regexes.iter().any(|r| r.is_match(file_name))
    }
}

impl Default for CompiledFilters {
    fn default() -> Self {
        Self {
            hidden_files: false,
            exclude_filenames: HashSet::new(),
            exclude_patterns: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }
}
