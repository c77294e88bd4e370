//! probsort - file solved practice problems by topic
//!
//! This library moves solution files from a staging directory into
//! per-topic directories, appends an entry for each one to a README index,
//! and stages, commits and pushes the result with git. The prompt and the
//! version-control tool are injected, so the whole workflow runs headless
//! in tests.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod index;
pub mod organizer;
pub mod output;
pub mod prompt;
pub mod publisher;
pub mod relocator;
pub mod scanner;
pub mod topic;

pub use classifier::{CancelPolicy, Classification, Classifier};
pub use config::{CompiledFilters, Config, ConfigError};
pub use index::{IndexRecord, IndexWriter};
pub use organizer::{Organizer, RunError, RunOptions, RunReport};
pub use prompt::{ScriptedAnswer, ScriptedPrompt, TerminalPrompt, TopicPrompt};
pub use publisher::{GitCli, PublishOutcome, Publisher, VersionControl};
pub use relocator::{Relocation, Relocator};
pub use scanner::{Candidate, StagingScanner};
pub use topic::{Topic, TopicRegistry};

pub use cli::{Cli, run_cli};
