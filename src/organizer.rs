//! Runs one organize pass: scan staging, ask for topics, move, index, publish.

use crate::classifier::{Classification, Classifier, ClassifyError};
use crate::config::{Config, ConfigError};
use crate::index::{IndexError, IndexRecord, IndexWriter};
use crate::output::OutputFormatter;
use crate::prompt::TopicPrompt;
use crate::publisher::{PublishError, PublishOutcome, Publisher, VersionControl};
use crate::relocator::{RelocateError, Relocation, Relocator};
use crate::scanner::{ScanError, StagingScanner};
use crate::topic::TopicError;
use std::collections::BTreeMap;
use std::fmt;

/// Switches for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Ask for topics and report, but change nothing.
    pub dry_run: bool,
    /// Run the git steps after at least one file moved.
    pub publish: bool,
    /// Push after committing.
    pub push: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            publish: true,
            push: true,
        }
    }
}

/// What a run did, in processing order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Completed moves, or planned moves for a dry run.
    pub relocations: Vec<Relocation>,
    /// Index lines appended, or that would be appended for a dry run.
    pub records: Vec<IndexRecord>,
    /// Files left in staging because the prompt was cancelled.
    pub skipped: Vec<String>,
    /// Set when the git steps ran.
    pub publish: Option<PublishOutcome>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn moved(&self) -> usize {
        self.relocations.len()
    }

    /// Number of files per topic label.
    pub fn topic_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for relocation in &self.relocations {
            *counts
                .entry(relocation.topic.as_str().to_string())
                .or_insert(0) += 1;
        }
        counts
    }
}

/// Any failure that ends a run. Work completed before the failure is kept.
#[derive(Debug)]
pub enum RunError {
    Config(ConfigError),
    Topic(TopicError),
    Scan(ScanError),
    Classify(ClassifyError),
    Relocate(RelocateError),
    Index(IndexError),
    Publish(PublishError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => e.fmt(f),
            Self::Topic(e) => e.fmt(f),
            Self::Scan(e) => e.fmt(f),
            Self::Classify(e) => e.fmt(f),
            Self::Relocate(e) => e.fmt(f),
            Self::Index(e) => e.fmt(f),
            Self::Publish(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Topic(e) => Some(e),
            Self::Scan(e) => Some(e),
            Self::Classify(e) => Some(e),
            Self::Relocate(e) => Some(e),
            Self::Index(e) => Some(e),
            Self::Publish(e) => Some(e),
        }
    }
}

macro_rules! impl_from_error {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for RunError {
                fn from(e: $source) -> Self {
                    RunError::$variant(e)
                }
            }
        )*
    };
}

impl_from_error! {
    ConfigError => Config,
    TopicError => Topic,
    ScanError => Scan,
    ClassifyError => Classify,
    RelocateError => Relocate,
    IndexError => Index,
    PublishError => Publish,
}

pub struct Organizer<'a> {
    config: &'a Config,
    prompt: &'a dyn TopicPrompt,
    vcs: &'a dyn VersionControl,
}

impl<'a> Organizer<'a> {
    pub fn new(
        config: &'a Config,
        prompt: &'a dyn TopicPrompt,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        Self {
            config,
            prompt,
            vcs,
        }
    }

    /// Processes every staged file, then publishes if anything moved.
    ///
    /// This function:
    /// 1. Creates the topic and staging directories (skipped for a dry run)
    /// 2. Lists the staged candidates; stops quietly if there are none
    /// 3. For each candidate asks for a topic, moves the file and appends
    ///    its index line
    /// 4. Stages, commits and pushes when at least one file moved
    ///
    /// The first error stops the run. Files already moved and lines already
    /// written stay as they are.
    pub fn run(&self, options: RunOptions) -> Result<RunReport, RunError> {
        let config = self.config;
        let registry = config.registry()?;
        let scanner = StagingScanner::new(
            config.staging_path(),
            &config.extension,
            config.compile_filters()?,
        );

        if !options.dry_run {
            registry.ensure_dirs(&config.topics_root())?;
            scanner.ensure_dir()?;
        }

        let mut report = RunReport {
            dry_run: options.dry_run,
            ..RunReport::default()
        };

        let candidates = scanner.list_candidates()?;
        if candidates.is_empty() {
            OutputFormatter::success(&format!(
                "No new problems found in `{}`.",
                config.staging_dir.display()
            ));
            return Ok(report);
        }

        tracing::info!(count = candidates.len(), "found staged files");

        let classifier = Classifier::new(self.prompt, config.on_cancel);
        let relocator = Relocator::new(config.topics_root());
        let index = IndexWriter::new(config.index_path(), &config.link_base, &config.extension);

        for candidate in &candidates {
            OutputFormatter::header(&format!("Processing `{}`", candidate.name));

            let topic = match classifier.choose_topic(&candidate.name, &registry)? {
                Classification::Chosen(topic) => topic,
                Classification::Skipped => {
                    OutputFormatter::warning(&format!(
                        "Skipped `{}`, it stays in staging.",
                        candidate.name
                    ));
                    report.skipped.push(candidate.name.clone());
                    continue;
                }
            };

            if options.dry_run {
                let destination = relocator.destination(candidate, &topic);
                OutputFormatter::dry_run_notice(&format!(
                    "Would move `{}` to {}",
                    candidate.name,
                    destination.display()
                ));
                let record = index.record_for(candidate.stem(), &topic);
                OutputFormatter::dry_run_notice(&format!("Would append: {}", record));
                report.relocations.push(Relocation {
                    original_path: candidate.path.clone(),
                    new_path: destination,
                    topic,
                });
                report.records.push(record);
                continue;
            }

            let relocation = relocator.move_to_topic(candidate, &topic)?;
            OutputFormatter::success(&format!(
                "Moved `{}` to {}",
                candidate.name,
                relocation.new_path.display()
            ));
            report.relocations.push(relocation);

            let record = index.append_record(candidate.stem(), &topic)?;
            OutputFormatter::success(&format!("{} updated.", config.index_file.display()));
            report.records.push(record);
        }

        if options.dry_run {
            OutputFormatter::dry_run_notice("No files were modified.");
        } else if options.publish && report.moved() > 0 {
            report.publish = Some(self.publish(options.push)?);
        }

        OutputFormatter::summary_table(
            &report.topic_counts(),
            registry.labels(),
            report.skipped.len(),
        );

        Ok(report)
    }

    fn publish(&self, push: bool) -> Result<PublishOutcome, RunError> {
        OutputFormatter::info("Starting git operations...");
        let publisher = Publisher::new(self.vcs, &self.config.remote, &self.config.branch)
            .with_push(push);

        let mut spinner = None;
        let result = publisher.publish_with(|| {
            spinner = Some(OutputFormatter::spinner(&format!(
                "Pushing to {}/{}...",
                self.config.remote, self.config.branch
            )));
        });
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let outcome = result?;
        match outcome {
            PublishOutcome::NothingToCommit => OutputFormatter::info("No changes to commit."),
            PublishOutcome::Committed => OutputFormatter::success("Changes committed (push skipped)."),
            PublishOutcome::Pushed => OutputFormatter::success("Git operations completed."),
        }
        Ok(outcome)
    }
}
