//! Asks the operator which topic a staged file belongs to.

use crate::prompt::TopicPrompt;
use crate::topic::{Topic, TopicRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a cancelled topic prompt means for the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelPolicy {
    /// Leave the file in staging and continue with the next one.
    #[default]
    Skip,
    /// Stop the whole run.
    Abort,
}

/// Outcome of classifying one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Chosen(Topic),
    Skipped,
}

#[derive(Debug)]
pub enum ClassifyError {
    /// The prompt itself failed (no terminal, I/O error).
    Prompt {
        file: String,
        source: std::io::Error,
    },
    /// The prompt returned an index outside the topic list.
    InvalidChoice { file: String, index: usize },
    /// The operator cancelled and the policy is [`CancelPolicy::Abort`].
    Aborted { file: String },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt { file, source } => {
                write!(f, "Topic prompt for `{}` failed: {}", file, source)
            }
            Self::InvalidChoice { file, index } => {
                write!(f, "Topic choice {} for `{}` is out of range", index, file)
            }
            Self::Aborted { file } => {
                write!(f, "Run aborted at `{}`: topic selection cancelled", file)
            }
        }
    }
}

impl std::error::Error for ClassifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Prompt { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub struct Classifier<'a> {
    prompt: &'a dyn TopicPrompt,
    on_cancel: CancelPolicy,
}

impl<'a> Classifier<'a> {
    pub fn new(prompt: &'a dyn TopicPrompt, on_cancel: CancelPolicy) -> Self {
        Self { prompt, on_cancel }
    }

    /// Presents every topic and blocks until the operator picks one.
    pub fn choose_topic(
        &self,
        file_name: &str,
        registry: &TopicRegistry,
    ) -> Result<Classification, ClassifyError> {
        let label = format!("Select the topic for `{}`", file_name);
        let choice = self
            .prompt
            .select(&label, registry.labels())
            .map_err(|e| ClassifyError::Prompt {
                file: file_name.to_string(),
                source: e,
            })?;

        match choice {
            Some(index) => registry
                .get(index)
                .cloned()
                .map(Classification::Chosen)
                .ok_or_else(|| ClassifyError::InvalidChoice {
                    file: file_name.to_string(),
                    index,
                }),
            None => match self.on_cancel {
                CancelPolicy::Skip => {
                    tracing::info!(file = file_name, "topic selection cancelled, skipping");
                    Ok(Classification::Skipped)
                }
                CancelPolicy::Abort => Err(ClassifyError::Aborted {
                    file: file_name.to_string(),
                }),
            },
        }
    }
}
