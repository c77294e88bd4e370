//! Single-select prompts.
//!
//! The classifier only needs "show these labels, give me back the chosen
//! index or nothing". [`TopicPrompt`] is that capability; [`TerminalPrompt`]
//! backs it with `dialoguer`, and [`ScriptedPrompt`] replays fixed answers.

use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

/// Presents a closed list of options and waits for one answer.
pub trait TopicPrompt {
    /// Returns the index of the chosen option, or `None` if the operator cancelled.
    fn select(&self, label: &str, options: &[String]) -> io::Result<Option<usize>>;
}

/// Interactive terminal prompt. Arrow keys to move, Enter to pick, Esc or `q` to cancel.
#[derive(Default)]
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TopicPrompt for TerminalPrompt {
    fn select(&self, label: &str, options: &[String]) -> io::Result<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

/// One pre-recorded answer for a [`ScriptedPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// Pick the option with this label.
    Label(String),
    /// Pick the option at this index, even if out of range.
    Index(usize),
    /// Cancel the prompt.
    Cancel,
}

/// Prompt that answers from a queue, for non-interactive runs and tests.
///
/// Every question asked is recorded so callers can check what was shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<ScriptedAnswer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = ScriptedAnswer>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Shorthand for a queue of label answers.
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(|l| ScriptedAnswer::Label(l.into())))
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl TopicPrompt for ScriptedPrompt {
    fn select(&self, label: &str, options: &[String]) -> io::Result<Option<usize>> {
        self.asked.borrow_mut().push(label.to_string());

        let answer = self.answers.borrow_mut().pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })?;

        match answer {
            ScriptedAnswer::Label(wanted) => options
                .iter()
                .position(|o| *o == wanted)
                .map(Some)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("scripted answer '{}' is not an option", wanted),
                    )
                }),
            ScriptedAnswer::Index(index) => Ok(Some(index)),
            ScriptedAnswer::Cancel => Ok(None),
        }
    }
}
