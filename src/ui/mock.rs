//! Mock prompt implementation for testing.
//!
//! `MockPrompt` implements the `ConflictPrompt` trait with a queue of
//! scripted answers and captures every interaction for later assertion.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tinylogdir::ui::{ConflictPrompt, MockPrompt};
//!
//! let mut prompt = MockPrompt::new(["nope", "d"]);
//! assert_eq!(prompt.choose(Path::new("out")).unwrap(), "nope");
//! prompt.reject("nope");
//! assert_eq!(prompt.choose(Path::new("out")).unwrap(), "d");
//!
//! assert_eq!(prompt.rejected(), ["nope".to_string()]);
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::error::{LogDirError, Result};

use super::ConflictPrompt;

/// Mock prompt for testing.
///
/// Answers are returned in order. Once the queue is exhausted, `choose`
/// fails the same way a closed stdin would.
#[derive(Debug, Default)]
pub struct MockPrompt {
    answers: VecDeque<String>,
    paths_asked: Vec<PathBuf>,
    rejected: Vec<String>,
}

impl MockPrompt {
    /// Create a mock that answers with `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Paths the resolver asked about, in order.
    pub fn paths_asked(&self) -> &[PathBuf] {
        &self.paths_asked
    }

    /// Answers the resolver rejected as invalid.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Number of scripted answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl ConflictPrompt for MockPrompt {
    fn choose(&mut self, path: &Path) -> Result<String> {
        self.paths_asked.push(path.to_path_buf());
        self.answers
            .pop_front()
            .ok_or_else(|| LogDirError::PromptClosed {
                path: path.to_path_buf(),
                reason: "no scripted answer left".to_string(),
            })
    }

    fn reject(&mut self, answer: &str) {
        self.rejected.push(answer.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_in_order() {
        let mut prompt = MockPrompt::new(["a", "b"]);
        assert_eq!(prompt.choose(Path::new("x")).unwrap(), "a");
        assert_eq!(prompt.choose(Path::new("y")).unwrap(), "b");
        assert_eq!(
            prompt.paths_asked(),
            [PathBuf::from("x"), PathBuf::from("y")]
        );
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn exhausted_queue_is_an_error() {
        let mut prompt = MockPrompt::default();
        let err = prompt.choose(Path::new("x")).unwrap_err();
        assert!(matches!(err, LogDirError::PromptClosed { .. }));
    }

    #[test]
    fn records_rejections() {
        let mut prompt = MockPrompt::new(Vec::<String>::new());
        prompt.reject("maybe");
        assert_eq!(prompt.rejected(), ["maybe".to_string()]);
    }
}
