//! Interactive conflict resolution.
//!
//! When no collision mode was configured and the log directory already
//! exists, the resolver asks a [`ConflictPrompt`] what to do. This module
//! provides:
//! - [`ConflictPrompt`] trait for prompt abstraction
//! - [`TerminalPrompt`] for interactive terminal usage
//! - [`LinePrompt`] for plain line-based stdin (pipes, dumb terminals)
//! - [`NonInteractivePrompt`] for CI/headless environments
//! - [`MockPrompt`] for tests
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tinylogdir::ui::{ConflictPrompt, MockPrompt};
//!
//! let mut prompt = MockPrompt::new(["c"]);
//! let answer = prompt.choose(Path::new("runs/exp")).unwrap();
//! assert_eq!(answer, "c");
//! assert_eq!(prompt.paths_asked().len(), 1);
//! ```

pub mod mock;
pub mod non_interactive;
pub mod prompts;
pub mod terminal;

pub use mock::MockPrompt;
pub use non_interactive::NonInteractivePrompt;
pub use prompts::LinePrompt;
pub use terminal::{create_prompt, TerminalPrompt};

use std::path::Path;

use crate::error::Result;

/// Trait for asking the user how to handle an existing directory.
///
/// This trait allows scripting the answers in tests.
pub trait ConflictPrompt {
    /// Ask what to do about the existing `path`.
    ///
    /// Returns the raw answer; the resolver parses it and calls
    /// [`reject`](Self::reject) followed by another `choose` if it is not a
    /// valid mode.
    fn choose(&mut self, path: &Path) -> Result<String>;

    /// Tell the user their answer was not understood.
    fn reject(&mut self, _answer: &str) {}
}

impl<P: ConflictPrompt + ?Sized> ConflictPrompt for Box<P> {
    fn choose(&mut self, path: &Path) -> Result<String> {
        (**self).choose(path)
    }

    fn reject(&mut self, answer: &str) {
        (**self).reject(answer)
    }
}

/// Question shown for an existing directory.
pub fn conflict_question(path: &Path) -> String {
    format!(
        "Directory {} already exists. Options: Delete (d), append timestamp (t), append counter (c)",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_names_path_and_options() {
        let q = conflict_question(Path::new("runs/exp"));
        assert!(q.contains("runs/exp"));
        assert!(q.contains("(d)"));
        assert!(q.contains("(t)"));
        assert!(q.contains("(c)"));
    }

    #[test]
    fn boxed_prompt_delegates() {
        let mut prompt: Box<dyn ConflictPrompt> = Box::new(MockPrompt::new(["t"]));
        assert_eq!(prompt.choose(Path::new("x")).unwrap(), "t");
    }
}
