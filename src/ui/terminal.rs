//! Interactive terminal prompt.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io::Write;
use std::path::Path;

use crate::error::{LogDirError, Result};

use super::{conflict_question, ConflictPrompt, LinePrompt, NonInteractivePrompt};

/// Convert dialoguer errors to LogDirError.
fn map_dialoguer_err(e: dialoguer::Error) -> LogDirError {
    LogDirError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Interactive terminal prompt implementation.
pub struct TerminalPrompt {
    term: Term,
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    /// Create a new terminal prompt on stdout.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            theme: prompt_theme(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ConflictPrompt for TerminalPrompt {
    fn choose(&mut self, path: &Path) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(conflict_question(path))
            .interact_text_on(&self.term)
            .map_err(map_dialoguer_err)?;
        Ok(answer.trim().to_string())
    }

    fn reject(&mut self, answer: &str) {
        writeln!(self.term, "{} {}", style("Invalid option:").red(), answer).ok();
    }
}

/// Create the appropriate prompt for the current environment.
///
/// Interactive sessions get a dialoguer prompt on a real terminal and a
/// plain line prompt when stdout is redirected.
pub fn create_prompt(interactive: bool) -> Box<dyn ConflictPrompt> {
    if !interactive {
        Box::new(NonInteractivePrompt)
    } else if Term::stdout().is_term() {
        Box::new(TerminalPrompt::new())
    } else {
        Box::new(LinePrompt::stdio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_prompt_creation() {
        let prompt = TerminalPrompt::new();
        drop(prompt);
    }

    #[test]
    fn non_interactive_prompt_refuses() {
        let mut prompt = create_prompt(false);
        assert!(prompt.choose(Path::new("out")).is_err());
    }
}
