//! Line-based prompt over plain readers and writers.

use std::io::{BufRead, StdinLock, Stdout, Write};
use std::path::Path;

use crate::error::{LogDirError, Result};

use super::{conflict_question, ConflictPrompt};

/// Prompt that writes the question to `output` and reads one line from
/// `input`.
///
/// Used when stdin is not a terminal, e.g. when answers are piped in.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl LinePrompt<StdinLock<'static>, Stdout> {
    /// Prompt on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Create a prompt over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompt, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> ConflictPrompt for LinePrompt<R, W> {
    fn choose(&mut self, path: &Path) -> Result<String> {
        writeln!(self.output, "{}", conflict_question(path))?;
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(LogDirError::PromptClosed {
                path: path.to_path_buf(),
                reason: "input closed".to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    fn reject(&mut self, _answer: &str) {
        writeln!(self.output, "Invalid option").ok();
    }
}
