//! Non-interactive prompt for CI/headless environments.

use std::path::Path;

use crate::error::{LogDirError, Result};

use super::ConflictPrompt;

/// Prompt that never answers.
///
/// An existing directory with no configured mode becomes an error instead of
/// blocking on input nobody will type.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompt;

impl ConflictPrompt for NonInteractivePrompt {
    fn choose(&mut self, path: &Path) -> Result<String> {
        Err(LogDirError::PromptClosed {
            path: path.to_path_buf(),
            reason: "running non-interactively; set a mode (d, t or c)".to_string(),
        })
    }
}
