//! Collision modes for existing log directories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LogDirError;

/// What to do when the requested log directory already exists.
///
/// Parsed from `d`/`delete`, `t`/`timestamp` or `c`/`counter`. An absent
/// mode (`Option::None` wherever a mode is accepted) means "ask the user".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollisionMode {
    /// Remove the existing directory and start fresh.
    Delete,
    /// Append `-<local timestamp>` to the path.
    Timestamp,
    /// Append `-1`, `-2`, ... to the path.
    Counter,
}

impl CollisionMode {
    /// Long name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Timestamp => "timestamp",
            Self::Counter => "counter",
        }
    }
}

impl FromStr for CollisionMode {
    type Err = LogDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "d" | "delete" => Ok(Self::Delete),
            "t" | "timestamp" => Ok(Self::Timestamp),
            "c" | "counter" => Ok(Self::Counter),
            other => Err(LogDirError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for CollisionMode {
    type Error = LogDirError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CollisionMode> for String {
    fn from(mode: CollisionMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for CollisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
