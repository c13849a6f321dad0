use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Error kind for environment failures: anything that prevents a submission
/// from being loaded and parsed in the first place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    /// The submission file does not exist.
    NotFound,
    /// The file exists but could not be read.
    Unreadable,
    /// The file was read but is not parseable as markup at all.
    Malformed,
}

/// Produced while loading or parsing a submission, before any rule runs.
///
/// Environment errors are the only error tier in the system: a rule whose
/// pass condition is not met produces a `Fail` entry in the report, never
/// an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceError {
    pub kind: SourceErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SourceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        SourceError {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
            path: None,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for SourceError {}

/// Produced by `validate` when the requested rule set is not registered.
///
/// Rule sets are fixed at build time; there is no runtime configuration
/// surface, so an unknown name is always a caller bug, not a grading
/// outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigError {
    pub name: String,
    pub known: Vec<String>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown rule set '{}' (known rule sets: {})",
            self.name,
            self.known.join(", ")
        )
    }
}

impl std::error::Error for ConfigError {}

/// Combined error type for the `grade` entry point.
#[derive(Clone, Debug)]
pub enum GradeError {
    Source(SourceError),
    Config(ConfigError),
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeError::Source(e) => write!(f, "source error: {}", e),
            GradeError::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl std::error::Error for GradeError {}

impl From<SourceError> for GradeError {
    fn from(e: SourceError) -> Self {
        GradeError::Source(e)
    }
}

impl From<ConfigError> for GradeError {
    fn from(e: ConfigError) -> Self {
        GradeError::Config(e)
    }
}
