#![allow(dead_code)]

use serde::Serialize;
use thiserror::Error;

/// Why a file could not be turned into a descriptor. These never abort the
/// run; each one routes the file to the review folder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("unsupported container: {0}")]
    Unsupported(String),
    #[error("corrupt or unreadable stream: {0}")]
    Corrupt(String),
    #[error("i/o failure: {0}")]
    Io(String),
}

/// A filesystem side effect that failed. Recorded on the action log entry
/// it belongs to; never rolls back other files.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to move {path}: {detail}")]
    Move { path: String, detail: String },
    #[error("failed to copy {path}: {detail}")]
    Copy { path: String, detail: String },
    #[error("failed to delete {path}: {detail}")]
    Delete { path: String, detail: String },
}

/// Stable machine-readable code attached to every action log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    MissingTags,
    UnsupportedFormat,
    CorruptStream,
    IoFailure,
    FirstSighting,
    BetterContainer,
    BetterSignals,
    WorseContainer,
    WorseSignals,
    EqualQualityTie,
    FinalPlacement,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingTags => "MISSING_TAGS",
            Self::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            Self::CorruptStream => "CORRUPT_STREAM",
            Self::IoFailure => "IO_FAILURE",
            Self::FirstSighting => "FIRST_SIGHTING",
            Self::BetterContainer => "BETTER_CONTAINER",
            Self::BetterSignals => "BETTER_SIGNALS",
            Self::WorseContainer => "WORSE_CONTAINER",
            Self::WorseSignals => "WORSE_SIGNALS",
            Self::EqualQualityTie => "EQUAL_QUALITY_TIE",
            Self::FinalPlacement => "FINAL_PLACEMENT",
        }
    }
}

impl From<&ExtractionError> for ReasonCode {
    fn from(err: &ExtractionError) -> Self {
        match err {
            ExtractionError::Unsupported(_) => ReasonCode::UnsupportedFormat,
            ExtractionError::Corrupt(_) => ReasonCode::CorruptStream,
            ExtractionError::Io(_) => ReasonCode::IoFailure,
        }
    }
}
