use std::fmt;

use crate::model::LevelId;

pub type AppResult<T = ()> = Result<T, AppError>;

/// Input that does not satisfy an operation's documented ordering
/// precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Name of the operation whose precondition failed.
    pub operation: &'static str,
    /// Index of the first offending submission.
    pub index: usize,
    pub message: String,
}
impl InvariantViolation {
    pub(crate) fn new(operation: &'static str, index: usize, message: impl Into<String>) -> Self {
        Self {
            operation,
            index,
            message: message.into(),
        }
    }
}
impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} precondition violated at submission {}: {}",
            self.operation, self.index, self.message,
        )
    }
}
impl std::error::Error for InvariantViolation {}

#[derive(Debug)]
pub enum AppError {
    InvariantViolation(InvariantViolation),
    Json(serde_json::Error),
    Io(std::io::Error),
    UnknownLevel(LevelId),
    InvalidArgument(String),
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            Self::InvariantViolation(err) => err.to_string(),
            Self::Json(err) => format!("Invalid JSON: {err}"),
            Self::Io(err) => format!("I/O error: {err}"),
            Self::UnknownLevel(id) => format!("Level {id} does not exist"),
            Self::InvalidArgument(msg) => format!("Invalid argument: {msg}"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvariantViolation(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvariantViolation> for AppError {
    fn from(err: InvariantViolation) -> AppError {
        AppError::InvariantViolation(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> AppError {
        AppError::Json(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> AppError {
        AppError::Io(err)
    }
}
