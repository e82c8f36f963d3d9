//! Error types for the grading pipeline.
//!
//! Every variant is fatal to a grading run: nothing is retried and no partial
//! verdict is produced once one of these surfaces.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GradeError>;

/// Errors that can occur while grading one submission.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The configured pattern found no function name in the submission.
    #[error("{input} has no match to /{pattern}/ regex")]
    Extraction { input: String, pattern: String },

    /// The configured function-name pattern does not compile.
    #[error("Invalid function name pattern /{pattern}/: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// No fixture directory exists for the question.
    #[error("Question {0} does not exist")]
    QuestionNotFound(String),

    /// The fixture exists but cannot be graded.
    #[error("Question {question} is malformed: {reason}")]
    MalformedQuestion { question: String, reason: String },

    /// The template asset is missing.
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// The template does not contain the injection placeholder.
    #[error("Template {} does not contain placeholder '{placeholder}'", .path.display())]
    PlaceholderMissing { path: PathBuf, placeholder: String },

    /// The candidate process could not be spawned or exited unsuccessfully.
    #[error("Execution of {} failed ({status}): {stderr}", .artifact.display())]
    Execution {
        artifact: PathBuf,
        status: String,
        stderr: String,
    },

    /// The candidate process exceeded the configured timeout and was killed.
    #[error("Execution of {} timed out after {timeout_ms}ms", .artifact.display())]
    ExecutionTimeout { artifact: PathBuf, timeout_ms: u64 },

    /// IO error with the operation that caused it.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GradeError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        GradeError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn malformed(question: &str, reason: impl Into<String>) -> Self {
        GradeError::MalformedQuestion {
            question: question.to_string(),
            reason: reason.into(),
        }
    }
}
