//! Unified error handling for repoman Core.
//!
//! Every failure in the repository and license subsystems is one of the
//! variants of [`RepoError`]. Raw process exits and OS errors are translated
//! into these variants at the point of detection and never leak further.

use std::path::PathBuf;
use thiserror::Error;

/// Root error type for repoman Core operations.
///
/// Each variant carries a structured payload so callers can branch on the
/// kind without string matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// The external version-control tool cannot be located or executed.
    #[error("'{tool}' is not installed or not in PATH: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    /// A repository marker already exists at the target path.
    #[error("Repository already exists at {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// Empty or missing required input.
    #[error("Invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// A file targeted for staging does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The external tool exited with a nonzero status (or could not run).
    #[error("Command failed: {command}\n{stderr}")]
    OperationFailed {
        command: String,
        stderr: String,
        exit_code: Option<i32>,
    },

    /// The requested license identifier is not in the store.
    #[error("License '{id}' is not available")]
    UnknownLicense { id: String, available: Vec<String> },

    /// The license requires an author/organization name and none was given.
    #[error("License '{license}' requires an author/organization name")]
    MissingAuthor { license: String },

    /// The license template references an unknown placeholder.
    #[error("License template '{license}' is malformed at '{placeholder}'")]
    TemplateMalformed { license: String, placeholder: String },

    /// Writing license text to disk failed.
    #[error("Failed to write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },
}

impl RepoError {
    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ToolUnavailable { tool, .. } => vec![
                format!("Install '{}' and make sure it is on your PATH", tool),
                "Or point git.program at the binary in your config file".into(),
            ],
            Self::AlreadyExists { path } => vec![
                format!("'{}' is already a repository", path.display()),
                "Choose a different path or work with the existing repository".into(),
            ],
            Self::InvalidArgument { operation, reason } => vec![
                format!("{}: {}", operation, reason),
                "Use --help for usage information".into(),
            ],
            Self::FileNotFound { path } => vec![
                format!("Check that '{}' exists", path.display()),
                "Paths are resolved relative to the repository root".into(),
            ],
            Self::OperationFailed { stderr, .. } if stderr.trim().is_empty() => {
                vec!["Check the repository state and try again".into()]
            }
            Self::OperationFailed { .. } => vec![
                "See the tool output above for details".into(),
                "Fix the reported problem and retry the operation".into(),
            ],
            Self::UnknownLicense { available, .. } => {
                let mut suggestions = vec!["Available licenses:".to_string()];
                suggestions.extend(available.iter().map(|id| format!("  • {id}")));
                suggestions
            }
            Self::MissingAuthor { license } => vec![
                format!("{} needs a copyright holder", license),
                "Pass --author \"Your Name\" or set license.default_author".into(),
            ],
            Self::TemplateMalformed { license, .. } => vec![
                format!("The '{}' template is corrupt", license),
                "Only {year} and {name} placeholders are supported".into(),
                "Use {{ and }} for literal braces".into(),
            ],
            Self::WriteFailed { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. }
            | Self::InvalidArgument { .. }
            | Self::MissingAuthor { .. } => ErrorCategory::Validation,
            Self::FileNotFound { .. } | Self::UnknownLicense { .. } => ErrorCategory::NotFound,
            Self::ToolUnavailable { .. } | Self::TemplateMalformed { .. } => {
                ErrorCategory::Configuration
            }
            Self::OperationFailed { .. } => ErrorCategory::Tool,
            Self::WriteFailed { .. } => ErrorCategory::Io,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Nothing in repoman retries automatically; this only tells the caller
    /// that adjusting the environment and trying again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::OperationFailed { .. } | Self::WriteFailed { .. }
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Tool,
    Io,
}

/// Convenient result type alias.
pub type RepoResult<T> = Result<T, RepoError>;
