use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - model written, no severe findings (or not asked to fail on them)
    Success = 0,
    /// Open issues or rule violations at or above the severe thresholds
    SevereFindings = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed input, data integrity violation, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::SevereFindings => write!(f, "Severe Findings (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while building, encoding or decoding an evaluated model.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Analysis output references an id outside the known project/package set.
    #[error("Data integrity violation: no project or package with id '{id}' is known ({context})\n\n💡 Hint: The analysis result references an id that is neither a project nor a package. Please verify the upstream analyzer output")]
    MissingPackage { id: String, context: String },

    #[error("Malformed model document: unknown {kind} id {id}")]
    UnknownSurrogate { kind: &'static str, id: u32 },

    #[error("Malformed model document: duplicate {kind} id {id}")]
    DuplicateSurrogate { kind: &'static str, id: u32 },

    #[error("Malformed model document: required field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("Malformed model document: {details}")]
    MalformedDocument { details: String },

    /// The model refers to an entity that is not part of its own entity lists.
    #[error("Cannot encode model: {kind} #{index} is referenced but not part of the model")]
    UnknownEntity { kind: &'static str, index: usize },

    #[error("Invalid {kind} pattern '{pattern}'\nDetails: {details}")]
    InvalidPattern {
        kind: &'static str,
        pattern: String,
        details: String,
    },

    #[error("Failed to parse analysis result: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file contains a valid JSON or YAML analysis result")]
    AnalysisResultParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}
