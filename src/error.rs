//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::FinderError;

/// Exit codes for the dejavu application.
///
/// - 0: Success (completed normally)
/// - 1: General error (invalid input, scan failure, or a deletion that stopped the run)
/// - 3: Partial success (`--keep-going` and some deletions failed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and every planned deletion succeeded.
    Success = 0,
    /// General error: The run failed or was stopped by an error.
    GeneralError = 1,
    /// Partial success: Some deletions failed but the rest were attempted.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DJ000",
            Self::GeneralError => "DJ001",
            Self::PartialSuccess => "DJ003",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DJ001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the supplied path was the problem
    pub invalid_input: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
            invalid_input: err
                .downcast_ref::<FinderError>()
                .is_some_and(FinderError::is_invalid_input),
        }
    }
}
