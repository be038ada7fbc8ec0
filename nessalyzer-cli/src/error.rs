//! CLI-specific error types and exit code mapping

use nessalyzer_core::error::NessalyzerError;
use nessalyzer_export::ExporterError;
use nessalyzer_report::ReportError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Parsing the .nessus file failed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Export to the requested format failed.
    #[error("export error: {0}")]
    Export(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from nessalyzer-core.
    #[error("{0}")]
    Core(#[from] NessalyzerError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                 |
    /// |------|-------------------------|
    /// | 0    | Success                 |
    /// | 1    | General / command error |
    /// | 2    | Configuration error     |
    /// | 3    | Parse error             |
    /// | 4    | Export error            |
    /// | 10   | IO error                |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Parse(_) => 3,
            Self::Export(_) => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<ReportError> for CliError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::Io { .. } => Self::Io(std::io::Error::other(e.to_string())),
            other => Self::Parse(other.to_string()),
        }
    }
}

impl From<ExporterError> for CliError {
    fn from(e: ExporterError) -> Self {
        Self::Export(e.to_string())
    }
}
