use std::io;

/// Result type for builtin execution
pub type BuiltinResult<T> = Result<T, BuiltinError>;

/// Error type for builtin execution
///
/// Usage errors are answered with the usage block and `EX_USAGE`; every other
/// variant becomes `EXECUTION_FAILURE`.
#[derive(Debug, thiserror::Error)]
pub enum BuiltinError {
    #[error("Error - {0} is a required argument. See usage..")]
    MissingArgument(String),

    #[error("{0}")]
    Usage(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl BuiltinError {
    pub fn is_usage(&self) -> bool {
        matches!(self, BuiltinError::MissingArgument(_) | BuiltinError::Usage(_))
    }
}

impl From<&str> for BuiltinError {
    fn from(error: &str) -> Self {
        BuiltinError::Other(error.to_string())
    }
}

impl From<anyhow::Error> for BuiltinError {
    fn from(error: anyhow::Error) -> Self {
        BuiltinError::Other(format!("{error:#}"))
    }
}
