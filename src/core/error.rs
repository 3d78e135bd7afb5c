/*!
Error handling for the crypto facade.
*/

use std::io;

use thiserror::Error;

use crate::core::adaptor::ExecutionStyle;

/// Result type used throughout the facade
pub type Result<T> = std::result::Result<T, Error>;

/// Error type used throughout the facade
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The provider has no engine registered for the requested identifier
    #[error("algorithm {algorithm} is not supported by provider {provider}")]
    UnsupportedAlgorithm {
        algorithm: &'static str,
        provider: String,
    },

    /// A parameter value is well-formed but not implementable by the engine
    #[error("unsupported parameter value for {operation} on engine {engine}: {reason}")]
    UnsupportedParameterValue {
        operation: &'static str,
        engine: &'static str,
        reason: String,
    },

    /// The caller used an execution style the engine has no adaptor for
    #[error("no {style} adaptor configured for engine {engine}")]
    AdaptorMissing {
        style: ExecutionStyle,
        engine: &'static str,
    },

    /// The underlying engine reported a failure
    #[error("{operation} failed on engine {engine}: {cause}")]
    NativeOperationFailure {
        operation: &'static str,
        engine: &'static str,
        cause: String,
    },

    /// An update range fell outside the supplied buffer
    #[error("invalid update range {start}..{end} for buffer of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(io_error) => io_error,
            Error::UnsupportedAlgorithm { .. } => io::Error::new(io::ErrorKind::Unsupported, error.to_string()),
            Error::UnsupportedParameterValue { .. } => io::Error::new(io::ErrorKind::InvalidInput, error.to_string()),
            Error::AdaptorMissing { .. } => io::Error::new(io::ErrorKind::Unsupported, error.to_string()),
            Error::NativeOperationFailure { .. } => io::Error::new(io::ErrorKind::InvalidData, error.to_string()),
            Error::InvalidRange { .. } => io::Error::new(io::ErrorKind::InvalidInput, error.to_string()),
            Error::Internal(msg) => io::Error::other(msg),
        }
    }
}

/// Build a `NativeOperationFailure` for the given operation and engine
pub fn native_err<T>(operation: &'static str, engine: &'static str, cause: impl Into<String>) -> Result<T> {
    Err(Error::NativeOperationFailure {
        operation,
        engine,
        cause: cause.into(),
    })
}
