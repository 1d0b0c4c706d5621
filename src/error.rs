//! Error types for bridge operations.
//!
//! This module defines [`BridgeError`], the primary error type used throughout
//! the bridge, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe failures are never errors: the prober downgrades them to
//!   "not installed" and the caller decides what to do
//! - A single install strategy failing is recorded and retried with the
//!   next strategy; only the last failure escalates as `InstallFailed`
//! - `SpawnFailed` means the target program could not be launched at all,
//!   which is distinct from the target exiting non-zero (that is data,
//!   reported in the command result)
//! - Use `anyhow::Error` (via `BridgeError::Other`) for unexpected errors

use thiserror::Error;

/// Core error type for bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The target program could not be launched at all.
    #[error("Failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An install strategy failed. `code` is the pip exit code,
    /// or `None` when pip itself could not be spawned.
    #[error("Install strategy '{strategy}' failed with exit code {code:?}")]
    InstallFailed {
        strategy: String,
        code: Option<i32>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failed_displays_command_and_source() {
        let err = BridgeError::SpawnFailed {
            command: "python3 cli.py".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3 cli.py"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn install_failed_displays_strategy_and_code() {
        let err = BridgeError::InstallFailed {
            strategy: "user install".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("user install"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn install_failed_without_code_displays_none() {
        let err = BridgeError::InstallFailed {
            strategy: "global install".into(),
            code: None,
        };
        assert!(err.to_string().contains("None"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BridgeError = io_err.into();
        assert!(matches!(err, BridgeError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(BridgeError::InstallFailed {
                strategy: "test".into(),
                code: Some(2),
            })
        }
        assert!(returns_error().is_err());
    }
}
