//! Error types for characteristic functions, trigger extraction and native pickers

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, TriggerError>;

/// Errors that can occur while computing triggers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// Invalid input parameters (empty waveform, zero window length, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A native picker routine returned a non-zero status code
    #[error("Native routine {routine} failed with status code {code}")]
    NativeRoutine {
        routine: &'static str,
        code: i32,
    },

    /// The native picker library or one of its symbols could not be loaded
    #[error("Failed to load native picker library: {0}")]
    LibraryLoad(String),

    /// Profile (de)serialization error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TriggerError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TriggerError::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for TriggerError {
    fn from(err: serde_json::Error) -> Self {
        TriggerError::Config(err.to_string())
    }
}

impl From<libloading::Error> for TriggerError {
    fn from(err: libloading::Error) -> Self {
        TriggerError::LibraryLoad(err.to_string())
    }
}

/// Validate the waveform and window lengths shared by every characteristic function
pub(crate) fn validate_windows(waveform: &[f64], nsta: usize, nlta: usize) -> Result<()> {
    if waveform.is_empty() {
        return Err(TriggerError::invalid("Empty waveform"));
    }
    if nsta == 0 {
        return Err(TriggerError::invalid("nsta must be positive"));
    }
    if nlta == 0 {
        return Err(TriggerError::invalid("nlta must be positive"));
    }
    if nlta <= nsta {
        log::warn!(
            "nlta ({}) should be larger than nsta ({}) for a meaningful ratio",
            nlta,
            nsta
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_windows() {
        let data = vec![1.0; 10];
        assert!(validate_windows(&data, 2, 5).is_ok());
        assert!(validate_windows(&[], 2, 5).is_err());
        assert!(validate_windows(&data, 0, 5).is_err());
        assert!(validate_windows(&data, 2, 0).is_err());
        // Degenerate ordering is allowed, only warned about
        assert!(validate_windows(&data, 5, 2).is_ok());
    }

    #[test]
    fn test_native_error_names_routine() {
        let err = TriggerError::NativeRoutine { routine: "ppick", code: 3 };
        let msg = err.to_string();
        assert!(msg.contains("ppick"));
        assert!(msg.contains('3'));
    }
}
