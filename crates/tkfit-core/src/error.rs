//! Error handling for the TKFIT telemetry crates

use thiserror::Error;

/// Result type alias for TKFIT operations
pub type TkfitResult<T> = Result<T, TkfitError>;

/// Error type shared by generation, configuration and export
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TkfitError {
    /// Session or generator configuration rejected
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },

    /// Samples do not form a valid series
    #[error("Invalid series: {reason}")]
    InvalidSeries {
        /// Description of the violated invariant
        reason: String,
    },

    /// Exported row could not be turned back into a sample
    #[error("Malformed row {row}: {reason}")]
    MalformedRow {
        /// 1-based data row (header excluded)
        row: usize,
        /// What was wrong with it
        reason: String,
    },

    /// CSV encoding or decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure while exporting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::error::TkfitError::InvalidConfig {
            reason: format!($($arg)*),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TkfitError::MalformedRow {
            row: 12,
            reason: "missing heart_rate".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Malformed row"));
        assert!(display.contains("12"));
        assert!(display.contains("heart_rate"));
    }

    #[test]
    fn test_config_error_macro() {
        let error = config_error!("match duration {} must be positive", 0);
        match error {
            TkfitError::InvalidConfig { reason } => {
                assert_eq!(reason, "match duration 0 must be positive");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
