//! Error types for the timecard engine.
//!
//! The minute calculations themselves are total and never fail. Errors only
//! arise while loading configuration or while validating inputs at the
//! boundary where raw clock punches enter the engine.

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for the timecard engine.
///
/// # Example
///
/// ```
/// use timecard_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A work interval whose exit is not after its entry.
    #[error("Invalid work interval for assignment '{assignment_id}': exit {exit} is not after entry {entry}")]
    InvalidInterval {
        /// The assignment the interval was recorded against.
        assignment_id: String,
        /// The clock-in timestamp.
        entry: NaiveDateTime,
        /// The clock-out timestamp.
        exit: NaiveDateTime,
    },

    /// A year/month pair that does not name a calendar month.
    #[error("Invalid period {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field() {
        let error = EngineError::InvalidConfig {
            field: "profiles.day_shift.standard_threshold_minutes".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration field 'profiles.day_shift.standard_threshold_minutes': must be positive"
        );
    }

    #[test]
    fn test_invalid_interval_displays_timestamps() {
        let error = EngineError::InvalidInterval {
            assignment_id: "matter_01".to_string(),
            entry: make_datetime("2026-04-01 17:00:00"),
            exit: make_datetime("2026-04-01 09:00:00"),
        };
        assert_eq!(
            error.to_string(),
            "Invalid work interval for assignment 'matter_01': exit 2026-04-01 09:00:00 is not after entry 2026-04-01 17:00:00"
        );
    }

    #[test]
    fn test_invalid_period_pads_month() {
        let error = EngineError::InvalidPeriod {
            year: 2026,
            month: 13,
        };
        assert_eq!(error.to_string(), "Invalid period 2026-13");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
