//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading timecard
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::{AttendanceDayClassifier, ShiftProfileResolver};
use crate::error::{EngineError, EngineResult};

use super::types::{AttendanceTypesConfig, EngineConfig, TimecardConfig};

/// Loads and provides access to timecard configuration.
///
/// # Directory Structure
///
/// ```text
/// config/timecard/
/// ├── engine.yaml            # Rest allowance and shift profiles
/// └── attendance_types.yaml  # Optional extra attendance labels
/// ```
///
/// # Example
///
/// ```no_run
/// use timecard_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/timecard").unwrap();
/// println!("Rest allowance: {} minutes", loader.rest_allowance_minutes());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TimecardConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if engine.yaml is missing, if any file contains
    /// invalid YAML, or if a profile threshold is zero.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let engine = Self::load_yaml::<EngineConfig>(&engine_path)?;
        Self::validate(&engine)?;

        let attendance_path = path.join("attendance_types.yaml");
        let attendance = if attendance_path.exists() {
            Self::load_yaml::<AttendanceTypesConfig>(&attendance_path)?
        } else {
            AttendanceTypesConfig::default()
        };

        Ok(Self {
            config: TimecardConfig::new(engine, attendance.attendance_types),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: TimecardConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(engine: &EngineConfig) -> EngineResult<()> {
        let profiles = [
            ("day_shift", &engine.profiles.day_shift),
            ("night_shift", &engine.profiles.night_shift),
        ];
        for (name, profile) in profiles {
            if profile.standard_threshold_minutes == 0 {
                return Err(EngineError::InvalidConfig {
                    field: format!("profiles.{}.standard_threshold_minutes", name),
                    message: "must be positive".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &TimecardConfig {
        &self.config
    }

    /// Returns the rest allowance in minutes.
    pub fn rest_allowance_minutes(&self) -> u32 {
        self.config.engine().rest_allowance_minutes
    }

    /// Builds the attendance classifier: the built-in table plus configured labels.
    pub fn classifier(&self) -> AttendanceDayClassifier {
        let mut classifier = AttendanceDayClassifier::default();
        for entry in self.config.attendance_types() {
            classifier.insert(entry.label.clone(), entry.category);
        }
        classifier
    }

    /// Builds the shift profile resolver from the configured profiles.
    pub fn profile_resolver(&self) -> ShiftProfileResolver {
        let profiles = &self.config.engine().profiles;
        ShiftProfileResolver::new(
            profiles.day_shift.to_profile(false),
            profiles.night_shift.to_profile(true),
        )
    }
}
