//! Configuration loading and management for the timecard engine.
//!
//! This module loads the rest allowance, the two shift profiles, and any
//! additional attendance labels from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timecard_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/timecard").unwrap();
//! println!("Rest allowance: {}", config.rest_allowance_minutes());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceLabelEntry, AttendanceTypesConfig, DEFAULT_REST_ALLOWANCE_MINUTES, EngineConfig,
    ProfileConfig, ProfilesConfig, TimecardConfig,
};
