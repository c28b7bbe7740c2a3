//! Application state for the timecard API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::engine::TimecardEngine;

/// Shared application state.
///
/// Holds the configured engine, shared read-only across request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<TimecardEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: TimecardEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Creates a new application state from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(TimecardEngine::from_config(config))
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &TimecardEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_engine() {
        let state = AppState::new(TimecardEngine::default());
        let clone = state.clone();
        assert!(std::ptr::eq(state.engine(), clone.engine()));
    }
}
