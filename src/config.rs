//! Runtime configuration, loaded from TOML.
//!
//! Every field is optional in the file; missing fields fall back to the
//! crate constants.
//!
//! ```toml
//! cache_capacity = 256
//! follow_up_probability = 0.3
//! smooth_transition_secs = 30
//! assistant_name = "MIORA"
//! seed = 42
//! max_sessions = 1024
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

fn default_cache_capacity() -> usize {
    crate::CACHE_CAPACITY
}

fn default_follow_up_probability() -> f64 {
    crate::FOLLOW_UP_PROBABILITY
}

fn default_smooth_transition_secs() -> u64 {
    crate::SMOOTH_TRANSITION_SECS
}

fn default_history_capacity() -> usize {
    crate::HISTORY_CAPACITY
}

fn default_max_sessions() -> usize {
    crate::MAX_SESSIONS
}

fn default_assistant_name() -> String {
    crate::ASSISTANT_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reply cache entries kept per session
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Chance of an unsolicited follow-up question (0.0 - 1.0)
    #[serde(default = "default_follow_up_probability")]
    pub follow_up_probability: f64,
    /// Seconds after a topic change past which switches need no bridge phrase
    #[serde(default = "default_smooth_transition_secs")]
    pub smooth_transition_secs: u64,
    /// Turns kept in the topic history
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Speaker label used for replies in topic context
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
    /// Fixed RNG seed; random per session when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Live sessions the API server keeps before answering 503
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            follow_up_probability: default_follow_up_probability(),
            smooth_transition_secs: default_smooth_transition_secs(),
            history_capacity: default_history_capacity(),
            assistant_name: default_assistant_name(),
            seed: None,
            max_sessions: default_max_sessions(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(EngineError::Config("cache_capacity must be at least 1".into()));
        }
        if self.max_sessions == 0 {
            return Err(EngineError::Config("max_sessions must be at least 1".into()));
        }
        if self.history_capacity == 0 {
            return Err(EngineError::Config("history_capacity must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.follow_up_probability) {
            return Err(EngineError::Config(format!(
                "follow_up_probability must be within 0.0..=1.0, got {}",
                self.follow_up_probability
            )));
        }
        if self.assistant_name.trim().is_empty() {
            return Err(EngineError::Config("assistant_name must not be blank".into()));
        }
        Ok(())
    }
}
