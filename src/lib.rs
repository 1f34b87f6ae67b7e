//! Discourse Engine: turn-based conversational pipeline
//!
//! utterance → classifier → topic tracker → response shaper → reply

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{EngineError, Result};

// =============================================================================
// CLASSIFIER THRESHOLDS
// =============================================================================

/// Utterances longer than this many characters are `complex`
pub const COMPLEXITY_COMPLEX_CHARS: usize = 100;

/// Utterances longer than this many characters are `moderate`
pub const COMPLEXITY_MODERATE_CHARS: usize = 30;

/// Topic label used when no keyword table matches
pub const DEFAULT_TOPIC: &str = "general";

// =============================================================================
// TRACKER LIMITS
// =============================================================================

/// Number of turns kept in the topic history (oldest evicted first)
pub const HISTORY_CAPACITY: usize = 10;

/// Maximum history entries returned as topic context
pub const CONTEXT_MAX_TURNS: usize = 3;

/// Seconds after a topic change past which a new switch needs no bridge phrase
pub const SMOOTH_TRANSITION_SECS: u64 = 30;

// =============================================================================
// SHAPER CONSTANTS
// =============================================================================

/// Spoken seconds per word for Indonesian speech output
pub const SPEECH_SECONDS_PER_WORD: f64 = 0.6;

/// Chance of adding a follow-up question when the turn does not require one
pub const FOLLOW_UP_PROBABILITY: f64 = 0.3;

// =============================================================================
// SESSION
// =============================================================================

/// Reply cache capacity per session
pub const CACHE_CAPACITY: usize = 256;

/// Number of distinct recent topics reported in session stats
pub const ACTIVE_TOPICS_LIMIT: usize = 5;

/// Live sessions the API server holds before refusing new ones
pub const MAX_SESSIONS: usize = 1024;

/// Speaker label for the assistant in topic context
pub const ASSISTANT_NAME: &str = "MIORA";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
