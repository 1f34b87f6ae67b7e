//! Conversation state owned by the topic tracker

use std::time::Instant;
use serde::{Deserialize, Serialize};

use crate::types::TopicHistory;
use crate::DEFAULT_TOPIC;

/// Rolling state of one conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Topic of the most recent turn, `general` before any turn
    pub current_topic: String,
    /// Recent turns, bounded
    pub topic_history: TopicHistory,
    /// Consecutive turns on `current_topic` (0 before any turn)
    pub topic_depth: u32,
    /// When the topic last changed (session start initially; not serialized)
    #[serde(skip, default = "Instant::now")]
    pub last_transition: Instant,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    /// Fresh state: topic `general`, depth 0, empty history
    pub fn new() -> Self {
        Self::with_history_capacity(crate::HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            current_topic: DEFAULT_TOPIC.to_string(),
            topic_history: TopicHistory::with_capacity(capacity),
            topic_depth: 0,
            last_transition: Instant::now(),
        }
    }

    /// Seconds elapsed since the last topic change, measured at `now`
    pub fn secs_since_transition(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.last_transition).as_secs_f64()
    }
}
