//! Session statistics

use serde::{Deserialize, Serialize};

use crate::ACTIVE_TOPICS_LIMIT;

/// Running counters for one conversation session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Smoothed reply latency: each sample moves the average halfway toward it
    pub average_response_ms: f64,
    pub conversation_turns: u64,
    pub topic_switches: u64,
    /// Distinct recent topics, oldest first
    pub active_topics: Vec<String>,
    pub cache_hits: u64,
    pub cache_size: usize,
}

impl EngineStats {
    /// Record a completed turn
    pub fn record_turn(
        &mut self,
        processing_ms: u64,
        topic: &str,
        switched: bool,
        cache_hit: bool,
    ) {
        self.average_response_ms = if self.conversation_turns == 0 {
            processing_ms as f64
        } else {
            (self.average_response_ms + processing_ms as f64) / 2.0
        };
        self.conversation_turns += 1;
        if switched {
            self.topic_switches += 1;
        }
        if cache_hit {
            self.cache_hits += 1;
        }
        self.note_topic(topic);
    }

    fn note_topic(&mut self, topic: &str) {
        self.active_topics.retain(|t| t != topic);
        self.active_topics.push(topic.to_string());
        if self.active_topics.len() > ACTIVE_TOPICS_LIMIT {
            let excess = self.active_topics.len() - ACTIVE_TOPICS_LIMIT;
            self.active_topics.drain(..excess);
        }
    }

    /// Fraction of turns answered from the cache
    pub fn cache_hit_rate(&self) -> f64 {
        if self.conversation_turns == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / self.conversation_turns as f64
    }
}
