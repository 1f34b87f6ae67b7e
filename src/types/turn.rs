//! Topic history model
//!
//! - TopicTurn = one completed user/reply exchange, tagged with its topic
//! - TopicHistory = capacity-bounded log of recent turns (oldest evicted first)

use std::collections::VecDeque;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::HISTORY_CAPACITY;

/// A single completed turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTurn {
    /// Topic the turn was classified under
    pub topic: String,
    /// When the turn was committed
    pub timestamp: DateTime<Utc>,
    /// What the user said
    pub user_input: String,
    /// What the engine answered
    pub reply: String,
    /// Topic depth after this turn was committed
    pub depth_at_turn: u32,
}

impl TopicTurn {
    /// Create a new turn stamped with the current time
    pub fn new(
        topic: impl Into<String>,
        user_input: impl Into<String>,
        reply: impl Into<String>,
        depth_at_turn: u32,
    ) -> Self {
        Self {
            topic: topic.into(),
            timestamp: Utc::now(),
            user_input: user_input.into(),
            reply: reply.into(),
            depth_at_turn,
        }
    }
}

/// Bounded topic history, chronological (oldest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicHistory {
    turns: VecDeque<TopicTurn>,
    capacity: usize,
}

impl Default for TopicHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicHistory {
    /// Create history with the default capacity (10)
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Create history with a custom capacity (at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn and evict the oldest entries past capacity
    pub fn push(&mut self, turn: TopicTurn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// All turns, oldest first
    pub fn turns(&self) -> impl DoubleEndedIterator<Item = &TopicTurn> {
        self.turns.iter()
    }

    /// Most recent turns on `topic`, newest first, at most `limit`
    pub fn recent_on<'a>(
        &'a self,
        topic: &'a str,
        limit: usize,
    ) -> impl Iterator<Item = &'a TopicTurn> + 'a {
        self.turns
            .iter()
            .rev()
            .filter(move |t| t.topic == topic)
            .take(limit)
    }

    /// Most recent turn, if any
    pub fn last(&self) -> Option<&TopicTurn> {
        self.turns.back()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// =============================================================================
// TESTS
// =============================================================================
