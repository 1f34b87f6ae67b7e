//! Topic Continuity Tracker
//!
//! Implicit automaton over topic labels:
//! - same topic → self-loop, depth += 1
//! - new topic  → depth = 1, transition time stamped
//!
//! History is capped; the oldest turn is evicted first.

use std::time::{Duration, Instant};
use tracing::debug;

use crate::core::phrases::{generic_transition, transition_phrase};
use crate::types::{ConversationState, TopicTurn};
use crate::{ASSISTANT_NAME, CONTEXT_MAX_TURNS, HISTORY_CAPACITY, SMOOTH_TRANSITION_SECS};

/// What a committed turn did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackOutcome {
    /// Depth after the turn
    pub depth: u32,
    /// The turn changed the current topic
    pub switched: bool,
}

/// Topic tracker owning one conversation's state
#[derive(Debug)]
pub struct TopicTracker {
    state: ConversationState,
    smooth_after: Duration,
    assistant_name: String,
}

impl Default for TopicTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicTracker {
    /// Tracker with default history capacity (10) and 30 s smooth window
    pub fn new() -> Self {
        Self::with_settings(HISTORY_CAPACITY, SMOOTH_TRANSITION_SECS, ASSISTANT_NAME)
    }

    pub fn with_settings(
        history_capacity: usize,
        smooth_transition_secs: u64,
        assistant_name: impl Into<String>,
    ) -> Self {
        Self {
            state: ConversationState::with_history_capacity(history_capacity),
            smooth_after: Duration::from_secs(smooth_transition_secs),
            assistant_name: assistant_name.into(),
        }
    }

    /// Commit a completed turn
    pub fn track(&mut self, topic: &str, user_input: &str, reply: &str) -> TrackOutcome {
        self.track_at(topic, user_input, reply, Instant::now())
    }

    /// Commit a completed turn observed at `now`
    pub fn track_at(
        &mut self,
        topic: &str,
        user_input: &str,
        reply: &str,
        now: Instant,
    ) -> TrackOutcome {
        let switched = topic != self.state.current_topic;

        if switched {
            debug!(from = %self.state.current_topic, to = %topic, "topic changed");
            self.state.current_topic = topic.to_string();
            self.state.topic_depth = 1;
            self.state.last_transition = now;
        } else {
            self.state.topic_depth += 1;
        }

        let depth = self.state.topic_depth;
        self.state
            .topic_history
            .push(TopicTurn::new(topic, user_input, reply, depth));

        TrackOutcome { depth, switched }
    }

    /// Up to 3 most recent exchanges on `topic`, oldest first, or empty
    pub fn get_context(&self, topic: &str) -> String {
        let mut recent: Vec<&TopicTurn> = self
            .state
            .topic_history
            .recent_on(topic, CONTEXT_MAX_TURNS)
            .collect();
        recent.reverse();

        recent
            .iter()
            .map(|turn| {
                format!("User: {}\n{}: {}", turn.user_input, self.assistant_name, turn.reply)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// No bridge phrase is needed for a switch to `new_topic`
    pub fn should_transition_smoothly(&self, new_topic: &str) -> bool {
        self.should_transition_smoothly_at(new_topic, Instant::now())
    }

    pub fn should_transition_smoothly_at(&self, new_topic: &str, now: Instant) -> bool {
        self.state.topic_history.is_empty()
            || new_topic == self.state.current_topic
            || self.state.secs_since_transition(now) > self.smooth_after.as_secs_f64()
    }

    /// Bridge phrase for moving from one topic to another
    pub fn generate_transition(&self, from_topic: &str, to_topic: &str) -> String {
        transition_phrase(from_topic, to_topic)
            .map(str::to_string)
            .unwrap_or_else(|| generic_transition(to_topic))
    }

    /// Get current state
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn current_topic(&self) -> &str {
        &self.state.current_topic
    }

    pub fn topic_depth(&self) -> u32 {
        self.state.topic_depth
    }

    /// No turn has been tracked yet
    pub fn is_fresh(&self) -> bool {
        self.state.topic_history.is_empty() && self.state.topic_depth == 0
    }

    /// Reset to a fresh conversation, keeping settings
    pub fn reset(&mut self) {
        self.state = ConversationState::with_history_capacity(self.state.topic_history.capacity());
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let tracker = TopicTracker::new();
        assert_eq!(tracker.current_topic(), "general");
        assert_eq!(tracker.topic_depth(), 0);
        assert!(tracker.is_fresh());
    }

    #[test]
    fn test_depth_increments_on_same_topic() {
        let mut tracker = TopicTracker::new();
        for expected in 1..=4 {
            let outcome = tracker.track("business", "soal usaha", "oke");
            assert_eq!(outcome.depth, expected);
        }
        assert_eq!(tracker.topic_depth(), 4);
    }

    #[test]
    fn test_first_general_turn_counts_as_depth_one() {
        let mut tracker = TopicTracker::new();
        let outcome = tracker.track("general", "halo", "hai");
        assert_eq!(outcome, TrackOutcome { depth: 1, switched: false });
    }

    #[test]
    fn test_depth_resets_on_switch() {
        let mut tracker = TopicTracker::new();
        tracker.track("business", "a", "r");
        tracker.track("business", "b", "r");
        let outcome = tracker.track("learning", "c", "r");
        assert_eq!(outcome, TrackOutcome { depth: 1, switched: true });
        assert_eq!(tracker.current_topic(), "learning");
    }

    #[test]
    fn test_switch_stamps_transition_time() {
        let mut tracker = TopicTracker::new();
        let t0 = Instant::now();
        tracker.track_at("business", "a", "r", t0);
        assert_eq!(tracker.state().last_transition, t0);

        tracker.track_at("business", "b", "r", t0 + Duration::from_secs(5));
        assert_eq!(tracker.state().last_transition, t0);
    }

    #[test]
    fn test_history_bounded_to_ten() {
        let mut tracker = TopicTracker::new();
        for i in 0..15 {
            tracker.track("general", &format!("pesan {}", i), "balasan");
        }
        let history = &tracker.state().topic_history;
        assert_eq!(history.len(), 10);
        assert_eq!(history.turns().next().unwrap().user_input, "pesan 5");
        assert_eq!(history.last().unwrap().user_input, "pesan 14");
    }

    #[test]
    fn test_context_filters_and_limits() {
        let mut tracker = TopicTracker::new();
        tracker.track("business", "b1", "r1");
        tracker.track("learning", "l1", "x");
        tracker.track("business", "b2", "r2");
        tracker.track("business", "b3", "r3");
        tracker.track("business", "b4", "r4");

        let context = tracker.get_context("business");
        assert_eq!(context, "User: b2\nMIORA: r2\nUser: b3\nMIORA: r3\nUser: b4\nMIORA: r4");
        assert!(!context.contains("l1"));
    }

    #[test]
    fn test_context_empty_for_unseen_topic() {
        let mut tracker = TopicTracker::new();
        tracker.track("business", "b1", "r1");
        assert_eq!(tracker.get_context("technology"), "");
    }

    #[test]
    fn test_smooth_when_history_empty() {
        let tracker = TopicTracker::new();
        assert!(tracker.should_transition_smoothly("technology"));
    }

    #[test]
    fn test_smooth_rules() {
        let mut tracker = TopicTracker::new();
        let t0 = Instant::now();
        tracker.track_at("business", "a", "r", t0);

        // same topic
        assert!(tracker.should_transition_smoothly_at("business", t0));
        // different topic, too soon
        assert!(!tracker.should_transition_smoothly_at("learning", t0 + Duration::from_secs(10)));
        // exactly at the threshold is not past it
        assert!(!tracker.should_transition_smoothly_at("learning", t0 + Duration::from_secs(30)));
        // past the threshold
        assert!(tracker.should_transition_smoothly_at("learning", t0 + Duration::from_secs(31)));
    }

    #[test]
    fn test_generate_transition() {
        let tracker = TopicTracker::new();
        let mapped = tracker.generate_transition("business", "technology");
        assert!(mapped.contains("teknologi"));

        let generic = tracker.generate_transition("general", "personal");
        assert_eq!(generic, "Oke, kita beralih ke topik personal ya. ");
    }

    #[test]
    fn test_custom_assistant_name_in_context() {
        let mut tracker = TopicTracker::with_settings(10, 30, "Nara");
        tracker.track("general", "hai", "halo juga");
        assert_eq!(tracker.get_context("general"), "User: hai\nNara: halo juga");
    }

    #[test]
    fn test_reset() {
        let mut tracker = TopicTracker::with_settings(4, 30, "MIORA");
        tracker.track("business", "a", "r");
        tracker.reset();
        assert!(tracker.is_fresh());
        assert_eq!(tracker.state().topic_history.capacity(), 4);
    }
}
