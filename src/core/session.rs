//! Conversation session: the per-turn orchestration loop
//!
//! classify → cache / quick path / (context, template, bridge, shape)
//! → track → stats → telemetry

use std::sync::Arc;
use std::time::Instant;
use chrono::Utc;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::core::cache::ResponseCache;
use crate::core::classifier::DiscourseClassifier;
use crate::core::shaper::ResponseShaper;
use crate::core::telemetry::{TracingSink, TurnEvent, TurnSink};
use crate::core::templates::{DefaultTemplates, ReplySource};
use crate::core::tracker::TopicTracker;
use crate::error::{EngineError, Result};
use crate::types::{
    Complexity, ConversationFlow, ConversationState, DiscourseSignal, EngineStats, Intent,
    OptimizedResponse, ResponsePath, TurnReport,
};

/// One conversation: its tracker state, reply cache and stats
pub struct ConversationSession {
    classifier: DiscourseClassifier,
    tracker: TopicTracker,
    shaper: ResponseShaper,
    cache: ResponseCache,
    templates: Box<dyn ReplySource>,
    sink: Arc<dyn TurnSink>,
    stats: EngineStats,
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("tracker", &self.tracker)
            .field("cache_len", &self.cache.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

struct Shaped {
    reply: String,
    optimized: OptimizedResponse,
    transition_applied: bool,
}

impl ConversationSession {
    /// New session with default templates and tracing telemetry
    pub fn new(config: &EngineConfig) -> Self {
        let shaper = match config.seed {
            Some(seed) => ResponseShaper::seeded(seed),
            None => ResponseShaper::from_entropy(),
        }
        .with_follow_up_probability(config.follow_up_probability);

        Self {
            classifier: DiscourseClassifier::new(),
            tracker: TopicTracker::with_settings(
                config.history_capacity,
                config.smooth_transition_secs,
                config.assistant_name.clone(),
            ),
            shaper,
            cache: ResponseCache::new(config.cache_capacity),
            templates: Box::new(DefaultTemplates::new()),
            sink: Arc::new(TracingSink),
            stats: EngineStats::default(),
        }
    }

    /// Replace the base reply source
    pub fn with_templates(mut self, templates: Box<dyn ReplySource>) -> Self {
        self.templates = templates;
        self
    }

    /// Replace the telemetry sink
    pub fn with_sink(mut self, sink: Arc<dyn TurnSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run one full turn
    pub fn respond(&mut self, utterance: &str) -> Result<TurnReport> {
        let text = utterance.trim();
        if text.is_empty() {
            warn!("rejected blank utterance");
            return Err(EngineError::EmptyUtterance);
        }

        let start = Instant::now();
        let previous_topic = (!self.tracker.is_fresh())
            .then(|| self.tracker.current_topic().to_string());
        let signal = self.classifier.classify(text, previous_topic.as_deref());

        let cached = self.cache.get(text);
        let (reply, path, optimized, transition_applied) = if let Some(cached) = cached {
            (cached, ResponsePath::Cached, None, false)
        } else if signal.complexity == Complexity::Simple && signal.intent == Intent::Casual {
            let quick = self.shaper.create_quick_response(&signal);
            (quick, ResponsePath::Quick, None, false)
        } else {
            let shaped = self.shape(text, &signal);
            (
                shaped.reply,
                ResponsePath::Shaped,
                Some(shaped.optimized),
                shaped.transition_applied,
            )
        };

        let outcome = self.tracker.track(&signal.topic, text, &reply);
        let processing_ms = start.elapsed().as_millis() as u64;

        self.stats.record_turn(
            processing_ms,
            &signal.topic,
            outcome.switched,
            path == ResponsePath::Cached,
        );
        self.stats.cache_size = self.cache.len();

        self.sink.record(&TurnEvent {
            topic: signal.topic.clone(),
            intent: signal.intent.label(),
            path,
            topic_depth: outcome.depth,
            topic_switched: outcome.switched,
            processing_ms,
            reply_words: reply.split_whitespace().count(),
        });

        Ok(TurnReport {
            timestamp: Utc::now(),
            signal,
            reply,
            path,
            optimized,
            transition_applied,
            topic_depth: outcome.depth,
            processing_ms,
        })
    }

    fn shape(&mut self, text: &str, signal: &DiscourseSignal) -> Shaped {
        let context = self.tracker.get_context(&signal.topic);
        let mut base = self.templates.base_reply(signal.intent, &signal.topic);

        let mut transition_applied = false;
        if signal.conversation_flow == ConversationFlow::TopicSwitch
            && !self.tracker.should_transition_smoothly(&signal.topic)
        {
            let bridge = self
                .tracker
                .generate_transition(self.tracker.current_topic(), &signal.topic);
            base = format!("{}{}", bridge, base);
            transition_applied = true;
        }

        let context = (!context.is_empty()).then_some(context.as_str());
        let optimized = self.shaper.optimize(&base, signal, context);
        let reply = optimized.joined();

        if signal.complexity == Complexity::Simple {
            self.cache.insert(text, reply.clone());
        }

        Shaped {
            reply,
            optimized,
            transition_applied,
        }
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    pub fn state(&self) -> &ConversationState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &TopicTracker {
        &self.tracker
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Forget the conversation but keep settings
    pub fn reset(&mut self) {
        info!(turns = self.stats.conversation_turns, "session reset");
        self.tracker.reset();
        self.cache.clear();
        self.stats = EngineStats::default();
    }
}

// =============================================================================
// TESTS
// =============================================================================
