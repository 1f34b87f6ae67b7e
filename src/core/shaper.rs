//! Response Shaper: conversational framing and spoken-duration estimate
//!
//! Randomness comes from an injected RNG so a seeded shaper is fully
//! reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::core::phrases::{
    expressions, follow_up_questions, structure_transitions, ExpressionCategory, QUICK_CASUAL,
    QUICK_FALLBACK, QUICK_GREETING, QUICK_POSITIVE,
};
use crate::types::{
    ConversationFlow, DiscourseSignal, Intent, OptimizedResponse, ResponseStrategy, Sentiment,
    Structure, Tone,
};
use crate::{FOLLOW_UP_PROBABILITY, SPEECH_SECONDS_PER_WORD};

/// Response shaper over any RNG
#[derive(Debug)]
pub struct ResponseShaper<R = StdRng> {
    rng: R,
    follow_up_probability: f64,
}

impl ResponseShaper<StdRng> {
    /// Shaper seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible shaper
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ResponseShaper<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            follow_up_probability: FOLLOW_UP_PROBABILITY,
        }
    }

    /// Override the unsolicited follow-up chance (clamped to 0.0 - 1.0)
    pub fn with_follow_up_probability(mut self, probability: f64) -> Self {
        self.follow_up_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    /// Derive shaping decisions; draws from the RNG only when the turn does
    /// not already require a follow-up
    pub fn strategy(&mut self, signal: &DiscourseSignal) -> ResponseStrategy {
        let tone = if signal.sentiment == Sentiment::Excited {
            Tone::Casual
        } else if signal.sentiment == Sentiment::Curious {
            Tone::Thoughtful
        } else if signal.intent == Intent::Request {
            Tone::Advisory
        } else {
            Tone::Inquisitive
        };

        let include_question =
            signal.requires_follow_up || self.rng.gen_bool(self.follow_up_probability);

        ResponseStrategy {
            structure: Structure::from(signal.complexity),
            tone,
            include_question,
            use_personal_expression: signal.conversation_flow == ConversationFlow::Continuing
                || signal.intent == Intent::Opinion,
        }
    }

    /// Shape a base reply for the given signal
    pub fn optimize(
        &mut self,
        base_reply: &str,
        signal: &DiscourseSignal,
        topic_context: Option<&str>,
    ) -> OptimizedResponse {
        let strategy = self.strategy(signal);
        let has_context = topic_context.is_some_and(|c| !c.trim().is_empty());

        let content = if strategy.use_personal_expression {
            let category = expression_category(signal, has_context);
            let opener = self.pick(expressions(category)).unwrap_or_default();
            format!("{}{}", opener, lowercase_first(base_reply))
        } else if strategy.structure != Structure::Short {
            let transition = self
                .pick(structure_transitions(strategy.structure))
                .unwrap_or_default();
            format!("{}{}", transition, base_reply)
        } else {
            base_reply.to_string()
        };

        let follow_up_question = if strategy.include_question {
            self.pick(follow_up_questions(&signal.topic)).map(str::to_string)
        } else {
            None
        };

        OptimizedResponse {
            estimated_duration_seconds: estimate_duration_seconds(&content),
            content,
            follow_up_question,
            tone: strategy.tone,
        }
    }

    /// Canned fast-path reply; never empty
    pub fn create_quick_response(&mut self, signal: &DiscourseSignal) -> String {
        let table = if signal.intent == Intent::Greeting {
            QUICK_GREETING
        } else if signal.intent == Intent::Casual {
            QUICK_CASUAL
        } else if signal.sentiment == Sentiment::Positive {
            QUICK_POSITIVE
        } else {
            QUICK_FALLBACK
        };

        self.pick(table)
            .or_else(|| QUICK_FALLBACK.first().copied())
            .unwrap_or("Oke.")
            .to_string()
    }

    fn pick(&mut self, options: &'static [&'static str]) -> Option<&'static str> {
        options.choose(&mut self.rng).copied()
    }
}

/// Opener category: agreeing for positive/opinion, thinking for
/// curious/question or an ongoing thread, otherwise opening
fn expression_category(signal: &DiscourseSignal, has_context: bool) -> ExpressionCategory {
    if signal.sentiment == Sentiment::Positive || signal.intent == Intent::Opinion {
        ExpressionCategory::Agreeing
    } else if signal.sentiment == Sentiment::Curious
        || signal.intent == Intent::Question
        || has_context
    {
        ExpressionCategory::Thinking
    } else {
        ExpressionCategory::Opening
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `ceil(words × 0.6)` seconds; 0 for empty content
pub fn estimate_duration_seconds(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    (words as f64 * SPEECH_SECONDS_PER_WORD).ceil() as u32
}

// =============================================================================
// TESTS
// =============================================================================
