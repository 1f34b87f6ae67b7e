//! Discourse signal structures produced by the classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the speaker is trying to do with the utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Question,
    Opinion,
    Statement,
    Request,
    Greeting,
    Casual,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Question => "question",
            Intent::Opinion => "opinion",
            Intent::Statement => "statement",
            Intent::Request => "request",
            Intent::Greeting => "greeting",
            Intent::Casual => "casual",
        }
    }
}

/// Emotional colour of the utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Curious,
    Excited,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Curious => "curious",
            Sentiment::Excited => "excited",
        }
    }
}

/// Length bucket of the utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

/// Where the utterance sits in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationFlow {
    Opening,
    Continuing,
    Closing,
    TopicSwitch,
}

impl ConversationFlow {
    pub fn label(&self) -> &'static str {
        match self {
            ConversationFlow::Opening => "opening",
            ConversationFlow::Continuing => "continuing",
            ConversationFlow::Closing => "closing",
            ConversationFlow::TopicSwitch => "topic_switch",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_via_label!(Intent, Sentiment, Complexity, ConversationFlow);

/// Full classification of one utterance. Every field is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscourseSignal {
    pub intent: Intent,
    /// Topic label from the keyword table, `general` when nothing matched
    pub topic: String,
    pub sentiment: Sentiment,
    pub complexity: Complexity,
    pub requires_follow_up: bool,
    pub conversation_flow: ConversationFlow,
}

impl DiscourseSignal {
    /// One-line summary for logs and verbose output
    pub fn summary(&self) -> String {
        format!(
            "intent={} topic={} sentiment={} complexity={} follow_up={} flow={}",
            self.intent,
            self.topic,
            self.sentiment,
            self.complexity,
            self.requires_follow_up,
            self.conversation_flow
        )
    }
}
