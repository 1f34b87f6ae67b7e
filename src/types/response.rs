//! Response shaping structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Complexity;

/// Length/shape of the reply, mirrors utterance complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    Short,
    Medium,
    Detailed,
}

impl From<Complexity> for Structure {
    fn from(complexity: Complexity) -> Self {
        match complexity {
            Complexity::Simple => Structure::Short,
            Complexity::Moderate => Structure::Medium,
            Complexity::Complex => Structure::Detailed,
        }
    }
}

/// Voice the reply is delivered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Casual,
    Thoughtful,
    Advisory,
    Inquisitive,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tone::Casual => "casual",
            Tone::Thoughtful => "thoughtful",
            Tone::Advisory => "advisory",
            Tone::Inquisitive => "inquisitive",
        };
        f.write_str(name)
    }
}

/// Shaping decisions derived from a discourse signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStrategy {
    pub structure: Structure,
    pub tone: Tone,
    pub include_question: bool,
    pub use_personal_expression: bool,
}

/// A shaped reply ready for display or speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedResponse {
    /// Reply text with conversational framing
    pub content: String,
    /// Follow-up question, kept separate so the caller decides how to join it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_question: Option<String>,
    pub tone: Tone,
    /// Spoken duration of `content`, rounded up
    pub estimated_duration_seconds: u32,
}

impl OptimizedResponse {
    /// Content and follow-up joined with a single space
    pub fn joined(&self) -> String {
        match &self.follow_up_question {
            Some(question) => format!("{} {}", self.content, question),
            None => self.content.clone(),
        }
    }
}
