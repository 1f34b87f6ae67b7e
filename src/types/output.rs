//! Per-turn output structures for display and the API

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{DiscourseSignal, OptimizedResponse};

/// Which branch of the turn loop produced the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePath {
    /// Reused from the reply cache
    Cached,
    /// Canned fast-path reply for trivial turns
    Quick,
    /// Full template lookup and shaping
    Shaped,
}

impl ResponsePath {
    pub fn label(&self) -> &'static str {
        match self {
            ResponsePath::Cached => "cached",
            ResponsePath::Quick => "quick",
            ResponsePath::Shaped => "shaped",
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            ResponsePath::Cached => text.bright_black(),
            ResponsePath::Quick => text.yellow(),
            ResponsePath::Shaped => text.green(),
        }
    }
}

impl fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything one turn produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReport {
    pub timestamp: DateTime<Utc>,
    /// Classification of the user utterance
    pub signal: DiscourseSignal,
    /// Final reply text (content plus follow-up when present)
    pub reply: String,
    pub path: ResponsePath,
    /// Shaping details, only on the shaped path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimized: Option<OptimizedResponse>,
    /// A bridge phrase was prepended for a topic switch
    pub transition_applied: bool,
    /// Topic depth after this turn was tracked
    pub topic_depth: u32,
    pub processing_ms: u64,
}

impl TurnReport {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let meta = format!(
            "[{} | {} | {} | depth={}]",
            self.path, self.signal.intent, self.signal.topic, self.topic_depth
        );
        format!("{} {}", self.path.paint(&meta), self.reply)
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "path={} | intent={} | topic={} | flow={} | depth={} | reply={}",
            self.path,
            self.signal.intent,
            self.signal.topic,
            self.signal.conversation_flow,
            self.topic_depth,
            self.reply
        )
    }
}
