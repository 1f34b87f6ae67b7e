//! Core types for the discourse engine

mod state;
mod signals;
mod output;
mod turn;
mod response;
mod stats;

pub use state::ConversationState;
pub use signals::{Intent, Sentiment, Complexity, ConversationFlow, DiscourseSignal};
pub use output::{TurnReport, ResponsePath};
pub use turn::{TopicTurn, TopicHistory};
pub use response::{Structure, Tone, ResponseStrategy, OptimizedResponse};
pub use stats::EngineStats;
