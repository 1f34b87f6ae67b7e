//! Core modules for the discourse engine

pub mod phrases;
pub mod classifier;
pub mod tracker;
pub mod shaper;
pub mod templates;
pub mod cache;
pub mod telemetry;
pub mod session;
pub mod api;

pub use classifier::DiscourseClassifier;
pub use tracker::{TopicTracker, TrackOutcome};
pub use shaper::{ResponseShaper, estimate_duration_seconds};
pub use templates::{DefaultTemplates, ReplySource};
pub use cache::ResponseCache;
pub use telemetry::{MemorySink, TracingSink, TurnEvent, TurnSink};
pub use session::ConversationSession;
pub use api::{create_router, run_server};
