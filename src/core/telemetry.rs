//! Write-only turn telemetry

use std::sync::{Arc, Mutex};
use tracing::info;

use crate::types::ResponsePath;

/// One committed turn, as seen by telemetry
#[derive(Debug, Clone, PartialEq)]
pub struct TurnEvent {
    pub topic: String,
    pub intent: &'static str,
    pub path: ResponsePath,
    pub topic_depth: u32,
    pub topic_switched: bool,
    pub processing_ms: u64,
    pub reply_words: usize,
}

/// Fire-and-forget sink; implementations must not fail the turn
pub trait TurnSink: Send + Sync {
    fn record(&self, event: &TurnEvent);
}

/// Emits each turn as a structured `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TurnSink for TracingSink {
    fn record(&self, event: &TurnEvent) {
        info!(
            topic = %event.topic,
            intent = event.intent,
            path = %event.path,
            depth = event.topic_depth,
            switched = event.topic_switched,
            processing_ms = event.processing_ms,
            reply_words = event.reply_words,
            "turn completed"
        );
    }
}

/// Keeps events in memory, for tests and inspection
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<TurnEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TurnEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl TurnSink for MemorySink {
    fn record(&self, event: &TurnEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
