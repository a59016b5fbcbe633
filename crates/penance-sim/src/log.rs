//! Event and message collection for one game.
//!
//! Structured [`SimEvent`]s are what tests and downstream consumers
//! inspect; the message strings are the human-readable feed a frontend
//! would show. Both accumulate for the lifetime of a wave.

use penance_core::events::SimEvent;

#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    messages: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimEvent) {
        tracing::debug!(?event, "sim event");
        self.events.push(event);
    }

    pub fn message(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(%text, "game message");
        self.messages.push(text);
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.messages.clear();
    }
}
