//! User-visible message stream.
//!
//! Every observable event (hits, status changes, deaths, level-ups) is pushed
//! to a [`MessageSink`] as a `(text, category)` pair. Rendering is the
//! caller's concern.

use std::collections::VecDeque;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MessageCategory {
    Combat,
    System,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub text: String,
    pub category: MessageCategory,
}

/// Receiver for user-visible messages.
pub trait MessageSink {
    fn push(&mut self, text: String, category: MessageCategory);
}

/// Bounded in-memory history; the oldest message is dropped once full.
#[derive(Clone, Debug)]
pub struct MessageLog {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl MessageLog {
    pub const DEFAULT_CAPACITY: usize = 200;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.back()
    }

    /// True if any retained message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(needle))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for MessageLog {
    fn push(&mut self, text: String, category: MessageCategory) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(Message { text, category });
    }
}

/// Forwards every message to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn push(&mut self, text: String, category: MessageCategory) {
        tracing::info!(category = category.as_ref(), "{}", text);
    }
}
