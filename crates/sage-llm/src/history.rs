//! Bounded window of recent chat turns.

use crate::error::LlmError;
use sage_types::ChatMessage;
use std::collections::VecDeque;

/// Default number of turns kept as short-term context.
pub const DEFAULT_HISTORY_TURNS: usize = 12;

/// A bounded, ordered buffer of the most recent chat turns.
///
/// Pushing at capacity evicts the oldest turn first. Iteration yields turns
/// oldest to newest. The buffer only exists to give the completion call
/// short-term context; nothing is persisted.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    turns: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ChatHistory {
    /// Creates a history bounded to `capacity` turns.
    pub fn new(capacity: usize) -> Result<Self, LlmError> {
        if capacity == 0 {
            return Err(LlmError::Config(
                "history capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Appends a turn, evicting the oldest if the buffer is full.
    pub fn push(&mut self, message: ChatMessage) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(message);
    }

    /// Turns in order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self {
            turns: VecDeque::with_capacity(DEFAULT_HISTORY_TURNS),
            capacity: DEFAULT_HISTORY_TURNS,
        }
    }
}
