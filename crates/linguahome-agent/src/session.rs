// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session state: the pipeline FSM states and the conversation log.
//!
//! A request moves Idle -> BuildingContext -> AwaitingModel -> Executing ->
//! Responding -> Idle. Replies without code skip Executing.

use linguahome_core::Message;

/// States in the pipeline FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Waiting for a request.
    Idle,
    /// Assembling the system prompt, history window and user prompt.
    BuildingContext,
    /// Waiting on the single model call.
    AwaitingModel,
    /// Running extracted code in the sandbox.
    Executing,
    /// Formatting the response and recording memory.
    Responding,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::BuildingContext => write!(f, "building_context"),
            PipelineState::AwaitingModel => write!(f, "awaiting_model"),
            PipelineState::Executing => write!(f, "executing"),
            PipelineState::Responding => write!(f, "responding"),
        }
    }
}

/// Ordered user/assistant turns for one session.
///
/// Storage is never trimmed; [`window`](Self::window) returns the last
/// `window_size` entries for prompt building.
#[derive(Debug, Clone)]
pub struct Conversation {
    entries: Vec<Message>,
    window_size: usize,
}

impl Conversation {
    pub fn new(window_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            window_size,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// The most recent entries, oldest first, at most `window_size` of them.
    pub fn window(&self) -> &[Message] {
        let start = self.entries.len().saturating_sub(self.window_size);
        &self.entries[start..]
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Every stored entry, including those outside the window.
    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_display() {
        assert_eq!(PipelineState::Idle.to_string(), "idle");
        assert_eq!(PipelineState::BuildingContext.to_string(), "building_context");
        assert_eq!(PipelineState::AwaitingModel.to_string(), "awaiting_model");
        assert_eq!(PipelineState::Executing.to_string(), "executing");
        assert_eq!(PipelineState::Responding.to_string(), "responding");
    }

    #[test]
    fn window_is_lazy_and_bounded() {
        let mut conversation = Conversation::new(10);
        for i in 0..15 {
            conversation.push(Message::user(format!("turn {i}")));
        }
        assert_eq!(conversation.len(), 15);
        let window = conversation.window();
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "turn 5");
        assert_eq!(window[9].content, "turn 14");
    }

    #[test]
    fn short_history_is_returned_whole() {
        let mut conversation = Conversation::new(10);
        conversation.push(Message::user("a"));
        conversation.push(Message::assistant("b"));
        assert_eq!(conversation.window().len(), 2);
    }

    #[test]
    fn clear_empties_history() {
        let mut conversation = Conversation::new(3);
        conversation.push(Message::user("a"));
        conversation.clear();
        assert!(conversation.is_empty());
        assert!(conversation.window().is_empty());
    }
}
