//! Direct-message records and transcript ordering.

use serde::{Deserialize, Serialize};

/// One direct message as returned by the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub receiver: String,
    pub content: String,

    /// Unix seconds when the message was stored
    pub timestamp: i64,
}

/// A message placed in the viewer's transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub message: ChatMessage,

    /// Sent by the viewer rather than the partner
    pub outgoing: bool,
}

/// Conversation between the viewer and one partner, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub lines: Vec<TranscriptLine>,
}

impl Transcript {
    /// Order messages by timestamp (stable) and mark the viewer's own
    pub fn from_messages(mut messages: Vec<ChatMessage>, viewer: &str) -> Self {
        messages.sort_by_key(|m| m.timestamp);
        let lines = messages
            .into_iter()
            .map(|message| {
                let outgoing = message.sender == viewer;
                TranscriptLine { message, outgoing }
            })
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
