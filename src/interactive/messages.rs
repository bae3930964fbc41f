//! Status messages shown under the dashboard

use std::time::{Duration, Instant};

/// How long informational messages stay on screen
const MESSAGE_TTL: Duration = Duration::from_secs(10);

/// Message type for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub message_type: MessageType,
    pub text: String,
    pub timestamp: Instant,
}

impl Message {
    pub fn new(message_type: MessageType, text: impl Into<String>) -> Self {
        Self {
            message_type,
            text: text.into(),
            timestamp: Instant::now(),
        }
    }

    /// Errors and warnings stay until replaced; the rest fade after a while
    pub fn is_expired(&self) -> bool {
        matches!(self.message_type, MessageType::Info | MessageType::Success)
            && self.timestamp.elapsed() > MESSAGE_TTL
    }

    pub fn icon(&self) -> &str {
        match self.message_type {
            MessageType::Info => "ℹ",
            MessageType::Success => "✓",
            MessageType::Warning => "⚠",
            MessageType::Error => "✗",
        }
    }
}
