//! One-shot flash messages.
//!
//! A flash message is queued in the session during one request and consumed
//! by the next rendered page, surviving exactly one redirect.

use serde::{Deserialize, Serialize};

/// Visual category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

/// A user-facing notification surviving exactly one redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    /// Build a success flash.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Build an error flash.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_serialise_in_snake_case() {
        let flash = FlashMessage::success("New Listing Created!");
        let value = serde_json::to_value(&flash).expect("serialise");
        assert_eq!(value["level"], "success");
        assert_eq!(value["message"], "New Listing Created!");
    }
}
