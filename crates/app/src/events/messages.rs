//! Message contracts shared between producers and consumers.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Announces that a recipe was added. Carries no payload beyond its type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeAdded {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    RecipeAdded(RecipeAdded),
}

impl Message {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RecipeAdded(_) => "RecipeAdded",
        }
    }
}

/// A message as it travels on the bus.
///
/// `message_uuid` and `published_at` exist for logging; consumers do not
/// deduplicate on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message_uuid: Uuid,
    pub published_at: Timestamp,
    pub message: Message,
}

impl MessageEnvelope {
    #[must_use]
    pub fn new(message: Message) -> Self {
        Self {
            message_uuid: Uuid::now_v7(),
            published_at: Timestamp::now(),
            message,
        }
    }
}
