//! Adds newly published recipes to the recipe book.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use crate::events::{
    Message, MessageEnvelope,
    consumers::{Consumer, ConsumerError},
};

/// Handles [`Message::RecipeAdded`] only.
///
/// Delivery is at-least-once and nothing here deduplicates, so a redelivered
/// message is counted again.
#[derive(Debug, Default)]
pub struct AddToBook {
    processed: AtomicU64,
}

impl AddToBook {
    /// Number of messages handled since start-up.
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Consumer for AddToBook {
    fn name(&self) -> &'static str {
        "AddToBook"
    }

    fn accepts(&self, message: &Message) -> bool {
        matches!(message, Message::RecipeAdded(_))
    }

    async fn consume(&self, envelope: &MessageEnvelope) -> Result<(), ConsumerError> {
        let total = self.processed.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            message_uuid = %envelope.message_uuid,
            published_at = %envelope.published_at,
            total,
            "recipe added to book"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::events::RecipeAdded;

    use super::*;

    #[tokio::test]
    async fn counts_each_delivery() -> TestResult {
        let consumer = AddToBook::default();
        let envelope = MessageEnvelope::new(Message::RecipeAdded(RecipeAdded {}));

        assert!(consumer.accepts(&envelope.message));

        consumer.consume(&envelope).await?;
        consumer.consume(&envelope).await?;

        assert_eq!(consumer.processed(), 2);

        Ok(())
    }
}
