//! Recipe events producer.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::Caller,
    domain::ServiceError,
    events::{Message, MessageBus, MessageEnvelope, RecipeAdded},
    permissions::{Permission, PermissionChecker, ensure_permitted},
};

#[derive(Clone)]
pub struct BusRecipeEventsService {
    bus: Arc<dyn MessageBus>,
    permissions: Arc<dyn PermissionChecker>,
}

impl BusRecipeEventsService {
    #[must_use]
    pub fn new(bus: Arc<dyn MessageBus>, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self { bus, permissions }
    }
}

#[async_trait]
impl RecipeEventsService for BusRecipeEventsService {
    async fn publish_recipe_added(&self, caller: &Caller) -> Result<MessageEnvelope, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanPublishRecipeEvents,
        )
        .await?;

        let envelope = MessageEnvelope::new(Message::RecipeAdded(RecipeAdded {}));

        self.bus.publish(&envelope).await?;

        info!(
            message_uuid = %envelope.message_uuid,
            subject = %caller.subject,
            "RecipeAdded published"
        );

        Ok(envelope)
    }
}

#[automock]
#[async_trait]
pub trait RecipeEventsService: Send + Sync {
    /// Publish a [`RecipeAdded`] message and return the envelope that was sent.
    async fn publish_recipe_added(&self, caller: &Caller) -> Result<MessageEnvelope, ServiceError>;
}
