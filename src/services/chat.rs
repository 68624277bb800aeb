use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::ChatMessage;
use crate::store::ChatStore;

/// Forwards an authenticated user's message into the shared message store.
#[derive(Clone)]
pub struct ChatRelay {
    store: Arc<dyn ChatStore>,
}

impl ChatRelay {
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    pub async fn send(
        &self,
        chat_id: &str,
        sender_id: &str,
        sender_name: Option<String>,
        content: &str,
    ) -> Result<ChatMessage> {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            chat_id: chat_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_name,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        self.store.append(&message).await?;
        tracing::debug!(chat = %message.chat_id, message = %message.id, "relayed chat message");

        Ok(message)
    }
}
