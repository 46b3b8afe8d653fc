use async_trait::async_trait;
use log::debug;
use std::{sync::Arc, time::Duration};
use teloxide::{
    prelude::*,
    types::{MessageId, ParseMode},
};

use crate::error::Result;

/// The chat operations the bot needs.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_html(&self, chat_id: ChatId, text: String) -> Result<MessageId>;

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<()>;
}

#[async_trait]
impl ChatTransport for Bot {
    async fn send_html(&self, chat_id: ChatId, text: String) -> Result<MessageId> {
        let message = self
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .disable_web_page_preview(true)
            .await?;
        Ok(message.id)
    }

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.delete_message(chat_id, message_id).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Deleted after the sender's delay.
    Ephemeral,
    Keep,
}

/// Sends replies, removes the command that triggered them and cleans up
/// ephemeral replies after a fixed delay.
#[derive(Clone)]
pub struct EphemeralSender {
    transport: Arc<dyn ChatTransport>,
    ttl: Duration,
}

impl EphemeralSender {
    pub fn new(transport: Arc<dyn ChatTransport>, ttl: Duration) -> Self {
        Self { transport, ttl }
    }

    pub async fn send(
        &self,
        chat_id: ChatId,
        text: String,
        source: Option<MessageId>,
        lifetime: Lifetime,
    ) -> Result<MessageId> {
        let reply = self.transport.send_html(chat_id, text).await?;

        if let Some(source) = source {
            if let Err(err) = self.transport.delete(chat_id, source).await {
                debug!("Could not delete command message {} in {}: {}", source.0, chat_id.0, err);
            }
        }

        if lifetime == Lifetime::Ephemeral {
            let transport = self.transport.clone();
            let ttl = self.ttl;
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                if let Err(err) = transport.delete(chat_id, reply).await {
                    debug!("Could not delete reply {} in {}: {}", reply.0, chat_id.0, err);
                }
            });
        }

        Ok(reply)
    }
}
