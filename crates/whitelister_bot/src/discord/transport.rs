//! [`WhitelistTransport`] over the Discord HTTP API.

use crate::transport::{Embed, MessageEvent, Reply, ReplyBody, TransportResult, WhitelistTransport};
use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateAllowedMentions, CreateAttachment, CreateEmbed, CreateMessage, Http,
    MessageId,
};
use serenity::http::GuildPagination;
use std::sync::Arc;
use tracing::{debug, instrument};
use whitelister_core::GuildId;
use whitelister_error::{TransportError, TransportErrorKind};

/// Largest page the guild listing endpoint returns.
const GUILD_PAGE_SIZE: u64 = 200;

/// Sends replies and deletes messages through serenity's [`Http`] client.
#[derive(Clone)]
pub struct SerenityTransport {
    http: Arc<Http>,
}

impl SerenityTransport {
    /// Create a transport over an authenticated HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn channel(event: &MessageEvent) -> ChannelId {
        ChannelId::new(event.channel_id().get())
    }

    fn message(event: &MessageEvent) -> MessageId {
        MessageId::new(event.message_id().get())
    }
}

fn to_embed(embed: &Embed) -> CreateEmbed {
    embed.fields().iter().fold(
        CreateEmbed::new()
            .title(embed.title())
            .description(embed.description()),
        |builder, (name, value)| builder.field(name, value, false),
    )
}

#[async_trait]
impl WhitelistTransport for SerenityTransport {
    #[instrument(skip(self, event, reply), fields(channel_id = %event.channel_id()))]
    async fn reply(&self, event: &MessageEvent, reply: Reply) -> TransportResult<()> {
        let channel = Self::channel(event);
        let mentions = CreateAllowedMentions::new()
            .all_users(true)
            .replied_user(*reply.mention_author());

        let mut builder = CreateMessage::new()
            .reference_message((channel, Self::message(event)))
            .allowed_mentions(mentions);

        builder = match reply.body() {
            ReplyBody::Text(text) => builder.content(text),
            ReplyBody::Embed(embed) => builder.embed(to_embed(embed)),
        };

        if let Some(attachment) = reply.attachment() {
            let data = tokio::fs::read(attachment.path()).await.map_err(|e| {
                TransportError::new(TransportErrorKind::SendFailed(format!(
                    "Failed to read attachment {}: {}",
                    attachment.path().display(),
                    e
                )))
            })?;
            builder = builder.add_file(CreateAttachment::bytes(data, attachment.file_name()));
        }

        channel
            .send_message(&self.http, builder)
            .await
            .map_err(|e| TransportError::new(TransportErrorKind::SendFailed(e.to_string())))?;

        debug!("Reply sent");
        Ok(())
    }

    #[instrument(skip(self, event), fields(channel_id = %event.channel_id(), message_id = %event.message_id()))]
    async fn delete_message(&self, event: &MessageEvent) -> TransportResult<()> {
        Self::channel(event)
            .delete_message(&self.http, Self::message(event))
            .await
            .map_err(|e| TransportError::new(TransportErrorKind::DeleteFailed(e.to_string())))
    }

    #[instrument(skip(self))]
    async fn list_guilds(&self) -> TransportResult<Vec<GuildId>> {
        let mut guilds = Vec::new();
        let mut after = None;

        loop {
            let page = self
                .http
                .get_guilds(after.map(GuildPagination::After), Some(GUILD_PAGE_SIZE))
                .await
                .map_err(|e| TransportError::new(TransportErrorKind::FetchFailed(e.to_string())))?;

            let exhausted = (page.len() as u64) < GUILD_PAGE_SIZE;
            after = page.last().map(|guild| guild.id);
            guilds.extend(page.iter().map(|guild| GuildId(guild.id.get())));

            if exhausted || after.is_none() {
                break;
            }
        }

        debug!(count = guilds.len(), "Listed guilds");
        Ok(guilds)
    }
}
