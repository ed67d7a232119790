//! Chat-platform boundary.
//!
//! The workflow never touches a platform SDK directly. Inbound events are
//! converted into [`MessageEvent`] / [`GuildJoinEvent`], and outbound effects go
//! through [`WhitelistTransport`].

use async_trait::async_trait;
use derive_builder::Builder;
use derive_getters::Getters;
use std::path::PathBuf;
use whitelister_core::{ChannelId, GuildId, MessageId, RoleId, UserId};
use whitelister_error::TransportError;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// A guild text message, reduced to what the bot needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Builder)]
#[builder(setter(into), default)]
pub struct MessageEvent {
    /// Id of the message itself, used for replies and deletion.
    message_id: MessageId,
    /// Who sent it.
    author_id: UserId,
    /// Whether the author is a bot account.
    is_bot: bool,
    /// Whether the author is a member of the guild (not a webhook or DM).
    is_member: bool,
    /// Guild the message was posted in.
    guild_id: GuildId,
    /// Guild display name, when the platform provides one.
    guild_name: Option<String>,
    /// Channel the message was posted in.
    channel_id: ChannelId,
    /// Raw message text.
    content: String,
    /// Channels mentioned in the text, in order of appearance.
    mentioned_channel_ids: Vec<ChannelId>,
    /// Roles mentioned in the text.
    mentioned_role_ids: Vec<RoleId>,
    /// Roles the author holds in the guild.
    author_role_ids: Vec<RoleId>,
    /// Whether the author holds the administrator permission.
    author_is_admin: bool,
}

impl MessageEvent {
    /// Start building an event.
    pub fn builder() -> MessageEventBuilder {
        MessageEventBuilder::default()
    }

    /// Name to show for the guild, falling back to its id.
    pub fn guild_label(&self) -> String {
        self.guild_name
            .clone()
            .unwrap_or_else(|| self.guild_id.to_string())
    }
}

/// The bot was added to a guild.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GuildJoinEvent {
    guild_id: GuildId,
    guild_name: String,
}

impl GuildJoinEvent {
    /// Create a join event.
    pub fn new(guild_id: GuildId, guild_name: impl Into<String>) -> Self {
        Self {
            guild_id,
            guild_name: guild_name.into(),
        }
    }
}

/// Rich reply card.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Embed {
    title: String,
    description: String,
    fields: Vec<(String, String)>,
}

impl Embed {
    /// Create an embed with a title and description.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    /// Append a named field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// A local file sent along with a reply.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Attachment {
    /// Where the file is staged on disk.
    path: PathBuf,
    /// Name the recipient sees.
    file_name: String,
}

impl Attachment {
    /// Attach the file at `path`, shown to the recipient as `file_name`.
    pub fn new(path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
        }
    }
}

/// What a reply shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    /// Plain text.
    Text(String),
    /// An embed card.
    Embed(Embed),
}

/// A reply to the triggering message.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Reply {
    body: ReplyBody,
    attachment: Option<Attachment>,
    mention_author: bool,
}

impl Reply {
    /// Plain-text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(text.into()),
            attachment: None,
            mention_author: false,
        }
    }

    /// Embed reply.
    pub fn embed(embed: Embed) -> Self {
        Self {
            body: ReplyBody::Embed(embed),
            attachment: None,
            mention_author: false,
        }
    }

    /// Attach a local file to the reply.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Ping the author of the message being replied to.
    pub fn mentioning_author(mut self) -> Self {
        self.mention_author = true;
        self
    }

    /// Text of a plain reply, `None` for embeds.
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Text(text) => Some(text),
            ReplyBody::Embed(_) => None,
        }
    }
}

/// Outbound operations the bot performs on the chat platform.
///
/// Implementations must be safe to share between concurrently running
/// event handlers.
#[async_trait]
pub trait WhitelistTransport: Send + Sync {
    /// Reply to `event`'s message. Any attachment is read when this is called.
    async fn reply(&self, event: &MessageEvent, reply: Reply) -> TransportResult<()>;

    /// Delete `event`'s message from its channel.
    async fn delete_message(&self, event: &MessageEvent) -> TransportResult<()>;

    /// Every guild the bot currently belongs to.
    async fn list_guilds(&self) -> TransportResult<Vec<GuildId>>;
}
