//! Gateway message conversion.

use crate::command::{is_command_shaped, parse_channel_mentions};
use crate::transport::{MessageEvent, TransportResult};
use serenity::all::{Http, Message, Permissions};
use tracing::instrument;
use whitelister_core::{ChannelId, GuildId, MessageId, RoleId, UserId, is_administrator};
use whitelister_error::{TransportError, TransportErrorKind};

/// Convert a gateway message into a [`MessageEvent`].
///
/// Returns `None` for direct messages. The guild is fetched only for
/// prefixed messages from human members, since only those need the
/// administrator flag and guild name.
#[instrument(skip_all, fields(message_id = %msg.id))]
pub async fn message_event(http: &Http, msg: &Message) -> TransportResult<Option<MessageEvent>> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(None);
    };

    let is_member = msg.member.is_some() && msg.webhook_id.is_none();
    let author_roles: Vec<RoleId> = msg
        .member
        .as_ref()
        .map(|member| member.roles.iter().map(|role| RoleId(role.get())).collect())
        .unwrap_or_default();

    let mut author_is_admin = false;
    let mut guild_name = None;
    if is_member && !msg.author.bot && is_command_shaped(&msg.content) {
        let guild = http.get_guild(guild_id).await.map_err(|e| {
            TransportError::new(TransportErrorKind::FetchFailed(format!(
                "Failed to fetch guild {}: {}",
                guild_id, e
            )))
        })?;

        let administrator_roles: Vec<RoleId> = guild
            .roles
            .iter()
            .filter(|(_, role)| role.permissions.contains(Permissions::ADMINISTRATOR))
            .map(|(id, _)| RoleId(id.get()))
            .collect();
        author_is_admin = is_administrator(
            GuildId(guild_id.get()),
            UserId(guild.owner_id.get()),
            UserId(msg.author.id.get()),
            &author_roles,
            &administrator_roles,
        );
        guild_name = Some(guild.name.clone());
    }

    MessageEvent::builder()
        .message_id(MessageId(msg.id.get()))
        .author_id(UserId(msg.author.id.get()))
        .is_bot(msg.author.bot)
        .is_member(is_member)
        .guild_id(GuildId(guild_id.get()))
        .guild_name(guild_name)
        .channel_id(ChannelId(msg.channel_id.get()))
        .content(msg.content.clone())
        .mentioned_channel_ids(parse_channel_mentions(&msg.content))
        .mentioned_role_ids(
            msg.mention_roles
                .iter()
                .map(|role| RoleId(role.get()))
                .collect::<Vec<_>>(),
        )
        .author_role_ids(author_roles)
        .author_is_admin(author_is_admin)
        .build()
        .map(Some)
        .map_err(|e| TransportError::new(TransportErrorKind::Api(e.to_string())))
}
