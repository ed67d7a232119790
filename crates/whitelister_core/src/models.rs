//! Guild settings and wallet registrations.

use crate::{Blockchain, ChannelId, GuildId, RoleId, UserId};
use derive_getters::Getters;

/// Whitelist settings for one guild.
///
/// Every field except the id starts out unset and is filled in by admin
/// commands. A guild only accepts registrations once channel, role and
/// blockchain are all configured.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GuildConfig {
    guild_id: GuildId,
    whitelist_channel: Option<ChannelId>,
    whitelist_role: Option<RoleId>,
    blockchain: Option<Blockchain>,
}

impl GuildConfig {
    /// A freshly observed guild with nothing configured.
    pub fn unconfigured(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            whitelist_channel: None,
            whitelist_role: None,
            blockchain: None,
        }
    }

    /// Assemble a config from stored values.
    pub fn new(
        guild_id: GuildId,
        whitelist_channel: Option<ChannelId>,
        whitelist_role: Option<RoleId>,
        blockchain: Option<Blockchain>,
    ) -> Self {
        Self {
            guild_id,
            whitelist_channel,
            whitelist_role,
            blockchain,
        }
    }

    /// Whether a message in `channel` from a member holding `roles` passes the gate.
    ///
    /// An unset channel or role never matches.
    pub fn admits(&self, channel: ChannelId, roles: &[RoleId]) -> bool {
        match (self.whitelist_channel, self.whitelist_role) {
            (Some(whitelist_channel), Some(whitelist_role)) => {
                whitelist_channel == channel && roles.contains(&whitelist_role)
            }
            _ => false,
        }
    }
}

/// A member's registered wallet in one guild.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct UserRegistration {
    user_id: UserId,
    guild_id: GuildId,
    wallet: String,
}

impl UserRegistration {
    /// Create a registration. The wallet text is kept exactly as submitted.
    pub fn new(user_id: UserId, guild_id: GuildId, wallet: impl Into<String>) -> Self {
        Self {
            user_id,
            guild_id,
            wallet: wallet.into(),
        }
    }

    /// Last three characters of the wallet, safe to echo back in a channel.
    pub fn wallet_suffix(&self) -> &str {
        trailing_chars(&self.wallet, 3)
    }
}

/// The last `count` characters of `text` (all of it when shorter).
///
/// ```
/// use whitelister_core::trailing_chars;
///
/// assert_eq!(trailing_chars("0x1234abcd", 3), "bcd");
/// assert_eq!(trailing_chars("ab", 3), "ab");
/// ```
pub fn trailing_chars(text: &str, count: usize) -> &str {
    match text.char_indices().rev().nth(count.saturating_sub(1)) {
        Some((index, _)) if count > 0 => &text[index..],
        Some(_) => "",
        None => text,
    }
}

/// Whether a guild member holds administrator rights.
///
/// The guild owner always does. Otherwise the member needs one of the
/// `administrator_roles`, where the `@everyone` role (whose id equals the
/// guild id) counts as held by every member.
///
/// ```
/// use whitelister_core::{GuildId, RoleId, UserId, is_administrator};
///
/// let admin_roles = [RoleId(9)];
/// assert!(is_administrator(GuildId(1), UserId(2), UserId(3), &[RoleId(9)], &admin_roles));
/// assert!(!is_administrator(GuildId(1), UserId(2), UserId(3), &[RoleId(4)], &admin_roles));
/// ```
pub fn is_administrator(
    guild_id: GuildId,
    owner_id: UserId,
    author_id: UserId,
    author_roles: &[RoleId],
    administrator_roles: &[RoleId],
) -> bool {
    let everyone = RoleId(guild_id.get());
    owner_id == author_id
        || administrator_roles
            .iter()
            .any(|role| *role == everyone || author_roles.contains(role))
}
