//! Prefix command parsing.
//!
//! A command is the prefix character immediately followed by a bare word.
//! Admin and public commands live in separate enums so that dispatch per
//! privilege scope is a plain `match`.

use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use strum::IntoEnumIterator;
use whitelister_core::ChannelId;

/// Character that marks a message as a command.
pub const COMMAND_PREFIX: char = '>';

static CHANNEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<#(\d+)>").expect("Invalid channel mention regex"));

/// Commands reserved for guild administrators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum AdminCommand {
    /// `>channel <#channel>`: set the whitelist channel.
    Channel,
    /// `>role <@&role>`: set the whitelist role.
    Role,
    /// `>blockchain <code>`: set the blockchain.
    Blockchain,
    /// `>data`: export registrations as CSV.
    Data,
    /// `>config`: show the current settings.
    Config,
    /// `>clear`: reset settings and registrations.
    Clear,
    /// `>help.admin`: admin help card.
    #[strum(serialize = "help.admin")]
    HelpAdmin,
}

/// Commands any qualifying member may use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum PublicCommand {
    /// `>help`: member help card.
    Help,
    /// `>check`: report whether the caller is registered.
    Check,
}

/// Which command namespaces a sender can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Admin commands, then public commands.
    Admin,
    /// Public commands only.
    Public,
}

/// A recognised command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum Command {
    /// Admin-only command.
    Admin(AdminCommand),
    /// Public command.
    Public(PublicCommand),
}

impl Command {
    /// Recognise the command in `content` within `scope`.
    ///
    /// Admin commands are invisible in [`Scope::Public`].
    ///
    /// ```
    /// use whitelister_bot::{AdminCommand, Command, PublicCommand, Scope};
    ///
    /// assert_eq!(
    ///     Command::parse(">channel <#555>", Scope::Admin),
    ///     Some(Command::Admin(AdminCommand::Channel))
    /// );
    /// assert_eq!(Command::parse(">channel <#555>", Scope::Public), None);
    /// assert_eq!(
    ///     Command::parse(">check", Scope::Public),
    ///     Some(Command::Public(PublicCommand::Check))
    /// );
    /// ```
    pub fn parse(content: &str, scope: Scope) -> Option<Self> {
        let name = command_name(content)?;
        if scope == Scope::Admin
            && let Ok(command) = AdminCommand::from_str(name)
        {
            return Some(command.into());
        }
        PublicCommand::from_str(name).ok().map(Command::from)
    }
}

/// Whether `content` starts with the command prefix.
pub fn is_command_shaped(content: &str) -> bool {
    content.starts_with(COMMAND_PREFIX)
}

/// The bare word right after the prefix, if any.
///
/// Whitespace between the prefix and the word means there is no command.
///
/// ```
/// use whitelister_bot::command_name;
///
/// assert_eq!(command_name(">role <@&777>"), Some("role"));
/// assert_eq!(command_name("> role"), None);
/// assert_eq!(command_name("role"), None);
/// ```
pub fn command_name(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(COMMAND_PREFIX)?;
    let name = rest.split(char::is_whitespace).next().unwrap_or_default();
    (!name.is_empty()).then_some(name)
}

/// Public command names formatted for the "accepted commands" reply.
pub fn accepted_public_commands() -> String {
    PublicCommand::iter()
        .map(|command| format!("`{command}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Channel mentions in `content`, in order of appearance.
pub fn parse_channel_mentions(content: &str) -> Vec<ChannelId> {
    CHANNEL_MENTION
        .captures_iter(content)
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .map(ChannelId)
        .collect()
}
