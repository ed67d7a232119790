//! User-facing reply texts.

use crate::transport::Embed;
use whitelister_core::{ChannelId, GuildConfig, RoleId, UserId};

/// Reply to any malformed command argument.
pub const INVALID_ARGUMENT: &str = "Invalid command argument.";

pub(crate) const DATA_ATTACHED: &str = "The server data is attached.";
pub(crate) const CLEARED: &str = "The server configuration and data have been cleared.";

const ABOUT: &str = "Whitelist Manager is a bot that helps collect wallet addresses for \
whitelists and NFT drops.";

pub(crate) fn channel_set(channel: ChannelId) -> String {
    format!("Whitelist channel successfully changed to {}", channel.mention())
}

pub(crate) fn role_set(role: RoleId) -> String {
    format!("Whitelist role successfully changed to {}", role.mention())
}

pub(crate) fn blockchain_set(code: &str) -> String {
    format!("Blockchain successfully changed to `{code}`")
}

pub(crate) fn accepted_commands(commands: &str) -> String {
    format!("Accepted commands are: {commands}, use `>help` for more information.")
}

pub(crate) fn wallet_registered(user: UserId, suffix: &str) -> String {
    format!(
        "{} your wallet ending in `{suffix}` has been validated and saved.",
        user.mention()
    )
}

pub(crate) fn wallet_invalid(suffix: &str) -> String {
    format!("The wallet ending in `{suffix}` is invalid.")
}

pub(crate) fn check_registered(suffix: &str) -> String {
    format!("Your wallet is registered! The last 3 characters are: `{suffix}`")
}

pub(crate) const CHECK_UNREGISTERED: &str =
    "Your wallet is not registered. Use `>help` for more information.";

pub(crate) fn config_embed(guild_label: &str, config: &GuildConfig) -> Embed {
    let channel = config
        .whitelist_channel()
        .map_or_else(|| "None".to_string(), |c| c.mention());
    let role = config
        .whitelist_role()
        .map_or_else(|| "None".to_string(), |r| r.mention());
    let blockchain = config
        .blockchain()
        .map_or("None", |b| b.code());
    Embed::new(
        format!("Configuration for {guild_label}"),
        format!(
            "Whitelist channel: {channel}\nWhitelist role: {role}\nBlockchain: {blockchain}"
        ),
    )
}

pub(crate) fn help_admin_embed() -> Embed {
    Embed::new(
        "Help (Admin)",
        format!(
            "{ABOUT}\nOnce configured, members with the selected role can register their \
             wallet addresses, which you can later download as CSV.\nNote: the bot only \
             works once the configuration is complete."
        ),
    )
    .field(
        "COMMANDS",
        "`>channel #channel`: Select the channel where the bot reads wallet addresses.\n\
         `>role @role`: Select the role a member needs to register a wallet.\n\
         `>blockchain eth/sol/ada/matic`: Select the blockchain used to validate addresses.\n\
         `>config`: Show the current server configuration.\n\
         `>data`: Download the full whitelist as CSV.\n\
         `>clear`: Clear this server's configuration and data.\n\
         `>help.admin`: This screen.\n\
         `>help`: General help screen.",
    )
}

pub(crate) fn help_embed() -> Embed {
    Embed::new("Help", ABOUT).field(
        "COMMANDS",
        "`>check`: Tells you whether your wallet address has been registered.\n\
         `>help`: This help.\n\n\
         How to use: send your PUBLIC wallet address in the assigned channel to register it.\n\
         The message must contain only the wallet address (no `>` or anything else).",
    )
}
