//! Tests for guild config gating and registration helpers.

use whitelister_core::{
    Blockchain, ChannelId, GuildConfig, GuildId, RoleId, UserId, UserRegistration, is_administrator,
    trailing_chars,
};

#[test]
fn test_unconfigured_guild_admits_nobody() {
    let config = GuildConfig::unconfigured(GuildId(1));
    assert_eq!(config.whitelist_channel(), &None);
    assert_eq!(config.whitelist_role(), &None);
    assert_eq!(config.blockchain(), &None);
    assert!(!config.admits(ChannelId(555), &[RoleId(777)]));
}

#[test]
fn test_gate_requires_channel_and_role() {
    let config = GuildConfig::new(
        GuildId(1),
        Some(ChannelId(555)),
        Some(RoleId(777)),
        Some(Blockchain::Eth),
    );
    assert!(config.admits(ChannelId(555), &[RoleId(1), RoleId(777)]));
    assert!(!config.admits(ChannelId(556), &[RoleId(777)]));
    assert!(!config.admits(ChannelId(555), &[RoleId(1)]));
    assert!(!config.admits(ChannelId(555), &[]));
}

#[test]
fn test_gate_with_only_channel_set() {
    let config = GuildConfig::new(GuildId(1), Some(ChannelId(555)), None, None);
    assert!(!config.admits(ChannelId(555), &[RoleId(777)]));
}

#[test]
fn test_wallet_suffix() {
    let registration = UserRegistration::new(UserId(9), GuildId(1), "0x1234abcd");
    assert_eq!(registration.wallet_suffix(), "bcd");
    assert_eq!(registration.wallet(), "0x1234abcd");
}

#[test]
fn test_trailing_chars_counts_characters_not_bytes() {
    assert_eq!(trailing_chars("wallet-ñañ", 3), "ñañ");
    assert_eq!(trailing_chars("", 3), "");
    assert_eq!(trailing_chars("abc", 0), "");
}

#[test]
fn test_mentions_and_db_ids() {
    assert_eq!(ChannelId(555).mention(), "<#555>");
    assert_eq!(RoleId(777).mention(), "<@&777>");
    assert_eq!(UserId(42).mention(), "<@42>");

    let big = GuildId(u64::MAX - 1);
    assert_eq!(GuildId::from_db(big.to_db()), big);
}

const ADMIN_ROLE: RoleId = RoleId(900);

#[test]
fn test_guild_owner_is_administrator_without_roles() {
    assert!(is_administrator(
        GuildId(1),
        UserId(10),
        UserId(10),
        &[],
        &[ADMIN_ROLE]
    ));
}

#[test]
fn test_member_holding_admin_role_is_administrator() {
    assert!(is_administrator(
        GuildId(1),
        UserId(10),
        UserId(42),
        &[RoleId(5), ADMIN_ROLE],
        &[ADMIN_ROLE]
    ));
}

#[test]
fn test_admin_everyone_role_makes_every_member_administrator() {
    assert!(is_administrator(
        GuildId(1),
        UserId(10),
        UserId(42),
        &[],
        &[RoleId(1)]
    ));
}

#[test]
fn test_unheld_admin_role_is_not_administrator() {
    assert!(!is_administrator(
        GuildId(1),
        UserId(10),
        UserId(42),
        &[RoleId(5)],
        &[ADMIN_ROLE]
    ));
}
