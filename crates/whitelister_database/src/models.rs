//! Diesel row models.

use crate::schema::{discord_server, user};
use diesel::prelude::*;
use std::str::FromStr;
use whitelister_core::{
    Blockchain, ChannelId, GuildConfig, GuildId, RoleId, UserId, UserRegistration,
};
use whitelister_error::{DatabaseError, DatabaseErrorKind};

/// Database row for the `discord_server` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, Identifiable)]
#[diesel(table_name = discord_server)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GuildConfigRow {
    pub id: i64,
    pub whitelist_channel: Option<i64>,
    pub whitelist_role: Option<i64>,
    pub blockchain: Option<String>,
}

impl GuildConfigRow {
    /// Row for a guild with nothing configured.
    pub fn unconfigured(guild_id: GuildId) -> Self {
        Self {
            id: guild_id.to_db(),
            whitelist_channel: None,
            whitelist_role: None,
            blockchain: None,
        }
    }
}

impl TryFrom<GuildConfigRow> for GuildConfig {
    type Error = DatabaseError;

    fn try_from(row: GuildConfigRow) -> Result<Self, Self::Error> {
        let blockchain = row
            .blockchain
            .as_deref()
            .map(|code| {
                Blockchain::from_str(code).map_err(|_| {
                    DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                        "Unknown blockchain code '{}' stored for guild {}",
                        code, row.id
                    )))
                })
            })
            .transpose()?;

        Ok(GuildConfig::new(
            GuildId::from_db(row.id),
            row.whitelist_channel.map(ChannelId::from_db),
            row.whitelist_role.map(RoleId::from_db),
            blockchain,
        ))
    }
}

/// Database row for the `user` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = user)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RegistrationRow {
    pub id: i64,
    pub discord_server: i64,
    pub wallet: String,
}

impl From<&UserRegistration> for RegistrationRow {
    fn from(registration: &UserRegistration) -> Self {
        Self {
            id: registration.user_id().to_db(),
            discord_server: registration.guild_id().to_db(),
            wallet: registration.wallet().clone(),
        }
    }
}

impl From<RegistrationRow> for UserRegistration {
    fn from(row: RegistrationRow) -> Self {
        UserRegistration::new(
            UserId::from_db(row.id),
            GuildId::from_db(row.discord_server),
            row.wallet,
        )
    }
}
