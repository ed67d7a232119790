//! SQLite repository for guild settings and wallet registrations.
//!
//! Every method runs its statements (and commits) before returning, so a
//! caller that awaits a method and then replies to the user never announces
//! a change the store does not hold.

use crate::DatabaseResult;
use crate::models::{GuildConfigRow, RegistrationRow};
use crate::schema::{discord_server, user};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use whitelister_core::{
    Blockchain, ChannelId, GuildConfig, GuildId, RoleId, UserId, UserRegistration,
};
use whitelister_error::DatabaseError;

/// Repository over the `discord_server` and `user` tables.
///
/// # Example
/// ```no_run
/// use whitelister_database::{WhitelistRepository, establish_connection};
/// use whitelister_core::GuildId;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let conn = establish_connection("data.db")?;
///     let repo = WhitelistRepository::new(conn);
///     repo.ensure_guild(GuildId(1234)).await?;
///     Ok(())
/// }
/// ```
pub struct WhitelistRepository {
    /// Single connection shared by all event handlers.
    conn: Arc<Mutex<SqliteConnection>>,
}

impl WhitelistRepository {
    /// Create a new repository that owns `conn`.
    pub fn new(conn: SqliteConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    // ============================================================================
    // Guild configuration
    // ============================================================================

    /// Get a guild's configuration, `None` if the guild was never observed.
    #[instrument(skip(self), fields(guild_id = %guild_id))]
    pub async fn guild_config(&self, guild_id: GuildId) -> DatabaseResult<Option<GuildConfig>> {
        let mut conn = self.conn.lock().await;

        let row = discord_server::table
            .find(guild_id.to_db())
            .select(GuildConfigRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;

        row.map(GuildConfig::try_from).transpose()
    }

    /// Insert an empty configuration row for the guild unless one exists.
    ///
    /// Returns `true` when a row was created.
    #[instrument(skip(self), fields(guild_id = %guild_id))]
    pub async fn ensure_guild(&self, guild_id: GuildId) -> DatabaseResult<bool> {
        let mut conn = self.conn.lock().await;

        let inserted = diesel::insert_or_ignore_into(discord_server::table)
            .values(GuildConfigRow::unconfigured(guild_id))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        if inserted > 0 {
            info!("Created configuration row for guild");
        }
        Ok(inserted > 0)
    }

    /// Set the channel registrations are accepted in.
    #[instrument(skip(self), fields(guild_id = %guild_id, channel_id = %channel_id))]
    pub async fn set_whitelist_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> DatabaseResult<()> {
        let mut conn = self.conn.lock().await;
        let value = Some(channel_id.to_db());

        diesel::insert_into(discord_server::table)
            .values((
                discord_server::id.eq(guild_id.to_db()),
                discord_server::whitelist_channel.eq(value),
            ))
            .on_conflict(discord_server::id)
            .do_update()
            .set(discord_server::whitelist_channel.eq(value))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    /// Set the role a member needs to register.
    #[instrument(skip(self), fields(guild_id = %guild_id, role_id = %role_id))]
    pub async fn set_whitelist_role(&self, guild_id: GuildId, role_id: RoleId) -> DatabaseResult<()> {
        let mut conn = self.conn.lock().await;
        let value = Some(role_id.to_db());

        diesel::insert_into(discord_server::table)
            .values((
                discord_server::id.eq(guild_id.to_db()),
                discord_server::whitelist_role.eq(value),
            ))
            .on_conflict(discord_server::id)
            .do_update()
            .set(discord_server::whitelist_role.eq(value))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    /// Set the blockchain submitted addresses are validated against.
    #[instrument(skip(self), fields(guild_id = %guild_id, blockchain = %blockchain))]
    pub async fn set_blockchain(
        &self,
        guild_id: GuildId,
        blockchain: Blockchain,
    ) -> DatabaseResult<()> {
        let mut conn = self.conn.lock().await;
        let value = Some(blockchain.code());

        diesel::insert_into(discord_server::table)
            .values((
                discord_server::id.eq(guild_id.to_db()),
                discord_server::blockchain.eq(value),
            ))
            .on_conflict(discord_server::id)
            .do_update()
            .set(discord_server::blockchain.eq(value))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    /// Reset a guild to its unconfigured state and drop its registrations.
    ///
    /// The configuration row is deleted and re-inserted empty in the same
    /// transaction, so a row exists before and after. Returns the number of
    /// registrations removed.
    #[instrument(skip(self), fields(guild_id = %guild_id))]
    pub async fn clear_guild(&self, guild_id: GuildId) -> DatabaseResult<usize> {
        let mut conn = self.conn.lock().await;
        let id = guild_id.to_db();

        let removed = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let removed = diesel::delete(user::table.filter(user::discord_server.eq(id)))
                    .execute(conn)?;
                diesel::delete(discord_server::table.find(id)).execute(conn)?;
                diesel::insert_into(discord_server::table)
                    .values(GuildConfigRow::unconfigured(guild_id))
                    .execute(conn)?;
                Ok(removed)
            })
            .map_err(DatabaseError::from)?;

        info!(registrations_removed = removed, "Cleared guild configuration");
        Ok(removed)
    }

    // ============================================================================
    // Registrations
    // ============================================================================

    /// Store a registration, replacing any earlier one for the same member and guild.
    ///
    /// Delete and insert share one transaction, so concurrent readers see
    /// either the old wallet or the new one, never zero or two rows.
    #[instrument(
        skip(self, registration),
        fields(guild_id = %registration.guild_id(), user_id = %registration.user_id())
    )]
    pub async fn replace_registration(&self, registration: &UserRegistration) -> DatabaseResult<()> {
        let mut conn = self.conn.lock().await;
        let row = RegistrationRow::from(registration);

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let replaced = diesel::delete(
                user::table
                    .filter(user::id.eq(row.id))
                    .filter(user::discord_server.eq(row.discord_server)),
            )
            .execute(conn)?;
            diesel::insert_into(user::table).values(&row).execute(conn)?;
            debug!(replaced = replaced > 0, "Stored registration");
            Ok(())
        })
        .map_err(DatabaseError::from)
    }

    /// Get a member's registration in a guild.
    #[instrument(skip(self), fields(guild_id = %guild_id, user_id = %user_id))]
    pub async fn registration(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> DatabaseResult<Option<UserRegistration>> {
        let mut conn = self.conn.lock().await;

        user::table
            .filter(user::id.eq(user_id.to_db()))
            .filter(user::discord_server.eq(guild_id.to_db()))
            .select(RegistrationRow::as_select())
            .first(&mut *conn)
            .optional()
            .map(|row| row.map(UserRegistration::from))
            .map_err(DatabaseError::from)
    }

    /// List every registration in a guild, ordered by user id.
    #[instrument(skip(self), fields(guild_id = %guild_id))]
    pub async fn guild_registrations(
        &self,
        guild_id: GuildId,
    ) -> DatabaseResult<Vec<UserRegistration>> {
        let mut conn = self.conn.lock().await;

        let rows = user::table
            .filter(user::discord_server.eq(guild_id.to_db()))
            .order(user::id.asc())
            .select(RegistrationRow::as_select())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(UserRegistration::from).collect())
    }

    /// Ids of every guild with a configuration row.
    #[instrument(skip(self))]
    pub async fn guild_ids(&self) -> DatabaseResult<Vec<GuildId>> {
        let mut conn = self.conn.lock().await;

        discord_server::table
            .select(discord_server::id)
            .order(discord_server::id.asc())
            .load::<i64>(&mut *conn)
            .map(|ids| ids.into_iter().map(GuildId::from_db).collect())
            .map_err(DatabaseError::from)
    }
}
