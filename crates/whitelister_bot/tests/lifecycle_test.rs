//! Tests for startup reconciliation and guild-join handling.

mod test_utils;

use std::sync::Arc;
use test_utils::*;
use whitelister_bot::{AuditLog, GuildJoinEvent, GuildLifecycle};
use whitelister_core::{Blockchain, GuildConfig, GuildId};

struct Setup {
    repository: Arc<whitelister_database::WhitelistRepository>,
    audit: Arc<AuditLog>,
    lifecycle: GuildLifecycle,
    _dir: tempfile::TempDir,
}

fn setup(transport: RecordingTransport) -> Setup {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let repository = memory_repository();
    let audit = Arc::new(AuditLog::new(dir.path().join("log.txt")));
    let lifecycle = GuildLifecycle::new(repository.clone(), Arc::new(transport), audit.clone());
    Setup {
        repository,
        audit,
        lifecycle,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_reconcile_creates_missing_rows() {
    let guilds = vec![GuildId(1), GuildId(2), GuildId(3)];
    let s = setup(RecordingTransport::new().with_guilds(guilds.clone()));

    let added = s.lifecycle.reconcile().await.expect("Reconcile failed");

    assert_eq!(added, 3);
    for guild in guilds {
        let config = s
            .repository
            .guild_config(guild)
            .await
            .expect("Failed to query config");
        assert_eq!(config, Some(GuildConfig::unconfigured(guild)));
    }
}

#[tokio::test]
async fn test_reconcile_keeps_existing_settings() {
    let s = setup(RecordingTransport::new().with_guilds(vec![GuildId(1), GuildId(2)]));
    s.repository
        .set_blockchain(GuildId(1), Blockchain::Ada)
        .await
        .expect("Failed to set blockchain");

    let added = s.lifecycle.reconcile().await.expect("Reconcile failed");
    let again = s.lifecycle.reconcile().await.expect("Reconcile failed");

    assert_eq!(added, 1);
    assert_eq!(again, 0);
    let config = s
        .repository
        .guild_config(GuildId(1))
        .await
        .expect("Failed to query config")
        .expect("Config row missing");
    assert_eq!(*config.blockchain(), Some(Blockchain::Ada));
}

#[tokio::test]
async fn test_reconcile_surfaces_listing_failure() {
    let s = setup(RecordingTransport::new().with_listing_failure());

    assert!(s.lifecycle.reconcile().await.is_err());
}

#[tokio::test]
async fn test_guild_join_creates_row_and_audits() {
    let s = setup(RecordingTransport::new());

    s.lifecycle
        .handle_guild_join(&GuildJoinEvent::new(GuildId(55), "Fresh Guild"))
        .await
        .expect("Join failed");

    let config = s
        .repository
        .guild_config(GuildId(55))
        .await
        .expect("Failed to query config");
    assert_eq!(config, Some(GuildConfig::unconfigured(GuildId(55))));
    assert!(read_or_empty(s.audit.path()).contains("Head: New Guild\n   Text: 55, Fresh Guild"));
}

#[tokio::test]
async fn test_guild_create_for_known_guild_is_quiet() {
    let s = setup(RecordingTransport::new());
    s.repository
        .ensure_guild(GuildId(8))
        .await
        .expect("Failed to ensure guild");
    let event = GuildJoinEvent::new(GuildId(8), "Known");

    let unknown = s
        .lifecycle
        .handle_guild_create(&event, None)
        .await
        .expect("Guild create failed");
    let not_new = s
        .lifecycle
        .handle_guild_create(&event, Some(false))
        .await
        .expect("Guild create failed");

    assert!(!unknown);
    assert!(!not_new);
    assert!(read_or_empty(s.audit.path()).is_empty());
}

#[tokio::test]
async fn test_guild_create_for_new_guild_audits() {
    let s = setup(RecordingTransport::new());

    let joined = s
        .lifecycle
        .handle_guild_create(&GuildJoinEvent::new(GuildId(9), "Newcomer"), None)
        .await
        .expect("Guild create failed");

    assert!(joined);
    assert!(read_or_empty(s.audit.path()).contains("9, Newcomer"));
    assert!(
        s.repository
            .guild_config(GuildId(9))
            .await
            .expect("Failed to query config")
            .is_some()
    );
}
