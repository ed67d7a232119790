//! Tests for the append-only audit log.

use futures::future::join_all;
use whitelister_bot::{AuditLog, GuildJoinEvent};
use whitelister_core::GuildId;

#[tokio::test]
async fn test_append_writes_entry() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log = AuditLog::new(dir.path().join("log.txt"));

    log.append("Something", "details").await.expect("Append failed");

    let contents = std::fs::read_to_string(log.path()).expect("Failed to read log");
    assert!(contents.starts_with('['));
    assert!(contents.contains("] Head: Something\n   Text: details\n\n"));
}

#[tokio::test]
async fn test_appends_accumulate() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log = AuditLog::new(dir.path().join("log.txt"));

    log.append("first", "a").await.expect("Append failed");
    log.append("second", "b").await.expect("Append failed");

    let contents = std::fs::read_to_string(log.path()).expect("Failed to read log");
    let first = contents.find("Head: first").expect("Missing first entry");
    let second = contents.find("Head: second").expect("Missing second entry");
    assert!(first < second);
}

#[tokio::test]
async fn test_concurrent_appends_do_not_interleave() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log = AuditLog::new(dir.path().join("log.txt"));
    let body = "x".repeat(4096);

    let results = join_all((0..32).map(|i| {
        let head = format!("entry-{i}");
        let body = body.clone();
        let log = &log;
        async move { log.append(&head, &body).await }
    }))
    .await;
    assert!(results.iter().all(Result::is_ok));

    let contents = std::fs::read_to_string(log.path()).expect("Failed to read log");
    let entries: Vec<_> = contents.split("\n\n").filter(|e| !e.is_empty()).collect();
    assert_eq!(entries.len(), 32);
    for entry in entries {
        assert!(entry.contains("Head: entry-"));
        assert!(entry.ends_with(&body));
    }
}

#[tokio::test]
async fn test_record_failure_flattens_diagnostic() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log = AuditLog::new(dir.path().join("log.txt"));

    log.record_failure("boom\n  at frame one\n  at frame two", "context")
        .await
        .expect("Append failed");

    let contents = std::fs::read_to_string(log.path()).expect("Failed to read log");
    assert!(contents.contains("Head: boom---  at frame one---  at frame two\n"));
}

#[tokio::test]
async fn test_record_guild_join() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log = AuditLog::new(dir.path().join("log.txt"));

    log.record_guild_join(&GuildJoinEvent::new(GuildId(123), "My Guild"))
        .await
        .expect("Append failed");

    let contents = std::fs::read_to_string(log.path()).expect("Failed to read log");
    assert!(contents.contains("Head: New Guild\n   Text: 123, My Guild\n"));
}

#[tokio::test]
async fn test_unwritable_path_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log = AuditLog::new(dir.path().join("missing").join("log.txt"));

    let err = log.append("head", "text").await.expect_err("Append should fail");

    assert!(err.path.ends_with("log.txt"));
}
