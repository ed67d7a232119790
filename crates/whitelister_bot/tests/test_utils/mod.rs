//! Test utilities for whitelister_bot tests.
//!
//! Provides a recording transport, an in-memory repository and event helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use regex::Regex;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use whitelister_bot::{
    AuditLog, MessageEvent, Reply, TransportResult, WhitelistTransport, WhitelistWorkflow,
    parse_channel_mentions,
};
use whitelister_core::{ChannelId, GuildId, MessageId, RoleId, UserId};
use whitelister_database::{WhitelistRepository, establish_connection};
use whitelister_error::{TransportError, TransportErrorKind};

pub const GUILD: GuildId = GuildId(1);
pub const WHITELIST_CHANNEL: ChannelId = ChannelId(555);
pub const OTHER_CHANNEL: ChannelId = ChannelId(999);
pub const WHITELIST_ROLE: RoleId = RoleId(777);
pub const ADMIN: UserId = UserId(10);
pub const MEMBER: UserId = UserId(42);

pub const ETH_WALLET: &str = "0x52908400098527886e0f7030069857d2e4169ee7";
pub const OTHER_ETH_WALLET: &str = "0x8617e340b3d01fa5f11f306f4090fd50e238070d";

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1000);

/// A reply captured by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct SentReply {
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    pub reply: Reply,
    /// Attachment contents, read when the reply was sent.
    pub attachment_contents: Option<String>,
}

impl SentReply {
    pub fn text(&self) -> &str {
        self.reply.as_text().unwrap_or_default()
    }
}

/// Transport that records every call instead of talking to a platform.
#[derive(Default)]
pub struct RecordingTransport {
    replies: Mutex<Vec<SentReply>>,
    deleted: Mutex<Vec<MessageId>>,
    guilds: Vec<GuildId>,
    fail_replies: bool,
    fail_deletes: bool,
    fail_listing: bool,
    panic_on_reply: bool,
    yield_before_send: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guilds(mut self, guilds: Vec<GuildId>) -> Self {
        self.guilds = guilds;
        self
    }

    pub fn with_reply_failure(mut self) -> Self {
        self.fail_replies = true;
        self
    }

    pub fn with_delete_failure(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn with_listing_failure(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Let other tasks run between receiving a reply and reading its attachment.
    pub fn with_yield_before_send(mut self) -> Self {
        self.yield_before_send = true;
        self
    }

    pub fn with_reply_panic(mut self) -> Self {
        self.panic_on_reply = true;
        self
    }

    pub fn replies(&self) -> Vec<SentReply> {
        self.replies.lock().expect("replies lock").clone()
    }

    pub fn last_reply(&self) -> SentReply {
        self.replies().last().cloned().expect("no reply was sent")
    }

    pub fn deleted(&self) -> Vec<MessageId> {
        self.deleted.lock().expect("deleted lock").clone()
    }
}

#[async_trait]
impl WhitelistTransport for RecordingTransport {
    async fn reply(&self, event: &MessageEvent, reply: Reply) -> TransportResult<()> {
        if self.panic_on_reply {
            panic!("transport exploded");
        }
        if self.fail_replies {
            return Err(TransportError::new(TransportErrorKind::SendFailed(
                "Mock send failure".to_string(),
            )));
        }
        if self.yield_before_send {
            tokio::task::yield_now().await;
        }
        let attachment_contents = match reply.attachment() {
            Some(attachment) => Some(
                tokio::fs::read_to_string(attachment.path())
                    .await
                    .map_err(|e| {
                        TransportError::new(TransportErrorKind::SendFailed(e.to_string()))
                    })?,
            ),
            None => None,
        };
        self.replies.lock().expect("replies lock").push(SentReply {
            message_id: *event.message_id(),
            channel_id: *event.channel_id(),
            reply,
            attachment_contents,
        });
        Ok(())
    }

    async fn delete_message(&self, event: &MessageEvent) -> TransportResult<()> {
        if self.fail_deletes {
            return Err(TransportError::new(TransportErrorKind::DeleteFailed(
                "Mock delete failure".to_string(),
            )));
        }
        self.deleted
            .lock()
            .expect("deleted lock")
            .push(*event.message_id());
        Ok(())
    }

    async fn list_guilds(&self) -> TransportResult<Vec<GuildId>> {
        if self.fail_listing {
            return Err(TransportError::new(TransportErrorKind::FetchFailed(
                "Mock listing failure".to_string(),
            )));
        }
        Ok(self.guilds.clone())
    }
}

/// Repository over a fresh in-memory database.
pub fn memory_repository() -> Arc<WhitelistRepository> {
    let conn = establish_connection(":memory:").expect("Failed to open in-memory database");
    Arc::new(WhitelistRepository::new(conn))
}

/// Workflow wired to a recording transport, in-memory store and scratch directory.
pub struct Harness {
    pub repository: Arc<WhitelistRepository>,
    pub transport: Arc<RecordingTransport>,
    pub audit: Arc<AuditLog>,
    pub workflow: WhitelistWorkflow,
    pub dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_transport(RecordingTransport::new())
    }

    pub fn with_transport(transport: RecordingTransport) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repository = memory_repository();
        let transport = Arc::new(transport);
        let audit = Arc::new(AuditLog::new(dir.path().join("log.txt")));
        let workflow = WhitelistWorkflow::new(
            repository.clone(),
            transport.clone(),
            audit.clone(),
            dir.path(),
        );
        Self {
            repository,
            transport,
            audit,
            workflow,
            dir,
        }
    }

    pub fn audit_contents(&self) -> String {
        read_or_empty(self.audit.path())
    }

    /// Configure the guild through admin commands.
    pub async fn configure(&self, blockchain: &str) {
        for content in [
            format!(">channel {}", WHITELIST_CHANNEL.mention()),
            format!(">role {}", WHITELIST_ROLE.mention()),
            format!(">blockchain {blockchain}"),
        ] {
            self.workflow.handle_message(&admin_event(&content)).await;
        }
    }
}

pub fn read_or_empty(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

fn role_mentions(content: &str) -> Vec<RoleId> {
    let pattern = Regex::new(r"<@&(\d+)>").expect("role mention regex");
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps[1].parse().ok())
        .map(RoleId)
        .collect()
}

/// An event with mentions extracted from `content` and a fresh message id.
pub fn event(
    author: UserId,
    channel: ChannelId,
    roles: Vec<RoleId>,
    is_admin: bool,
    content: &str,
) -> MessageEvent {
    MessageEvent::builder()
        .message_id(MessageId(NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed)))
        .author_id(author)
        .is_member(true)
        .guild_id(GUILD)
        .guild_name(Some("Test Guild".to_string()))
        .channel_id(channel)
        .content(content)
        .mentioned_channel_ids(parse_channel_mentions(content))
        .mentioned_role_ids(role_mentions(content))
        .author_role_ids(roles)
        .author_is_admin(is_admin)
        .build()
        .expect("Failed to build event")
}

/// Administrator without the whitelist role, posting outside the whitelist channel.
pub fn admin_event(content: &str) -> MessageEvent {
    event(ADMIN, OTHER_CHANNEL, Vec::new(), true, content)
}

/// Role-holding member posting in the whitelist channel.
pub fn member_event(content: &str) -> MessageEvent {
    member_event_from(MEMBER, content)
}

pub fn member_event_from(author: UserId, content: &str) -> MessageEvent {
    event(author, WHITELIST_CHANNEL, vec![WHITELIST_ROLE], false, content)
}
