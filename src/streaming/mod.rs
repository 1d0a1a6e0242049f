//! Program notification feeds and the event listener built on them.

pub mod event_parser;
pub mod listener;
pub mod pubsub;

use std::fmt;

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{common::SubscriptionHandle, error::ClientResult};

pub use event_parser::{CompleteEvent, ProgramRecord, RecordKind};
pub use listener::{listen_for, watch, MatchedEvent};
pub use pubsub::{FeedMode, PubsubFeed};

/// Where a notification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOrigin {
    /// Account whose data changed
    Account(Pubkey),
    /// Transaction whose logs carried the payload
    Transaction(Signature),
}

impl fmt::Display for NotificationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationOrigin::Account(key) => write!(f, "account {key}"),
            NotificationOrigin::Transaction(signature) => write!(f, "transaction {signature}"),
        }
    }
}

/// One undecoded payload from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNotification {
    pub slot: u64,
    pub origin: NotificationOrigin,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedMessage {
    Notification(RawNotification),
    /// A notification whose payload could not be extracted
    Malformed { slot: u64, reason: String },
    /// A transport hiccup the feed recovered from; the subscription is still open
    TransportError(String),
}

/// A push feed of notifications scoped to one program.
#[async_trait::async_trait]
pub trait NotificationFeed: Send + Sync {
    /// Opens one subscription. The returned handle owns it.
    async fn open(&self, program_id: Pubkey) -> ClientResult<SubscriptionHandle>;

    fn feed_name(&self) -> &'static str;
}
