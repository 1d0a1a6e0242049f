//! Event subscription listener
//!
//! One subscription per call. The deadline and cancellation cover opening
//! the subscription as well as waiting on it; once open, the subscription is
//! closed on the one path after the `select!`.

use std::{fmt, future::Future, time::Duration};

use solana_sdk::pubkey::Pubkey;
use tokio::time::{sleep_until, Instant};

use super::{
    event_parser::{ProgramRecord, RecordKind},
    FeedMessage, NotificationFeed, NotificationOrigin,
};
use crate::{
    common::SubscriptionHandle,
    error::{ClientError, ClientResult},
};

/// A decoded record of the requested kind.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedEvent {
    pub record: ProgramRecord,
    pub slot: u64,
    pub origin: NotificationOrigin,
}

impl fmt::Display for MatchedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at slot {} from {}: {}",
            self.record.kind(),
            self.slot,
            self.origin,
            self.record.to_json()
        )
    }
}

/// Waits for the first record of `kind`.
///
/// Resolves with [`ClientError::ListenTimeout`] once `timeout` elapses
/// (measured from the call, subscribing included),
/// [`ClientError::Cancelled`] when `cancel` completes first, and
/// [`ClientError::Transport`] if the feed ends the subscription. Once
/// opened, the subscription is closed before returning in every case.
pub async fn listen_for<C>(
    feed: &dyn NotificationFeed,
    program_id: Pubkey,
    kind: RecordKind,
    timeout: Duration,
    cancel: C,
) -> ClientResult<MatchedEvent>
where
    C: Future<Output = ()>,
{
    let deadline = Instant::now() + timeout;
    tokio::pin!(cancel);

    let opened = tokio::select! {
        opened = feed.open(program_id) => opened,
        _ = sleep_until(deadline) => Err(ClientError::ListenTimeout(timeout)),
        _ = &mut cancel => Err(ClientError::Cancelled),
    };
    let mut handle = match opened {
        Ok(handle) => handle,
        Err(e) => {
            log::info!("listener stopped before subscribing: {e}");
            return Err(e);
        }
    };
    log::info!("listening for {kind} on {program_id} via {} (timeout {timeout:?})", feed.feed_name());

    let outcome = tokio::select! {
        matched = next_match(&mut handle, kind) => matched,
        _ = sleep_until(deadline) => Err(ClientError::ListenTimeout(timeout)),
        _ = &mut cancel => Err(ClientError::Cancelled),
    };
    handle.close().await;

    match &outcome {
        Ok(event) => log::info!("{event}"),
        Err(e) => log::info!("listener stopped: {e}"),
    }
    outcome
}

/// Reports every record of `kind` to `on_match` until `cancel` completes or
/// the feed fails. Returns the number of matches seen.
pub async fn watch<C, F>(
    feed: &dyn NotificationFeed,
    program_id: Pubkey,
    kind: RecordKind,
    cancel: C,
    mut on_match: F,
) -> ClientResult<u64>
where
    C: Future<Output = ()>,
    F: FnMut(&MatchedEvent),
{
    tokio::pin!(cancel);
    let mut handle = tokio::select! {
        opened = feed.open(program_id) => opened?,
        _ = &mut cancel => {
            log::info!("watch cancelled before subscribing");
            return Ok(0);
        }
    };
    log::info!("watching {kind} on {program_id} via {}", feed.feed_name());

    let mut matches = 0u64;
    let outcome = loop {
        tokio::select! {
            matched = next_match(&mut handle, kind) => match matched {
                Ok(event) => {
                    matches += 1;
                    on_match(&event);
                }
                Err(e) => break Err(e),
            },
            _ = &mut cancel => break Ok(matches),
        }
    };
    handle.close().await;
    outcome
}

async fn next_match(handle: &mut SubscriptionHandle, kind: RecordKind) -> ClientResult<MatchedEvent> {
    while let Some(message) = handle.next().await {
        match message {
            FeedMessage::Notification(notification) => match ProgramRecord::decode(&notification.data) {
                Ok(record) if record.kind() == kind => {
                    return Ok(MatchedEvent {
                        record,
                        slot: notification.slot,
                        origin: notification.origin,
                    });
                }
                Ok(record) => {
                    log::debug!("skipping {} from {} at slot {}", record.kind(), notification.origin, notification.slot)
                }
                Err(e) => log::debug!(
                    "skipping notification from {} at slot {}: {e}",
                    notification.origin,
                    notification.slot
                ),
            },
            FeedMessage::Malformed { slot, reason } => {
                log::debug!("skipping malformed notification at slot {slot}: {reason}")
            }
            FeedMessage::TransportError(e) => log::warn!("feed error, subscription still open: {e}"),
        }
    }
    Err(ClientError::Transport("notification feed closed".to_string()))
}
