use std::time::Duration;

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{constants::trade::listen::CLOSE_TIMEOUT_SECS, streaming::FeedMessage};

/// 订阅句柄
///
/// Owns one feed subscription: the receiving end of its notifications, the
/// shutdown signal and the task that holds the remote subscription. The task
/// unsubscribes once when signalled (or when the remote side ends the
/// stream). [`SubscriptionHandle::close`] consumes the handle, so a handle
/// is closed at most once; dropping an unclosed handle still signals the task.
pub struct SubscriptionHandle {
    receiver: mpsc::UnboundedReceiver<FeedMessage>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SubscriptionHandle {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<FeedMessage>,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<()>,
    ) -> Self {
        Self { receiver, shutdown: Some(shutdown), task: Some(task) }
    }

    /// Next message, `None` once the feed task has ended.
    pub async fn next(&mut self) -> Option<FeedMessage> {
        self.receiver.recv().await
    }

    /// Signals the feed task and waits for it to unsubscribe. A task that
    /// does not finish within the close timeout is aborted.
    pub async fn close(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.receiver.close();
        if let Some(mut task) = self.task.take() {
            let close_timeout = Duration::from_secs(CLOSE_TIMEOUT_SECS);
            match tokio::time::timeout(close_timeout, &mut task).await {
                Ok(Ok(())) => log::debug!("subscription closed"),
                Ok(Err(e)) => log::warn!("subscription task failed while closing: {e}"),
                Err(_) => {
                    log::warn!("subscription did not close within {close_timeout:?}, aborting");
                    task.abort();
                }
            }
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            log::debug!("subscription handle dropped without close");
            let _ = shutdown.send(());
        }
    }
}
