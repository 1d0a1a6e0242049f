use std::str::FromStr;

use futures::StreamExt;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::pubsub_client::PubsubClient,
    rpc_config::{
        RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcTransactionLogsConfig,
        RpcTransactionLogsFilter,
    },
    rpc_response::{Response, RpcKeyedAccount, RpcLogsResponse},
};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature};
use tokio::{
    sync::{mpsc, oneshot},
    task::AbortHandle,
};

use super::{
    event_parser::decode_log_payloads, FeedMessage, NotificationFeed, NotificationOrigin,
    RawNotification,
};
use crate::{
    common::SubscriptionHandle,
    error::{ClientError, ClientResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// `programSubscribe`: every change to an account owned by the program
    ProgramAccounts,
    /// `logsSubscribe`: `Program data:` payloads of transactions mentioning the program
    Logs,
}

/// WebSocket feed backed by the RPC node's pubsub endpoint.
#[derive(Debug, Clone)]
pub struct PubsubFeed {
    ws_url: String,
    commitment: CommitmentConfig,
    mode: FeedMode,
}

impl PubsubFeed {
    pub fn new(ws_url: impl Into<String>, commitment: CommitmentConfig, mode: FeedMode) -> Self {
        Self { ws_url: ws_url.into(), commitment, mode }
    }
}

type Ready = oneshot::Sender<ClientResult<()>>;

/// Aborts the forwarding task when `open` is dropped before it subscribed.
struct AbortUnlessReady(Option<AbortHandle>);

impl AbortUnlessReady {
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for AbortUnlessReady {
    fn drop(&mut self) {
        if let Some(task) = self.0.take() {
            task.abort();
        }
    }
}

#[async_trait::async_trait]
impl NotificationFeed for PubsubFeed {
    async fn open(&self, program_id: Pubkey) -> ClientResult<SubscriptionHandle> {
        let (sink, receiver) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (ready_tx, ready_rx) = oneshot::channel();
        let ws_url = self.ws_url.clone();
        let commitment = self.commitment;
        let mode = self.mode;

        let task = tokio::spawn(async move {
            let client = match PubsubClient::new(&ws_url).await {
                Ok(client) => client,
                Err(e) => {
                    let _ = ready_tx.send(Err(e.into()));
                    return;
                }
            };
            match mode {
                FeedMode::ProgramAccounts => {
                    forward_program_accounts(&client, program_id, commitment, ready_tx, shutdown_rx, sink)
                        .await
                }
                FeedMode::Logs => {
                    forward_logs(&client, program_id, commitment, ready_tx, shutdown_rx, sink).await
                }
            }
            if let Err(e) = client.shutdown().await {
                log::debug!("pubsub client shutdown: {e}");
            }
        });

        let guard = AbortUnlessReady(Some(task.abort_handle()));

        match ready_rx.await {
            Ok(Ok(())) => {
                guard.disarm();
                log::info!("{} subscription open for program {}", self.feed_name(), program_id);
                Ok(SubscriptionHandle::new(receiver, shutdown_tx, task))
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ClientError::Transport("feed task ended before subscribing".to_string())),
        }
    }

    fn feed_name(&self) -> &'static str {
        match self.mode {
            FeedMode::ProgramAccounts => "programSubscribe",
            FeedMode::Logs => "logsSubscribe",
        }
    }
}

async fn forward_program_accounts(
    client: &PubsubClient,
    program_id: Pubkey,
    commitment: CommitmentConfig,
    ready: Ready,
    mut shutdown: oneshot::Receiver<()>,
    sink: mpsc::UnboundedSender<FeedMessage>,
) {
    let config = RpcProgramAccountsConfig {
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            commitment: Some(commitment),
            ..RpcAccountInfoConfig::default()
        },
        ..RpcProgramAccountsConfig::default()
    };
    let (mut stream, unsubscribe) = match client.program_subscribe(&program_id, Some(config)).await {
        Ok(subscription) => subscription,
        Err(e) => {
            let _ = ready.send(Err(e.into()));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            item = stream.next() => match item {
                Some(response) => {
                    if sink.send(account_message(response)).is_err() {
                        break;
                    }
                }
                None => {
                    log::warn!("program subscription stream ended");
                    break;
                }
            }
        }
    }
    unsubscribe().await;
}

async fn forward_logs(
    client: &PubsubClient,
    program_id: Pubkey,
    commitment: CommitmentConfig,
    ready: Ready,
    mut shutdown: oneshot::Receiver<()>,
    sink: mpsc::UnboundedSender<FeedMessage>,
) {
    let filter = RpcTransactionLogsFilter::Mentions(vec![program_id.to_string()]);
    let config = RpcTransactionLogsConfig { commitment: Some(commitment) };
    let (mut stream, unsubscribe) = match client.logs_subscribe(filter, config).await {
        Ok(subscription) => subscription,
        Err(e) => {
            let _ = ready.send(Err(e.into()));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    'outer: loop {
        tokio::select! {
            _ = &mut shutdown => break,
            item = stream.next() => match item {
                Some(response) => {
                    for message in log_messages(response) {
                        if sink.send(message).is_err() {
                            break 'outer;
                        }
                    }
                }
                None => {
                    log::warn!("logs subscription stream ended");
                    break;
                }
            }
        }
    }
    unsubscribe().await;
}

fn account_message(response: Response<RpcKeyedAccount>) -> FeedMessage {
    let slot = response.context.slot;
    let keyed = response.value;
    let account = match Pubkey::from_str(&keyed.pubkey) {
        Ok(account) => account,
        Err(e) => return FeedMessage::Malformed { slot, reason: format!("account key {}: {e}", keyed.pubkey) },
    };
    match keyed.account.data.decode() {
        Some(data) => FeedMessage::Notification(RawNotification {
            slot,
            origin: NotificationOrigin::Account(account),
            data,
        }),
        None => FeedMessage::Malformed { slot, reason: format!("undecodable data for {account}") },
    }
}

fn log_messages(response: Response<RpcLogsResponse>) -> Vec<FeedMessage> {
    let slot = response.context.slot;
    let logs = response.value;
    // failed transactions emit nothing
    if logs.err.is_some() {
        return vec![];
    }
    let signature = match Signature::from_str(&logs.signature) {
        Ok(signature) => signature,
        Err(e) => {
            return vec![FeedMessage::Malformed {
                slot,
                reason: format!("signature {}: {e}", logs.signature),
            }]
        }
    };
    decode_log_payloads(&logs.logs)
        .into_iter()
        .map(|data| {
            FeedMessage::Notification(RawNotification {
                slot,
                origin: NotificationOrigin::Transaction(signature),
                data,
            })
        })
        .collect()
}
