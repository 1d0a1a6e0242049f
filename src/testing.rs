//! In-memory transport and feed used by the unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use solana_sdk::{
    hash::Hash,
    instruction::InstructionError,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{TransactionError, VersionedTransaction},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    accounts::ConfigParameters,
    common::SubscriptionHandle,
    constants::launchpad::discriminators::{
        ACCEPT_AUTHORITY_IX, COMPLETE_EVENT, CONFIGURE_IX, NOMINATE_AUTHORITY_IX,
    },
    error::{ClientError, ClientResult},
    streaming::{event_parser::CompleteEvent, FeedMessage, NotificationFeed},
    trading::{core::traits::RpcTransport, launchpad::pda::get_config_pda},
};

/// `IncorrectAuthority`
pub const INCORRECT_AUTHORITY: u32 = 6004;

pub fn complete_event_payload(event: &CompleteEvent) -> Vec<u8> {
    let mut data = COMPLETE_EVENT.to_vec();
    data.extend(borsh::to_vec(event).unwrap());
    data
}

/// Records submissions and serves account data from memory. With
/// [`MockTransport::simulating`] it also applies the authority checks and
/// config writes of `configure`, `nominate_authority` and `accept_authority`.
#[derive(Default)]
pub struct MockTransport {
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    sent: Mutex<Vec<VersionedTransaction>>,
    reject_with: Option<TransactionError>,
    program_id: Option<Pubkey>,
    calls: AtomicUsize,
    submissions: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn simulating(program_id: Pubkey) -> Self {
        Self { program_id: Some(program_id), ..Self::default() }
    }

    pub fn reject_with(mut self, error: TransactionError) -> Self {
        self.reject_with = Some(error);
        self
    }

    pub fn with_account(self, address: Pubkey, data: Vec<u8>) -> Self {
        self.accounts.lock().unwrap().insert(address, data);
        self
    }

    pub fn with_config(self, program_id: &Pubkey, config: &ConfigParameters) -> Self {
        let address = get_config_pda(program_id).unwrap().address;
        self.with_account(address, config.to_account_data().unwrap())
    }

    pub fn config(&self, program_id: &Pubkey) -> Option<ConfigParameters> {
        let address = get_config_pda(program_id).unwrap().address;
        let accounts = self.accounts.lock().unwrap();
        accounts.get(&address).map(|data| ConfigParameters::try_from_account_data(data).unwrap())
    }

    pub fn sent(&self) -> Vec<VersionedTransaction> {
        self.sent.lock().unwrap().clone()
    }

    /// Every trait call, reads included
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    fn apply(&self, program_id: &Pubkey, transaction: &VersionedTransaction) -> Result<(), TransactionError> {
        let keys = transaction.message.static_account_keys();
        let config_address = get_config_pda(program_id).unwrap().address;
        for (index, ix) in transaction.message.instructions().iter().enumerate() {
            if keys[ix.program_id_index as usize] != *program_id {
                continue;
            }
            let reject = || {
                TransactionError::InstructionError(index as u8, InstructionError::Custom(INCORRECT_AUTHORITY))
            };
            let signer = keys[ix.accounts[0] as usize];
            let mut accounts = self.accounts.lock().unwrap();
            let current = accounts
                .get(&config_address)
                .map(|data| ConfigParameters::try_from_account_data(data).unwrap());

            let discriminator: [u8; 8] = ix.data[..8].try_into().unwrap();
            let updated = match (discriminator, current) {
                (CONFIGURE_IX, current) => {
                    if current.is_some_and(|c| c.authority != signer) {
                        return Err(reject());
                    }
                    let mut body = &ix.data[8..];
                    <ConfigParameters as borsh::BorshDeserialize>::deserialize(&mut body).unwrap()
                }
                (NOMINATE_AUTHORITY_IX, Some(mut config)) => {
                    if config.authority != signer {
                        return Err(reject());
                    }
                    config.pending_authority = Pubkey::try_from(&ix.data[8..40]).unwrap();
                    config
                }
                (ACCEPT_AUTHORITY_IX, Some(mut config)) => {
                    if config.pending() != Some(signer) {
                        return Err(reject());
                    }
                    config.authority = signer;
                    config.pending_authority = signer;
                    config
                }
                _ => continue,
            };
            accounts.insert(config_address, updated.to_account_data().unwrap());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RpcTransport for MockTransport {
    async fn latest_blockhash(&self) -> ClientResult<Hash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm(&self, transaction: &VersionedTransaction) -> ClientResult<Signature> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.submissions.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(transaction.clone());
        if let Some(error) = &self.reject_with {
            return Err(ClientError::Rejected(error.clone()));
        }
        if let Some(program_id) = self.program_id {
            self.apply(&program_id, transaction).map_err(ClientError::Rejected)?;
        }
        Ok(transaction.signatures[0])
    }

    async fn account_data(&self, address: &Pubkey) -> ClientResult<Option<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    fn transport_name(&self) -> &'static str {
        "mock"
    }
}

/// Plays a fixed script of messages into every subscription it opens.
pub struct MockFeed {
    script: Mutex<Vec<FeedMessage>>,
    keep_open: bool,
    delay: Duration,
    pub unsubscribes: Arc<AtomicUsize>,
}

impl MockFeed {
    /// Without [`MockFeed::keep_open`] the subscription ends after the script.
    pub fn new(script: Vec<FeedMessage>) -> Self {
        Self {
            script: Mutex::new(script),
            keep_open: false,
            delay: Duration::ZERO,
            unsubscribes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn keep_open(mut self) -> Self {
        self.keep_open = true;
        self
    }

    /// Wait before each scripted message
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait::async_trait]
impl NotificationFeed for MockFeed {
    async fn open(&self, _program_id: Pubkey) -> ClientResult<SubscriptionHandle> {
        let script = std::mem::take(&mut *self.script.lock().unwrap());
        let (sink, receiver) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let unsubscribes = self.unsubscribes.clone();
        let keep_open = self.keep_open;
        let delay = self.delay;

        let task = tokio::spawn(async move {
            let deliver = async {
                for message in script {
                    tokio::time::sleep(delay).await;
                    if sink.send(message).is_err() {
                        return;
                    }
                }
                if keep_open {
                    std::future::pending::<()>().await;
                }
            };
            tokio::select! {
                _ = &mut shutdown_rx => {}
                _ = deliver => {}
            }
            unsubscribes.fetch_add(1, Ordering::SeqCst);
        });
        Ok(SubscriptionHandle::new(receiver, shutdown_tx, task))
    }

    fn feed_name(&self) -> &'static str {
        "mock"
    }
}

/// Never finishes subscribing.
pub struct StalledFeed;

#[async_trait::async_trait]
impl NotificationFeed for StalledFeed {
    async fn open(&self, _program_id: Pubkey) -> ClientResult<SubscriptionHandle> {
        std::future::pending().await
    }

    fn feed_name(&self) -> &'static str {
        "stalled"
    }
}
