use std::{sync::Arc, time::Instant};

use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::VersionedTransaction,
};

use crate::{
    common::SolanaRpcClient,
    error::ClientResult,
    trading::core::traits::RpcTransport,
};

/// Submits through a plain RPC node and waits for the configured commitment.
#[derive(Clone)]
pub struct SolRpcTransport {
    pub rpc_client: Arc<SolanaRpcClient>,
}

impl SolRpcTransport {
    pub fn new(rpc_client: Arc<SolanaRpcClient>) -> Self {
        Self { rpc_client }
    }

    pub fn from_url(rpc_url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self::new(Arc::new(SolanaRpcClient::new_with_commitment(rpc_url.into(), commitment)))
    }
}

#[async_trait::async_trait]
impl RpcTransport for SolRpcTransport {
    async fn latest_blockhash(&self) -> ClientResult<Hash> {
        Ok(self.rpc_client.get_latest_blockhash().await?)
    }

    async fn send_and_confirm(&self, transaction: &VersionedTransaction) -> ClientResult<Signature> {
        let start_time = Instant::now();
        let signature = self.rpc_client.send_and_confirm_transaction(transaction).await?;
        log::debug!("signature {} confirmed in {:?}", signature, start_time.elapsed());
        Ok(signature)
    }

    async fn account_data(&self, address: &Pubkey) -> ClientResult<Option<Vec<u8>>> {
        let response = self
            .rpc_client
            .get_account_with_commitment(address, self.rpc_client.commitment())
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    fn transport_name(&self) -> &'static str {
        "rpc"
    }
}
