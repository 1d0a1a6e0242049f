use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Signature, transaction::VersionedTransaction,
};

use crate::error::ClientResult;

/// 交易提交通道trait - 负责与链交互
///
/// Implementations must not retry a submission on their own: a program
/// rejection is returned as [`crate::error::ClientError::Rejected`] as is.
#[async_trait::async_trait]
pub trait RpcTransport: Send + Sync {
    /// 获取最新区块哈希
    async fn latest_blockhash(&self) -> ClientResult<Hash>;

    /// 提交交易并等待确认
    async fn send_and_confirm(&self, transaction: &VersionedTransaction) -> ClientResult<Signature>;

    /// Raw account data, `None` when the account does not exist.
    async fn account_data(&self, address: &Pubkey) -> ClientResult<Option<Vec<u8>>>;

    /// 获取通道名称
    fn transport_name(&self) -> &'static str;
}
