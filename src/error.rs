use std::time::Duration;

use solana_sdk::{pubkey::Pubkey, transaction::TransactionError};
use thiserror::Error;

/// Errors surfaced by the launchpad client.
///
/// `Validation` and `MalformedAccounts` are raised before anything reaches the
/// network. `Rejected` carries the program's refusal verbatim. `Decode` is
/// skipped (and only logged) by the event listener.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid seeds: {0}")]
    InvalidSeeds(String),

    #[error("no bump in [0, 255] yields an off-curve address for these seeds")]
    NoViableBump,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("malformed account roles for `{operation}`: {reason}")]
    MalformedAccounts {
        operation: &'static str,
        reason: String,
    },

    #[error("transaction rejected by program: {0}")]
    Rejected(TransactionError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("no matching event within {0:?}")]
    ListenTimeout(Duration),

    #[error("listener cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn malformed(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedAccounts { operation, reason: reason.into() }
    }

    /// True for errors raised locally, before any network round trip.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidSeeds(_)
                | Self::NoViableBump
                | Self::Validation(_)
                | Self::MalformedAccounts { .. }
        )
    }
}

impl From<solana_client::client_error::ClientError> for ClientError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        match err.get_transaction_error() {
            Some(tx_err) => Self::Rejected(tx_err),
            None => Self::Transport(err.to_string()),
        }
    }
}

impl From<solana_client::nonblocking::pubsub_client::PubsubClientError> for ClientError {
    fn from(err: solana_client::nonblocking::pubsub_client::PubsubClientError) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
