use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::constants::{
    launchpad::accounts::LAUNCHPAD_PROGRAM,
    trade::trade::{DEFAULT_COMPUTE_UNIT_LIMIT, DEFAULT_COMPUTE_UNIT_PRICE, DEFAULT_DEADLINE_WINDOW_SECS},
};

/// Public RPC endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    Mainnet,
    Devnet,
}

impl Cluster {
    /// `ENV=main` selects mainnet, anything else devnet.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("main") | Some("mainnet") => Cluster::Mainnet,
            _ => Cluster::Devnet,
        }
    }

    pub fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
        }
    }

    pub fn ws_url(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "wss://api.mainnet-beta.solana.com",
            Cluster::Devnet => "wss://api.devnet.solana.com",
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PriorityFee {
    pub unit_limit: u32,
    /// micro-lamports per compute unit
    pub unit_price: u64,
}

impl Default for PriorityFee {
    fn default() -> Self {
        Self { unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT, unit_price: DEFAULT_COMPUTE_UNIT_PRICE }
    }
}

/// Everything a [`crate::LaunchpadClient`] needs besides its payer.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LaunchpadConfig {
    pub rpc_url: String,
    pub ws_url: String,
    /// Commitment for submissions and account reads
    pub commitment: CommitmentConfig,
    /// Commitment for subscriptions
    pub listen_commitment: CommitmentConfig,
    #[serde_as(as = "DisplayFromStr")]
    pub program_id: Pubkey,
    pub priority_fee: PriorityFee,
    /// Swap deadline = now + this many seconds, unless the caller passes one
    pub deadline_window_secs: i64,
}

impl LaunchpadConfig {
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            rpc_url: cluster.rpc_url().to_string(),
            ws_url: cluster.ws_url().to_string(),
            ..Self::default()
        }
    }
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            rpc_url: Cluster::Devnet.rpc_url().to_string(),
            ws_url: Cluster::Devnet.ws_url().to_string(),
            commitment: CommitmentConfig::finalized(),
            listen_commitment: CommitmentConfig::confirmed(),
            program_id: LAUNCHPAD_PROGRAM,
            priority_fee: PriorityFee::default(),
            deadline_window_secs: DEFAULT_DEADLINE_WINDOW_SECS,
        }
    }
}

pub type SolanaRpcClient = solana_client::nonblocking::rpc_client::RpcClient;
