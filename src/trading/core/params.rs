use std::{fmt, str::FromStr};

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::{ClientError, ClientResult};

/// 发币参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    pub decimals: u8,
    pub token_supply: u64,
    /// Virtual lamport reserves seeded into the curve
    pub reserve_lamports: u64,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// 交易方向, encoded as the program's `direction: u8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum SwapDirection {
    Buy = 0,
    Sell = 1,
}

impl From<SwapDirection> for u8 {
    fn from(direction: SwapDirection) -> Self {
        direction as u8
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::Buy => write!(f, "buy"),
            SwapDirection::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for SwapDirection {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" | "0" => Ok(SwapDirection::Buy),
            "sell" | "1" => Ok(SwapDirection::Sell),
            _ => Err(ClientError::validation(format!("unsupported swap direction: {s}"))),
        }
    }
}

/// 交易参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub mint: Pubkey,
    /// Lamports in when buying, token base units in when selling
    pub amount: u64,
    pub direction: SwapDirection,
    pub minimum_receive_amount: u64,
    /// Unix timestamp after which the program rejects the swap.
    /// `None` means now + the configured deadline window.
    pub deadline: Option<i64>,
}

impl SwapParams {
    pub fn validate(&self) -> ClientResult<()> {
        if self.amount == 0 {
            return Err(ClientError::validation("swap amount cannot be zero"));
        }
        Ok(())
    }
}

/// Deadline `window_secs` from `now`.
#[inline]
pub fn deadline_from(now: i64, window_secs: i64) -> i64 {
    now.saturating_add(window_secs)
}
