use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::launchpad::discriminators::BONDING_CURVE_ACCOUNT,
    error::{ClientError, ClientResult},
};

/// Per-token bonding curve state
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BondingCurveState {
    pub token_mint: Pubkey,
    pub creator: Pubkey,
    pub init_lamport: u64,
    pub reserve_lamport: u64,
    pub reserve_token: u64,
    /// Lamports that complete the curve, captured at launch time
    pub curve_limit: u64,
    pub is_completed: bool,
}

impl BondingCurveState {
    pub fn try_from_account_data(data: &[u8]) -> ClientResult<Self> {
        if data.len() < 8 || data[..8] != BONDING_CURVE_ACCOUNT {
            return Err(ClientError::Decode("not a bonding curve account".to_string()));
        }
        let mut body = &data[8..];
        Self::deserialize(&mut body)
            .map_err(|e| ClientError::Decode(format!("bonding curve account: {e}")))
    }

    pub fn to_account_data(&self) -> ClientResult<Vec<u8>> {
        let mut data = BONDING_CURVE_ACCOUNT.to_vec();
        self.serialize(&mut data)
            .map_err(|e| ClientError::validation(format!("bonding curve encoding: {e}")))?;
        Ok(data)
    }

    /// Lamports still needed before the curve completes.
    pub fn remaining_lamports(&self) -> u64 {
        self.curve_limit.saturating_sub(self.reserve_lamport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_lamports_saturates() {
        let mut curve = BondingCurveState {
            token_mint: Pubkey::new_unique(),
            creator: Pubkey::new_unique(),
            init_lamport: 1_000_000,
            reserve_lamport: 40,
            reserve_token: 1_000_000,
            curve_limit: 100,
            is_completed: false,
        };
        assert_eq!(curve.remaining_lamports(), 60);
        curve.reserve_lamport = 150;
        assert_eq!(curve.remaining_lamports(), 0);
    }

    #[test]
    fn test_rejects_foreign_discriminator() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&[1u8; 97]);
        assert!(matches!(
            BondingCurveState::try_from_account_data(&data),
            Err(ClientError::Decode(_))
        ));
    }
}
