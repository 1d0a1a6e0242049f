//! Instruction arguments of the launch program.
//!
//! Instruction data is the 8-byte discriminator followed by the borsh
//! encoding of the argument struct, fields in declaration order.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
};

use crate::{
    accounts::ConfigParameters,
    error::{ClientError, ClientResult},
    trading::{
        core::{
            descriptor::{AccountRoleMap, OperationDescriptor},
            params::{LaunchParams, SwapDirection},
        },
        launchpad::operations::{
            ACCEPT_AUTHORITY, CONFIGURE, LAUNCH, NOMINATE_AUTHORITY, SWAP, WITHDRAW,
        },
    },
};

/// An encodable launch program instruction.
pub trait LaunchpadInstruction: BorshSerialize {
    fn descriptor(&self) -> &'static OperationDescriptor;

    /// 指令数据: discriminator + borsh(args)
    fn data(&self) -> ClientResult<Vec<u8>> {
        let mut data = self.descriptor().discriminator.to_vec();
        self.serialize(&mut data).map_err(|e| {
            ClientError::validation(format!("encoding `{}` args: {e}", self.descriptor().name))
        })?;
        Ok(data)
    }

    /// Builds the instruction over an already validated role map.
    fn instruction(&self, program_id: Pubkey, roles: &AccountRoleMap) -> ClientResult<Instruction> {
        Ok(Instruction { program_id, accounts: roles.to_account_metas(), data: self.data()? })
    }
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct ConfigureArgs {
    pub new_config: ConfigParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NominateAuthorityArgs {
    pub new_admin: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AcceptAuthorityArgs;

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LaunchArgs {
    pub decimals: u8,
    pub token_supply: u64,
    pub virtual_lamport_reserves: u64,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl From<&LaunchParams> for LaunchArgs {
    fn from(params: &LaunchParams) -> Self {
        Self {
            decimals: params.decimals,
            token_supply: params.token_supply,
            virtual_lamport_reserves: params.reserve_lamports,
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            uri: params.uri.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SwapArgs {
    pub amount: u64,
    pub direction: SwapDirection,
    pub minimum_receive_amount: u64,
    /// Unix timestamp
    pub deadline: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct WithdrawArgs;

macro_rules! impl_instruction {
    ($($args:ty => $descriptor:ident),* $(,)?) => {
        $(
            impl LaunchpadInstruction for $args {
                fn descriptor(&self) -> &'static OperationDescriptor {
                    &$descriptor
                }
            }
        )*
    };
}

impl_instruction! {
    ConfigureArgs => CONFIGURE,
    NominateAuthorityArgs => NOMINATE_AUTHORITY,
    AcceptAuthorityArgs => ACCEPT_AUTHORITY,
    LaunchArgs => LAUNCH,
    SwapArgs => SWAP,
    WithdrawArgs => WITHDRAW,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::launchpad::discriminators::{
        ACCEPT_AUTHORITY_IX, LAUNCH_IX, NOMINATE_AUTHORITY_IX, SWAP_IX, WITHDRAW_IX,
    };

    #[test]
    fn test_unit_args_encode_as_bare_discriminator() {
        assert_eq!(AcceptAuthorityArgs.data().unwrap(), ACCEPT_AUTHORITY_IX.to_vec());
        assert_eq!(WithdrawArgs.data().unwrap(), WITHDRAW_IX.to_vec());
    }

    #[test]
    fn test_swap_layout() {
        let args = SwapArgs {
            amount: 1_000,
            direction: SwapDirection::Sell,
            minimum_receive_amount: 7,
            deadline: -1,
        };
        let data = args.data().unwrap();
        assert_eq!(&data[..8], &SWAP_IX);
        assert_eq!(data.len(), 8 + 8 + 1 + 8 + 8);
        assert_eq!(&data[8..16], &1_000u64.to_le_bytes());
        assert_eq!(data[16], 1);
        assert_eq!(&data[17..25], &7u64.to_le_bytes());
        assert_eq!(&data[25..], &(-1i64).to_le_bytes());
    }

    #[test]
    fn test_launch_layout() {
        let params = LaunchParams {
            decimals: 6,
            token_supply: 1_000_000_000,
            reserve_lamports: 5_000_000,
            name: "Kitty".to_string(),
            symbol: "KIT".to_string(),
            uri: "https://x".to_string(),
        };
        let data = LaunchArgs::from(&params).data().unwrap();
        assert_eq!(&data[..8], &LAUNCH_IX);
        assert_eq!(data[8], 6);
        assert_eq!(&data[9..17], &1_000_000_000u64.to_le_bytes());
        assert_eq!(&data[17..25], &5_000_000u64.to_le_bytes());
        // borsh strings are u32 length prefixed
        assert_eq!(&data[25..29], &5u32.to_le_bytes());
        assert_eq!(&data[29..34], b"Kitty");
    }

    #[test]
    fn test_nominate_layout() {
        let new_admin = Pubkey::new_unique();
        let data = NominateAuthorityArgs { new_admin }.data().unwrap();
        assert_eq!(&data[..8], &NOMINATE_AUTHORITY_IX);
        assert_eq!(&data[8..], new_admin.as_ref());
    }

    #[test]
    fn test_configure_embeds_on_chain_layout() {
        let config = ConfigParameters::new(Pubkey::new_unique());
        let data = ConfigureArgs { new_config: config.clone() }.data().unwrap();
        assert_eq!(&data[8..], &borsh::to_vec(&config).unwrap()[..]);
    }
}
