//! Descriptor table for the launch program's instructions.
//!
//! Role order is the instruction's account order.

use crate::{
    constants::launchpad::{
        accounts::{
            ASSOCIATED_TOKEN_PROGRAM, MPL_TOKEN_METADATA, NATIVE_MINT, RENT, SYSTEM_PROGRAM,
            TOKEN_PROGRAM,
        },
        discriminators::{
            ACCEPT_AUTHORITY_IX, CONFIGURE_IX, LAUNCH_IX, NOMINATE_AUTHORITY_IX, SWAP_IX,
            WITHDRAW_IX,
        },
    },
    trading::core::descriptor::{
        AccessMode::{ReadOnly, Signer, Writable},
        OperationDescriptor, RoleSpec, SeedScheme,
    },
};

const SYSTEM: RoleSpec = RoleSpec::constant("systemProgram", SYSTEM_PROGRAM);
const TOKEN: RoleSpec = RoleSpec::constant("tokenProgram", TOKEN_PROGRAM);
const ASSOCIATED_TOKEN: RoleSpec = RoleSpec::constant("associatedTokenProgram", ASSOCIATED_TOKEN_PROGRAM);
const RENT_SYSVAR: RoleSpec = RoleSpec::constant("rent", RENT);

const GLOBAL_VAULT: RoleSpec = RoleSpec::derived("globalVault", Writable, SeedScheme::GlobalVault);
const GLOBAL_CONFIG: RoleSpec = RoleSpec::derived("globalConfig", Writable, SeedScheme::Config);

pub static CONFIGURE: OperationDescriptor = OperationDescriptor {
    name: "configure",
    discriminator: CONFIGURE_IX,
    roles: &[
        RoleSpec::input("payer", Signer),
        RoleSpec::derived("config", Writable, SeedScheme::Config),
        GLOBAL_VAULT,
        RoleSpec::derived(
            "globalWsolAccount",
            Writable,
            SeedScheme::AssociatedToken { wallet: "globalVault", mint: "nativeMint" },
        ),
        RoleSpec::constant("nativeMint", NATIVE_MINT),
        SYSTEM,
        TOKEN,
        ASSOCIATED_TOKEN,
    ],
};

pub static NOMINATE_AUTHORITY: OperationDescriptor = OperationDescriptor {
    name: "nominate_authority",
    discriminator: NOMINATE_AUTHORITY_IX,
    roles: &[RoleSpec::input("admin", Signer), GLOBAL_CONFIG],
};

pub static ACCEPT_AUTHORITY: OperationDescriptor = OperationDescriptor {
    name: "accept_authority",
    discriminator: ACCEPT_AUTHORITY_IX,
    roles: &[RoleSpec::input("newAdmin", Signer), GLOBAL_CONFIG],
};

pub static LAUNCH: OperationDescriptor = OperationDescriptor {
    name: "launch",
    discriminator: LAUNCH_IX,
    roles: &[
        GLOBAL_CONFIG,
        GLOBAL_VAULT,
        RoleSpec::input("creator", Signer),
        RoleSpec::input("token", Signer),
        RoleSpec::derived("bondingCurve", Writable, SeedScheme::BondingCurve { mint: "token" }),
        RoleSpec::derived("tokenMetadataAccount", Writable, SeedScheme::Metadata { mint: "token" }),
        RoleSpec::derived(
            "globalTokenAccount",
            Writable,
            SeedScheme::AssociatedToken { wallet: "globalVault", mint: "token" },
        ),
        SYSTEM,
        RENT_SYSVAR,
        TOKEN,
        ASSOCIATED_TOKEN,
        RoleSpec::constant("mplTokenMetadataProgram", MPL_TOKEN_METADATA),
        RoleSpec::input("teamWallet", Writable),
        RoleSpec::derived(
            "teamWalletAta",
            Writable,
            SeedScheme::AssociatedToken { wallet: "teamWallet", mint: "token" },
        ),
    ],
};

pub static SWAP: OperationDescriptor = OperationDescriptor {
    name: "swap",
    discriminator: SWAP_IX,
    roles: &[
        GLOBAL_CONFIG,
        RoleSpec::input("teamWallet", Writable),
        RoleSpec::derived(
            "teamWalletAta",
            Writable,
            SeedScheme::AssociatedToken { wallet: "teamWallet", mint: "tokenMint" },
        ),
        RoleSpec::input("devWallet", Writable),
        RoleSpec::derived(
            "devWalletAta",
            Writable,
            SeedScheme::AssociatedToken { wallet: "devWallet", mint: "tokenMint" },
        ),
        RoleSpec::derived("bondingCurve", Writable, SeedScheme::BondingCurve { mint: "tokenMint" }),
        GLOBAL_VAULT,
        RoleSpec::input("tokenMint", ReadOnly),
        RoleSpec::derived(
            "globalTokenAccount",
            Writable,
            SeedScheme::AssociatedToken { wallet: "globalVault", mint: "tokenMint" },
        ),
        RoleSpec::input("user", Signer),
        RoleSpec::derived(
            "userTokenAccount",
            Writable,
            SeedScheme::AssociatedToken { wallet: "user", mint: "tokenMint" },
        ),
        SYSTEM,
        TOKEN,
        ASSOCIATED_TOKEN,
        RENT_SYSVAR,
    ],
};

pub static WITHDRAW: OperationDescriptor = OperationDescriptor {
    name: "withdraw",
    discriminator: WITHDRAW_IX,
    roles: &[
        RoleSpec::input("admin", Signer),
        RoleSpec::derived("globalConfig", ReadOnly, SeedScheme::Config),
        GLOBAL_VAULT,
        RoleSpec::derived("bondingCurve", Writable, SeedScheme::BondingCurve { mint: "tokenMint" }),
        RoleSpec::input("tokenMint", ReadOnly),
        RoleSpec::derived(
            "globalTokenAccount",
            Writable,
            SeedScheme::AssociatedToken { wallet: "globalVault", mint: "tokenMint" },
        ),
        RoleSpec::derived(
            "adminTokenAccount",
            Writable,
            SeedScheme::AssociatedToken { wallet: "admin", mint: "tokenMint" },
        ),
        SYSTEM,
        TOKEN,
        ASSOCIATED_TOKEN,
        RENT_SYSVAR,
    ],
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer as _};

    use super::*;
    use crate::{
        constants::launchpad::accounts::LAUNCHPAD_PROGRAM,
        trading::{
            core::descriptor::{AccountRoleMap, RoleInputs},
            launchpad::pda::{
                get_associated_token_pda, get_bonding_curve_pda, get_config_pda,
                get_global_token_account, get_global_vault_pda, get_global_wsol_account,
                get_metadata_pda,
            },
        },
    };

    const ALL_OPERATIONS: [&OperationDescriptor; 6] =
        [&CONFIGURE, &NOMINATE_AUTHORITY, &ACCEPT_AUTHORITY, &LAUNCH, &SWAP, &WITHDRAW];

    #[test]
    fn test_role_names_unique_per_operation() {
        for op in ALL_OPERATIONS {
            let names: HashSet<_> = op.roles.iter().map(|r| r.name).collect();
            assert_eq!(names.len(), op.roles.len(), "duplicate role in {}", op.name);
        }
    }

    #[test]
    fn test_configure_wiring() {
        let payer = Keypair::new();
        let inputs = RoleInputs::new().with("payer", payer.pubkey());
        let map = AccountRoleMap::resolve(&CONFIGURE, &LAUNCHPAD_PROGRAM, &inputs).unwrap();

        assert_eq!(map.address("config").unwrap(), get_config_pda(&LAUNCHPAD_PROGRAM).unwrap().address);
        assert_eq!(
            map.address("globalVault").unwrap(),
            get_global_vault_pda(&LAUNCHPAD_PROGRAM).unwrap().address
        );
        assert_eq!(
            map.address("globalWsolAccount").unwrap(),
            get_global_wsol_account(&LAUNCHPAD_PROGRAM).unwrap().address
        );
        map.validate(&CONFIGURE, &[&payer]).unwrap();
        assert_eq!(map.to_account_metas().len(), 8);
    }

    #[test]
    fn test_launch_wiring() {
        let creator = Keypair::new();
        let mint = Keypair::new();
        let team = Pubkey::new_unique();
        let inputs = RoleInputs::new()
            .with("creator", creator.pubkey())
            .with("token", mint.pubkey())
            .with("teamWallet", team);
        let map = AccountRoleMap::resolve(&LAUNCH, &LAUNCHPAD_PROGRAM, &inputs).unwrap();

        assert_eq!(
            map.address("bondingCurve").unwrap(),
            get_bonding_curve_pda(&LAUNCHPAD_PROGRAM, &mint.pubkey()).unwrap().address
        );
        assert_eq!(
            map.address("tokenMetadataAccount").unwrap(),
            get_metadata_pda(&mint.pubkey()).unwrap().address
        );
        assert_eq!(
            map.address("globalTokenAccount").unwrap(),
            get_global_token_account(&LAUNCHPAD_PROGRAM, &mint.pubkey()).unwrap().address
        );
        assert_eq!(
            map.address("teamWalletAta").unwrap(),
            get_associated_token_pda(&team, &mint.pubkey()).unwrap().address
        );
        map.validate(&LAUNCH, &[&creator, &mint]).unwrap();

        // mint keypair must sign too
        assert!(map.validate(&LAUNCH, &[&creator]).is_err());
    }

    #[test]
    fn test_swap_and_withdraw_wiring() {
        let user = Keypair::new();
        let mint = Pubkey::new_unique();
        let inputs = RoleInputs::new()
            .with("user", user.pubkey())
            .with("tokenMint", mint)
            .with("teamWallet", Pubkey::new_unique())
            .with("devWallet", Pubkey::new_unique());
        let swap = AccountRoleMap::resolve(&SWAP, &LAUNCHPAD_PROGRAM, &inputs).unwrap();
        assert_eq!(
            swap.address("userTokenAccount").unwrap(),
            get_associated_token_pda(&user.pubkey(), &mint).unwrap().address
        );
        swap.validate(&SWAP, &[&user]).unwrap();
        assert_eq!(swap.to_account_metas().len(), 15);

        let inputs = RoleInputs::new().with("admin", user.pubkey()).with("tokenMint", mint);
        let withdraw = AccountRoleMap::resolve(&WITHDRAW, &LAUNCHPAD_PROGRAM, &inputs).unwrap();
        let metas = withdraw.to_account_metas();
        assert!(!metas[1].is_writable);
        assert_eq!(
            withdraw.address("adminTokenAccount").unwrap(),
            get_associated_token_pda(&user.pubkey(), &mint).unwrap().address
        );
        withdraw.validate(&WITHDRAW, &[&user]).unwrap();
    }
}
