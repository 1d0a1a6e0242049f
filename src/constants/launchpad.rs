//! Constants used to talk to the launch program.
//!
//! - `seeds`: literal seeds for deriving Program Derived Addresses (PDAs)
//! - `accounts`: program ids, sysvars and mints the instructions reference
//! - `discriminators`: Anchor discriminators of instructions, events and accounts
//! - `limits`: client-side bounds checked before anything is submitted

/// Constants used as seeds for deriving PDAs (Program Derived Addresses)
pub mod seeds {
    /// Seed for the global configuration PDA
    pub const CONFIG_SEED: &[u8] = b"config";

    /// Seed for the global custody vault PDA
    pub const GLOBAL_SEED: &[u8] = b"global";

    /// Seed for per-token bonding curve PDAs
    pub const BONDING_CURVE_SEED: &[u8] = b"bonding_curve";

    /// Seed for Metaplex metadata PDAs
    pub const METADATA_SEED: &[u8] = b"metadata";
}

/// Constants related to program accounts and authorities
pub mod accounts {
    use solana_sdk::{pubkey, pubkey::Pubkey};

    /// Public key of the deployed launch program
    pub const LAUNCHPAD_PROGRAM: Pubkey = pubkey!("Ks6N2eSijgaQ6Gjpjc78M6deX8LrngprTPt5zxombdK");

    /// Public key for the MPL Token Metadata program
    pub const MPL_TOKEN_METADATA: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

    /// System Program ID
    pub const SYSTEM_PROGRAM: Pubkey = pubkey!("11111111111111111111111111111111");

    /// Token Program ID
    pub const TOKEN_PROGRAM: Pubkey = spl_token::ID;

    /// Associated Token Program ID
    pub const ASSOCIATED_TOKEN_PROGRAM: Pubkey =
        pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

    /// Rent Sysvar ID
    pub const RENT: Pubkey = pubkey!("SysvarRent111111111111111111111111111111111");

    /// Wrapped SOL mint
    pub const NATIVE_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

    /// Accounts an instruction may reference but never write to.
    pub const READ_ONLY_ACCOUNTS: &[Pubkey] = &[
        LAUNCHPAD_PROGRAM,
        MPL_TOKEN_METADATA,
        SYSTEM_PROGRAM,
        TOKEN_PROGRAM,
        ASSOCIATED_TOKEN_PROGRAM,
        RENT,
        NATIVE_MINT,
    ];
}

/// `sha256("<namespace>:<name>")[..8]`
pub mod discriminators {
    pub const CONFIGURE_IX: [u8; 8] = [245, 7, 108, 117, 95, 196, 54, 217];
    pub const NOMINATE_AUTHORITY_IX: [u8; 8] = [148, 182, 144, 91, 186, 12, 118, 18];
    pub const ACCEPT_AUTHORITY_IX: [u8; 8] = [107, 86, 198, 91, 33, 12, 107, 160];
    pub const LAUNCH_IX: [u8; 8] = [153, 241, 93, 225, 22, 69, 74, 61];
    pub const SWAP_IX: [u8; 8] = [248, 198, 158, 145, 225, 117, 135, 200];
    pub const WITHDRAW_IX: [u8; 8] = [183, 18, 70, 156, 148, 109, 161, 34];

    pub const COMPLETE_EVENT: [u8; 8] = [95, 114, 97, 156, 212, 46, 152, 8];

    pub const CONFIG_ACCOUNT: [u8; 8] = [155, 12, 170, 224, 30, 250, 204, 130];
    pub const BONDING_CURVE_ACCOUNT: [u8; 8] = [23, 183, 248, 55, 96, 216, 172, 96];
}

pub mod limits {
    /// 10000 = 100%
    pub const MAX_BASIS_POINTS: u16 = 10_000;

    /// Curve math converts token amounts with the same precision as lamports.
    pub const MAX_TOKEN_DECIMALS: u8 = 9;

    /// Metaplex metadata field limits
    pub const MAX_NAME_LENGTH: usize = 32;
    pub const MAX_SYMBOL_LENGTH: usize = 10;
    pub const MAX_URI_LENGTH: usize = 200;
}
