use solana_sdk::pubkey::{Pubkey, PubkeyError, MAX_SEEDS, MAX_SEED_LEN};

use crate::{
    constants::launchpad::{
        accounts::{ASSOCIATED_TOKEN_PROGRAM, MPL_TOKEN_METADATA, NATIVE_MINT, TOKEN_PROGRAM},
        seeds::{BONDING_CURVE_SEED, CONFIG_SEED, GLOBAL_SEED, METADATA_SEED},
    },
    error::{ClientError, ClientResult},
};

/// An address derived from a program id and an ordered seed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAccount {
    pub address: Pubkey,
    pub bump: u8,
}

/// Derives a program address, searching the bump downward from 255 until
/// the candidate falls off the ed25519 curve.
///
/// Fails when the seeds break the runtime's structural limits (at most
/// `MAX_SEEDS - 1` seeds so the bump fits, each at most `MAX_SEED_LEN`
/// bytes), or when no bump produces a valid address.
pub fn derive_address(program_id: &Pubkey, seeds: &[&[u8]]) -> ClientResult<DerivedAccount> {
    if seeds.len() >= MAX_SEEDS {
        return Err(ClientError::InvalidSeeds(format!(
            "{} seeds given, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some((index, seed)) = seeds.iter().enumerate().find(|(_, s)| s.len() > MAX_SEED_LEN) {
        return Err(ClientError::InvalidSeeds(format!(
            "seed {} is {} bytes, at most {} allowed",
            index,
            seed.len(),
            MAX_SEED_LEN
        )));
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);
        match Pubkey::create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok(DerivedAccount { address, bump }),
            Err(PubkeyError::InvalidSeeds) => continue,
            Err(e) => return Err(ClientError::InvalidSeeds(e.to_string())),
        }
    }
    Err(ClientError::NoViableBump)
}

#[inline]
pub fn get_config_pda(program_id: &Pubkey) -> ClientResult<DerivedAccount> {
    derive_address(program_id, &[CONFIG_SEED])
}

#[inline]
pub fn get_global_vault_pda(program_id: &Pubkey) -> ClientResult<DerivedAccount> {
    derive_address(program_id, &[GLOBAL_SEED])
}

#[inline]
pub fn get_bonding_curve_pda(program_id: &Pubkey, mint: &Pubkey) -> ClientResult<DerivedAccount> {
    derive_address(program_id, &[BONDING_CURVE_SEED, mint.as_ref()])
}

#[inline]
pub fn get_metadata_pda(mint: &Pubkey) -> ClientResult<DerivedAccount> {
    derive_address(
        &MPL_TOKEN_METADATA,
        &[METADATA_SEED, MPL_TOKEN_METADATA.as_ref(), mint.as_ref()],
    )
}

/// Associated token account of `wallet` for `mint` under the classic token program.
#[inline]
pub fn get_associated_token_pda(wallet: &Pubkey, mint: &Pubkey) -> ClientResult<DerivedAccount> {
    derive_address(
        &ASSOCIATED_TOKEN_PROGRAM,
        &[wallet.as_ref(), TOKEN_PROGRAM.as_ref(), mint.as_ref()],
    )
}

#[inline]
pub fn get_global_wsol_account(program_id: &Pubkey) -> ClientResult<DerivedAccount> {
    let global_vault = get_global_vault_pda(program_id)?;
    get_associated_token_pda(&global_vault.address, &NATIVE_MINT)
}

#[inline]
pub fn get_global_token_account(program_id: &Pubkey, mint: &Pubkey) -> ClientResult<DerivedAccount> {
    let global_vault = get_global_vault_pda(program_id)?;
    get_associated_token_pda(&global_vault.address, mint)
}
