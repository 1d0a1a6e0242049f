use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    signer::Signer,
    transaction::VersionedTransaction,
};

use super::compute_budget_manager::add_compute_budget_instructions;
use crate::{
    common::PriorityFee,
    error::{ClientError, ClientResult},
};

/// 构建版本化交易
///
/// Compute budget instructions go first, then the business instructions.
/// `signers[0]` pays the fee.
pub fn build_transaction(
    signers: &[&dyn Signer],
    priority_fee: &PriorityFee,
    business_instructions: Vec<Instruction>,
    recent_blockhash: Hash,
) -> ClientResult<VersionedTransaction> {
    let payer = signers
        .first()
        .ok_or_else(|| ClientError::validation("a transaction needs at least one signer"))?;

    let mut instructions = Vec::with_capacity(business_instructions.len() + 2);
    add_compute_budget_instructions(&mut instructions, priority_fee);
    instructions.extend(business_instructions);

    let v0_message = v0::Message::try_compile(&payer.pubkey(), &instructions, &[], recent_blockhash)
        .map_err(|e| ClientError::validation(format!("message compile: {e}")))?;
    let versioned_message = VersionedMessage::V0(v0_message);

    VersionedTransaction::try_new(versioned_message, signers)
        .map_err(|e| ClientError::validation(format!("signing: {e}")))
}
