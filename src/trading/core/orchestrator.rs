use std::sync::Arc;

use solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer};

use super::{
    descriptor::{AccountRoleMap, RoleInputs},
    timer::TradeTimer,
    traits::RpcTransport,
};
use crate::{
    common::PriorityFee,
    error::{ClientError, ClientResult},
    instruction::launchpad::LaunchpadInstruction,
    trading::common::build_transaction,
};

/// 通用指令执行器
///
/// Resolves the instruction's account roles, validates them against the
/// signers, then builds, signs and submits one transaction. Submission is
/// attempted exactly once.
#[derive(Clone)]
pub struct InstructionOrchestrator {
    program_id: Pubkey,
    transport: Arc<dyn RpcTransport>,
    priority_fee: PriorityFee,
}

impl InstructionOrchestrator {
    pub fn new(program_id: Pubkey, transport: Arc<dyn RpcTransport>, priority_fee: PriorityFee) -> Self {
        Self { program_id, transport, priority_fee }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Resolves roles for `args` from caller inputs.
    pub fn resolve<A: LaunchpadInstruction>(&self, args: &A, inputs: &RoleInputs) -> ClientResult<AccountRoleMap> {
        AccountRoleMap::resolve(args.descriptor(), &self.program_id, inputs)
    }

    /// Resolves and submits. `signers[0]` pays the fee.
    pub async fn execute<A: LaunchpadInstruction + Sync>(
        &self,
        args: &A,
        inputs: &RoleInputs,
        signers: &[&dyn Signer],
    ) -> ClientResult<Signature> {
        let roles = self.resolve(args, inputs)?;
        self.execute_with_roles(args, &roles, signers).await
    }

    /// Submits over an already resolved role map.
    pub async fn execute_with_roles<A: LaunchpadInstruction + Sync>(
        &self,
        args: &A,
        roles: &AccountRoleMap,
        signers: &[&dyn Signer],
    ) -> ClientResult<Signature> {
        let descriptor = args.descriptor();
        let mut timer = TradeTimer::new(format!("{} build", descriptor.name));

        roles.validate(descriptor, signers)?;
        let instruction = args.instruction(self.program_id, roles)?;
        timer.stage(format!("{} blockhash", descriptor.name));

        let blockhash = self.transport.latest_blockhash().await?;
        let transaction = build_transaction(signers, &self.priority_fee, vec![instruction], blockhash)?;
        timer.stage(format!("{} submit via {}", descriptor.name, self.transport.transport_name()));

        let result = self.transport.send_and_confirm(&transaction).await;
        timer.finish();
        match &result {
            Ok(signature) => log::info!("{} confirmed: {}", descriptor.name, signature),
            Err(ClientError::Rejected(e)) => log::warn!("{} rejected by program: {}", descriptor.name, e),
            Err(e) => log::warn!("{} failed: {}", descriptor.name, e),
        }
        result
    }
}
