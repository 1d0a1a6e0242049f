use solana_sdk::{compute_budget::ComputeBudgetInstruction, instruction::Instruction};

use crate::common::PriorityFee;

/// 添加计算预算指令
pub fn add_compute_budget_instructions(instructions: &mut Vec<Instruction>, priority_fee: &PriorityFee) {
    if priority_fee.unit_price > 0 {
        instructions.push(ComputeBudgetInstruction::set_compute_unit_price(priority_fee.unit_price));
    }
    if priority_fee.unit_limit > 0 {
        instructions.push(ComputeBudgetInstruction::set_compute_unit_limit(priority_fee.unit_limit));
    }
}
