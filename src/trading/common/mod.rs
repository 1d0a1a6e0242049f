pub mod compute_budget_manager;
pub mod transaction_builder;

pub use compute_budget_manager::*;
pub use transaction_builder::*;
