pub mod common;
pub mod core;
pub mod launchpad;

pub use core::descriptor::{AccountRoleMap, OperationDescriptor, RoleInputs};
pub use core::orchestrator::InstructionOrchestrator;
pub use core::params::{LaunchParams, SwapDirection, SwapParams};
pub use core::traits::RpcTransport;
