pub mod operations;
pub mod pda;
