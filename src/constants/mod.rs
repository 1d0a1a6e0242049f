pub mod launchpad;
pub mod trade;
