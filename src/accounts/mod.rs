pub mod authority;
pub mod bonding_curve;
pub mod config;

pub use authority::{AuthorityHandoff, HandoffState};
pub use bonding_curve::BondingCurveState;
pub use config::{AmountConfig, ConfigParameters};
