pub mod subscription_handle;
pub mod types;

pub use subscription_handle::SubscriptionHandle;
pub use types::*;
