pub mod trade {
    pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 400_000;
    pub const DEFAULT_COMPUTE_UNIT_PRICE: u64 = 100_000;
    /// Seconds added to "now" when a swap deadline is not given explicitly
    pub const DEFAULT_DEADLINE_WINDOW_SECS: i64 = 120;
    /// Upper bound accepted for the deadline window
    pub const MAX_DEADLINE_WINDOW_SECS: i64 = 3_600;
}

pub mod listen {
    pub const DEFAULT_LISTEN_TIMEOUT_SECS: u64 = 300;
    /// How long `SubscriptionHandle::close` waits for the feed task to unsubscribe
    pub const CLOSE_TIMEOUT_SECS: u64 = 5;
}
