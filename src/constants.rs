/// The only version of [versioned envelopes](crate::versioned) that is
/// currently understood.
pub const SUPPORTED_ENVELOPE_VERSION: u32 = 0;

/// Default maximum size of a block in bytes.
pub const DEFAULT_BLOCK_SIZE: u64 = 10_000_000;
/// Default time budget for constructing a block, in milliseconds.
pub const DEFAULT_BLOCK_TIMEOUT_MILLIS: i64 = 3_000;
/// Default threshold for considering a block early, in milliseconds.
pub const DEFAULT_EARLY_BLOCK_THRESHOLD_MILLIS: i64 = 30_000;
/// Default maximum delay of baking a block, in milliseconds.
pub const DEFAULT_MAX_BAKING_DELAY_MILLIS: i64 = 10_000;
pub const DEFAULT_INSERTIONS_BEFORE_TRANSACTION_PURGE: u64 = 1_000;
/// Default time a transaction is kept alive, in seconds.
pub const DEFAULT_TRANSACTIONS_KEEP_ALIVE_SECS: i64 = 300;
/// Default delay between transaction purges, in seconds.
pub const DEFAULT_TRANSACTIONS_PURGING_DELAY_SECS: i64 = 180;
pub const DEFAULT_ACCOUNTS_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_MODULES_CACHE_SIZE: u64 = 1_000;
