pub mod block;
pub mod challenge;
pub mod coordinator;
pub mod event;
pub mod model;

pub use block::Block;
pub use coordinator::{MiningCoordinator, SolveOutcome};
pub use event::MiningEvent;
pub use model::{BlockState, MinerBalance};

/// Target prefix of the first block when none is configured.
pub const DEFAULT_TARGET_PREFIX: &str = "0000";

/// Coins credited per accepted solve (dev value).
pub const DEFAULT_REWARD: u64 = 3;

/// Random bytes behind each block identifier (hex-encoded, so 64 chars).
pub const IDENTIFIER_BYTES: usize = 32;

/// Outbound events buffered per session before deliveries start dropping.
pub const SESSION_QUEUE_CAPACITY: usize = 64;

/// Leaderboard bounds for the REST view.
pub const LEADERBOARD_DEFAULT: usize = 10;
pub const LEADERBOARD_MAX: usize = 100;
