use super::Block;

/// State changes the coordinator reports to connected sessions.
/// Events are not stored anywhere; sessions that miss one never see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiningEvent {
    NewBlock(Block),
    BlockSolved {
        miner: String,
        hash: String,
        new_balance: u64,
        block_number: u64,
    },
    DifficultyChanged {
        target_prefix: String,
    },
    AuthFailed {
        reason: String,
    },
}
