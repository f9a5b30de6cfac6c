use log::{info, warn};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::Receiver;

use super::challenge::meets_target;
use super::{Block, BlockState, MinerBalance, MiningEvent};
use crate::error::MiningError;
use crate::hub::{NotificationHub, SessionId};

/// Result of an accepted solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub solved_number: u64,
    pub new_balance: u64,
    pub block: Block,
}

/// Owns the shared block state and serializes every transition on it.
///
/// Events are broadcast while the state lock is held. Hub delivery never
/// waits, and holding the lock keeps every session's view of the event
/// order identical to the order of transitions.
pub struct MiningCoordinator {
    state: Mutex<BlockState>,
    admin_secret: String,
    hub: Arc<NotificationHub<MiningEvent>>,
}

impl MiningCoordinator {
    pub fn new(
        state: BlockState,
        admin_secret: impl Into<String>,
        hub: Arc<NotificationHub<MiningEvent>>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            admin_secret: admin_secret.into(),
            hub,
        }
    }

    pub fn hub(&self) -> &Arc<NotificationHub<MiningEvent>> {
        &self.hub
    }

    /// Copy of the current block.
    pub fn snapshot(&self) -> Block {
        self.state.lock().expect("mutex poisoned").current().clone()
    }

    /// Register a session; its first event is the current block.
    pub fn join(&self) -> (SessionId, Receiver<MiningEvent>) {
        let st = self.state.lock().expect("mutex poisoned");
        self.hub.join(MiningEvent::NewBlock(st.current().clone()))
    }

    pub fn leave(&self, session: SessionId) -> bool {
        self.hub.leave(session)
    }

    /// Accept `hash` from `miner` if it meets the current target.
    ///
    /// The hash is not recomputed from the block identifier; any string with
    /// the right prefix is accepted.
    pub fn submit_solution(&self, miner: &str, hash: &str) -> Result<SolveOutcome, MiningError> {
        if miner.is_empty() {
            return Err(MiningError::InvalidSubmission("empty miner name"));
        }
        if hash.is_empty() {
            return Err(MiningError::InvalidSubmission("empty hash"));
        }

        let mut st = self.state.lock().expect("mutex poisoned");
        let target = &st.current().target;
        if !meets_target(hash, target) {
            return Err(MiningError::TargetNotMet {
                hash: hash.to_string(),
                target: target.clone(),
            });
        }

        let solved_number = st.current().number;
        let new_balance = st.solve(miner);
        let block = st.current().clone();

        self.hub.broadcast(&MiningEvent::BlockSolved {
            miner: miner.to_string(),
            hash: hash.to_string(),
            new_balance,
            block_number: solved_number,
        });
        self.hub.broadcast(&MiningEvent::NewBlock(block.clone()));

        info!("{miner} solved block #{solved_number} (balance {new_balance})");
        info!("new block #{}: {}", block.number, block.hash);

        Ok(SolveOutcome {
            solved_number,
            new_balance,
            block,
        })
    }

    /// Replace the target prefix. Any string is accepted, including empty.
    pub fn set_difficulty(&self, target_prefix: &str, secret: &str) -> Result<Block, MiningError> {
        if secret != self.admin_secret {
            warn!("unauthorized difficulty change attempt");
            return Err(MiningError::Unauthorized);
        }

        let mut st = self.state.lock().expect("mutex poisoned");
        st.retarget(target_prefix);
        self.hub.broadcast(&MiningEvent::DifficultyChanged {
            target_prefix: target_prefix.to_string(),
        });
        info!("difficulty changed to {target_prefix:?}");
        Ok(st.current().clone())
    }

    pub fn balance(&self, miner: &str) -> u64 {
        self.state.lock().expect("mutex poisoned").balance(miner)
    }

    pub fn leaderboard(&self, limit: usize) -> Vec<MinerBalance> {
        self.state.lock().expect("mutex poisoned").leaderboard(limit)
    }

    /// (miner count, total coins distributed)
    pub fn totals(&self) -> (usize, u64) {
        let st = self.state.lock().expect("mutex poisoned");
        (st.miner_count(), st.total_distributed())
    }
}
