use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Block;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinerBalance {
    pub miner: String,
    pub balance: u64,
}

/// The current block plus every miner balance credited so far.
#[derive(Debug)]
pub struct BlockState {
    current: Block,
    balances: HashMap<String, u64>,
    total_distributed: u64,
}

impl BlockState {
    /// Start at block #1 with no balances.
    pub fn new(target: impl Into<String>, reward: u64) -> Self {
        Self {
            current: Block::genesis(target, reward),
            balances: HashMap::new(),
            total_distributed: 0,
        }
    }

    pub fn current(&self) -> &Block {
        &self.current
    }

    /// Credit the current reward to `miner` and open the next block.
    /// Returns the miner's new balance.
    pub fn solve(&mut self, miner: &str) -> u64 {
        let reward = self.current.reward;
        let balance = self.balances.entry(miner.to_string()).or_insert(0);
        *balance = balance.saturating_add(reward);
        let new_balance = *balance;

        self.total_distributed = self.total_distributed.saturating_add(reward);
        self.current = self.current.next();
        new_balance
    }

    pub fn retarget(&mut self, target: impl Into<String>) {
        self.current = self.current.retarget(target);
    }

    /// Balance of `miner`, zero if it never solved a block.
    pub fn balance(&self, miner: &str) -> u64 {
        self.balances.get(miner).copied().unwrap_or(0)
    }

    pub fn miner_count(&self) -> usize {
        self.balances.len()
    }

    pub fn total_distributed(&self) -> u64 {
        self.total_distributed
    }

    /// Top `limit` miners by balance (desc), ties broken by name (asc).
    pub fn leaderboard(&self, limit: usize) -> Vec<MinerBalance> {
        let mut rows: Vec<MinerBalance> = self
            .balances
            .iter()
            .map(|(miner, balance)| MinerBalance {
                miner: miner.clone(),
                balance: *balance,
            })
            .collect();
        rows.sort_by(|a, b| b.balance.cmp(&a.balance).then_with(|| a.miner.cmp(&b.miner)));
        rows.truncate(limit);
        rows
    }
}
