use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::hub::NotificationHub;
use crate::mining::{Block, BlockState, MinerBalance, MiningCoordinator, MiningEvent};

/// Shared application state: the single coordinator for this process.
pub struct AppState {
    pub coordinator: Arc<MiningCoordinator>,
    pub started_at: i64,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let hub = Arc::new(NotificationHub::new(config.session_queue_capacity));
        let state = BlockState::new(config.initial_target.clone(), config.reward);
        Self {
            coordinator: Arc::new(MiningCoordinator::new(
                state,
                config.admin_secret.clone(),
                hub,
            )),
            started_at: Utc::now().timestamp(),
        }
    }
}

/* ---------- WebSocket envelopes ---------- */

/// Inbound `{type, data}` envelope.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    BlockSolved {
        user: String,
        hash: String,
    },
    SetDifficulty {
        #[serde(rename = "targetPrefix")]
        target_prefix: String,
        password: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentBlock {
    pub hash: String,
    pub target: String,
    pub reward: u64,
}

/// Outbound `{type, data}` envelope.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    NewBlock {
        #[serde(rename = "blockNumber")]
        block_number: u64,
        #[serde(rename = "currentBlock")]
        current_block: CurrentBlock,
    },
    BlockSolved {
        user: String,
        hash: String,
        #[serde(rename = "newBalance")]
        new_balance: u64,
        #[serde(rename = "blockNumber")]
        block_number: u64,
    },
    DifficultyChanged {
        #[serde(rename = "targetPrefix")]
        target_prefix: String,
    },
    AuthFailed {
        message: String,
    },
}

impl From<&MiningEvent> for ServerMessage {
    fn from(event: &MiningEvent) -> Self {
        match event {
            MiningEvent::NewBlock(block) => ServerMessage::NewBlock {
                block_number: block.number,
                current_block: CurrentBlock {
                    hash: block.hash.clone(),
                    target: block.target.clone(),
                    reward: block.reward,
                },
            },
            MiningEvent::BlockSolved {
                miner,
                hash,
                new_balance,
                block_number,
            } => ServerMessage::BlockSolved {
                user: miner.clone(),
                hash: hash.clone(),
                new_balance: *new_balance,
                block_number: *block_number,
            },
            MiningEvent::DifficultyChanged { target_prefix } => ServerMessage::DifficultyChanged {
                target_prefix: target_prefix.clone(),
            },
            MiningEvent::AuthFailed { reason } => ServerMessage::AuthFailed {
                message: reason.clone(),
            },
        }
    }
}

/* ---------- REST Models ---------- */

#[derive(Serialize, Deserialize, Debug)]
pub struct BlockResponse {
    #[serde(rename = "blockNumber")]
    pub block_number: u64,
    pub hash: String,
    pub target: String,
    pub reward: u64,
}

impl From<Block> for BlockResponse {
    fn from(block: Block) -> Self {
        Self {
            block_number: block.number,
            hash: block.hash,
            target: block.target,
            reward: block.reward,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BalanceResponse {
    pub miner: String,
    pub balance: u64,
}

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LeaderboardResponse {
    pub miners: Vec<MinerBalance>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StatsResponse {
    #[serde(rename = "blockNumber")]
    pub block_number: u64,
    pub target: String,
    pub reward: u64,
    pub miners: usize,
    #[serde(rename = "totalDistributed")]
    pub total_distributed: u64,
    #[serde(rename = "connectedSessions")]
    pub connected_sessions: usize,
    #[serde(rename = "startedAt")]
    pub started_at: i64,
    #[serde(rename = "uptimeSecs")]
    pub uptime_secs: i64,
}
