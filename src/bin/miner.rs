//! Headless miner: connects to the coordinator's WebSocket, searches nonces
//! for the current block and reports every hash that meets the target.

use dotenvy::dotenv;
use futures_util::future::OptionFuture;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use std::env;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use mining_sim::api::models::{ClientMessage, ServerMessage};
use mining_sim::mining::challenge;

const DEFAULT_BATCH: u64 = 20_000;

/// What the miner is currently working on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Job {
    number: u64,
    identifier: String,
    target: String,
}

type BatchResult = (Job, Option<(u64, String)>);

/// Latest block seen from the server, and the job a solution was last sent for.
///
/// The server drops rejected submissions without replying, so the job is kept
/// after submitting. Mining pauses only while `submitted` matches it; a new
/// block or a retarget resumes it.
#[derive(Debug, Default)]
struct MinerState {
    job: Option<Job>,
    submitted: Option<Job>,
}

impl MinerState {
    /// Job to search next, if there is one not already submitted.
    fn next_job(&self) -> Option<&Job> {
        self.job.as_ref().filter(|job| self.submitted.as_ref() != Some(*job))
    }

    /// Hash to report for a finished batch, or None if there is nothing to
    /// send or the job moved on while the batch ran.
    fn take_solution(&mut self, searched: Job, found: Option<(u64, String)>) -> Option<String> {
        let (nonce, hash) = found?;
        if self.next_job() != Some(&searched) {
            debug!("discarding stale solution for block #{}", searched.number);
            return None;
        }
        info!("💎 Found nonce {nonce} for block #{}: {hash}", searched.number);
        self.submitted = Some(searched);
        Some(hash)
    }

    fn handle_server_text(&mut self, text: &str) {
        let msg: ServerMessage = match serde_json::from_str(text) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("⚠️ Unrecognized server message: {e}");
                return;
            }
        };

        match msg {
            ServerMessage::NewBlock {
                block_number,
                current_block,
            } => {
                info!(
                    "🧱 Block #{block_number} target={:?} reward={}",
                    current_block.target, current_block.reward
                );
                self.job = Some(Job {
                    number: block_number,
                    identifier: current_block.hash,
                    target: current_block.target,
                });
            }
            ServerMessage::BlockSolved {
                user,
                new_balance,
                block_number,
                ..
            } => info!("✅ {user} solved block #{block_number} (balance {new_balance})"),
            ServerMessage::DifficultyChanged { target_prefix } => {
                info!("🔧 Difficulty changed to {target_prefix:?}");
                if let Some(job) = self.job.as_mut() {
                    job.target = target_prefix;
                }
            }
            ServerMessage::AuthFailed { message } => warn!("❌ {message}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _ = dotenv();
    env_logger::init();

    let name = env::var("MINER_NAME").unwrap_or_else(|_| "miner".to_string());
    let url = env::var("SERVER_URL").unwrap_or_else(|_| "ws://127.0.0.1:8080/ws".to_string());
    let batch: u64 = env::var("MINER_BATCH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_BATCH);
    if name.is_empty() {
        warn!("MINER_NAME is empty, the server will reject every solution");
    }

    info!("📡 Connecting to {url} as {name}...");
    let (ws_stream, _response) = tokio_tungstenite::connect_async(&url).await?;
    info!("✅ Connected");
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let mut state = MinerState::default();
    let mut pending: Option<JoinHandle<BatchResult>> = None;

    loop {
        if pending.is_none() {
            if let Some(job) = state.next_job() {
                pending = Some(spawn_batch(job.clone(), batch));
            }
        }

        tokio::select! {
            frame = ws_receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => state.handle_server_text(text.as_str()),
                Some(Ok(Message::Ping(data))) => ws_sender.send(Message::Pong(data)).await?,
                Some(Ok(Message::Close(_))) | None => {
                    info!("Server closed connection");
                    break;
                }
                Some(Ok(other)) => debug!("ignoring frame {other:?}"),
                Some(Err(e)) => return Err(e.into()),
            },
            Some(done) = OptionFuture::from(pending.as_mut()) => {
                pending = None;
                let (searched, found) = done?;
                if let Some(hash) = state.take_solution(searched, found) {
                    let msg = ClientMessage::BlockSolved {
                        user: name.clone(),
                        hash,
                    };
                    ws_sender.send(Message::text(serde_json::to_string(&msg)?)).await?;
                }
            }
        }
    }

    Ok(())
}

fn spawn_batch(job: Job, attempts: u64) -> JoinHandle<BatchResult> {
    tokio::task::spawn_blocking(move || {
        let start = rand::random::<u64>();
        let found = challenge::search(&job.identifier, &job.target, start, attempts);
        (job, found)
    })
}
