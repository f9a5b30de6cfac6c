use rand::Rng;

use super::IDENTIFIER_BYTES;

/// The block currently open for mining.
///
/// Values are replaced rather than edited: a solve produces the next block,
/// a retarget produces a copy with a different target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub number: u64,
    pub hash: String, // identifier miners hash against
    pub target: String,
    pub reward: u64,
}

impl Block {
    /// Block #1 with a fresh identifier.
    pub fn genesis(target: impl Into<String>, reward: u64) -> Self {
        Self {
            number: 1,
            hash: fresh_identifier(),
            target: target.into(),
            reward,
        }
    }

    /// The block that follows this one once it is solved: next number, new
    /// identifier, same target and reward.
    pub fn next(&self) -> Self {
        Self {
            number: self.number + 1,
            hash: fresh_identifier(),
            target: self.target.clone(),
            reward: self.reward,
        }
    }

    /// Same block with a different target prefix.
    pub fn retarget(&self, target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..self.clone()
        }
    }
}

/// Random hex identifier. Only uniqueness matters here.
fn fresh_identifier() -> String {
    let mut bytes = [0u8; IDENTIFIER_BYTES];
    rand::thread_rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}
