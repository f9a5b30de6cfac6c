use thiserror::Error;

use crate::hub::SessionId;

/// Failures a coordinator request or a session can run into.
///
/// None of these are fatal: each one ends the request that caused it and the
/// server keeps running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MiningError {
    #[error("malformed command: {0}")]
    MalformedCommand(String),

    #[error("bad secret")]
    Unauthorized,

    #[error("invalid submission: {0}")]
    InvalidSubmission(&'static str),

    #[error("hash {hash} does not meet target {target:?}")]
    TargetNotMet { hash: String, target: String },

    #[error("session {0} is no longer connected")]
    TransportFailure(SessionId),
}

impl From<serde_json::Error> for MiningError {
    fn from(err: serde_json::Error) -> Self {
        MiningError::MalformedCommand(err.to_string())
    }
}
