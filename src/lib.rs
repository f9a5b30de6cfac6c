//! Shared mining-state coordinator for a toy proof-of-work simulator.
//!
//! Clients hash the current block identifier with random nonces until the
//! result starts with the target prefix, then report it over a WebSocket.
//! The coordinator credits the solver, opens the next block and fans the
//! change out to every connected session.

pub mod api;
pub mod config;
pub mod error;
pub mod hub;
pub mod mining;
