use log::warn;
use std::env;
use std::str::FromStr;

use crate::mining::{DEFAULT_REWARD, DEFAULT_TARGET_PREFIX, SESSION_QUEUE_CAPACITY};

/// Server settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin_secret: String,
    pub initial_target: String,
    pub reward: u64,
    pub session_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            admin_secret: "admin123".to_string(),
            initial_target: DEFAULT_TARGET_PREFIX.to_string(),
            reward: DEFAULT_REWARD,
            session_queue_capacity: SESSION_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Read from the process environment (call `dotenv()` first for `.env`).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", &lookup, defaults.port),
            admin_secret: lookup("ADMIN_PASSWORD").unwrap_or(defaults.admin_secret),
            initial_target: lookup("INITIAL_TARGET").unwrap_or(defaults.initial_target),
            reward: parse_or("BLOCK_REWARD", &lookup, defaults.reward),
            session_queue_capacity: parse_or(
                "SESSION_QUEUE_CAPACITY",
                &lookup,
                defaults.session_queue_capacity,
            )
            .max(1),
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}");
            default
        }),
        None => default,
    }
}
