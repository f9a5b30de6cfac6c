use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use uuid::Uuid;

use crate::error::MiningError;

pub type SessionId = Uuid;

/// Fan-out of events to every connected session.
///
/// Each session owns the receiving half of a bounded queue; the hub only keeps
/// senders. Delivery is best-effort and never waits: a full queue loses that
/// event for that session, a closed queue removes the session.
pub struct NotificationHub<T> {
    sessions: Mutex<HashMap<SessionId, Sender<T>>>,
    capacity: usize,
}

impl<T: Clone> NotificationHub<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Register a new session whose queue starts with `initial`.
    pub fn join(&self, initial: T) -> (SessionId, Receiver<T>) {
        let (tx, rx) = mpsc::channel(self.capacity);
        // capacity >= 1 and nobody else holds the sender yet
        let _ = tx.try_send(initial);

        let id = Uuid::new_v4();
        let total = {
            let mut sessions = self.sessions.lock().expect("mutex poisoned");
            sessions.insert(id, tx);
            sessions.len()
        };
        debug!("session {id} joined ({total} connected)");
        (id, rx)
    }

    /// Deregister a session. Returns false if it was already gone.
    pub fn leave(&self, id: SessionId) -> bool {
        let removed = {
            let mut sessions = self.sessions.lock().expect("mutex poisoned");
            sessions.remove(&id).is_some()
        };
        if removed {
            debug!("session {id} left");
        }
        removed
    }

    /// Queue `event` for every session joined at call time.
    /// Returns how many sessions accepted it.
    pub fn broadcast(&self, event: &T) -> usize {
        let targets: Vec<(SessionId, Sender<T>)> = {
            let sessions = self.sessions.lock().expect("mutex poisoned");
            sessions
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for (id, tx) in targets {
            match tx.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => warn!("session {id} queue full, event dropped"),
                Err(TrySendError::Closed(_)) => closed.push(id),
            }
        }

        for id in closed {
            debug!("session {id} closed, removing");
            self.leave(id);
        }
        delivered
    }

    /// Queue `event` for a single session.
    pub fn send_to(&self, id: SessionId, event: T) -> Result<(), MiningError> {
        let tx = {
            let sessions = self.sessions.lock().expect("mutex poisoned");
            sessions.get(&id).cloned()
        }
        .ok_or(MiningError::TransportFailure(id))?;

        match tx.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                warn!("session {id} queue full, event dropped");
                Ok(())
            }
            Err(TrySendError::Closed(_)) => {
                self.leave(id);
                Err(MiningError::TransportFailure(id))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().expect("mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
