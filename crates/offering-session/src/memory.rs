//! In-process session store.
//!
//! Keeps the document as JSON, the same shape a remote realtime store would
//! hold, and fans every change out through a watch channel. The store can
//! be switched offline to exercise failure handling.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::document::RitualSession;
use crate::store::{Revision, SessionStore, Snapshot, StoreError, StoreResult, Subscription};

#[derive(Debug, Default)]
struct State {
    value: Option<(Revision, serde_json::Value)>,
    last_revision: Revision,
    offline: bool,
}

/// A single-document store living in this process.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
    tx: watch::Sender<Option<Snapshot>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            state: Mutex::new(State::default()),
            tx,
        }
    }

    /// Simulate losing (or regaining) the connection to the store.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.offline = offline;
        }
    }

    /// Whether the store is simulating a lost connection.
    pub fn is_offline(&self) -> bool {
        self.state.lock().map(|s| s.offline).unwrap_or(true)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        let state = self
            .state
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        if state.offline {
            warn!("session store offline");
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(state)
    }

    fn write(&self, state: &mut State, document: &RitualSession) -> StoreResult<Revision> {
        let value = serde_json::to_value(document)?;
        let decoded: RitualSession = serde_json::from_value(value.clone())?;

        state.last_revision += 1;
        let revision = state.last_revision;
        state.value = Some((revision, value));

        debug!(revision, status = %decoded.status, "session document replaced");
        self.tx.send_replace(Some(Snapshot {
            revision,
            document: decoded,
        }));
        Ok(revision)
    }
}

fn decode(value: &Option<(Revision, serde_json::Value)>) -> StoreResult<Option<Snapshot>> {
    match value {
        Some((revision, json)) => Ok(Some(Snapshot {
            revision: *revision,
            document: serde_json::from_value(json.clone())?,
        })),
        None => Ok(None),
    }
}

impl SessionStore for MemoryStore {
    fn read(&self) -> StoreResult<Option<Snapshot>> {
        let state = self.lock()?;
        decode(&state.value)
    }

    fn replace(&self, document: &RitualSession) -> StoreResult<Revision> {
        let mut state = self.lock()?;
        self.write(&mut state, document)
    }

    fn replace_if(
        &self,
        expected: Option<Revision>,
        document: &RitualSession,
    ) -> StoreResult<Revision> {
        let mut state = self.lock()?;
        let actual = state.value.as_ref().map(|(revision, _)| *revision);
        if actual != expected {
            return Err(StoreError::Conflict { expected, actual });
        }
        self.write(&mut state, document)
    }

    fn delete(&self) -> StoreResult<()> {
        let mut state = self.lock()?;
        if state.value.take().is_some() {
            debug!("session document deleted");
            self.tx.send_replace(None);
        }
        Ok(())
    }

    fn subscribe(&self) -> StoreResult<Subscription> {
        let _state = self.lock()?;
        Ok(Subscription::new(self.tx.subscribe()))
    }
}
