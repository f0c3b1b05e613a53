//! The shared session store contract.
//!
//! A store holds at most one document. Writes replace it whole, there is no
//! partial update. Every change is pushed to all subscribers, coalesced to
//! the latest value. Unconditional writes are last-write-wins;
//! `replace_if` offers an opt-in revision check.

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::document::RitualSession;

/// Store-assigned write counter. Metadata, not part of the document.
pub type Revision = u64;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// A conditional write found a different revision than expected.
    #[error("session changed concurrently (expected {}, found {})", revision_label(.expected), revision_label(.actual))]
    Conflict {
        /// Revision the writer last saw.
        expected: Option<Revision>,
        /// Revision currently stored.
        actual: Option<Revision>,
    },

    /// The document could not be encoded or decoded.
    #[error("session document codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

fn revision_label(revision: &Option<Revision>) -> String {
    match revision {
        Some(r) => format!("revision {r}"),
        None => "no session".to_string(),
    }
}

/// A document as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Revision assigned by the store.
    pub revision: Revision,
    /// The document.
    pub document: RitualSession,
}

/// A reactive single-document store.
pub trait SessionStore: Send + Sync {
    /// The current document, if any.
    fn read(&self) -> StoreResult<Option<Snapshot>>;

    /// Overwrite the whole document unconditionally.
    fn replace(&self, document: &RitualSession) -> StoreResult<Revision>;

    /// Overwrite the document only if the stored revision equals `expected`
    /// (`None` meaning "no document").
    fn replace_if(
        &self,
        expected: Option<Revision>,
        document: &RitualSession,
    ) -> StoreResult<Revision>;

    /// Remove the document. Deleting an absent document succeeds.
    fn delete(&self) -> StoreResult<()>;

    /// Subscribe to the current value and all future changes.
    fn subscribe(&self) -> StoreResult<Subscription>;
}

/// A live view of the store's document. Dropping it unsubscribes.
#[derive(Debug, Clone)]
pub struct Subscription {
    rx: watch::Receiver<Option<Snapshot>>,
}

impl Subscription {
    /// Wrap a watch receiver fed by a store.
    pub fn new(rx: watch::Receiver<Option<Snapshot>>) -> Self {
        Self { rx }
    }

    /// The latest delivered value, marking it as seen.
    pub fn current(&mut self) -> Option<Snapshot> {
        self.rx.borrow_and_update().clone()
    }

    /// Whether a value arrived since the last `current` or `changed`.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next change and return it.
    ///
    /// Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Option<Snapshot>> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }

    /// Run `on_change` with the current value now and on every later change,
    /// until the store is dropped or the returned task is aborted.
    pub fn spawn_listener<F>(mut self, mut on_change: F) -> JoinHandle<()>
    where
        F: FnMut(Option<&Snapshot>) + Send + 'static,
    {
        tokio::spawn(async move {
            let initial = self.current();
            on_change(initial.as_ref());
            while let Some(next) = self.changed().await {
                on_change(next.as_ref());
            }
        })
    }
}
