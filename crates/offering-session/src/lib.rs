//! Shared ritual session for the Offering Table.
//!
//! Holds the single session document both roles observe, the store contract
//! it lives behind, the state machine that owns every write, the pure
//! status-to-step projection, and the two role controllers.

pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod machine;
pub mod memory;
pub mod store;
pub mod view;

pub use config::RitualConfig;
pub use controller::{ApproverController, PlayerController};
pub use document::{RitualSession, SessionStatus};
pub use error::{EventKind, RitualError, RitualResult};
pub use machine::{Event, RitualMachine, Transition, transition};
pub use memory::MemoryStore;
pub use store::{Revision, SessionStore, Snapshot, StoreError, StoreResult, Subscription};
pub use view::{ApproverStep, PlayerStep};
