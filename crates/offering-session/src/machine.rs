//! The ritual state machine.
//!
//! ```text
//! (absent) --submit--> AwaitingApproverConfirmation --confirm--> ApproverConfirmed
//!    ^                                                                |
//!    |                                                           select tier
//!  reset (from anywhere)                                              v
//!    |                      Resolved <--approve-- AwaitingApproverApproval
//! ```
//!
//! `transition` is the only place guards live. `RitualMachine` reads the
//! store, applies `transition`, and writes the whole resulting document.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use offering_core::{ProfileInput, RandomSource, TierKey, calculate_bonus, resolve};

use crate::config::RitualConfig;
use crate::document::{RitualSession, SessionStatus};
use crate::error::{EventKind, RitualError, RitualResult};
use crate::store::SessionStore;

/// Something a role asks the machine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Player submits raw profile answers.
    SubmitProfile(ProfileInput),
    /// Approver confirms the submitted player.
    Confirm,
    /// Player selects a tier by key.
    SelectTier(String),
    /// Approver approves, drawing the outcome.
    Approve,
    /// Either role ends the session.
    Reset,
}

impl Event {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SubmitProfile(_) => EventKind::SubmitProfile,
            Self::Confirm => EventKind::Confirm,
            Self::SelectTier(_) => EventKind::SelectTier,
            Self::Approve => EventKind::Approve,
            Self::Reset => EventKind::Reset,
        }
    }
}

/// The write a legal event produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Replace the whole document.
    Replace(RitualSession),
    /// Delete the document.
    Delete,
}

/// Apply `event` to the current document.
///
/// Pure apart from `rng`, which is only drawn from on `Approve`.
pub fn transition(
    current: Option<&RitualSession>,
    event: Event,
    now: DateTime<Utc>,
    rng: &mut dyn RandomSource,
) -> RitualResult<Transition> {
    let kind = event.kind();
    let illegal = || RitualError::IllegalTransition {
        event: kind,
        status: current.map(|s| s.status),
    };

    match event {
        Event::Reset => Ok(Transition::Delete),

        Event::SubmitProfile(input) => {
            if current.is_some() {
                return Err(illegal());
            }
            let player = input.validate()?;
            Ok(Transition::Replace(RitualSession::open(player, now)))
        }

        Event::Confirm => {
            let session = current
                .filter(|s| s.status == SessionStatus::AwaitingApproverConfirmation)
                .filter(|s| s.player.is_some())
                .ok_or_else(illegal)?;
            Ok(Transition::Replace(RitualSession {
                status: SessionStatus::ApproverConfirmed,
                created_at: now,
                ..session.clone()
            }))
        }

        Event::SelectTier(key) => {
            let session = current
                .filter(|s| s.status == SessionStatus::ApproverConfirmed)
                .ok_or_else(illegal)?;
            let key = TierKey::parse(&key)?;
            Ok(Transition::Replace(RitualSession {
                status: SessionStatus::AwaitingApproverApproval,
                sacrifice_key: Some(key),
                ..session.clone()
            }))
        }

        Event::Approve => {
            let session = current
                .filter(|s| s.status == SessionStatus::AwaitingApproverApproval)
                .ok_or_else(illegal)?;
            let (Some(tier), Some(player)) = (session.tier(), session.player.as_ref()) else {
                return Err(illegal());
            };
            let bonus = calculate_bonus(player);
            let resolution = resolve(tier, bonus.total_bonus_pct, rng);
            Ok(Transition::Replace(RitualSession {
                status: SessionStatus::Resolved,
                result: Some(resolution.outcome),
                ..session.clone()
            }))
        }
    }
}

/// Source handed to events that never draw.
struct NoRolls;

impl RandomSource for NoRolls {
    fn roll_percent(&mut self) -> f64 {
        0.0
    }
}

/// Drives ritual transitions against a shared store.
pub struct RitualMachine {
    store: Arc<dyn SessionStore>,
    config: RitualConfig,
}

impl RitualMachine {
    /// Create a machine writing to `store`.
    pub fn new(store: Arc<dyn SessionStore>, config: RitualConfig) -> Self {
        Self { store, config }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// The machine's configuration.
    pub fn config(&self) -> &RitualConfig {
        &self.config
    }

    /// The current document, if any.
    pub fn current(&self) -> RitualResult<Option<RitualSession>> {
        Ok(self.store.read()?.map(|s| s.document))
    }

    /// Player: create the session from raw profile answers.
    pub fn submit_profile(&self, input: ProfileInput) -> RitualResult<RitualSession> {
        self.dispatch_write(Event::SubmitProfile(input), &mut NoRolls)
    }

    /// Approver: confirm the submitted player.
    pub fn confirm(&self) -> RitualResult<RitualSession> {
        self.dispatch_write(Event::Confirm, &mut NoRolls)
    }

    /// Player: select a sacrifice tier.
    pub fn select_tier(&self, key: &str) -> RitualResult<RitualSession> {
        self.dispatch_write(Event::SelectTier(key.to_string()), &mut NoRolls)
    }

    /// Approver: approve and resolve the ritual.
    pub fn approve(&self, rng: &mut dyn RandomSource) -> RitualResult<RitualSession> {
        self.dispatch_write(Event::Approve, rng)
    }

    /// Either role: delete the session.
    pub fn reset(&self) -> RitualResult<()> {
        self.dispatch(Event::Reset, &mut NoRolls).map(|_| ())
    }

    /// Apply any event. Returns the written document, or `None` after a
    /// delete.
    pub fn dispatch(
        &self,
        event: Event,
        rng: &mut dyn RandomSource,
    ) -> RitualResult<Option<RitualSession>> {
        let kind = event.kind();
        let snapshot = self.store.read().inspect_err(|e| {
            warn!(event = %kind, error = %e, "session store read failed");
        })?;
        let revision = snapshot.as_ref().map(|s| s.revision);
        let current = snapshot.map(|s| s.document);

        let next = transition(current.as_ref(), event, Utc::now(), rng).inspect_err(|e| {
            warn!(event = %kind, error = %e, "transition rejected");
        })?;

        let written = match next {
            Transition::Replace(document) => {
                let result = if self.config.conditional_writes {
                    self.store.replace_if(revision, &document)
                } else {
                    self.store.replace(&document)
                };
                let revision = result.inspect_err(|e| {
                    warn!(event = %kind, error = %e, "session write failed");
                })?;
                info!(
                    session = %document.id,
                    event = %kind,
                    status = %document.status,
                    revision,
                    "session transitioned"
                );
                Some(document)
            }
            Transition::Delete => {
                self.store.delete().inspect_err(|e| {
                    warn!(event = %kind, error = %e, "session delete failed");
                })?;
                info!(
                    session = ?current.as_ref().map(|s| s.id),
                    "session reset"
                );
                None
            }
        };

        Ok(written)
    }

    fn dispatch_write(
        &self,
        event: Event,
        rng: &mut dyn RandomSource,
    ) -> RitualResult<RitualSession> {
        let kind = event.kind();
        self.dispatch(event, rng)?
            .ok_or(RitualError::IllegalTransition {
                event: kind,
                status: None,
            })
    }
}
