//! Role-facing controllers.
//!
//! Each controller follows the store through its own subscription and
//! forwards its role's actions to the shared `RitualMachine`. The displayed
//! step is re-derived from the latest delivered document; an action's own
//! result never updates the view directly.

use std::sync::Arc;

use offering_core::{BonusBreakdown, ProfileInput, RandomSource};

use crate::document::RitualSession;
use crate::error::RitualResult;
use crate::machine::RitualMachine;
use crate::store::Subscription;
use crate::view::{ApproverStep, PlayerStep};

/// Subscription plumbing shared by both roles.
struct Observer {
    subscription: Subscription,
    document: Option<RitualSession>,
    last_error: Option<String>,
}

impl Observer {
    fn new(machine: &RitualMachine) -> RitualResult<Self> {
        let mut subscription = machine.store().subscribe()?;
        let document = subscription.current().map(|s| s.document);
        Ok(Self {
            subscription,
            document,
            last_error: None,
        })
    }

    fn sync(&mut self) {
        if self.subscription.has_changed() {
            self.document = self.subscription.current().map(|s| s.document);
        }
    }

    async fn changed(&mut self) -> bool {
        match self.subscription.changed().await {
            Some(next) => {
                self.document = next.map(|s| s.document);
                true
            }
            None => false,
        }
    }

    fn record<T>(&mut self, result: RitualResult<T>) -> RitualResult<T> {
        self.last_error = result.as_ref().err().map(ToString::to_string);
        self.sync();
        result
    }
}

/// The player's side of the ritual.
pub struct PlayerController {
    machine: Arc<RitualMachine>,
    observer: Observer,
}

impl PlayerController {
    /// Subscribe to the machine's store as the player.
    pub fn new(machine: Arc<RitualMachine>) -> RitualResult<Self> {
        let observer = Observer::new(&machine)?;
        Ok(Self { machine, observer })
    }

    /// Pull the latest document without waiting.
    pub fn sync(&mut self) -> PlayerStep {
        self.observer.sync();
        self.step()
    }

    /// Wait for the next store change. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<PlayerStep> {
        self.observer.changed().await.then(|| self.step())
    }

    /// The step for the last observed document.
    pub fn step(&self) -> PlayerStep {
        PlayerStep::of(self.observer.document.as_ref())
    }

    /// The last observed document.
    pub fn document(&self) -> Option<&RitualSession> {
        self.observer.document.as_ref()
    }

    /// Current step together with the document it was derived from.
    pub fn view(&self) -> (PlayerStep, Option<&RitualSession>) {
        (self.step(), self.document())
    }

    /// Message from the last failed action, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.observer.last_error.as_deref()
    }

    /// Bonus breakdown of the stored profile.
    pub fn bonus(&self) -> Option<BonusBreakdown> {
        self.document().and_then(RitualSession::bonus)
    }

    /// Submit profile answers, creating the session.
    pub fn submit_profile(&mut self, input: ProfileInput) -> RitualResult<()> {
        let result = self.machine.submit_profile(input).map(|_| ());
        self.observer.record(result)
    }

    /// Pick a sacrifice tier by key.
    pub fn select_tier(&mut self, key: &str) -> RitualResult<()> {
        let result = self.machine.select_tier(key).map(|_| ());
        self.observer.record(result)
    }

    /// Delete the session.
    pub fn reset(&mut self) -> RitualResult<()> {
        let result = self.machine.reset();
        self.observer.record(result)
    }
}

/// The approver's side of the ritual. Owns the random source used to
/// resolve outcomes.
pub struct ApproverController {
    machine: Arc<RitualMachine>,
    observer: Observer,
    rng: Box<dyn RandomSource + Send>,
}

impl ApproverController {
    /// Subscribe to the machine's store as the approver.
    pub fn new(
        machine: Arc<RitualMachine>,
        rng: Box<dyn RandomSource + Send>,
    ) -> RitualResult<Self> {
        let observer = Observer::new(&machine)?;
        Ok(Self {
            machine,
            observer,
            rng,
        })
    }

    /// Pull the latest document without waiting.
    pub fn sync(&mut self) -> ApproverStep {
        self.observer.sync();
        self.step()
    }

    /// Wait for the next store change. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<ApproverStep> {
        self.observer.changed().await.then(|| self.step())
    }

    /// The step for the last observed document.
    pub fn step(&self) -> ApproverStep {
        ApproverStep::of(self.observer.document.as_ref())
    }

    /// The last observed document.
    pub fn document(&self) -> Option<&RitualSession> {
        self.observer.document.as_ref()
    }

    /// Current step together with the document it was derived from.
    pub fn view(&self) -> (ApproverStep, Option<&RitualSession>) {
        (self.step(), self.document())
    }

    /// Message from the last failed action, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.observer.last_error.as_deref()
    }

    /// Bonus breakdown of the player under review.
    pub fn bonus(&self) -> Option<BonusBreakdown> {
        self.document().and_then(RitualSession::bonus)
    }

    /// Confirm the submitted player.
    pub fn confirm(&mut self) -> RitualResult<()> {
        let result = self.machine.confirm().map(|_| ());
        self.observer.record(result)
    }

    /// Approve the selected sacrifice and draw the outcome.
    pub fn approve(&mut self) -> RitualResult<()> {
        let result = self.machine.approve(self.rng.as_mut()).map(|_| ());
        self.observer.record(result)
    }

    /// Delete the session.
    pub fn reset(&mut self) -> RitualResult<()> {
        let result = self.machine.reset();
        self.observer.record(result)
    }
}

#[cfg(test)]
mod tests {
    use offering_core::{OutcomeType, ScriptedSource, SeededSource};

    use super::*;
    use crate::config::RitualConfig;
    use crate::document::SessionStatus;
    use crate::error::RitualError;
    use crate::memory::MemoryStore;
    use crate::store::SessionStore;

    fn setup() -> (Arc<MemoryStore>, PlayerController, ApproverController) {
        let store = Arc::new(MemoryStore::new());
        let machine = Arc::new(RitualMachine::new(store.clone(), RitualConfig::default()));
        let player = PlayerController::new(machine.clone()).unwrap();
        let approver =
            ApproverController::new(machine, Box::new(SeededSource::new(42))).unwrap();
        (store, player, approver)
    }

    #[test]
    fn both_roles_follow_the_document() {
        let (_store, mut player, mut approver) = setup();
        assert_eq!(player.step(), PlayerStep::EnterProfile);
        assert_eq!(approver.step(), ApproverStep::Idle);

        player
            .submit_profile(ProfileInput::new("Mira", "9", "Y", "N"))
            .unwrap();
        assert_eq!(player.step(), PlayerStep::AwaitingConfirmation);
        assert_eq!(approver.sync(), ApproverStep::ReviewPlayer);
        assert_eq!(approver.bonus().unwrap().total_bonus_pct, 9);

        approver.confirm().unwrap();
        assert_eq!(player.sync(), PlayerStep::ChooseSacrifice);

        player.select_tier("absolute").unwrap();
        assert_eq!(approver.sync(), ApproverStep::ReviewSacrifice);

        approver.approve().unwrap();
        assert_eq!(approver.step(), ApproverStep::ShowResult);
        assert_eq!(player.sync(), PlayerStep::ShowResult);
        assert_eq!(
            player.document().unwrap().result,
            approver.document().unwrap().result
        );
    }

    #[test]
    fn validation_error_is_kept_for_display() {
        let (store, mut player, _approver) = setup();
        let err = player
            .submit_profile(ProfileInput::new("Mira", "5", "maybe", "N"))
            .unwrap_err();
        assert!(matches!(err, RitualError::Validation(_)));
        assert_eq!(
            player.last_error(),
            Some("answer the legendary pledge with Y or N only, got \"maybe\"")
        );
        assert_eq!(player.step(), PlayerStep::EnterProfile);
        assert!(store.read().unwrap().is_none());

        player
            .submit_profile(ProfileInput::new("Mira", "5", "N", "N"))
            .unwrap();
        assert_eq!(player.last_error(), None);
    }

    #[test]
    fn illegal_action_keeps_other_role_untouched() {
        let (_store, mut player, mut approver) = setup();
        player
            .submit_profile(ProfileInput::new("Mira", "4", "N", "N"))
            .unwrap();
        assert!(player.select_tier("high").is_err());
        assert!(player.last_error().is_some());
        assert_eq!(approver.sync(), ApproverStep::ReviewPlayer);
        assert_eq!(approver.last_error(), None);
    }

    #[test]
    fn store_failure_is_reported_to_actor() {
        let (store, mut player, mut approver) = setup();
        player
            .submit_profile(ProfileInput::new("Mira", "4", "N", "N"))
            .unwrap();
        store.set_offline(true);
        assert!(approver.confirm().is_err());
        assert_eq!(
            approver.last_error(),
            Some("session store unavailable: store is offline")
        );
        assert_eq!(approver.step(), ApproverStep::ReviewPlayer);
        store.set_offline(false);
        approver.confirm().unwrap();
        assert_eq!(approver.last_error(), None);
    }

    #[test]
    fn reset_by_either_role_returns_both_to_start() {
        let (_store, mut player, mut approver) = setup();
        player
            .submit_profile(ProfileInput::new("Mira", "4", "N", "N"))
            .unwrap();
        approver.confirm().unwrap();
        approver.reset().unwrap();
        assert_eq!(player.sync(), PlayerStep::EnterProfile);
        assert_eq!(approver.view(), (ApproverStep::Idle, None));
        assert!(player.document().is_none());
    }

    #[test]
    fn scripted_approver_is_deterministic() {
        let store = Arc::new(MemoryStore::new());
        let machine = Arc::new(RitualMachine::new(store, RitualConfig::default()));
        let mut player = PlayerController::new(machine.clone()).unwrap();
        let mut approver =
            ApproverController::new(machine, Box::new(ScriptedSource::new(vec![99.5, 0.0])))
                .unwrap();

        player
            .submit_profile(ProfileInput::new("Mira", "1", "N", "N"))
            .unwrap();
        approver.confirm().unwrap();
        player.sync();
        player.select_tier("coward").unwrap();
        approver.approve().unwrap();

        let result = approver.document().unwrap().result.clone().unwrap();
        assert_eq!(result.outcome_type, OutcomeType::Fail);
    }

    #[tokio::test]
    async fn roles_react_to_notifications() {
        let store = Arc::new(MemoryStore::new());
        let machine = Arc::new(RitualMachine::new(
            store.clone(),
            RitualConfig::default().with_seed(7),
        ));
        let mut player = PlayerController::new(machine.clone()).unwrap();
        let rng = Box::new(machine.config().random_source());
        let mut approver = ApproverController::new(machine, rng).unwrap();

        let approver_task = tokio::spawn(async move {
            while let Some(step) = approver.changed().await {
                match step {
                    ApproverStep::ReviewPlayer => approver.confirm().unwrap(),
                    ApproverStep::ReviewSacrifice => {
                        approver.approve().unwrap();
                        return approver.document().cloned();
                    }
                    _ => {}
                }
            }
            None
        });

        player
            .submit_profile(ProfileInput::new("Mira", "7", "Y", "Y"))
            .unwrap();
        while let Some(step) = player.changed().await {
            match step {
                PlayerStep::ChooseSacrifice => player.select_tier("full").unwrap(),
                PlayerStep::ShowResult => break,
                _ => {}
            }
        }

        let seen_by_approver = approver_task.await.unwrap().unwrap();
        let seen_by_player = player.document().unwrap();
        assert_eq!(seen_by_player.status, SessionStatus::Resolved);
        assert_eq!(&seen_by_approver, seen_by_player);
        assert_eq!(store.read().unwrap().unwrap().document, seen_by_approver);
    }
}
