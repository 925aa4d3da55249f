//! Driftcast Game Engine
//!
//! Platform-agnostic core game logic for the Driftcast casual fishing game.
//! This crate provides the progression and reward-resolution rules without
//! UI or platform-specific dependencies: the host supplies storage, audio,
//! and timer capabilities through the port traits defined here.

pub mod cast;
pub mod constants;
pub mod equipment;
pub mod error;
pub mod ledger;
pub mod locations;
pub mod missions;
pub mod numbers;
pub mod resolver;
pub mod session;
pub mod shop;

// Re-export commonly used types
pub use cast::{CastMechanics, CastPhase, CastResult};
pub use equipment::{EquipmentLevels, GearSlot, Rod, RodLocker, RodRarity, STARTER_ROD_ID};
pub use error::ActionError;
pub use ledger::PlayerLedger;
pub use locations::{Fish, Location, LocationRewards, STARTING_LOCATION_ID, UnlockCheck,
    can_unlock};
pub use missions::{Mission, MissionKind, MissionTracker};
pub use resolver::{CatchContext, CatchOutcome, CatchResolution, CaughtFish, resolve_catch,
    select_weighted};
pub use session::{FishingSession, QueueScheduler, RngBundle, Scheduler, SessionEvent,
    SessionPhase, SessionSnapshot, TimerKind, TimerRequest, TimerToken, compute_wait_time};
pub use shop::ShopGrant;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::{SAVE_KEY_EQUIPMENT, SAVE_KEY_LEDGER, SAVE_KEY_RODS};

/// Trait for abstracting the key-to-blob save store.
/// Platform-specific implementations should provide this.
pub trait SaveStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a serialized blob under a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written.
    fn save(&mut self, key: &str, blob: &str) -> Result<(), Self::Error>;

    /// Load the blob stored under a key, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, Self::Error>;
}

/// Fire-and-forget sound cue triggered by outcome events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Click,
    Success,
    Miss,
}

/// Trait for abstracting audio playback.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// An audio sink that drops every cue; useful for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Main engine façade binding a session to its host-side ports.
///
/// Every mutating action runs the session logic, routes the emitted events
/// to the audio sink, and persists the dirty state best-effort: a failed
/// save is logged and dropped, never surfaced to gameplay.
pub struct GameEngine<St, A, S>
where
    St: SaveStore,
    A: AudioSink,
    S: Scheduler,
{
    store: St,
    audio: A,
    session: FishingSession<S>,
}

impl<St, A, S> GameEngine<St, A, S>
where
    St: SaveStore,
    A: AudioSink,
    S: Scheduler,
{
    /// Build an engine by loading persisted state from the store.
    ///
    /// Missing, partial, or malformed blobs fall back to defaults field by
    /// field; loading never fails.
    pub fn new(store: St, audio: A, scheduler: S, seed: u64) -> Self {
        let ledger: PlayerLedger = load_or_default(&store, SAVE_KEY_LEDGER);
        let equipment: EquipmentLevels = load_or_default(&store, SAVE_KEY_EQUIPMENT);
        let rods: RodLocker = load_or_default(&store, SAVE_KEY_RODS);
        let session = FishingSession::from_parts(ledger, equipment, rods, seed, scheduler);
        Self {
            store,
            audio,
            session,
        }
    }

    /// Cast the line. See [`FishingSession::cast`].
    ///
    /// # Errors
    ///
    /// Propagates the session's action error; no state is persisted then.
    pub fn cast(
        &mut self,
        charge_power: u8,
        direction: i8,
    ) -> Result<Vec<SessionEvent>, ActionError> {
        self.session.cast(charge_power, direction)?;
        Ok(self.finish_action())
    }

    /// Reel in a resolved cycle. See [`FishingSession::reel`].
    ///
    /// # Errors
    ///
    /// Propagates the session's action error.
    pub fn reel(&mut self) -> Result<Vec<SessionEvent>, ActionError> {
        self.session.reel()?;
        Ok(self.finish_action())
    }

    /// Switch locations. See [`FishingSession::select_location`].
    ///
    /// # Errors
    ///
    /// Propagates the session's action error.
    pub fn select_location(&mut self, location_id: &str) -> Result<Vec<SessionEvent>, ActionError> {
        self.session.select_location(location_id)?;
        Ok(self.finish_action())
    }

    /// Upgrade a gear slot. See [`FishingSession::upgrade_equipment`].
    ///
    /// # Errors
    ///
    /// Propagates the session's action error.
    pub fn upgrade_equipment(&mut self, slot: GearSlot) -> Result<Vec<SessionEvent>, ActionError> {
        self.session.upgrade_equipment(slot)?;
        Ok(self.finish_action())
    }

    /// Buy a rod. See [`FishingSession::purchase_rod`].
    ///
    /// # Errors
    ///
    /// Propagates the session's action error.
    pub fn purchase_rod(&mut self, rod_id: &str) -> Result<Vec<SessionEvent>, ActionError> {
        self.session.purchase_rod(rod_id)?;
        Ok(self.finish_action())
    }

    /// Equip an owned rod. See [`FishingSession::equip_rod`].
    ///
    /// # Errors
    ///
    /// Propagates the session's action error.
    pub fn equip_rod(&mut self, rod_id: &str) -> Result<Vec<SessionEvent>, ActionError> {
        self.session.equip_rod(rod_id)?;
        Ok(self.finish_action())
    }

    /// Credit a completed commerce purchase.
    pub fn claim_shop_purchase(&mut self, grant: &ShopGrant) -> Vec<SessionEvent> {
        self.session.claim_shop_purchase(grant);
        self.finish_action()
    }

    /// Deliver a fired timer token; stale tokens resolve to no events.
    pub fn handle_timer(&mut self, token: TimerToken) -> Vec<SessionEvent> {
        self.session.handle_timer(token);
        self.finish_action()
    }

    /// Borrow the underlying session.
    #[must_use]
    pub const fn session(&self) -> &FishingSession<S> {
        &self.session
    }

    /// Borrow the underlying session mutably (host timer dispatch).
    pub const fn session_mut(&mut self) -> &mut FishingSession<S> {
        &mut self.session
    }

    fn finish_action(&mut self) -> Vec<SessionEvent> {
        let events = self.session.take_events();
        for event in &events {
            if let Some(cue) = sound_for(event) {
                self.audio.play(cue);
            }
        }
        if let Err(err) = self.persist() {
            log::warn!("best-effort save failed: {err:#}");
        }
        events
    }

    fn persist(&mut self) -> anyhow::Result<()> {
        save_blob(&mut self.store, SAVE_KEY_LEDGER, self.session.ledger())?;
        save_blob(&mut self.store, SAVE_KEY_EQUIPMENT, self.session.equipment())?;
        save_blob(&mut self.store, SAVE_KEY_RODS, self.session.rods())?;
        Ok(())
    }
}

fn sound_for(event: &SessionEvent) -> Option<SoundCue> {
    match event {
        SessionEvent::CastResolved { .. } => Some(SoundCue::Click),
        SessionEvent::FishCaught { .. }
        | SessionEvent::MissionCompleted { .. }
        | SessionEvent::LeveledUp { .. } => Some(SoundCue::Success),
        SessionEvent::CatchMissed => Some(SoundCue::Miss),
        _ => None,
    }
}

fn save_blob<St: SaveStore, T: Serialize>(
    store: &mut St,
    key: &str,
    value: &T,
) -> anyhow::Result<()> {
    let blob = serde_json::to_string(value)?;
    store.save(key, &blob)?;
    Ok(())
}

fn load_or_default<St: SaveStore, T: DeserializeOwned + Default>(store: &St, key: &str) -> T {
    match store.load(key) {
        Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|err| {
            log::warn!("discarding malformed '{key}' blob: {err}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            log::warn!("failed to load '{key}': {err}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore {
        blobs: Rc<RefCell<HashMap<String, String>>>,
    }

    impl SaveStore for MemoryStore {
        type Error = Infallible;

        fn save(&mut self, key: &str, blob: &str) -> Result<(), Self::Error> {
            self.blobs
                .borrow_mut()
                .insert(key.to_string(), blob.to_string());
            Ok(())
        }

        fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.blobs.borrow().get(key).cloned())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingAudio {
        cues: Rc<RefCell<Vec<SoundCue>>>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: SoundCue) {
            self.cues.borrow_mut().push(cue);
        }
    }

    fn fire_wait_timer(engine: &mut GameEngine<MemoryStore, RecordingAudio, QueueScheduler>) {
        let pending = engine.session_mut().scheduler_mut().drain();
        let wait = pending
            .into_iter()
            .find(|request| request.token.kind == TimerKind::WaitElapsed)
            .expect("wait timer scheduled");
        engine.handle_timer(wait.token);
    }

    #[test]
    fn engine_runs_a_full_catch_cycle_and_persists() {
        let store = MemoryStore::default();
        let audio = RecordingAudio::default();
        let mut engine =
            GameEngine::new(store.clone(), audio.clone(), QueueScheduler::new(), 0xD1F7);

        let events = engine.cast(100, 0).unwrap();
        assert!(matches!(events[0], SessionEvent::CastResolved { .. }));
        assert_eq!(engine.session().phase(), SessionPhase::Waiting);

        fire_wait_timer(&mut engine);
        assert_eq!(engine.session().phase(), SessionPhase::Resolved);
        engine.reel().unwrap();
        assert_eq!(engine.session().phase(), SessionPhase::Idle);

        // Cues were routed and all three blobs were written.
        assert!(audio.cues.borrow().contains(&SoundCue::Click));
        let blobs = store.blobs.borrow();
        assert!(blobs.contains_key("gameData"));
        assert!(blobs.contains_key("equipment"));
        assert!(blobs.contains_key("fishingRods"));
    }

    #[test]
    fn engine_reloads_persisted_progress() {
        let store = MemoryStore::default();
        {
            let mut engine = GameEngine::new(
                store.clone(),
                NullAudio,
                QueueScheduler::new(),
                11,
            );
            engine.claim_shop_purchase(&ShopGrant {
                sku: "coin_pack".to_string(),
                coins: 900,
                premium_coins: 0,
                remove_ads: true,
            });
        }
        let engine = GameEngine::new(store, NullAudio, QueueScheduler::new(), 11);
        assert_eq!(engine.session().ledger().coins, 1_000);
        assert!(engine.session().ledger().ads_removed);
    }

    #[test]
    fn malformed_blobs_fall_back_to_defaults() {
        let mut store = MemoryStore::default();
        store.save("gameData", "not json at all").unwrap();
        store.save("fishingRods", "{\"wrong\":\"shape\"}").unwrap();
        let engine = GameEngine::new(store, NullAudio, QueueScheduler::new(), 3);
        assert_eq!(engine.session().ledger().coins, 100);
        assert_eq!(engine.session().rods().equipped().id, STARTER_ROD_ID);
    }

    #[test]
    fn rejected_actions_do_not_emit_events() {
        let mut engine = GameEngine::new(
            MemoryStore::default(),
            NullAudio,
            QueueScheduler::new(),
            5,
        );
        assert_eq!(engine.reel(), Err(ActionError::InvalidState));
        assert_eq!(engine.purchase_rod("legendary_rod"), Err(ActionError::InsufficientFunds));
    }
}
