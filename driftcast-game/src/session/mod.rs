//! The session orchestrator: the single player-facing action surface.
//!
//! All UI intents enter through [`FishingSession`]; every other component is
//! pure or state-holding and never calls back into the presentation layer.
//! One fishing cycle (cast -> wait -> resolve -> reel) is in flight at a
//! time, enforced by the phase guard. Timer callbacks re-enter through
//! [`FishingSession::handle_timer`] and are validated against generation
//! counters so a location switch mid-wait discards the stale resolution.

pub mod event;
pub mod rng;
pub mod timers;

pub use event::SessionEvent;
pub use rng::{CountingRng, RngBundle};
pub use timers::{QueueScheduler, Scheduler, TimerKind, TimerRequest, TimerToken};

use std::time::Duration;

use crate::cast::{CastMechanics, CastResult};
use crate::constants::{BASE_WAIT_MS, LINE_LEVEL_WAIT_DISCOUNT_MS, MAX_CHARGE_POWER, MIN_WAIT_MS,
    SPECIAL_PREMIUM_COIN_BONUS, SPECIAL_WINDOW_DELAY_SPREAD_MS, SPECIAL_WINDOW_DURATION_MS,
    SPECIAL_WINDOW_MIN_DELAY_MS};
use crate::equipment::{EquipmentLevels, GearSlot, Rod, RodLocker};
use crate::error::ActionError;
use crate::ledger::PlayerLedger;
use crate::locations::{self, Location};
use crate::missions::{Mission, MissionKind, MissionTracker};
use crate::numbers::round_f64_to_u64;
use crate::resolver::{CatchContext, CatchOutcome, resolve_catch};
use crate::shop::ShopGrant;
use rand::Rng as _;

/// Coarse phase of the fishing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No cycle in flight; casting is allowed.
    #[default]
    Idle,
    /// A cast landed and the bite timer is running.
    Waiting,
    /// The wait resolved; awaiting a reel to return to Idle.
    Resolved,
}

/// Borrowed read-only view of session state for rendering.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub ledger: &'a PlayerLedger,
    pub equipment: &'a EquipmentLevels,
    pub rods: &'a [Rod],
    pub missions: &'a [Mission],
    pub location: &'static Location,
    pub phase: SessionPhase,
    pub cast_result: Option<CastResult>,
    pub last_outcome: Option<&'a CatchOutcome>,
    pub special_window_open: bool,
}

/// Top-level game session binding the progression components together.
#[derive(Debug, Clone)]
pub struct FishingSession<S: Scheduler> {
    ledger: PlayerLedger,
    equipment: EquipmentLevels,
    rods: RodLocker,
    missions: MissionTracker,
    cast: CastMechanics,
    phase: SessionPhase,
    location_id: String,
    cast_result: Option<CastResult>,
    last_outcome: Option<CatchOutcome>,
    special_window_open: bool,
    wait_generation: u64,
    window_generation: u64,
    rng: RngBundle,
    scheduler: S,
    events: Vec<SessionEvent>,
}

impl<S: Scheduler> FishingSession<S> {
    /// Construct a fresh session with first-run defaults.
    #[must_use]
    pub fn new(seed: u64, scheduler: S) -> Self {
        Self::from_parts(
            PlayerLedger::default(),
            EquipmentLevels::default(),
            RodLocker::default(),
            seed,
            scheduler,
        )
    }

    /// Construct a session from loaded state.
    ///
    /// Loaded data is normalized first (invariants repaired rather than
    /// rejected); the mission set is regenerated, and the free-running
    /// special-fish window timer is armed.
    #[must_use]
    pub fn from_parts(
        ledger: PlayerLedger,
        mut equipment: EquipmentLevels,
        mut rods: RodLocker,
        seed: u64,
        scheduler: S,
    ) -> Self {
        if equipment.normalize() {
            log::warn!("repaired equipment levels from save data");
        }
        if rods.normalize() {
            log::warn!("repaired rod inventory invariants from save data");
        }
        let mut session = Self {
            ledger,
            equipment,
            rods,
            missions: MissionTracker::generate_daily_set(),
            cast: CastMechanics::default(),
            phase: SessionPhase::Idle,
            location_id: locations::STARTING_LOCATION_ID.to_string(),
            cast_result: None,
            last_outcome: None,
            special_window_open: false,
            wait_generation: 0,
            window_generation: 0,
            rng: RngBundle::from_user_seed(seed),
            scheduler,
            events: Vec::new(),
        };
        session.schedule_next_special_window();
        session
    }

    /// Cast the line: charge to `charge_power`, aim, resolve, and start the
    /// bite timer.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidState`] when a cycle is already in
    /// flight, or [`ActionError::NoPower`] for a zero-power cast.
    pub fn cast(&mut self, charge_power: u8, direction: i8) -> Result<CastResult, ActionError> {
        if self.phase != SessionPhase::Idle || self.cast_result.is_some() {
            return Err(ActionError::InvalidState);
        }
        let rod = self.rods.equipped().clone();

        self.cast.begin_charge();
        let target = charge_power.min(MAX_CHARGE_POWER);
        while self.cast.power() < target {
            self.cast.charge_tick();
        }
        self.cast.set_direction(direction);
        let resolved = {
            let mut rng = self.rng.cast();
            self.cast.resolve(&rod, &mut *rng)
        };
        let result = match resolved {
            Ok(result) => result,
            Err(err) => {
                self.cast.reset();
                return Err(err);
            }
        };

        self.cast_result = Some(result);
        self.events.push(SessionEvent::CastResolved { result });
        // An attempt counts as played once initiated, whatever the outcome.
        self.settle_missions(MissionKind::PlayCount, 1);

        self.wait_generation += 1;
        let delay = compute_wait_time(self.equipment.level(GearSlot::Line), rod.accuracy);
        self.scheduler.schedule(TimerRequest {
            token: TimerToken {
                kind: TimerKind::WaitElapsed,
                generation: self.wait_generation,
            },
            delay,
        });
        self.phase = SessionPhase::Waiting;
        Ok(result)
    }

    /// Deliver a fired timer back to the session.
    ///
    /// Stale tokens (generation mismatch, or a phase that no longer expects
    /// them) are silently discarded.
    pub fn handle_timer(&mut self, token: TimerToken) {
        match token.kind {
            TimerKind::WaitElapsed => self.on_wait_elapsed(token.generation),
            TimerKind::SpecialWindowOpen => self.on_special_window_open(),
            TimerKind::SpecialWindowClose => self.on_special_window_close(token.generation),
        }
    }

    fn on_wait_elapsed(&mut self, generation: u64) {
        if self.phase != SessionPhase::Waiting
            || generation != self.wait_generation
            || self.cast_result.is_none()
        {
            return;
        }
        let location = self.location();
        let ctx = CatchContext {
            location,
            rod_level: self.equipment.level(GearSlot::Rod),
            bait_level: self.equipment.level(GearSlot::Bait),
            special_window_open: self.special_window_open,
        };
        let resolution = {
            let mut rng = self.rng.fish();
            resolve_catch(&ctx, &mut *rng)
        };
        if resolution.special_window_consumed {
            self.special_window_open = false;
            self.window_generation += 1;
            self.events.push(SessionEvent::SpecialWindowClosed);
        }

        match &resolution.outcome {
            CatchOutcome::Caught(caught) => {
                self.ledger.add_coins(i64::from(caught.final_coins));
                self.ledger.add_score(caught.final_exp);
                if caught.is_special {
                    // Specials are the one gameplay source of premium coins.
                    self.ledger
                        .add_premium_coins(i64::from(SPECIAL_PREMIUM_COIN_BONUS));
                }
                self.events.push(SessionEvent::FishCaught {
                    caught: caught.clone(),
                });
                let exp = caught.final_exp;
                self.settle_missions(MissionKind::CatchFish, 1);
                self.settle_missions(MissionKind::EarnPoints, exp);
            }
            CatchOutcome::Miss => self.events.push(SessionEvent::CatchMissed),
        }
        if self.ledger.try_level_up() {
            self.events.push(SessionEvent::LeveledUp {
                level: self.ledger.level,
            });
        }

        self.cast_result = None;
        self.cast.reset();
        self.last_outcome = Some(resolution.outcome);
        self.phase = SessionPhase::Resolved;
    }

    fn on_special_window_open(&mut self) {
        if !self.special_window_open {
            self.special_window_open = true;
            self.window_generation += 1;
            self.events.push(SessionEvent::SpecialWindowOpened);
            self.scheduler.schedule(TimerRequest {
                token: TimerToken {
                    kind: TimerKind::SpecialWindowClose,
                    generation: self.window_generation,
                },
                delay: Duration::from_millis(SPECIAL_WINDOW_DURATION_MS),
            });
        }
        // The window process free-runs for the session lifetime.
        self.schedule_next_special_window();
    }

    fn on_special_window_close(&mut self, generation: u64) {
        if self.special_window_open && generation == self.window_generation {
            self.special_window_open = false;
            self.events.push(SessionEvent::SpecialWindowClosed);
        }
    }

    /// Finish the display of a resolved cycle and return to Idle.
    ///
    /// Rewards were granted at resolution; reeling carries no reward logic.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidState`] outside the Resolved phase.
    pub fn reel(&mut self) -> Result<(), ActionError> {
        if self.phase != SessionPhase::Resolved {
            return Err(ActionError::InvalidState);
        }
        self.last_outcome = None;
        self.phase = SessionPhase::Idle;
        Ok(())
    }

    /// Switch the active fishing location, paying its unlock cost at most
    /// once.
    ///
    /// Any pending wait timer is invalidated: a bite resolved for the old
    /// location must not pay out at the new one.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::LevelLocked`] below the required level,
    /// [`ActionError::InsufficientFunds`] when the first-time unlock cost is
    /// not covered, and [`ActionError::InvalidState`] for an unknown id.
    pub fn select_location(&mut self, location_id: &str) -> Result<(), ActionError> {
        let location = locations::get(location_id).ok_or(ActionError::InvalidState)?;
        if location_id == self.location_id {
            return Ok(());
        }
        if self.ledger.level < location.required_level {
            return Err(ActionError::LevelLocked);
        }
        if location.unlock_cost > 0 && !self.ledger.is_unlocked(location_id) {
            if !self.ledger.can_afford(location.unlock_cost) {
                return Err(ActionError::InsufficientFunds);
            }
            self.ledger.add_coins(-i64::from(location.unlock_cost));
            self.events.push(SessionEvent::LocationUnlocked {
                location_id: location_id.to_string(),
                cost: location.unlock_cost,
            });
        }
        self.ledger.mark_unlocked(location_id);

        self.location_id = location_id.to_string();
        self.cast.reset();
        self.cast_result = None;
        self.last_outcome = None;
        self.phase = SessionPhase::Idle;
        self.wait_generation += 1;
        self.events.push(SessionEvent::LocationSelected {
            location_id: location_id.to_string(),
        });
        Ok(())
    }

    /// Upgrade one gear slot, debiting its table cost.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientFunds`] when unaffordable or the
    /// slot is already at max level.
    pub fn upgrade_equipment(&mut self, slot: GearSlot) -> Result<u32, ActionError> {
        let cost = self.equipment.upgrade(slot, self.ledger.coins)?;
        self.ledger.add_coins(-i64::from(cost));
        self.events.push(SessionEvent::EquipmentUpgraded {
            slot,
            level: self.equipment.level(slot),
            cost,
        });
        Ok(cost)
    }

    /// Buy a rod from the catalog, debiting its price.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientFunds`] when the price is not
    /// covered, or [`ActionError::NotOwned`] for an unknown rod id.
    pub fn purchase_rod(&mut self, rod_id: &str) -> Result<u32, ActionError> {
        let cost = self.rods.purchase(rod_id, self.ledger.coins)?;
        self.ledger.add_coins(-i64::from(cost));
        self.events.push(SessionEvent::RodPurchased {
            rod_id: rod_id.to_string(),
            cost,
        });
        Ok(cost)
    }

    /// Equip an owned rod.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotOwned`] when the rod is unknown or not
    /// owned.
    pub fn equip_rod(&mut self, rod_id: &str) -> Result<(), ActionError> {
        self.rods.equip(rod_id)?;
        self.events.push(SessionEvent::RodEquipped {
            rod_id: rod_id.to_string(),
        });
        Ok(())
    }

    /// Credit a completed commerce purchase through the ledger.
    pub fn claim_shop_purchase(&mut self, grant: &ShopGrant) {
        self.ledger.add_coins(i64::from(grant.coins));
        self.ledger.add_premium_coins(i64::from(grant.premium_coins));
        if grant.remove_ads {
            self.ledger.set_ads_removed();
        }
        self.events.push(SessionEvent::PurchaseClaimed {
            sku: grant.sku.clone(),
        });
    }

    /// Drain events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view of the whole session for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            ledger: &self.ledger,
            equipment: &self.equipment,
            rods: self.rods.rods(),
            missions: self.missions.missions(),
            location: self.location(),
            phase: self.phase,
            cast_result: self.cast_result,
            last_outcome: self.last_outcome.as_ref(),
            special_window_open: self.special_window_open,
        }
    }

    #[must_use]
    pub const fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    #[must_use]
    pub const fn equipment(&self) -> &EquipmentLevels {
        &self.equipment
    }

    #[must_use]
    pub const fn rods(&self) -> &RodLocker {
        &self.rods
    }

    #[must_use]
    pub const fn missions(&self) -> &MissionTracker {
        &self.missions
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn cast_result(&self) -> Option<CastResult> {
        self.cast_result
    }

    #[must_use]
    pub const fn last_outcome(&self) -> Option<&CatchOutcome> {
        self.last_outcome.as_ref()
    }

    #[must_use]
    pub const fn special_window_open(&self) -> bool {
        self.special_window_open
    }

    /// The active fishing location.
    ///
    /// # Panics
    ///
    /// Never in practice: the active id always comes from the catalog.
    #[must_use]
    pub fn location(&self) -> &'static Location {
        locations::get(&self.location_id).expect("active location is in the catalog")
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub const fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn settle_missions(&mut self, kind: MissionKind, amount: u32) {
        for mission in self.missions.advance(kind, amount) {
            self.ledger.add_coins(i64::from(mission.reward));
            self.events.push(SessionEvent::MissionCompleted {
                mission_id: mission.id,
                reward: mission.reward,
            });
        }
    }

    fn schedule_next_special_window(&mut self) {
        let spread = {
            let mut rng = self.rng.events();
            rng.gen_range(0..SPECIAL_WINDOW_DELAY_SPREAD_MS)
        };
        self.scheduler.schedule(TimerRequest {
            token: TimerToken {
                kind: TimerKind::SpecialWindowOpen,
                generation: self.window_generation,
            },
            delay: Duration::from_millis(SPECIAL_WINDOW_MIN_DELAY_MS + spread),
        });
    }
}

/// Bite wait duration from line level and rod accuracy.
///
/// Higher line levels shorten the base wait; more accurate rods scale it
/// down less. Floored at one second on both sides of the multiply.
#[must_use]
pub fn compute_wait_time(line_level: u8, rod_accuracy: u8) -> Duration {
    let base = BASE_WAIT_MS
        .saturating_sub(u64::from(line_level) * LINE_LEVEL_WAIT_DISCOUNT_MS)
        .max(MIN_WAIT_MS);
    let scaled = round_f64_to_u64(crate::numbers::u64_to_f64(base) * f64::from(rod_accuracy) / 100.0);
    Duration::from_millis(scaled.max(MIN_WAIT_MS))
}
