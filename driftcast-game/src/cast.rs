//! Cast mechanics: charge, aim, and resolve a single casting attempt.
//!
//! The state machine runs Idle -> Charging -> Resolved per attempt. The
//! presentation layer drives charging tick by tick ("hold to charge"); the
//! session orchestrator can also replay a full charge in one call.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{CHARGE_STEP, MAX_CHARGE_POWER, MAX_DIRECTION_DEG};
use crate::equipment::Rod;
use crate::error::ActionError;
use crate::numbers::round_f64_to_u32;

/// Lifecycle of a single casting attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastPhase {
    #[default]
    Idle,
    Charging,
    Resolved,
}

/// Immutable outcome of a resolved cast.
///
/// This is a single-use token: the catch resolver consumes it once, then the
/// orchestrator clears it at the end of the fishing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastResult {
    /// Computed cast distance in meters.
    pub distance_m: u32,
    /// Whether the accuracy roll landed within the rod's accuracy.
    pub accurate: bool,
    /// Charge power at resolution, 0-100.
    pub power: u8,
    /// Aim direction at resolution, -45..=45 degrees.
    pub direction: i8,
}

/// Charge/aim state machine for one casting attempt.
#[derive(Debug, Clone, Default)]
pub struct CastMechanics {
    phase: CastPhase,
    power: u8,
    direction: i8,
}

impl CastMechanics {
    #[must_use]
    pub const fn phase(&self) -> CastPhase {
        self.phase
    }

    #[must_use]
    pub const fn power(&self) -> u8 {
        self.power
    }

    #[must_use]
    pub const fn direction(&self) -> i8 {
        self.direction
    }

    /// Start charging, resetting power to zero.
    pub fn begin_charge(&mut self) {
        self.phase = CastPhase::Charging;
        self.power = 0;
    }

    /// One "hold to charge" tick: +10 power, capped at 100.
    pub fn charge_tick(&mut self) {
        if self.phase == CastPhase::Charging {
            self.power = self.power.saturating_add(CHARGE_STEP).min(MAX_CHARGE_POWER);
        }
    }

    /// Nudge the aim, clamped to the -45..=45 degree window.
    pub fn set_direction(&mut self, delta: i8) {
        if self.phase != CastPhase::Resolved {
            self.direction = i8::try_from(
                i16::from(self.direction)
                    .saturating_add(i16::from(delta))
                    .clamp(i16::from(-MAX_DIRECTION_DEG), i16::from(MAX_DIRECTION_DEG)),
            )
            .unwrap_or(self.direction);
        }
    }

    /// Resolve the attempt against the equipped rod.
    ///
    /// Distance scales with charge power and falls off with off-center aim;
    /// accuracy is a uniform roll in [0, 100) against the rod's accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoPower`] when resolved with zero power.
    pub fn resolve(&mut self, rod: &Rod, rng: &mut impl Rng) -> Result<CastResult, ActionError> {
        if self.power == 0 {
            return Err(ActionError::NoPower);
        }
        let power_factor = f64::from(self.power) / 100.0;
        let aim_factor = 1.0 - f64::from(self.direction.unsigned_abs()) / 100.0;
        let distance_m = round_f64_to_u32(rod.casting_distance * power_factor * aim_factor);
        let roll: f64 = rng.gen_range(0.0..100.0);
        let result = CastResult {
            distance_m,
            accurate: roll <= f64::from(rod.accuracy),
            power: self.power,
            direction: self.direction,
        };
        self.phase = CastPhase::Resolved;
        Ok(result)
    }

    /// Return to Idle, clearing power and direction.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
