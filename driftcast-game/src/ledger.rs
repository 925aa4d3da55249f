//! The economy ledger: the authoritative holder of currency, score, and
//! level state.
//!
//! The ledger is mutated only by the session orchestrator. Balances clamp at
//! zero on debit rather than erroring; callers are expected to pre-check
//! affordability before spending.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::{BASE_EXP_TO_NEXT_LEVEL, INITIAL_COINS, INITIAL_PREMIUM_COINS,
    LEVEL_UP_EXP_BONUS};

/// Persistent numeric player state.
///
/// Serialized under the `gameData` key. Every field is defaulted on load so a
/// partial or absent blob never fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerLedger {
    pub score: u64,
    pub coins: u32,
    pub premium_coins: u32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next_level: u32,
    pub ads_removed: bool,
    /// Location ids whose one-time unlock cost has already been paid.
    pub unlocked_locations: BTreeSet<String>,
}

impl Default for PlayerLedger {
    fn default() -> Self {
        Self {
            score: 0,
            coins: INITIAL_COINS,
            premium_coins: INITIAL_PREMIUM_COINS,
            level: 1,
            exp: 0,
            exp_to_next_level: BASE_EXP_TO_NEXT_LEVEL,
            ads_removed: false,
            unlocked_locations: BTreeSet::new(),
        }
    }
}

impl PlayerLedger {
    /// Credit catch points. Score and experience always move together.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(u64::from(points));
        self.exp = self.exp.saturating_add(points);
    }

    /// Adjust the coin balance, clamping at zero on debit.
    pub fn add_coins(&mut self, delta: i64) {
        self.coins = apply_clamped(self.coins, delta);
    }

    /// Adjust the premium balance, clamping at zero on debit.
    pub fn add_premium_coins(&mut self, delta: i64) {
        self.premium_coins = apply_clamped(self.premium_coins, delta);
    }

    /// Whether the coin balance covers `cost`.
    #[must_use]
    pub const fn can_afford(&self, cost: u32) -> bool {
        self.coins >= cost
    }

    /// Resolve a pending level-up if the experience threshold is met.
    ///
    /// Overflow experience beyond the threshold is discarded, matching the
    /// long-standing balance behavior. The threshold grows by a fixed bonus
    /// per level, so `exp < exp_to_next_level` holds after resolution.
    pub fn try_level_up(&mut self) -> bool {
        if self.exp < self.exp_to_next_level {
            return false;
        }
        self.level = self.level.saturating_add(1);
        self.exp = 0;
        self.exp_to_next_level = self.exp_to_next_level.saturating_add(LEVEL_UP_EXP_BONUS);
        debug_assert!(self.exp < self.exp_to_next_level);
        true
    }

    /// One-way ads-removed flag. Idempotent.
    pub fn set_ads_removed(&mut self) {
        self.ads_removed = true;
    }

    /// Whether a location's one-time unlock cost was already paid.
    #[must_use]
    pub fn is_unlocked(&self, location_id: &str) -> bool {
        self.unlocked_locations.contains(location_id)
    }

    /// Record a paid (or free) unlock so re-selection never re-charges.
    pub fn mark_unlocked(&mut self, location_id: &str) {
        self.unlocked_locations.insert(location_id.to_string());
    }
}

fn apply_clamped(balance: u32, delta: i64) -> u32 {
    let next = i64::from(balance).saturating_add(delta).max(0);
    u32::try_from(next).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run_state() {
        let ledger = PlayerLedger::default();
        assert_eq!(ledger.coins, 100);
        assert_eq!(ledger.premium_coins, 10);
        assert_eq!(ledger.level, 1);
        assert_eq!(ledger.exp_to_next_level, 100);
        assert!(!ledger.ads_removed);
    }

    #[test]
    fn debit_clamps_at_zero() {
        let mut ledger = PlayerLedger {
            coins: 30,
            premium_coins: 5,
            ..PlayerLedger::default()
        };
        ledger.add_coins(-50);
        assert_eq!(ledger.coins, 0);
        ledger.add_premium_coins(-9);
        assert_eq!(ledger.premium_coins, 0);
    }

    #[test]
    fn score_and_exp_move_together() {
        let mut ledger = PlayerLedger::default();
        ledger.add_score(37);
        assert_eq!(ledger.score, 37);
        assert_eq!(ledger.exp, 37);
    }

    #[test]
    fn level_up_discards_overflow_exp() {
        let mut ledger = PlayerLedger::default();
        ledger.add_score(140);
        assert!(ledger.try_level_up());
        assert_eq!(ledger.level, 2);
        assert_eq!(ledger.exp, 0);
        assert_eq!(ledger.exp_to_next_level, 150);
        // A second immediate call is a no-op.
        assert!(!ledger.try_level_up());
    }

    #[test]
    fn ads_removed_is_one_way() {
        let mut ledger = PlayerLedger::default();
        ledger.set_ads_removed();
        ledger.set_ads_removed();
        assert!(ledger.ads_removed);
    }

    #[test]
    fn partial_blob_defaults_missing_fields() {
        let ledger: PlayerLedger = serde_json::from_str(r#"{"coins": 42}"#).unwrap();
        assert_eq!(ledger.coins, 42);
        assert_eq!(ledger.level, 1);
        assert_eq!(ledger.exp_to_next_level, 100);
        assert!(ledger.unlocked_locations.is_empty());
    }

    #[test]
    fn save_load_roundtrips_identically() {
        let mut ledger = PlayerLedger::default();
        ledger.add_score(55);
        ledger.add_coins(250);
        ledger.mark_unlocked("river_forest");
        let blob = serde_json::to_string(&ledger).unwrap();
        let restored: PlayerLedger = serde_json::from_str(&blob).unwrap();
        assert_eq!(restored, ledger);
    }
}
