//! Centralized balance and tuning constants for Driftcast game logic.
//!
//! These values define the deterministic math for the core progression loop.
//! Keeping them together ensures that gameplay can only be adjusted via code
//! changes reviewed in version control, rather than through external assets.

// Economy tuning -----------------------------------------------------------
pub(crate) const INITIAL_COINS: u32 = 100;
pub(crate) const INITIAL_PREMIUM_COINS: u32 = 10;
pub(crate) const BASE_EXP_TO_NEXT_LEVEL: u32 = 100;
pub(crate) const LEVEL_UP_EXP_BONUS: u32 = 50;

// Equipment tuning ---------------------------------------------------------
pub(crate) const MAX_EQUIPMENT_LEVEL: u8 = 5;
pub(crate) const ROD_UPGRADE_COSTS: [u32; 4] = [200, 500, 1_000, 2_000];
pub(crate) const BAIT_UPGRADE_COSTS: [u32; 4] = [100, 300, 600, 1_200];
pub(crate) const LINE_UPGRADE_COSTS: [u32; 4] = [150, 400, 800, 1_500];

// Cast tuning --------------------------------------------------------------
pub(crate) const CHARGE_STEP: u8 = 10;
pub(crate) const MAX_CHARGE_POWER: u8 = 100;
pub(crate) const MAX_DIRECTION_DEG: i8 = 45;

// Wait-timer tuning --------------------------------------------------------
pub(crate) const BASE_WAIT_MS: u64 = 3_000;
pub(crate) const MIN_WAIT_MS: u64 = 1_000;
pub(crate) const LINE_LEVEL_WAIT_DISCOUNT_MS: u64 = 500;

// Catch tuning -------------------------------------------------------------
pub(crate) const ROD_LEVEL_WEIGHT_BONUS: f64 = 0.1;
pub(crate) const BAIT_LEVEL_WEIGHT_BONUS: f64 = 0.05;
pub(crate) const SPECIAL_CATCH_CHANCE: f64 = 0.3;
pub(crate) const SPECIAL_COINS_FACTOR: f64 = 2.0;
pub(crate) const SPECIAL_PREMIUM_COIN_BONUS: u32 = 5;

// Special-window tuning ----------------------------------------------------
pub(crate) const SPECIAL_WINDOW_MIN_DELAY_MS: u64 = 60_000;
pub(crate) const SPECIAL_WINDOW_DELAY_SPREAD_MS: u64 = 120_000;
pub(crate) const SPECIAL_WINDOW_DURATION_MS: u64 = 10_000;

// Persistence keys ---------------------------------------------------------
pub(crate) const SAVE_KEY_LEDGER: &str = "gameData";
pub(crate) const SAVE_KEY_EQUIPMENT: &str = "equipment";
pub(crate) const SAVE_KEY_RODS: &str = "fishingRods";
