//! Static catalog of fishing locations.
//!
//! Locations are immutable balance data: unlock gating, reward multipliers,
//! and the ordered fish tables consumed by the catch resolver. The catalog is
//! built once and shared for the process lifetime.

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::sync::OnceLock;

/// A candidate fish within a location's table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub name: String,
    pub base_points: u32,
    /// Probability mass used in weighted sequential selection, in (0, 1].
    pub rarity_weight: f64,
    pub emoji: String,
    pub color: String,
}

/// Reward multipliers applied to a catch's base points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationRewards {
    pub coins_multiplier: f64,
    pub exp_multiplier: f64,
}

/// A fishing location: unlock requirements, odds, and fish tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub required_level: u32,
    pub unlock_cost: u32,
    pub base_catch_rate: f64,
    pub special_fish_chance: f64,
    pub rewards: LocationRewards,
    /// Candidate fish in fixed declaration order; selection walks this
    /// order, so earlier entries absorb more probability mass.
    pub fish: SmallVec<[Fish; 5]>,
    /// Bonus catch offered while a special-fish window is open.
    pub special_fish: Option<Fish>,
    pub emoji: String,
    pub water_color: String,
    pub environment: String,
    pub difficulty: String,
}

/// Outcome of an unlock eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockCheck {
    pub level_ok: bool,
    pub cost_ok: bool,
}

/// Whether a player at `level` with `coins` could unlock `location`.
///
/// The cost gate only applies to the first unlock; callers that already paid
/// skip it via the ledger's unlocked set.
#[must_use]
pub fn can_unlock(location: &Location, level: u32, coins: u32) -> UnlockCheck {
    UnlockCheck {
        level_ok: level >= location.required_level,
        cost_ok: coins >= location.unlock_cost,
    }
}

/// The full location catalog, in unlock-progression order.
#[must_use]
pub fn catalog() -> &'static [Location] {
    static CATALOG: OnceLock<Vec<Location>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

/// Look up a location by id.
#[must_use]
pub fn get(location_id: &str) -> Option<&'static Location> {
    catalog().iter().find(|location| location.id == location_id)
}

/// Id of the default starting location.
pub const STARTING_LOCATION_ID: &str = "lake_beginner";

fn fish(name: &str, base_points: u32, rarity_weight: f64, emoji: &str, color: &str) -> Fish {
    Fish {
        name: name.to_string(),
        base_points,
        rarity_weight,
        emoji: emoji.to_string(),
        color: color.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn location(
    id: &str,
    name: &str,
    required_level: u32,
    unlock_cost: u32,
    base_catch_rate: f64,
    special_fish_chance: f64,
    rewards: LocationRewards,
    fish: SmallVec<[Fish; 5]>,
    special_fish: Fish,
    emoji: &str,
    water_color: &str,
    environment: &str,
    difficulty: &str,
) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        required_level,
        unlock_cost,
        base_catch_rate,
        special_fish_chance,
        rewards,
        fish,
        special_fish: Some(special_fish),
        emoji: emoji.to_string(),
        water_color: water_color.to_string(),
        environment: environment.to_string(),
        difficulty: difficulty.to_string(),
    }
}

fn build_catalog() -> Vec<Location> {
    vec![
        location(
            STARTING_LOCATION_ID,
            "Beginner Lake",
            1,
            0,
            0.8,
            0.1,
            LocationRewards { coins_multiplier: 1.0, exp_multiplier: 1.0 },
            smallvec![
                fish("Goldfish", 10, 0.5, "🐟", "#FFA500"),
                fish("Eel", 20, 0.3, "🐍", "#8B4513"),
                fish("Squid", 30, 0.2, "🦑", "#800080"),
            ],
            fish("King Goldfish", 100, 0.05, "👑", "#FFD700"),
            "🏞️",
            "#2E5BBA",
            "lake",
            "Easy",
        ),
        location(
            "river_forest",
            "Forest River",
            3,
            500,
            0.6,
            0.2,
            LocationRewards { coins_multiplier: 1.5, exp_multiplier: 1.3 },
            smallvec![
                fish("Goldfish", 15, 0.4, "🐟", "#FFA500"),
                fish("Eel", 25, 0.3, "🐍", "#8B4513"),
                fish("Squid", 35, 0.2, "🦑", "#800080"),
                fish("Seahorse", 40, 0.1, "🐠", "#FFA500"),
            ],
            fish("Fantasy Fish", 200, 0.03, "✨", "#FF69B4"),
            "🌲",
            "#006400",
            "forest",
            "Medium",
        ),
        location(
            "ocean_shore",
            "Ocean Shore",
            5,
            1_500,
            0.4,
            0.3,
            LocationRewards { coins_multiplier: 2.0, exp_multiplier: 1.8 },
            smallvec![
                fish("Goldfish", 20, 0.3, "🐟", "#FFA500"),
                fish("Eel", 30, 0.25, "🐍", "#8B4513"),
                fish("Squid", 40, 0.2, "🦑", "#800080"),
                fish("Seahorse", 50, 0.15, "🐠", "#FFA500"),
                fish("Shark", 80, 0.1, "🦈", "#808080"),
            ],
            fish("Silver Dolphin", 300, 0.02, "🐬", "#C0C0C0"),
            "🌊",
            "#000080",
            "ocean",
            "Hard",
        ),
        location(
            "mountain_lake",
            "Mountain Lake",
            7,
            3_000,
            0.3,
            0.4,
            LocationRewards { coins_multiplier: 3.0, exp_multiplier: 2.5 },
            smallvec![
                fish("Goldfish", 25, 0.25, "🐟", "#FFA500"),
                fish("Eel", 35, 0.2, "🐍", "#8B4513"),
                fish("Squid", 45, 0.2, "🦑", "#800080"),
                fish("Seahorse", 55, 0.15, "🐠", "#FFA500"),
                fish("Shark", 100, 0.1, "🦈", "#808080"),
            ],
            fish("Ice Dragon Fish", 500, 0.015, "❄️", "#00BFFF"),
            "🏔️",
            "#2F4F4F",
            "mountain",
            "Very Hard",
        ),
        location(
            "deep_ocean",
            "Deep Ocean",
            10,
            5_000,
            0.2,
            0.5,
            LocationRewards { coins_multiplier: 5.0, exp_multiplier: 4.0 },
            smallvec![
                fish("Goldfish", 30, 0.2, "🐟", "#FFA500"),
                fish("Eel", 40, 0.2, "🐍", "#8B4513"),
                fish("Squid", 50, 0.2, "🦑", "#800080"),
                fish("Seahorse", 60, 0.15, "🐠", "#FFA500"),
                fish("Shark", 120, 0.15, "🦈", "#808080"),
            ],
            fish("Dinosaur Fish", 800, 0.01, "🦕", "#8B4513"),
            "🌌",
            "#000000",
            "deep_ocean",
            "Hardest",
        ),
        location(
            "arctic_sea",
            "Arctic Sea",
            12,
            8_000,
            0.15,
            0.6,
            LocationRewards { coins_multiplier: 8.0, exp_multiplier: 6.0 },
            smallvec![
                fish("Goldfish", 35, 0.15, "🐟", "#FFA500"),
                fish("Eel", 45, 0.15, "🐍", "#8B4513"),
                fish("Squid", 55, 0.15, "🦑", "#800080"),
                fish("Seahorse", 65, 0.15, "🐠", "#FFA500"),
                fish("Shark", 150, 0.2, "🦈", "#808080"),
            ],
            fish("Emperor Penguin Fish", 1_200, 0.005, "🐧", "#FF4500"),
            "🧊",
            "#4682B4",
            "arctic",
            "Extreme",
        ),
    ]
}
