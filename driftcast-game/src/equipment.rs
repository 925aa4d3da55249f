//! Equipment registry: upgrade levels per gear slot and the rod inventory.
//!
//! The registry never touches currency. Upgrade and purchase operations take
//! the caller's available coin balance, validate affordability, and report
//! the cost back; debiting the ledger stays with the session orchestrator so
//! each balance has a single writer.

use serde::{Deserialize, Serialize};

use crate::constants::{BAIT_UPGRADE_COSTS, LINE_UPGRADE_COSTS, MAX_EQUIPMENT_LEVEL,
    ROD_UPGRADE_COSTS};
use crate::error::ActionError;

/// Upgradeable gear slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearSlot {
    Rod,
    Bait,
    Line,
}

impl GearSlot {
    const fn cost_table(self) -> &'static [u32; 4] {
        match self {
            Self::Rod => &ROD_UPGRADE_COSTS,
            Self::Bait => &BAIT_UPGRADE_COSTS,
            Self::Line => &LINE_UPGRADE_COSTS,
        }
    }
}

/// Per-slot upgrade levels, each in `1..=MAX_EQUIPMENT_LEVEL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentLevels {
    rod: u8,
    bait: u8,
    line: u8,
}

impl Default for EquipmentLevels {
    fn default() -> Self {
        Self {
            rod: 1,
            bait: 1,
            line: 1,
        }
    }
}

impl EquipmentLevels {
    /// Current level of a slot.
    #[must_use]
    pub const fn level(&self, slot: GearSlot) -> u8 {
        match slot {
            GearSlot::Rod => self.rod,
            GearSlot::Bait => self.bait,
            GearSlot::Line => self.line,
        }
    }

    /// Coin cost of the next upgrade, or `None` at max level.
    #[must_use]
    pub fn next_cost(&self, slot: GearSlot) -> Option<u32> {
        let level = self.level(slot);
        if level >= MAX_EQUIPMENT_LEVEL {
            return None;
        }
        slot.cost_table().get(usize::from(level - 1)).copied()
    }

    /// Raise a slot by one level.
    ///
    /// Returns the cost the caller must debit from the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientFunds`] when the balance does not
    /// cover the next cost, or when the slot is already at max level.
    pub fn upgrade(&mut self, slot: GearSlot, available_coins: u32) -> Result<u32, ActionError> {
        let Some(cost) = self.next_cost(slot) else {
            return Err(ActionError::InsufficientFunds);
        };
        if available_coins < cost {
            return Err(ActionError::InsufficientFunds);
        }
        let level = match slot {
            GearSlot::Rod => &mut self.rod,
            GearSlot::Bait => &mut self.bait,
            GearSlot::Line => &mut self.line,
        };
        *level += 1;
        debug_assert!(*level <= MAX_EQUIPMENT_LEVEL);
        Ok(cost)
    }

    /// Clamp loaded levels into the valid range, reporting whether any value
    /// had to be repaired.
    pub fn normalize(&mut self) -> bool {
        let mut repaired = false;
        for level in [&mut self.rod, &mut self.bait, &mut self.line] {
            let clamped = (*level).clamp(1, MAX_EQUIPMENT_LEVEL);
            if clamped != *level {
                *level = clamped;
                repaired = true;
            }
        }
        repaired
    }
}

/// Visual rarity tier of a purchasable rod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RodRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// A fishing rod: catalog entry and ownership record in one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rod {
    pub id: String,
    pub name: String,
    /// Maximum cast distance in meters at full charge.
    pub casting_distance: f64,
    /// Percent chance of an accurate cast, 0-100.
    pub accuracy: u8,
    pub durability: u32,
    pub price: u32,
    pub rarity: RodRarity,
    pub emoji: String,
    pub owned: bool,
    pub equipped: bool,
}

/// The player's rod inventory.
///
/// Serialized under the `fishingRods` key as the full rod array, ownership
/// flags included. At most one rod is equipped at any time; the starter rod
/// is owned and equipped by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RodLocker {
    rods: Vec<Rod>,
}

impl Default for RodLocker {
    fn default() -> Self {
        Self {
            rods: default_rod_catalog(),
        }
    }
}

impl RodLocker {
    /// All rods, owned or not, in catalog order.
    #[must_use]
    pub fn rods(&self) -> &[Rod] {
        &self.rods
    }

    /// Look up a rod by id.
    #[must_use]
    pub fn get(&self, rod_id: &str) -> Option<&Rod> {
        self.rods.iter().find(|rod| rod.id == rod_id)
    }

    /// The currently equipped rod.
    ///
    /// # Panics
    ///
    /// Panics if the single-equip invariant is broken; [`Self::normalize`]
    /// repairs loaded data before the locker is used.
    #[must_use]
    pub fn equipped(&self) -> &Rod {
        self.rods
            .iter()
            .find(|rod| rod.equipped)
            .expect("exactly one rod is equipped")
    }

    /// Mark a rod as owned.
    ///
    /// Buying an already-owned rod is an idempotent no-op reported as a
    /// zero-cost success. Returns the cost the caller must debit.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientFunds`] when the balance does not
    /// cover the price, or [`ActionError::NotOwned`] for an unknown rod id.
    pub fn purchase(&mut self, rod_id: &str, available_coins: u32) -> Result<u32, ActionError> {
        let rod = self
            .rods
            .iter_mut()
            .find(|rod| rod.id == rod_id)
            .ok_or(ActionError::NotOwned)?;
        if rod.owned {
            return Ok(0);
        }
        if available_coins < rod.price {
            return Err(ActionError::InsufficientFunds);
        }
        rod.owned = true;
        Ok(rod.price)
    }

    /// Equip an owned rod, unequipping every other rod in the same step.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotOwned`] when the target rod is unknown or
    /// not owned.
    pub fn equip(&mut self, rod_id: &str) -> Result<(), ActionError> {
        let target_owned = self
            .rods
            .iter()
            .any(|rod| rod.id == rod_id && rod.owned);
        if !target_owned {
            return Err(ActionError::NotOwned);
        }
        for rod in &mut self.rods {
            rod.equipped = rod.id == rod_id;
        }
        debug_assert_eq!(self.rods.iter().filter(|rod| rod.equipped).count(), 1);
        Ok(())
    }

    /// Repair invariants on loaded data, reporting whether anything changed.
    ///
    /// Guarantees the starter rod exists and is owned, catalog rods missing
    /// from an older save are re-added, and exactly one owned rod ends up
    /// equipped.
    pub fn normalize(&mut self) -> bool {
        let mut repaired = false;
        for catalog_rod in default_rod_catalog() {
            if self.get(&catalog_rod.id).is_none() {
                self.rods.push(catalog_rod);
                repaired = true;
            }
        }
        if let Some(starter) = self.rods.iter_mut().find(|rod| rod.id == STARTER_ROD_ID)
            && !starter.owned
        {
            starter.owned = true;
            repaired = true;
        }
        let equipped_owned = self
            .rods
            .iter()
            .filter(|rod| rod.equipped && rod.owned)
            .count();
        if equipped_owned != 1 {
            let fallback = self
                .rods
                .iter()
                .position(|rod| rod.owned)
                .unwrap_or_default();
            for (idx, rod) in self.rods.iter_mut().enumerate() {
                rod.equipped = idx == fallback;
            }
            repaired = true;
        }
        repaired
    }
}

/// Id of the free starter rod.
pub const STARTER_ROD_ID: &str = "basic_rod";

fn catalog_rod(
    id: &str,
    name: &str,
    price: u32,
    casting_distance: f64,
    accuracy: u8,
    durability: u32,
    rarity: RodRarity,
    emoji: &str,
) -> Rod {
    Rod {
        id: id.to_string(),
        name: name.to_string(),
        casting_distance,
        accuracy,
        durability,
        price,
        rarity,
        emoji: emoji.to_string(),
        owned: false,
        equipped: false,
    }
}

fn default_rod_catalog() -> Vec<Rod> {
    let mut rods = vec![
        catalog_rod(STARTER_ROD_ID, "Basic Rod", 0, 50.0, 70, 100, RodRarity::Common, "🎣"),
        catalog_rod("fiberglass_rod", "Fiberglass Rod", 200, 70.0, 75, 150, RodRarity::Common, "🎏"),
        catalog_rod("carbon_rod", "Carbon Rod", 500, 90.0, 80, 200, RodRarity::Uncommon, "⚫"),
        catalog_rod("titanium_rod", "Titanium Rod", 1_200, 120.0, 85, 300, RodRarity::Rare, "⚙️"),
        catalog_rod("legendary_rod", "Legendary Rod", 3_000, 150.0, 90, 500, RodRarity::Legendary, "🏆"),
    ];
    rods[0].owned = true;
    rods[0].equipped = true;
    rods
}
