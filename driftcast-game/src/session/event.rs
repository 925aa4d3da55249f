//! Structured events emitted by the session orchestrator.
//!
//! The presentation layer renders from state snapshots and reacts to these
//! events for transient feedback (toasts, sounds, celebration overlays). The
//! engine maps a subset of them to audio cues.

use serde::{Deserialize, Serialize};

use crate::cast::CastResult;
use crate::equipment::GearSlot;
use crate::resolver::CaughtFish;

/// One mechanical outcome of a player action or timer callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    CastResolved { result: CastResult },
    FishCaught { caught: CaughtFish },
    CatchMissed,
    MissionCompleted { mission_id: u8, reward: u32 },
    LeveledUp { level: u32 },
    SpecialWindowOpened,
    SpecialWindowClosed,
    LocationUnlocked { location_id: String, cost: u32 },
    LocationSelected { location_id: String },
    EquipmentUpgraded { slot: GearSlot, level: u8, cost: u32 },
    RodPurchased { rod_id: String, cost: u32 },
    RodEquipped { rod_id: String },
    PurchaseClaimed { sku: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_roundtrip_as_tagged_json() {
        let event = SessionEvent::MissionCompleted {
            mission_id: 1,
            reward: 150,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("mission_completed"));
        let restored: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, event);
    }
}
