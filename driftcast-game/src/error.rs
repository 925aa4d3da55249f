//! Recoverable action errors returned by the player-facing surface.
//!
//! Every variant is an expected gameplay outcome: the presentation layer
//! shows a rejection message and the player may retry. Nothing here is fatal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason a player action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionError {
    /// The coin balance does not cover the cost of the action.
    #[error("not enough coins")]
    InsufficientFunds,
    /// The purchase target is already owned.
    #[error("already owned")]
    AlreadyOwned,
    /// The equip target is not in the owned set.
    #[error("rod not owned")]
    NotOwned,
    /// The player level is below the location requirement.
    #[error("player level too low")]
    LevelLocked,
    /// A cast was resolved with zero charge power.
    #[error("cast has no power")]
    NoPower,
    /// The action is not valid in the current session phase.
    #[error("action not valid in current state")]
    InvalidState,
}
