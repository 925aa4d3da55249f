//! Grants delivered by the external commerce collaborator.
//!
//! The commerce backend (catalog, cart, checkout) lives outside the core.
//! When the shop UI completes a purchase it hands the core one of these
//! records; the orchestrator credits it through the ledger.

use serde::{Deserialize, Serialize};

/// Credits applied to the player when a purchase completes.
/// All fields default to their zero value if not present in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopGrant {
    /// Commerce-side product reference.
    pub sku: String,
    pub coins: u32,
    pub premium_coins: u32,
    pub remove_ads: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_defaults_cleanly() {
        let grant: ShopGrant = serde_json::from_str(r#"{"sku":"coin_pack_small","coins":500}"#)
            .unwrap();
        assert_eq!(grant.coins, 500);
        assert_eq!(grant.premium_coins, 0);
        assert!(!grant.remove_ads);
    }
}
