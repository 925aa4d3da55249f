use driftcast_game::equipment::{EquipmentLevels, GearSlot, RodLocker, STARTER_ROD_ID};
use driftcast_game::ledger::PlayerLedger;
use driftcast_game::resolver::CatchOutcome;
use driftcast_game::session::{FishingSession, QueueScheduler};
use serde_json::{Value, json};

#[test]
fn ledger_blob_shape_is_stable() {
    let mut ledger = PlayerLedger::default();
    ledger.mark_unlocked("river_forest");
    let value = serde_json::to_value(&ledger).unwrap();
    assert_eq!(value["coins"], json!(100));
    assert_eq!(value["premium_coins"], json!(10));
    assert_eq!(value["exp_to_next_level"], json!(100));
    assert_eq!(value["unlocked_locations"], json!(["river_forest"]));
}

#[test]
fn legacy_partial_ledger_blob_loads_with_defaults() {
    let ledger: PlayerLedger =
        serde_json::from_str(r#"{"coins": 750, "level": 4, "score": 1200}"#).unwrap();
    assert_eq!(ledger.coins, 750);
    assert_eq!(ledger.level, 4);
    assert_eq!(ledger.premium_coins, 10);
    assert_eq!(ledger.exp, 0);
    assert!(ledger.unlocked_locations.is_empty());
}

#[test]
fn equipment_blob_defaults_absent_slots() {
    let levels: EquipmentLevels = serde_json::from_str(r#"{"rod": 3}"#).unwrap();
    assert_eq!(levels.level(GearSlot::Rod), 3);
    assert_eq!(levels.level(GearSlot::Bait), 1);
    assert_eq!(levels.level(GearSlot::Line), 1);
}

#[test]
fn rod_locker_serializes_as_a_bare_array() {
    let value = serde_json::to_value(RodLocker::default()).unwrap();
    let rods = value.as_array().expect("transparent array shape");
    assert_eq!(rods.len(), 5);
    assert_eq!(rods[0]["id"], json!(STARTER_ROD_ID));
    assert_eq!(rods[0]["owned"], json!(true));
    assert_eq!(rods[4]["rarity"], json!("legendary"));
}

#[test]
fn outcome_blob_is_tag_discriminated() {
    let value = serde_json::to_value(CatchOutcome::Miss).unwrap();
    assert_eq!(value["outcome"], json!("miss"));
}

#[test]
fn session_load_repairs_corrupt_save_invariants() {
    // Out-of-range levels and a rod list with nothing equipped come back
    // normalized instead of being rejected.
    let equipment: EquipmentLevels =
        serde_json::from_str(r#"{"rod": 9, "bait": 0, "line": 2}"#).unwrap();
    let mut rods: Vec<Value> = serde_json::to_value(RodLocker::default())
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    for rod in &mut rods {
        rod["owned"] = json!(false);
        rod["equipped"] = json!(false);
    }
    let rods: RodLocker = serde_json::from_value(Value::Array(rods)).unwrap();

    let session = FishingSession::from_parts(
        PlayerLedger::default(),
        equipment,
        rods,
        42,
        QueueScheduler::new(),
    );
    assert_eq!(session.equipment().level(GearSlot::Rod), 5);
    assert_eq!(session.equipment().level(GearSlot::Bait), 1);
    assert_eq!(session.equipment().level(GearSlot::Line), 2);
    let starter = session.rods().get(STARTER_ROD_ID).unwrap();
    assert!(starter.owned && starter.equipped);
}

#[test]
fn session_state_survives_a_save_load_cycle() {
    let mut session = FishingSession::new(7, QueueScheduler::new());
    session.claim_shop_purchase(&driftcast_game::ShopGrant {
        sku: "starter_pack".to_string(),
        coins: 2_000,
        premium_coins: 50,
        remove_ads: false,
    });
    session.upgrade_equipment(GearSlot::Line).unwrap();
    session.purchase_rod("fiberglass_rod").unwrap();
    session.equip_rod("fiberglass_rod").unwrap();

    let ledger_blob = serde_json::to_string(session.ledger()).unwrap();
    let equipment_blob = serde_json::to_string(session.equipment()).unwrap();
    let rods_blob = serde_json::to_string(session.rods()).unwrap();

    let restored = FishingSession::from_parts(
        serde_json::from_str(&ledger_blob).unwrap(),
        serde_json::from_str(&equipment_blob).unwrap(),
        serde_json::from_str(&rods_blob).unwrap(),
        7,
        QueueScheduler::new(),
    );
    assert_eq!(restored.ledger(), session.ledger());
    assert_eq!(restored.equipment(), session.equipment());
    assert_eq!(restored.rods().equipped().id, "fiberglass_rod");
}
