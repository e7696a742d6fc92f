mod common;

use common::{engine, strict_engine};
use rosterforge::catalog::WeaponSlot;
use rosterforge::roster::{CommandOutcome, IgnoreReason, InstanceId, RosterError};
use std::collections::BTreeSet;

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// add / remove / model count
// ============================================================================

#[test]
fn test_add_unit_seeds_entry_from_catalog() {
    let mut engine = engine();
    let entry = engine.add_unit("ranger_squad").unwrap();

    assert_eq!(entry.instance_id, InstanceId(1));
    assert_eq!(entry.unit_id, "ranger_squad");
    assert_eq!(entry.model_count, 5);
    assert_eq!(entry.selected_ranged, set(&["galvanic_rifle"]));
    assert_eq!(entry.selected_melee, set(&["close_combat_weapon"]));
    assert!(entry.selected_wargear.is_empty());
    assert!(entry.enhancement_id.is_none());
    assert!(entry.attached_leader_id.is_none());
    assert_eq!(engine.roster_entries(), &[entry]);
}

#[test]
fn test_add_unknown_unit_fails() {
    let mut engine = engine();
    let err = engine.add_unit("knight_crusader").unwrap_err();
    assert_eq!(
        err,
        RosterError::UnitNotFound {
            unit_id: "knight_crusader".to_string()
        }
    );
    assert!(engine.roster_entries().is_empty());
}

#[test]
fn test_ranger_squad_points_at_seven_models() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;
    assert_eq!(engine.total_points(), 90);

    engine.update_model_count(id, 7).unwrap();
    assert_eq!(engine.total_points(), 126);
}

#[test]
fn test_model_count_above_max_clamps() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;

    engine.update_model_count(id, 99).unwrap();
    assert_eq!(engine.roster_entries()[0].model_count, 10);
    assert_eq!(engine.total_points(), 180);

    engine.update_model_count(id, 0).unwrap();
    assert_eq!(engine.roster_entries()[0].model_count, 5);
}

#[test]
fn test_fixed_size_unit_keeps_its_count() {
    let mut engine = engine();
    assert!(engine.unit_by_id("onager").unwrap().is_fixed_size());
    assert!(!engine.unit_by_id("ranger_squad").unwrap().is_fixed_size());

    let id = engine.add_unit("onager").unwrap().instance_id;
    engine.update_model_count(id, 3).unwrap();
    assert_eq!(engine.roster_entries()[0].model_count, 1);
    assert_eq!(engine.total_points(), 155);
}

#[test]
fn test_total_points_counts_every_entry_once() {
    let mut engine = engine();
    let body = engine.add_unit("U1").unwrap().instance_id;
    let leader = engine.add_unit("L1").unwrap().instance_id;
    engine.attach_leader(body, Some(leader)).unwrap();

    assert_eq!(engine.total_points(), 100 + 65);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.total_points(), 165);
    assert_eq!(snapshot.combined_points(body), Some(165));
    assert_eq!(snapshot.entry_points(leader), Some(65));
}

#[test]
fn test_instance_ids_are_not_reused() {
    let mut engine = engine();
    let first = engine.add_unit("U1").unwrap().instance_id;
    engine.remove_unit(first).unwrap();
    let second = engine.add_unit("U1").unwrap().instance_id;
    assert!(second > first);
}

#[test]
fn test_remove_missing_unit_is_ignored() {
    let mut engine = engine();
    engine.add_unit("U1").unwrap();

    let outcome = engine.remove_unit(InstanceId(77)).unwrap();
    assert_eq!(outcome, CommandOutcome::Ignored(IgnoreReason::EntryNotFound(InstanceId(77))));
    assert_eq!(engine.roster_entries().len(), 1);
}

// ============================================================================
// leaders
// ============================================================================

#[test]
fn test_leader_moves_to_latest_body() {
    let mut engine = engine();
    let body_a = engine.add_unit("U1").unwrap().instance_id;
    let body_b = engine.add_unit("ranger_squad").unwrap().instance_id;
    let leader = engine.add_unit("L1").unwrap().instance_id;

    engine.attach_leader(body_a, Some(leader)).unwrap();
    engine.attach_leader(body_b, Some(leader)).unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.entry(body_a).unwrap().attached_leader_id, None);
    assert_eq!(snapshot.entry(body_b).unwrap().attached_leader_id, Some(leader));
}

#[test]
fn test_removing_leader_clears_attachment() {
    let mut engine = engine();
    let body = engine.add_unit("U1").unwrap().instance_id;
    let leader = engine.add_unit("L1").unwrap().instance_id;

    engine.attach_leader(body, Some(leader)).unwrap();
    engine.remove_unit(leader).unwrap();

    let entries = engine.roster_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].attached_leader_id, None);
}

#[test]
fn test_removing_body_keeps_leader() {
    let mut engine = engine();
    let body = engine.add_unit("U1").unwrap().instance_id;
    let leader = engine.add_unit("L1").unwrap().instance_id;

    engine.attach_leader(body, Some(leader)).unwrap();
    assert!(engine.remove_unit(body).unwrap().is_applied());

    let entries = engine.roster_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].instance_id, leader);
    assert!(entries.iter().all(|e| e.attached_leader_id.is_none()));
}

#[test]
fn test_incompatible_leader_is_ignored() {
    let mut engine = engine();
    let rangers = engine.add_unit("ranger_squad").unwrap().instance_id;
    let leader = engine.add_unit("L2").unwrap().instance_id;

    let outcome = engine.attach_leader(rangers, Some(leader)).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Ignored(IgnoreReason::IncompatibleLeader {
            leader,
            body: rangers
        })
    );
    assert_eq!(engine.roster_entries()[0].attached_leader_id, None);
}

#[test]
fn test_eligible_leaders_and_top_level_entries() {
    let mut engine = engine();
    let body = engine.add_unit("U1").unwrap().instance_id;
    let rangers = engine.add_unit("ranger_squad").unwrap().instance_id;
    let l1 = engine.add_unit("L1").unwrap().instance_id;
    let l2 = engine.add_unit("L2").unwrap().instance_id;
    engine.attach_leader(body, Some(l2)).unwrap();

    let snapshot = engine.snapshot();
    let for_body: Vec<InstanceId> = snapshot
        .eligible_leaders(body)
        .iter()
        .map(|e| e.instance_id)
        .collect();
    assert_eq!(for_body, vec![l1, l2]);

    let for_rangers: Vec<InstanceId> = snapshot
        .eligible_leaders(rangers)
        .iter()
        .map(|e| e.instance_id)
        .collect();
    assert_eq!(for_rangers, vec![l1]);

    let top: Vec<InstanceId> = snapshot
        .top_level_entries()
        .iter()
        .map(|e| e.instance_id)
        .collect();
    assert_eq!(top, vec![body, rangers, l1]);
}

// ============================================================================
// weapons
// ============================================================================

#[test]
fn test_swap_then_restore_round_trips() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;
    let original = engine.roster_entries()[0].selected_ranged.clone();

    engine
        .swap_weapon(id, "galvanic_rifle", "radium_carbine", WeaponSlot::Ranged)
        .unwrap();
    assert_eq!(engine.roster_entries()[0].selected_ranged, set(&["radium_carbine"]));

    engine
        .restore_weapon(id, "galvanic_rifle", "radium_carbine", WeaponSlot::Ranged)
        .unwrap();
    assert_eq!(engine.roster_entries()[0].selected_ranged, original);
}

#[test]
fn test_revert_swap_drops_every_alternative() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;
    engine
        .swap_weapon(id, "galvanic_rifle", "radium_carbine", WeaponSlot::Ranged)
        .unwrap();
    engine.toggle_weapon(id, "arc_rifle", WeaponSlot::Ranged).unwrap();

    engine
        .revert_swap(
            id,
            "galvanic_rifle",
            &["radium_carbine", "arc_rifle"],
            WeaponSlot::Ranged,
        )
        .unwrap();
    assert_eq!(engine.roster_entries()[0].selected_ranged, set(&["galvanic_rifle"]));
}

#[test]
fn test_toggle_weapon_twice_is_identity() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;
    let before = engine.roster_entries()[0].clone();

    engine.toggle_weapon(id, "galvanic_rifle", WeaponSlot::Ranged).unwrap();
    assert!(!engine.roster_entries()[0].has_weapon("galvanic_rifle"));
    engine.toggle_weapon(id, "galvanic_rifle", WeaponSlot::Ranged).unwrap();
    assert_eq!(engine.roster_entries()[0], before);
}

const SPECIAL_OPTIONS: [&str; 4] = [
    "arc_rifle",
    "plasma_caliver_standard",
    "plasma_caliver_supercharge",
    "transuranic_arquebus",
];

fn selected_options(engine: &rosterforge::roster::RosterEngine) -> Vec<&'static str> {
    let entry = &engine.roster_entries()[0];
    SPECIAL_OPTIONS
        .iter()
        .copied()
        .filter(|w| entry.has_weapon(w))
        .collect()
}

#[test]
fn test_special_weapon_is_mutually_exclusive() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;

    engine.set_special_weapon(id, Some("arc_rifle"), &SPECIAL_OPTIONS).unwrap();
    engine
        .set_special_weapon(id, Some("transuranic_arquebus"), &SPECIAL_OPTIONS)
        .unwrap();

    assert_eq!(selected_options(&engine), vec!["transuranic_arquebus"]);
    let entry = &engine.roster_entries()[0];
    assert!(!entry.selected_melee.contains("transuranic_arquebus"));
    assert!(entry.selected_ranged.contains("galvanic_rifle"));
}

#[test]
fn test_special_weapon_with_paired_profile_stays_single() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;

    engine
        .set_special_weapon(id, Some("plasma_caliver_standard"), &SPECIAL_OPTIONS)
        .unwrap();
    assert_eq!(selected_options(&engine), vec!["plasma_caliver_standard"]);

    engine
        .set_special_weapon(id, Some("plasma_caliver_supercharge"), &SPECIAL_OPTIONS)
        .unwrap();
    assert_eq!(selected_options(&engine), vec!["plasma_caliver_supercharge"]);

    engine.set_special_weapon(id, None, &SPECIAL_OPTIONS).unwrap();
    assert!(selected_options(&engine).is_empty());
}

#[test]
fn test_special_weapon_outside_group_is_ignored() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;
    let options = ["arc_rifle", "transuranic_arquebus"];

    let outcome = engine
        .set_special_weapon(id, Some("radium_carbine"), &options)
        .unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Ignored(IgnoreReason::ChoiceOutsideGroup {
            instance_id: id,
            weapon_id: "radium_carbine".to_string(),
        })
    );
    assert!(!engine.roster_entries()[0].has_weapon("radium_carbine"));
}

#[test]
fn test_special_weapon_outside_group_fails_in_strict_mode() {
    let mut engine = strict_engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;

    engine
        .set_special_weapon(id, Some("arc_rifle"), &["arc_rifle", "transuranic_arquebus"])
        .unwrap();
    let err = engine
        .set_special_weapon(id, Some("radium_carbine"), &["arc_rifle", "transuranic_arquebus"])
        .unwrap_err();
    assert_eq!(
        err,
        RosterError::ChoiceOutsideGroup {
            instance_id: id,
            weapon_id: "radium_carbine".to_string(),
        }
    );

    let entry = &engine.roster_entries()[0];
    assert!(entry.has_weapon("arc_rifle"));
    assert!(!entry.has_weapon("radium_carbine"));
}

#[test]
fn test_unknown_weapon_is_rejected_in_strict_mode() {
    let mut engine = strict_engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;

    let err = engine
        .set_special_weapon(id, Some("volkite_blaster"), &["arc_rifle"])
        .unwrap_err();
    assert!(matches!(err, RosterError::UnknownWeapon { .. }));

    let err = engine
        .swap_weapon(id, "galvanic_rifle", "close_combat_weapon", WeaponSlot::Ranged)
        .unwrap_err();
    assert!(matches!(err, RosterError::UnknownWeapon { ref weapon_id, .. } if weapon_id == "close_combat_weapon"));

    assert_eq!(engine.roster_entries()[0].selected_ranged, set(&["galvanic_rifle"]));
}

// ============================================================================
// wargear
// ============================================================================

#[test]
fn test_exclusive_wargear_replaces_sibling() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;

    engine.select_exclusive_wargear_item(id, "enhanced_data_tether").unwrap();
    engine.select_exclusive_wargear_item(id, "omnispex").unwrap();
    assert_eq!(engine.roster_entries()[0].selected_wargear, set(&["omnispex"]));

    engine.select_exclusive_wargear_item(id, "omnispex").unwrap();
    assert!(engine.roster_entries()[0].selected_wargear.is_empty());
}

#[test]
fn test_ungrouped_wargear_toggles_independently() {
    let mut engine = engine();
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;

    engine.select_exclusive_wargear_item(id, "omnispex").unwrap();
    engine.select_exclusive_wargear_item(id, "mace_of_rust").unwrap();
    engine.toggle_wargear_item(id, "enhanced_data_tether").unwrap();

    assert_eq!(
        engine.roster_entries()[0].selected_wargear,
        set(&["enhanced_data_tether", "mace_of_rust", "omnispex"])
    );

    engine.toggle_wargear_item(id, "mace_of_rust").unwrap();
    assert!(!engine.roster_entries()[0].has_wargear("mace_of_rust"));
}

#[test]
fn test_unknown_wargear_item_is_ignored() {
    let mut engine = engine();
    let id = engine.add_unit("U1").unwrap().instance_id;

    let outcome = engine.toggle_wargear_item(id, "omnispex").unwrap();
    assert!(matches!(
        outcome,
        CommandOutcome::Ignored(IgnoreReason::UnknownWargearItem { .. })
    ));
}

// ============================================================================
// enhancements
// ============================================================================

#[test]
fn test_enhancement_is_unique_across_roster() {
    let mut engine = engine();
    let a = engine.add_unit("L1").unwrap().instance_id;
    let b = engine.add_unit("L2").unwrap().instance_id;

    engine.set_unit_enhancement(a, "omni_scrambler").unwrap();
    engine.set_unit_enhancement(b, "omni_scrambler").unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.entry(a).unwrap().enhancement_id, None);
    assert_eq!(
        snapshot.entry(b).unwrap().enhancement_id.as_deref(),
        Some("omni_scrambler")
    );
    assert_eq!(snapshot.enhancement_holder("omni_scrambler").unwrap().instance_id, b);
}

#[test]
fn test_enhancement_assigned_twice_toggles_off() {
    let mut engine = engine();
    let a = engine.add_unit("L1").unwrap().instance_id;

    engine.set_unit_enhancement(a, "omni_scrambler").unwrap();
    engine.set_unit_enhancement(a, "omni_scrambler").unwrap();
    assert_eq!(engine.roster_entries()[0].enhancement_id, None);
}

#[test]
fn test_enhancement_on_missing_entry_leaves_holder() {
    let mut engine = engine();
    let a = engine.add_unit("L1").unwrap().instance_id;
    engine.set_unit_enhancement(a, "omni_scrambler").unwrap();

    let outcome = engine.set_unit_enhancement(InstanceId(50), "omni_scrambler").unwrap();
    assert!(!outcome.is_applied());
    assert_eq!(
        engine.roster_entries()[0].enhancement_id.as_deref(),
        Some("omni_scrambler")
    );
}

#[test]
fn test_strict_engine_rejects_missing_entries() {
    let mut engine = strict_engine();
    assert_eq!(
        engine.update_model_count(InstanceId(3), 4).unwrap_err(),
        RosterError::EntryNotFound {
            instance_id: InstanceId(3)
        }
    );
    assert_eq!(
        engine.set_unit_enhancement(InstanceId(3), "omni_scrambler").unwrap_err(),
        RosterError::EntryNotFound {
            instance_id: InstanceId(3)
        }
    );
}

// ============================================================================
// army-wide selections
// ============================================================================

#[test]
fn test_selections_resolve_against_catalog() {
    let mut engine = engine();
    engine.set_detachment(Some("rad_zone_corps"));
    engine.set_forge_world(Some("mars"));
    engine.set_doctrine(Some("protector"));
    engine.set_points_limit(1000);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.active_detachment().unwrap().name, "Rad-Zone Corps");
    assert_eq!(snapshot.active_forge_world().unwrap().name, "Mars");
    assert_eq!(snapshot.active_doctrine().unwrap().name, "Protector Doctrina");
    assert_eq!(snapshot.points_limit(), 1000);

    let enhancements: Vec<&str> = snapshot
        .available_enhancements()
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(enhancements, vec!["omni_scrambler", "cognitive_reinforcement"]);

    engine.set_detachment(None);
    assert!(engine.snapshot().available_enhancements().is_empty());
}

#[test]
fn test_points_limit_tracking() {
    let mut engine = engine();
    engine.set_points_limit(150);
    let id = engine.add_unit("ranger_squad").unwrap().instance_id;

    assert_eq!(engine.snapshot().points_remaining(), 60);
    assert!(!engine.snapshot().is_over_limit());

    engine.update_model_count(id, 10).unwrap();
    let snapshot = engine.snapshot();
    assert!(snapshot.is_over_limit());
    assert_eq!(snapshot.points_remaining(), 0);
}

#[test]
fn test_unit_by_id_looks_up_catalog() {
    let engine = engine();
    assert_eq!(engine.unit_by_id("onager").unwrap().points_base, 155);
    assert!(engine.unit_by_id("missing").is_none());
}
