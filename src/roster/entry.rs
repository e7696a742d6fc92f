//! Roster entries: one unit instance placed into the army.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{UnitDefinition, WeaponSlot};

/// Session-unique handle of a roster entry. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit instance in the roster with its current configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub instance_id: InstanceId,
    pub unit_id: String,
    /// Always within the unit's model bounds.
    pub model_count: u32,
    /// Leader entry attached to this (body) entry.
    pub attached_leader_id: Option<InstanceId>,
    pub selected_ranged: BTreeSet<String>,
    pub selected_melee: BTreeSet<String>,
    pub selected_wargear: BTreeSet<String>,
    pub enhancement_id: Option<String>,
}

impl RosterEntry {
    /// Fresh entry at minimum size with the unit's default loadout.
    pub(crate) fn new(instance_id: InstanceId, unit: &UnitDefinition) -> Self {
        Self {
            instance_id,
            unit_id: unit.id.clone(),
            model_count: unit.min_models,
            attached_leader_id: None,
            selected_ranged: unit
                .default_weapons(WeaponSlot::Ranged)
                .map(|w| w.id.clone())
                .collect(),
            selected_melee: unit
                .default_weapons(WeaponSlot::Melee)
                .map(|w| w.id.clone())
                .collect(),
            selected_wargear: BTreeSet::new(),
            enhancement_id: None,
        }
    }

    pub fn weapons(&self, slot: WeaponSlot) -> &BTreeSet<String> {
        match slot {
            WeaponSlot::Ranged => &self.selected_ranged,
            WeaponSlot::Melee => &self.selected_melee,
        }
    }

    pub(crate) fn weapons_mut(&mut self, slot: WeaponSlot) -> &mut BTreeSet<String> {
        match slot {
            WeaponSlot::Ranged => &mut self.selected_ranged,
            WeaponSlot::Melee => &mut self.selected_melee,
        }
    }

    /// Selected in either slot.
    pub fn has_weapon(&self, weapon_id: &str) -> bool {
        self.selected_ranged.contains(weapon_id) || self.selected_melee.contains(weapon_id)
    }

    pub fn has_wargear(&self, item_id: &str) -> bool {
        self.selected_wargear.contains(item_id)
    }
}
