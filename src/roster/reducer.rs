use std::sync::Arc;

use crate::mvi::Reducer;

use super::entry::{InstanceId, RosterEntry};
use super::intent::RosterIntent;
use super::state::ArmyState;

pub struct RosterReducer;

impl Reducer for RosterReducer {
    type State = ArmyState;
    type Intent = RosterIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        let catalog = Arc::clone(&state.catalog);

        match intent {
            RosterIntent::AddUnit { unit_id } => {
                let next = state.next_instance_id.checked_add(1);
                if let (Some(unit), Some(next)) = (catalog.unit(&unit_id), next) {
                    let instance_id = InstanceId(state.next_instance_id);
                    state.next_instance_id = next;
                    state.roster.push(RosterEntry::new(instance_id, unit));
                }
            }
            RosterIntent::RemoveUnit { instance_id } => {
                // Clear attachments first so no body points at a removed leader
                for entry in &mut state.roster {
                    if entry.attached_leader_id == Some(instance_id) {
                        entry.attached_leader_id = None;
                    }
                }
                state.roster.retain(|e| e.instance_id != instance_id);
            }
            RosterIntent::UpdateModelCount {
                instance_id,
                requested,
            } => {
                if let Some(entry) = state.entry_mut(instance_id) {
                    if let Some(unit) = catalog.unit(&entry.unit_id) {
                        entry.model_count = unit.clamp_models(requested);
                    }
                }
            }
            RosterIntent::AttachLeader { body, leader } => {
                if state.entry(body).is_some() {
                    if let Some(leader) = leader {
                        // Last writer wins
                        for entry in &mut state.roster {
                            if entry.attached_leader_id == Some(leader) {
                                entry.attached_leader_id = None;
                            }
                        }
                    }
                    if let Some(entry) = state.entry_mut(body) {
                        entry.attached_leader_id = leader;
                    }
                }
            }
            RosterIntent::ToggleWeapon {
                instance_id,
                weapon_id,
                slot,
            } => {
                if let Some(entry) = state.entry_mut(instance_id) {
                    let selected = entry.weapons_mut(slot);
                    if !selected.remove(&weapon_id) {
                        selected.insert(weapon_id);
                    }
                }
            }
            RosterIntent::SwapWeapon {
                instance_id,
                remove_id,
                add_id,
                slot,
            } => {
                if let Some(entry) = state.entry_mut(instance_id) {
                    let selected = entry.weapons_mut(slot);
                    selected.remove(&remove_id);
                    selected.insert(add_id);
                }
            }
            RosterIntent::RestoreWeapon {
                instance_id,
                restore_id,
                remove_ids,
                slot,
            } => {
                if let Some(entry) = state.entry_mut(instance_id) {
                    let selected = entry.weapons_mut(slot);
                    for id in &remove_ids {
                        selected.remove(id);
                    }
                    selected.insert(restore_id);
                }
            }
            RosterIntent::SetSpecialWeapon {
                instance_id,
                chosen,
                options,
            } => {
                if let Some(entry) = state.entry_mut(instance_id) {
                    for id in &options {
                        entry.selected_ranged.remove(id);
                        entry.selected_melee.remove(id);
                    }
                    // Only the chosen option is stored; paired fire modes are a display concern
                    if let Some(chosen) = chosen.filter(|c| options.contains(c)) {
                        if let Some(slot) = catalog
                            .unit(&entry.unit_id)
                            .and_then(|unit| unit.weapon_slot(&chosen))
                        {
                            entry.weapons_mut(slot).insert(chosen);
                        }
                    }
                }
            }
            RosterIntent::ToggleWargearItem {
                instance_id,
                item_id,
            } => {
                if let Some(entry) = state.entry_mut(instance_id) {
                    if !entry.selected_wargear.remove(&item_id) {
                        entry.selected_wargear.insert(item_id);
                    }
                }
            }
            RosterIntent::SelectExclusiveWargearItem {
                instance_id,
                item_id,
            } => {
                if let Some(entry) = state.entry_mut(instance_id) {
                    if !entry.selected_wargear.remove(&item_id) {
                        let group = catalog
                            .unit(&entry.unit_id)
                            .and_then(|unit| unit.one_of_group(&item_id))
                            .unwrap_or_default();
                        for sibling in &group {
                            entry.selected_wargear.remove(sibling);
                        }
                        entry.selected_wargear.insert(item_id);
                    }
                }
            }
            RosterIntent::SetUnitEnhancement {
                instance_id,
                enhancement_id,
            } => {
                let Some(already_held) = state
                    .entry(instance_id)
                    .map(|target| target.enhancement_id.as_deref() == Some(enhancement_id.as_str()))
                else {
                    return state;
                };

                for entry in &mut state.roster {
                    if entry.enhancement_id.as_deref() == Some(enhancement_id.as_str()) {
                        entry.enhancement_id = None;
                    }
                }
                if !already_held {
                    if let Some(entry) = state.entry_mut(instance_id) {
                        entry.enhancement_id = Some(enhancement_id);
                    }
                }
            }
            RosterIntent::SetDetachment(id) => state.detachment_id = id,
            RosterIntent::SetDoctrine(id) => state.doctrine_id = id,
            RosterIntent::SetForgeWorld(id) => state.forge_world_id = id,
            RosterIntent::SetPointsLimit(limit) => state.points_limit = limit,
        }

        state
    }
}
