//! Read-only view of the army handed to observers.

use std::sync::Arc;

use crate::calculator::{
    calculate_points, compute_final_stats, compute_weapon_stats, ActiveProfiles, StatMode,
};
use crate::catalog::{
    Catalog, Detachment, Doctrine, Enhancement, ForgeWorld, StatBlock, UnitDefinition,
    WeaponProfile,
};

use super::entry::{InstanceId, RosterEntry};
use super::state::ArmyState;

/// Fully materialized copy of the army at one point in time.
///
/// Cloning is cheap for the catalog (shared) and proportional to the roster
/// size for everything else. A snapshot never changes after it is taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    catalog: Arc<Catalog>,
    roster: Vec<RosterEntry>,
    detachment_id: Option<String>,
    doctrine_id: Option<String>,
    forge_world_id: Option<String>,
    points_limit: u32,
    total_points: u32,
    stat_mode: StatMode,
}

impl Snapshot {
    pub(crate) fn capture(state: &ArmyState, stat_mode: StatMode) -> Self {
        Self {
            catalog: Arc::clone(&state.catalog),
            roster: state.roster.clone(),
            detachment_id: state.detachment_id.clone(),
            doctrine_id: state.doctrine_id.clone(),
            forge_world_id: state.forge_world_id.clone(),
            points_limit: state.points_limit,
            total_points: state.total_points(),
            stat_mode,
        }
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn entry(&self, instance_id: InstanceId) -> Option<&RosterEntry> {
        self.roster.iter().find(|e| e.instance_id == instance_id)
    }

    pub fn detachment_id(&self) -> Option<&str> {
        self.detachment_id.as_deref()
    }

    pub fn doctrine_id(&self) -> Option<&str> {
        self.doctrine_id.as_deref()
    }

    pub fn forge_world_id(&self) -> Option<&str> {
        self.forge_world_id.as_deref()
    }

    pub fn points_limit(&self) -> u32 {
        self.points_limit
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn stat_mode(&self) -> StatMode {
        self.stat_mode
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn active_detachment(&self) -> Option<&Detachment> {
        self.detachment_id
            .as_deref()
            .and_then(|id| self.catalog.detachment(id))
    }

    pub fn active_doctrine(&self) -> Option<&Doctrine> {
        self.doctrine_id
            .as_deref()
            .and_then(|id| self.catalog.doctrine(id))
    }

    pub fn active_forge_world(&self) -> Option<&ForgeWorld> {
        self.forge_world_id
            .as_deref()
            .and_then(|id| self.catalog.forge_world(id))
    }

    /// Catalog definition of an entry's unit.
    pub fn unit_of(&self, instance_id: InstanceId) -> Option<&UnitDefinition> {
        self.entry(instance_id)
            .and_then(|entry| self.catalog.unit(&entry.unit_id))
    }

    /// Cost of a single entry, not including an attached leader.
    pub fn entry_points(&self, instance_id: InstanceId) -> Option<u32> {
        let entry = self.entry(instance_id)?;
        let unit = self.catalog.unit(&entry.unit_id)?;
        Some(calculate_points(unit, entry.model_count))
    }

    /// Body cost plus the cost of its attached leader.
    ///
    /// Display total only; `total_points` already counts each entry once.
    pub fn combined_points(&self, body: InstanceId) -> Option<u32> {
        let entry = self.entry(body)?;
        let own = self.entry_points(body)?;
        let leader = entry
            .attached_leader_id
            .and_then(|leader| self.entry_points(leader))
            .unwrap_or(0);
        Some(own.saturating_add(leader))
    }

    pub fn is_over_limit(&self) -> bool {
        self.total_points > self.points_limit
    }

    pub fn points_remaining(&self) -> u32 {
        self.points_limit.saturating_sub(self.total_points)
    }

    /// Leader entries whose unit can lead the body's unit.
    pub fn eligible_leaders(&self, body: InstanceId) -> Vec<&RosterEntry> {
        let Some(body_entry) = self.entry(body) else {
            return Vec::new();
        };
        self.roster
            .iter()
            .filter(|candidate| candidate.instance_id != body)
            .filter(|candidate| {
                self.catalog
                    .unit(&candidate.unit_id)
                    .is_some_and(|unit| unit.can_lead(&body_entry.unit_id))
            })
            .collect()
    }

    /// Enhancements offered by the active detachment.
    pub fn available_enhancements(&self) -> &[Enhancement] {
        self.active_detachment()
            .map(|d| d.enhancements.as_slice())
            .unwrap_or(&[])
    }

    pub fn enhancement_holder(&self, enhancement_id: &str) -> Option<&RosterEntry> {
        self.roster
            .iter()
            .find(|e| e.enhancement_id.as_deref() == Some(enhancement_id))
    }

    /// Entries that are not attached to a body as its leader.
    pub fn top_level_entries(&self) -> Vec<&RosterEntry> {
        self.roster
            .iter()
            .filter(|candidate| {
                !self
                    .roster
                    .iter()
                    .any(|e| e.attached_leader_id == Some(candidate.instance_id))
            })
            .collect()
    }

    fn active_profiles(&self) -> ActiveProfiles<'_> {
        ActiveProfiles {
            forge_world: self.active_forge_world(),
            doctrine: self.active_doctrine(),
        }
    }

    /// Unit stats under the active forge world and doctrine.
    pub fn effective_stats(&self, instance_id: InstanceId) -> Option<StatBlock> {
        let unit = self.unit_of(instance_id)?;
        Some(compute_final_stats(unit, self.stat_mode, self.active_profiles()))
    }

    pub fn effective_weapon(&self, instance_id: InstanceId, weapon_id: &str) -> Option<WeaponProfile> {
        let weapon = self.unit_of(instance_id)?.weapon(weapon_id)?;
        Some(compute_weapon_stats(
            weapon,
            self.stat_mode,
            self.active_doctrine(),
        ))
    }
}
