//! Army state: the single owned model the roster reducer transforms.

use std::sync::Arc;

use crate::calculator::calculate_points;
use crate::catalog::{Catalog, GameConfig, UnitDefinition};
use crate::mvi::ModelState;

use super::entry::{InstanceId, RosterEntry};

/// Mutable army composition for one session.
///
/// Owned by the roster engine; observers only ever see snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmyState {
    pub(crate) catalog: Arc<Catalog>,
    /// Insertion order.
    pub(crate) roster: Vec<RosterEntry>,
    pub(crate) detachment_id: Option<String>,
    pub(crate) doctrine_id: Option<String>,
    pub(crate) forge_world_id: Option<String>,
    pub(crate) points_limit: u32,
    pub(crate) next_instance_id: u32,
}

impl Default for ArmyState {
    fn default() -> Self {
        Self::new(Arc::new(Catalog::default()), GameConfig::default().default_limit)
    }
}

impl ModelState for ArmyState {}

impl ArmyState {
    pub fn new(catalog: Arc<Catalog>, points_limit: u32) -> Self {
        Self {
            catalog,
            roster: Vec::new(),
            detachment_id: None,
            doctrine_id: None,
            forge_world_id: None,
            points_limit,
            next_instance_id: 1,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn entry(&self, instance_id: InstanceId) -> Option<&RosterEntry> {
        self.roster.iter().find(|e| e.instance_id == instance_id)
    }

    pub(crate) fn entry_mut(&mut self, instance_id: InstanceId) -> Option<&mut RosterEntry> {
        self.roster.iter_mut().find(|e| e.instance_id == instance_id)
    }

    /// Catalog definition of an entry's unit.
    pub fn unit_of(&self, instance_id: InstanceId) -> Option<&UnitDefinition> {
        self.entry(instance_id)
            .and_then(|entry| self.catalog.unit(&entry.unit_id))
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

    /// Sum of every entry's own cost. Attached leaders are entries too and
    /// are counted once, on their own.
    pub fn total_points(&self) -> u32 {
        self.roster
            .iter()
            .filter_map(|entry| {
                self.catalog
                    .unit(&entry.unit_id)
                    .map(|unit| calculate_points(unit, entry.model_count))
            })
            .fold(0u32, u32::saturating_add)
    }
}
