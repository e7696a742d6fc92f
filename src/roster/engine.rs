//! Roster state engine: the only writer of army state.
//!
//! Every command resolves its references against the current state, turns
//! into a [`RosterIntent`], runs through [`RosterReducer`] and emits one
//! event carrying a fresh [`Snapshot`]. Commands that reference something
//! missing change nothing and emit nothing; the [`ReferencePolicy`] decides
//! whether that is reported as `Ignored` or as an error.

use std::sync::Arc;

use crate::calculator::StatMode;
use crate::catalog::{Catalog, UnitDefinition, WeaponSlot};
use crate::config::EngineSettings;
use crate::mvi::Reducer;

use super::entry::{InstanceId, RosterEntry};
use super::error::{CommandOutcome, IgnoreReason, ReferencePolicy, RosterError};
use super::events::{EventBus, EventFilter, EventKind, RosterEvent, SubscriptionId};
use super::intent::RosterIntent;
use super::reducer::RosterReducer;
use super::snapshot::Snapshot;
use super::state::ArmyState;

/// Dispatch an intent to a reducer, replacing the state field in place.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub type CommandResult = Result<CommandOutcome, RosterError>;

pub struct RosterEngine {
    state: ArmyState,
    bus: EventBus,
    policy: ReferencePolicy,
    stat_mode: StatMode,
    /// Overrides the catalog's default limit on `initialize`.
    points_limit_override: Option<u32>,
}

impl std::fmt::Debug for RosterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterEngine")
            .field("roster", &self.state.roster.len())
            .field("bus", &self.bus)
            .field("policy", &self.policy)
            .field("stat_mode", &self.stat_mode)
            .finish()
    }
}

impl RosterEngine {
    pub fn new(catalog: Arc<Catalog>, settings: &EngineSettings) -> Self {
        let points_limit = settings
            .points_limit
            .unwrap_or(catalog.config().default_limit);
        Self {
            state: ArmyState::new(catalog, points_limit),
            bus: EventBus::new(),
            policy: settings.reference_policy,
            stat_mode: settings.stat_mode,
            points_limit_override: settings.points_limit,
        }
    }

    /// Engine with default settings: permissive, points-only.
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, &EngineSettings::default())
    }

    /// Apply the starting points limit and announce the initial state.
    ///
    /// Subscribe before calling this to receive `StateInit`.
    pub fn initialize(&mut self) -> Snapshot {
        let limit = self
            .points_limit_override
            .unwrap_or(self.state.catalog.config().default_limit);
        dispatch_mvi!(self, state, RosterReducer, RosterIntent::SetPointsLimit(limit));

        tracing::info!(
            points_limit = limit,
            units = self.state.catalog.units().len(),
            policy = ?self.policy,
            stat_mode = ?self.stat_mode,
            "Roster engine initialized"
        );
        self.emit(EventKind::StateInit)
    }

    pub fn policy(&self) -> ReferencePolicy {
        self.policy
    }

    pub fn stat_mode(&self) -> StatMode {
        self.stat_mode
    }

    // ========================================================================
    // Roster commands
    // ========================================================================

    /// Add one instance of a catalog unit at minimum size with its default
    /// weapons.
    ///
    /// # Errors
    /// `RosterError::UnitNotFound` if the catalog has no such unit, in every
    /// reference policy. `RosterError::InstanceIdsExhausted` once the last
    /// `u32` id has been handed out, since ids are never reused.
    pub fn add_unit(&mut self, unit_id: &str) -> Result<RosterEntry, RosterError> {
        if self.state.catalog.unit(unit_id).is_none() {
            tracing::warn!(unit_id, "Unit not found in catalog");
            return Err(RosterError::UnitNotFound {
                unit_id: unit_id.to_string(),
            });
        }
        if self.state.next_instance_id == u32::MAX {
            tracing::error!(unit_id, "No instance ids left");
            return Err(RosterError::InstanceIdsExhausted);
        }

        let instance_id = InstanceId(self.state.next_instance_id);
        self.commit(
            RosterIntent::AddUnit {
                unit_id: unit_id.to_string(),
            },
            EventKind::RosterChanged,
        );
        tracing::debug!(%instance_id, unit_id, "Unit added");

        self.state
            .entry(instance_id)
            .cloned()
            .ok_or_else(|| RosterError::UnitNotFound {
                unit_id: unit_id.to_string(),
            })
    }

    /// Remove an entry, detaching it first from any body it leads.
    pub fn remove_unit(&mut self, instance_id: InstanceId) -> CommandResult {
        if let Err(reason) = self.check_entry(instance_id) {
            return self.ignore(reason);
        }
        tracing::debug!(%instance_id, "Unit removed");
        Ok(self.commit(
            RosterIntent::RemoveUnit { instance_id },
            EventKind::RosterChanged,
        ))
    }

    /// Set the model count, clamped into the unit's bounds.
    pub fn update_model_count(&mut self, instance_id: InstanceId, requested: u32) -> CommandResult {
        if let Err(reason) = self.check_entry(instance_id) {
            return self.ignore(reason);
        }
        tracing::debug!(%instance_id, requested, "Model count updated");
        Ok(self.commit(
            RosterIntent::UpdateModelCount {
                instance_id,
                requested,
            },
            EventKind::RosterChanged,
        ))
    }

    /// Attach `leader` to `body`, or detach with `None`.
    ///
    /// A leader leads one body at a time; attaching it elsewhere silently
    /// detaches it from its previous body. The leader's unit must list the
    /// body's unit in `attachable_to`.
    pub fn attach_leader(&mut self, body: InstanceId, leader: Option<InstanceId>) -> CommandResult {
        if let Err(reason) = self.check_leader(body, leader) {
            return self.ignore(reason);
        }
        match leader {
            Some(leader) => tracing::debug!(%body, %leader, "Leader attached"),
            None => tracing::debug!(%body, "Leader detached"),
        }
        Ok(self.commit(
            RosterIntent::AttachLeader { body, leader },
            EventKind::RosterChanged,
        ))
    }

    // ========================================================================
    // Weapon and wargear commands
    // ========================================================================

    /// Flip a weapon's membership in one slot's selection.
    pub fn toggle_weapon(
        &mut self,
        instance_id: InstanceId,
        weapon_id: &str,
        slot: WeaponSlot,
    ) -> CommandResult {
        if let Err(reason) = self.check_weapons(instance_id, slot, &[weapon_id], &[]) {
            return self.ignore(reason);
        }
        tracing::debug!(%instance_id, weapon_id, %slot, "Weapon toggled");
        Ok(self.commit(
            RosterIntent::ToggleWeapon {
                instance_id,
                weapon_id: weapon_id.to_string(),
                slot,
            },
            EventKind::RosterChanged,
        ))
    }

    /// Replace `remove_id` with `add_id` in one slot.
    pub fn swap_weapon(
        &mut self,
        instance_id: InstanceId,
        remove_id: &str,
        add_id: &str,
        slot: WeaponSlot,
    ) -> CommandResult {
        if let Err(reason) = self.check_weapons(instance_id, slot, &[add_id], &[remove_id]) {
            return self.ignore(reason);
        }
        tracing::debug!(%instance_id, remove_id, add_id, %slot, "Weapon swapped");
        Ok(self.commit(
            RosterIntent::SwapWeapon {
                instance_id,
                remove_id: remove_id.to_string(),
                add_id: add_id.to_string(),
                slot,
            },
            EventKind::RosterChanged,
        ))
    }

    /// Undo a swap: drop `remove_id` and make sure `restore_id` is selected.
    pub fn restore_weapon(
        &mut self,
        instance_id: InstanceId,
        restore_id: &str,
        remove_id: &str,
        slot: WeaponSlot,
    ) -> CommandResult {
        self.revert_swap(instance_id, restore_id, &[remove_id], slot)
    }

    /// Restore the default of a multi-alternative swap in one transition,
    /// dropping every alternative in `remove_ids`.
    pub fn revert_swap(
        &mut self,
        instance_id: InstanceId,
        restore_id: &str,
        remove_ids: &[&str],
        slot: WeaponSlot,
    ) -> CommandResult {
        if let Err(reason) = self.check_weapons(instance_id, slot, &[restore_id], remove_ids) {
            return self.ignore(reason);
        }
        tracing::debug!(%instance_id, restore_id, removed = remove_ids.len(), %slot, "Weapon restored");
        Ok(self.commit(
            RosterIntent::RestoreWeapon {
                instance_id,
                restore_id: restore_id.to_string(),
                remove_ids: remove_ids.iter().map(|id| id.to_string()).collect(),
                slot,
            },
            EventKind::RosterChanged,
        ))
    }

    /// Select at most one weapon out of `options`; `None` clears the choice.
    ///
    /// Only the chosen id is stored. Alternate-fire profiles linked through
    /// `WeaponProfile::paired_with` are left to the presentation layer.
    pub fn set_special_weapon(
        &mut self,
        instance_id: InstanceId,
        chosen: Option<&str>,
        options: &[&str],
    ) -> CommandResult {
        let anywhere: &[&str] = match &chosen {
            Some(chosen) => std::slice::from_ref(chosen),
            None => &[],
        };
        if let Err(reason) = self.check_weapons(instance_id, WeaponSlot::Ranged, &[], anywhere) {
            return self.ignore(reason);
        }
        if let Some(chosen) = chosen.filter(|c| !options.contains(c)) {
            return self.ignore(IgnoreReason::ChoiceOutsideGroup {
                instance_id,
                weapon_id: chosen.to_string(),
            });
        }
        tracing::debug!(%instance_id, chosen = chosen.unwrap_or("none"), "Special weapon set");
        Ok(self.commit(
            RosterIntent::SetSpecialWeapon {
                instance_id,
                chosen: chosen.map(str::to_string),
                options: options.iter().map(|id| id.to_string()).collect(),
            },
            EventKind::RosterChanged,
        ))
    }

    /// Flip one wargear item without touching its siblings.
    pub fn toggle_wargear_item(&mut self, instance_id: InstanceId, item_id: &str) -> CommandResult {
        if let Err(reason) = self.check_wargear(instance_id, item_id) {
            return self.ignore(reason);
        }
        tracing::debug!(%instance_id, item_id, "Wargear toggled");
        Ok(self.commit(
            RosterIntent::ToggleWargearItem {
                instance_id,
                item_id: item_id.to_string(),
            },
            EventKind::RosterChanged,
        ))
    }

    /// Select an item and clear the rest of its one-of group in one
    /// transition. Selecting the current item deselects it.
    pub fn select_exclusive_wargear_item(
        &mut self,
        instance_id: InstanceId,
        item_id: &str,
    ) -> CommandResult {
        if let Err(reason) = self.check_wargear(instance_id, item_id) {
            return self.ignore(reason);
        }
        tracing::debug!(%instance_id, item_id, "Exclusive wargear selected");
        Ok(self.commit(
            RosterIntent::SelectExclusiveWargearItem {
                instance_id,
                item_id: item_id.to_string(),
            },
            EventKind::RosterChanged,
        ))
    }

    /// Give an enhancement to one entry, taking it from whoever held it.
    /// Assigning it to its current holder clears it.
    pub fn set_unit_enhancement(
        &mut self,
        instance_id: InstanceId,
        enhancement_id: &str,
    ) -> CommandResult {
        if let Err(reason) = self.check_entry(instance_id) {
            return self.ignore(reason);
        }
        tracing::debug!(%instance_id, enhancement_id, "Enhancement set");
        Ok(self.commit(
            RosterIntent::SetUnitEnhancement {
                instance_id,
                enhancement_id: enhancement_id.to_string(),
            },
            EventKind::RosterChanged,
        ))
    }

    // ========================================================================
    // Army-wide selections
    // ========================================================================

    pub fn set_detachment(&mut self, detachment_id: Option<&str>) {
        tracing::info!(detachment = detachment_id.unwrap_or("none"), "Detachment changed");
        self.commit(
            RosterIntent::SetDetachment(detachment_id.map(str::to_string)),
            EventKind::DetachmentChanged,
        );
    }

    pub fn set_doctrine(&mut self, doctrine_id: Option<&str>) {
        tracing::info!(doctrine = doctrine_id.unwrap_or("none"), "Doctrine changed");
        self.commit(
            RosterIntent::SetDoctrine(doctrine_id.map(str::to_string)),
            EventKind::DoctrineChanged,
        );
    }

    pub fn set_forge_world(&mut self, forge_world_id: Option<&str>) {
        tracing::info!(forge_world = forge_world_id.unwrap_or("none"), "Forge world changed");
        self.commit(
            RosterIntent::SetForgeWorld(forge_world_id.map(str::to_string)),
            EventKind::ForgeWorldChanged,
        );
    }

    pub fn set_points_limit(&mut self, limit: u32) {
        tracing::info!(points_limit = limit, "Points limit changed");
        self.commit(RosterIntent::SetPointsLimit(limit), EventKind::PointsChanged);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn total_points(&self) -> u32 {
        self.state.total_points()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.stat_mode)
    }

    pub fn unit_by_id(&self, unit_id: &str) -> Option<&UnitDefinition> {
        self.state.catalog.unit(unit_id)
    }

    pub fn roster_entries(&self) -> &[RosterEntry] {
        self.state.roster()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.state.catalog()
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register a handler. Handlers run synchronously inside the command
    /// that triggered the event; an `Err` is logged and does not affect the
    /// command or the other handlers.
    pub fn on<F>(&mut self, filter: impl Into<EventFilter>, handler: F) -> SubscriptionId
    where
        F: FnMut(&RosterEvent) -> anyhow::Result<()> + Send + 'static,
    {
        self.bus.subscribe(filter.into(), Box::new(handler))
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn commit(&mut self, intent: RosterIntent, kind: EventKind) -> CommandOutcome {
        dispatch_mvi!(self, state, RosterReducer, intent);
        self.emit(kind);
        CommandOutcome::Applied
    }

    fn emit(&mut self, kind: EventKind) -> Snapshot {
        let event = RosterEvent {
            kind,
            snapshot: self.snapshot(),
        };
        let delivered = self.bus.emit(&event);
        tracing::trace!(event = %kind, delivered, "Event emitted");
        event.snapshot
    }

    fn ignore(&self, reason: IgnoreReason) -> CommandResult {
        match self.policy {
            ReferencePolicy::Permissive => {
                tracing::warn!(?reason, "Command ignored");
                Ok(CommandOutcome::Ignored(reason))
            }
            ReferencePolicy::Strict => Err(reason.into()),
        }
    }

    fn unit_for(&self, instance_id: InstanceId) -> Result<&UnitDefinition, IgnoreReason> {
        self.state
            .unit_of(instance_id)
            .ok_or(IgnoreReason::EntryNotFound(instance_id))
    }

    fn check_entry(&self, instance_id: InstanceId) -> Result<(), IgnoreReason> {
        self.unit_for(instance_id).map(|_| ())
    }

    fn check_leader(&self, body: InstanceId, leader: Option<InstanceId>) -> Result<(), IgnoreReason> {
        let body_unit = self.unit_for(body)?;
        let Some(leader) = leader else {
            return Ok(());
        };
        let leader_unit = self
            .state
            .unit_of(leader)
            .ok_or(IgnoreReason::LeaderNotFound(leader))?;
        if leader == body || !leader_unit.can_lead(&body_unit.id) {
            return Err(IgnoreReason::IncompatibleLeader { leader, body });
        }
        Ok(())
    }

    /// `in_slot` ids must be profiles of `slot`; `anywhere` ids may be in
    /// either slot.
    fn check_weapons(
        &self,
        instance_id: InstanceId,
        slot: WeaponSlot,
        in_slot: &[&str],
        anywhere: &[&str],
    ) -> Result<(), IgnoreReason> {
        let unit = self.unit_for(instance_id)?;
        let unknown = in_slot
            .iter()
            .find(|id| unit.weapon_slot(id) != Some(slot))
            .or_else(|| anywhere.iter().find(|id| unit.weapon_slot(id).is_none()));
        match unknown {
            Some(weapon_id) => Err(IgnoreReason::UnknownWeapon {
                unit_id: unit.id.clone(),
                weapon_id: weapon_id.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn check_wargear(&self, instance_id: InstanceId, item_id: &str) -> Result<(), IgnoreReason> {
        let unit = self.unit_for(instance_id)?;
        if unit.wargear_item(item_id).is_none() {
            return Err(IgnoreReason::UnknownWargearItem {
                unit_id: unit.id.clone(),
                item_id: item_id.to_string(),
            });
        }
        Ok(())
    }
}
