use crate::catalog::WeaponSlot;
use crate::mvi::Intent;

use super::entry::InstanceId;

/// Army state transitions.
///
/// References carried by an intent have already been resolved by the
/// engine; the reducer treats a dangling reference as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterIntent {
    AddUnit {
        unit_id: String,
    },
    RemoveUnit {
        instance_id: InstanceId,
    },
    UpdateModelCount {
        instance_id: InstanceId,
        requested: u32,
    },
    /// `leader: None` detaches.
    AttachLeader {
        body: InstanceId,
        leader: Option<InstanceId>,
    },
    ToggleWeapon {
        instance_id: InstanceId,
        weapon_id: String,
        slot: WeaponSlot,
    },
    SwapWeapon {
        instance_id: InstanceId,
        remove_id: String,
        add_id: String,
        slot: WeaponSlot,
    },
    /// Remove every id in `remove_ids`, then ensure `restore_id` is present.
    RestoreWeapon {
        instance_id: InstanceId,
        restore_id: String,
        remove_ids: Vec<String>,
        slot: WeaponSlot,
    },
    SetSpecialWeapon {
        instance_id: InstanceId,
        chosen: Option<String>,
        options: Vec<String>,
    },
    ToggleWargearItem {
        instance_id: InstanceId,
        item_id: String,
    },
    SelectExclusiveWargearItem {
        instance_id: InstanceId,
        item_id: String,
    },
    SetUnitEnhancement {
        instance_id: InstanceId,
        enhancement_id: String,
    },
    SetDetachment(Option<String>),
    SetDoctrine(Option<String>),
    SetForgeWorld(Option<String>),
    SetPointsLimit(u32),
}

impl Intent for RosterIntent {}
