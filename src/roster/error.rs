//! Command results and errors of the roster engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entry::InstanceId;

/// How the engine treats commands that reference something that does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Bad references are absorbed as `CommandOutcome::Ignored`.
    #[default]
    Permissive,
    /// Bad references are returned as `RosterError`.
    Strict,
}

/// Errors returned by roster commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Unit not found: {unit_id}")]
    UnitNotFound { unit_id: String },

    #[error("Instance ids exhausted")]
    InstanceIdsExhausted,

    #[error("Roster entry not found: {instance_id}")]
    EntryNotFound { instance_id: InstanceId },

    #[error("Leader entry not found: {instance_id}")]
    LeaderNotFound { instance_id: InstanceId },

    #[error("Entry {leader} cannot lead entry {body}")]
    IncompatibleLeader { leader: InstanceId, body: InstanceId },

    #[error("Unknown weapon '{weapon_id}' for unit '{unit_id}'")]
    UnknownWeapon { unit_id: String, weapon_id: String },

    #[error("Unknown wargear item '{item_id}' for unit '{unit_id}'")]
    UnknownWargearItem { unit_id: String, item_id: String },

    #[error("Weapon '{weapon_id}' is not an option of the group offered to entry {instance_id}")]
    ChoiceOutsideGroup {
        instance_id: InstanceId,
        weapon_id: String,
    },
}

/// Why a command left the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    EntryNotFound(InstanceId),
    LeaderNotFound(InstanceId),
    IncompatibleLeader {
        leader: InstanceId,
        body: InstanceId,
    },
    /// Not in the unit's profiles, or not in the slot the command targets.
    UnknownWeapon {
        unit_id: String,
        weapon_id: String,
    },
    UnknownWargearItem {
        unit_id: String,
        item_id: String,
    },
    /// A special-weapon choice that is not among the offered options.
    ChoiceOutsideGroup {
        instance_id: InstanceId,
        weapon_id: String,
    },
}

impl From<IgnoreReason> for RosterError {
    fn from(reason: IgnoreReason) -> Self {
        match reason {
            IgnoreReason::EntryNotFound(instance_id) => RosterError::EntryNotFound { instance_id },
            IgnoreReason::LeaderNotFound(instance_id) => {
                RosterError::LeaderNotFound { instance_id }
            }
            IgnoreReason::IncompatibleLeader { leader, body } => {
                RosterError::IncompatibleLeader { leader, body }
            }
            IgnoreReason::UnknownWeapon { unit_id, weapon_id } => {
                RosterError::UnknownWeapon { unit_id, weapon_id }
            }
            IgnoreReason::UnknownWargearItem { unit_id, item_id } => {
                RosterError::UnknownWargearItem { unit_id, item_id }
            }
            IgnoreReason::ChoiceOutsideGroup {
                instance_id,
                weapon_id,
            } => RosterError::ChoiceOutsideGroup {
                instance_id,
                weapon_id,
            },
        }
    }
}

/// Result of a command that was accepted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// State transitioned and an event was emitted.
    Applied,
    /// Nothing changed; no event was emitted.
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}
