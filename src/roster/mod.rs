//! Roster state engine.
//!
//! Owns the army being built, enforces the cross-entry invariants (leader
//! exclusivity, enhancement uniqueness, one-of wargear, special weapon
//! choice, model bounds) and notifies subscribers with immutable snapshots.

mod engine;
mod entry;
mod error;
mod events;
mod intent;
mod reducer;
mod snapshot;
mod state;

pub use engine::{CommandResult, RosterEngine};
pub use entry::{InstanceId, RosterEntry};
pub use error::{CommandOutcome, IgnoreReason, ReferencePolicy, RosterError};
pub use events::{EventBus, EventFilter, EventHandler, EventKind, RosterEvent, SubscriptionId};
pub use intent::RosterIntent;
pub use reducer::RosterReducer;
pub use snapshot::Snapshot;
pub use state::ArmyState;
