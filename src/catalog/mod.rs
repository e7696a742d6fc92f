//! Catalog data source: immutable reference data for one session.
//!
//! Units, weapon profiles, wargear rules, detachments, forge worlds,
//! doctrines, stratagems, enhancements and points configuration. Loaded
//! once before the roster engine starts.

mod loader;
mod profiles;
mod registry;
mod types;

pub use loader::{CatalogError, CatalogLoader};
pub use profiles::{
    Detachment, Doctrine, Enhancement, ForgeWorld, GameConfig, ProfileCatalog, RuleText,
    StatModifiers, Stratagem, UnitCatalog,
};
pub use registry::Catalog;
pub use types::{
    Ability, OneOrMany, StatBlock, StatValue, UnitDefinition, WargearItem, WargearOption,
    WeaponProfile, WeaponSlot,
};
