//! Indexed, validated catalog.
//!
//! A `Catalog` is built once before the roster engine starts and never
//! changes afterwards. Construction validates cross references so the
//! engine can rely on them.

use std::collections::{HashMap, HashSet};

use super::loader::CatalogError;
use super::profiles::{Detachment, Doctrine, Enhancement, ForgeWorld, GameConfig, ProfileCatalog};
use super::types::{UnitDefinition, WargearOption};

/// Immutable reference data for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    units: Vec<UnitDefinition>,
    profiles: ProfileCatalog,
    config: GameConfig,
    /// Unit id -> position in `units`.
    unit_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build and validate a catalog from parsed documents.
    ///
    /// # Errors
    /// Returns `CatalogError::Validation` describing every broken reference.
    pub fn new(
        units: Vec<UnitDefinition>,
        profiles: ProfileCatalog,
        config: GameConfig,
    ) -> Result<Self, CatalogError> {
        let unit_index = units
            .iter()
            .enumerate()
            .map(|(idx, unit)| (unit.id.clone(), idx))
            .collect();

        let catalog = Self {
            units,
            profiles,
            config,
            unit_index,
        };
        catalog.validate()?;

        tracing::info!(
            units = catalog.units.len(),
            detachments = catalog.profiles.detachments.len(),
            forge_worlds = catalog.profiles.forge_worlds.len(),
            doctrines = catalog.profiles.doctrines.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from the three JSON documents.
    ///
    /// # Errors
    /// Parse errors are reported against the document's logical name.
    pub fn from_json(units: &str, profiles: &str, config: &str) -> Result<Self, CatalogError> {
        let units: super::profiles::UnitCatalog =
            serde_json::from_str(units).map_err(|e| CatalogError::parse("units", e))?;
        let profiles: ProfileCatalog =
            serde_json::from_str(profiles).map_err(|e| CatalogError::parse("profiles", e))?;
        let config: GameConfig =
            serde_json::from_str(config).map_err(|e| CatalogError::parse("config", e))?;
        Self::new(units.units, profiles, config)
    }

    /// Checks:
    /// - unit ids are unique
    /// - `1 <= min_models <= max_models`
    /// - weapon ids are unique within a unit
    /// - `paired_with` and wargear rule references resolve within the unit
    /// - leaders only lead known units
    /// - enhancement ids are unique across detachments
    /// - the default points limit is positive
    fn validate(&self) -> Result<(), CatalogError> {
        let mut problems = Vec::new();

        if self.unit_index.len() != self.units.len() {
            let mut seen = HashSet::new();
            for unit in &self.units {
                if !seen.insert(unit.id.as_str()) {
                    problems.push(format!("duplicate unit id '{}'", unit.id));
                }
            }
        }

        for unit in &self.units {
            if unit.min_models == 0 || unit.min_models > unit.max_models {
                problems.push(format!(
                    "unit '{}' has invalid model bounds {}..={}",
                    unit.id, unit.min_models, unit.max_models
                ));
            }

            let mut weapon_ids = HashSet::new();
            for weapon in unit.weapons() {
                if !weapon_ids.insert(weapon.id.as_str()) {
                    problems.push(format!(
                        "unit '{}' has duplicate weapon id '{}'",
                        unit.id, weapon.id
                    ));
                }
            }

            for weapon in unit.weapons() {
                if let Some(base) = &weapon.paired_with {
                    if !weapon_ids.contains(base.as_str()) {
                        problems.push(format!(
                            "weapon '{}' of unit '{}' is paired with unknown weapon '{}'",
                            weapon.id, unit.id, base
                        ));
                    }
                }
            }

            for option in &unit.wargear_options {
                for weapon_id in option.weapon_refs() {
                    if !weapon_ids.contains(weapon_id) {
                        problems.push(format!(
                            "wargear option of unit '{}' references unknown weapon '{}'",
                            unit.id, weapon_id
                        ));
                    }
                }
                if let WargearOption::WargearAddOneOf { items, .. } = option {
                    for item_id in items {
                        if unit.wargear_item(item_id).is_none() {
                            problems.push(format!(
                                "wargear option of unit '{}' references unknown item '{}'",
                                unit.id, item_id
                            ));
                        }
                    }
                }
            }

            if unit.is_leader {
                for body in &unit.attachable_to {
                    if !self.unit_index.contains_key(body) {
                        problems.push(format!(
                            "leader '{}' is attachable to unknown unit '{}'",
                            unit.id, body
                        ));
                    }
                }
            }
        }

        let mut enhancement_ids = HashSet::new();
        for enhancement in self.profiles.detachments.iter().flat_map(|d| &d.enhancements) {
            if !enhancement_ids.insert(enhancement.id.as_str()) {
                problems.push(format!("duplicate enhancement id '{}'", enhancement.id));
            }
        }

        if self.config.default_limit == 0 {
            problems.push("default points limit must be positive".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation {
                message: problems.join("; "),
            })
        }
    }

    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    pub fn unit(&self, unit_id: &str) -> Option<&UnitDefinition> {
        self.unit_index.get(unit_id).and_then(|&idx| self.units.get(idx))
    }

    pub fn profiles(&self) -> &ProfileCatalog {
        &self.profiles
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn detachment(&self, id: &str) -> Option<&Detachment> {
        self.profiles.detachments.iter().find(|d| d.id == id)
    }

    pub fn forge_world(&self, id: &str) -> Option<&ForgeWorld> {
        self.profiles.forge_worlds.iter().find(|f| f.id == id)
    }

    pub fn doctrine(&self, id: &str) -> Option<&Doctrine> {
        self.profiles.doctrines.iter().find(|d| d.id == id)
    }

    /// Look up an enhancement in any detachment.
    pub fn enhancement(&self, id: &str) -> Option<&Enhancement> {
        self.profiles
            .detachments
            .iter()
            .flat_map(|d| &d.enhancements)
            .find(|e| e.id == id)
    }

    /// Units selectable under a detachment: leaders first, then by role.
    pub fn units_for_picker(&self, detachment_id: Option<&str>) -> Vec<&UnitDefinition> {
        let mut units: Vec<&UnitDefinition> = self
            .units
            .iter()
            .filter(|u| u.is_eligible_for(detachment_id))
            .collect();
        units.sort_by(|a, b| b.is_leader.cmp(&a.is_leader).then_with(|| a.role.cmp(&b.role)));
        units
    }
}
