//! Army-wide profiles (detachments, forge worlds, doctrines, stratagems)
//! and the game configuration document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::UnitDefinition;

/// Top-level shape of the unit catalog document: `{"units": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCatalog {
    pub units: Vec<UnitDefinition>,
}

/// Name and rules text of a detachment or forge world rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleText {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stratagem {
    pub name: String,
    /// Command point cost.
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub description: String,
}

/// An upgrade that at most one roster entry may carry army-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enhancement {
    pub id: String,
    pub name: String,
    /// Points cost, display only.
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detachment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rule: RuleText,
    #[serde(default)]
    pub stratagems: Vec<Stratagem>,
    #[serde(default)]
    pub enhancements: Vec<Enhancement>,
}

/// Additive stat modifiers of a forge world or doctrine.
///
/// Every numeric key is a delta for the stat of the same name; the
/// `weapon_keyword_add` list is appended to weapon abilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifiers {
    #[serde(default)]
    pub weapon_keyword_add: Vec<String>,
    #[serde(flatten)]
    pub deltas: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeWorld {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ability: Option<RuleText>,
    #[serde(default)]
    pub stat_modifiers: StatModifiers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctrine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stat_modifiers: StatModifiers,
}

/// The profile catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCatalog {
    #[serde(default)]
    pub detachments: Vec<Detachment>,
    #[serde(default)]
    pub forge_worlds: Vec<ForgeWorld>,
    #[serde(default)]
    pub doctrines: Vec<Doctrine>,
    #[serde(default)]
    pub core_stratagems: Vec<Stratagem>,
}

/// The game configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Named presets, e.g. `"strike_force" -> 2000`.
    #[serde(default)]
    pub points_limits: BTreeMap<String, u32>,
}

fn default_limit() -> u32 {
    2000
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            points_limits: BTreeMap::new(),
        }
    }
}

impl GameConfig {
    /// Presets ordered by points, labelled for display
    /// (`"strike_force"` -> `"Strike Force"`).
    pub fn presets(&self) -> Vec<(String, u32)> {
        let mut presets: Vec<(String, u32)> = self
            .points_limits
            .iter()
            .map(|(label, points)| (display_label(label), *points))
            .collect();
        presets.sort_by_key(|(_, points)| *points);
        presets
    }
}

fn display_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
