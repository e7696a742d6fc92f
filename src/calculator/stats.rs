//! Effective stats under active forge world and doctrine profiles.

use serde::{Deserialize, Serialize};

use crate::catalog::{Doctrine, ForgeWorld, StatBlock, StatModifiers, UnitDefinition, WeaponProfile};

/// Skill thresholds never improve past this value.
pub const MIN_SKILL_THRESHOLD: i64 = 2;

const SKILL_THRESHOLD_KEYS: [&str; 2] = ["BS", "WS"];

/// How profiles affect unit and weapon stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatMode {
    /// Profiles are informational; stats are printed as defined.
    #[default]
    PointsOnly,
    /// Profile modifiers are added onto the base stats.
    Additive,
}

/// Profiles currently selected for the army.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveProfiles<'a> {
    pub forge_world: Option<&'a ForgeWorld>,
    pub doctrine: Option<&'a Doctrine>,
}

/// Add every delta in `mods` onto the matching stat of `stats`.
///
/// Stats missing from the block are not created. Values without a leading
/// integer (e.g. `"D6"`) are left alone. Skill thresholds are floored at
/// [`MIN_SKILL_THRESHOLD`].
pub fn apply_modifiers(stats: &StatBlock, mods: &StatModifiers) -> StatBlock {
    let mut result = stats.clone();
    for (key, delta) in &mods.deltas {
        let Some(current) = stats.get(key) else {
            continue;
        };
        let Some(base) = current.leading_number() else {
            continue;
        };
        let mut value = base.saturating_add(*delta);
        if SKILL_THRESHOLD_KEYS.contains(&key.as_str()) {
            value = value.max(MIN_SKILL_THRESHOLD);
        }
        result.set(key.clone(), current.with_number(value));
    }
    result
}

pub fn apply_forge_world(stats: &StatBlock, forge_world: Option<&ForgeWorld>) -> StatBlock {
    match forge_world {
        Some(fw) => apply_modifiers(stats, &fw.stat_modifiers),
        None => stats.clone(),
    }
}

pub fn apply_doctrine(stats: &StatBlock, doctrine: Option<&Doctrine>) -> StatBlock {
    match doctrine {
        Some(d) => apply_modifiers(stats, &d.stat_modifiers),
        None => stats.clone(),
    }
}

/// Final stat line of `unit`: base, then forge world, then doctrine.
pub fn compute_final_stats(
    unit: &UnitDefinition,
    mode: StatMode,
    profiles: ActiveProfiles<'_>,
) -> StatBlock {
    match mode {
        StatMode::PointsOnly => unit.stats.clone(),
        StatMode::Additive => {
            let stats = apply_forge_world(&unit.stats, profiles.forge_world);
            apply_doctrine(&stats, profiles.doctrine)
        }
    }
}

/// Weapon profile with the active doctrine's bonus keywords appended.
pub fn compute_weapon_stats(
    weapon: &WeaponProfile,
    mode: StatMode,
    doctrine: Option<&Doctrine>,
) -> WeaponProfile {
    let mut result = weapon.clone();
    if mode == StatMode::PointsOnly {
        return result;
    }
    if let Some(doctrine) = doctrine {
        for keyword in &doctrine.stat_modifiers.weapon_keyword_add {
            if !result.abilities.contains(keyword) {
                result.abilities.push(keyword.clone());
            }
        }
    }
    result
}
