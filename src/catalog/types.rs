//! Unit, weapon and wargear definitions as they appear in the unit catalog.
//!
//! Field names follow the JSON documents the catalog is loaded from, so
//! serde renames are used where the document uses stat shorthand
//! (`M`, `BS`, `AP`, ...).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A display-ready stat value.
///
/// Catalog stats are stored the way they are printed: sometimes a plain
/// number (`3`), sometimes a decorated string (`"4+"`, `"6\""`, `"D6"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(i64),
    Text(String),
}

impl StatValue {
    /// Leading integer of the value, if it has one.
    ///
    /// `Number(3)` -> 3, `"4+"` -> 4, `"12\""` -> 12, `"D6"` -> `None`.
    pub fn leading_number(&self) -> Option<i64> {
        match self {
            StatValue::Number(n) => Some(*n),
            StatValue::Text(text) => {
                let (sign, rest) = match text.strip_prefix('-') {
                    Some(rest) => (-1, rest),
                    None => (1, text.as_str()),
                };
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<i64>().ok().map(|n| n * sign)
            }
        }
    }

    /// Replace the leading integer, keeping any suffix (`"4+"` -> `"3+"`).
    ///
    /// Values without a leading integer are returned unchanged.
    pub fn with_number(&self, value: i64) -> StatValue {
        match self {
            StatValue::Number(_) => StatValue::Number(value),
            StatValue::Text(text) => {
                let rest = text.strip_prefix('-').unwrap_or(text);
                let digit_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
                if digit_len == 0 {
                    return self.clone();
                }
                let suffix = &rest[digit_len..];
                StatValue::Text(format!("{}{}", value, suffix))
            }
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(n) => write!(f, "{}", n),
            StatValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        StatValue::Number(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        StatValue::Text(value.to_string())
    }
}

/// A unit's stat line keyed by shorthand (`M`, `T`, `Sv`, `W`, `Ld`, `OC`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatBlock(pub BTreeMap<String, StatValue>);

impl StatBlock {
    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: StatValue) {
        self.0.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StatValue)> {
        self.0.iter()
    }
}

/// Which weapon list a weapon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponSlot {
    Ranged,
    Melee,
}

impl WeaponSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponSlot::Ranged => "ranged",
            WeaponSlot::Melee => "melee",
        }
    }
}

impl fmt::Display for WeaponSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One weapon profile of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub range: Option<StatValue>,
    #[serde(rename = "A")]
    pub attacks: StatValue,
    /// Ballistic skill, ranged profiles only.
    #[serde(rename = "BS", default)]
    pub ballistic_skill: Option<StatValue>,
    /// Weapon skill, melee profiles only.
    #[serde(rename = "WS", default)]
    pub weapon_skill: Option<StatValue>,
    #[serde(rename = "S")]
    pub strength: StatValue,
    #[serde(rename = "AP")]
    pub armour_penetration: StatValue,
    #[serde(rename = "D")]
    pub damage: StatValue,
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Selected when the unit is added to the roster.
    #[serde(default)]
    pub default: bool,
    /// Base weapon this profile is an alternate fire mode of.
    #[serde(default)]
    pub paired_with: Option<String>,
    /// Multiplicity label shown next to the name (e.g. "x2").
    #[serde(default)]
    pub count: Option<StatValue>,
}

impl WeaponProfile {
    /// Hit roll threshold for this profile, whichever skill it uses.
    pub fn skill(&self) -> Option<&StatValue> {
        self.ballistic_skill.as_ref().or(self.weapon_skill.as_ref())
    }
}

/// Accepts both `"with": "x"` and `"with": ["x", "y"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// How a unit's default loadout may be altered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WargearOption {
    /// One default weapon may be replaced by one of several alternatives.
    AnySwap {
        #[serde(default)]
        description: String,
        replace: String,
        with: OneOrMany,
    },
    /// Exactly one (or none) of several optional weapons.
    SpecialWeaponChoice {
        #[serde(default)]
        description: String,
        #[serde(default)]
        replace: Option<String>,
        options: Vec<String>,
    },
    /// The alpha model swaps one weapon for exactly one alternative.
    AlphaSwap {
        #[serde(default)]
        description: String,
        replace: String,
        with: String,
    },
    /// The alpha model gains an extra weapon.
    AlphaAdd {
        #[serde(default)]
        description: String,
        add: String,
    },
    /// At most one of the listed wargear items. An empty list covers every
    /// wargear item of the unit.
    WargearAddOneOf {
        #[serde(default)]
        description: String,
        #[serde(default)]
        items: Vec<String>,
    },
}

impl WargearOption {
    pub fn description(&self) -> &str {
        match self {
            WargearOption::AnySwap { description, .. }
            | WargearOption::SpecialWeaponChoice { description, .. }
            | WargearOption::AlphaSwap { description, .. }
            | WargearOption::AlphaAdd { description, .. }
            | WargearOption::WargearAddOneOf { description, .. } => description,
        }
    }

    /// Weapon ids referenced by this rule.
    pub fn weapon_refs(&self) -> Vec<&str> {
        match self {
            WargearOption::AnySwap { replace, with, .. } => {
                let mut refs = vec![replace.as_str()];
                match with {
                    OneOrMany::One(id) => refs.push(id),
                    OneOrMany::Many(ids) => refs.extend(ids.iter().map(String::as_str)),
                }
                refs
            }
            WargearOption::SpecialWeaponChoice {
                replace, options, ..
            } => replace
                .iter()
                .chain(options.iter())
                .map(String::as_str)
                .collect(),
            WargearOption::AlphaSwap { replace, with, .. } => vec![replace.as_str(), with.as_str()],
            WargearOption::AlphaAdd { add, .. } => vec![add.as_str()],
            WargearOption::WargearAddOneOf { .. } => Vec::new(),
        }
    }
}

/// A non-weapon wargear item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WargearItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A named ability printed on the unit card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A unit as defined by the catalog. Immutable for the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_leader: bool,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default)]
    pub invuln: Option<StatValue>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub lore: String,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    pub min_models: u32,
    pub max_models: u32,
    pub points_base: u32,
    #[serde(default)]
    pub points_per_model: Option<u32>,
    /// Fixed cost of the six-model configuration, display only.
    #[serde(rename = "points_6", default)]
    pub points_at_six: Option<u32>,
    #[serde(default)]
    pub ranged_weapons: Vec<WeaponProfile>,
    #[serde(default)]
    pub melee_weapons: Vec<WeaponProfile>,
    #[serde(default)]
    pub wargear_options: Vec<WargearOption>,
    #[serde(default)]
    pub wargear_items: Vec<WargearItem>,
    /// Unit ids this unit may lead.
    #[serde(default)]
    pub attachable_to: Vec<String>,
    /// Detachment ids this unit may be taken in. Empty means any.
    #[serde(default)]
    pub detachments: Vec<String>,
}

impl UnitDefinition {
    /// Clamp a requested model count into `[min_models, max_models]`.
    pub fn clamp_models(&self, requested: u32) -> u32 {
        requested.clamp(self.min_models, self.max_models.max(self.min_models))
    }

    /// Fixed-size units expose no model count controls.
    pub fn is_fixed_size(&self) -> bool {
        self.min_models == self.max_models
    }

    pub fn can_lead(&self, body_unit_id: &str) -> bool {
        self.is_leader && self.attachable_to.iter().any(|id| id == body_unit_id)
    }

    pub fn is_eligible_for(&self, detachment_id: Option<&str>) -> bool {
        match detachment_id {
            Some(id) if !self.detachments.is_empty() => self.detachments.iter().any(|d| d == id),
            _ => true,
        }
    }

    /// Which list a weapon id lives in, if any.
    pub fn weapon_slot(&self, weapon_id: &str) -> Option<WeaponSlot> {
        if self.ranged_weapons.iter().any(|w| w.id == weapon_id) {
            Some(WeaponSlot::Ranged)
        } else if self.melee_weapons.iter().any(|w| w.id == weapon_id) {
            Some(WeaponSlot::Melee)
        } else {
            None
        }
    }

    pub fn weapon(&self, weapon_id: &str) -> Option<&WeaponProfile> {
        self.weapons().find(|w| w.id == weapon_id)
    }

    /// Ranged profiles followed by melee profiles.
    pub fn weapons(&self) -> impl Iterator<Item = &WeaponProfile> {
        self.ranged_weapons.iter().chain(self.melee_weapons.iter())
    }

    pub fn default_weapons(&self, slot: WeaponSlot) -> impl Iterator<Item = &WeaponProfile> {
        let list = match slot {
            WeaponSlot::Ranged => &self.ranged_weapons,
            WeaponSlot::Melee => &self.melee_weapons,
        };
        list.iter().filter(|w| w.default)
    }

    pub fn wargear_item(&self, item_id: &str) -> Option<&WargearItem> {
        self.wargear_items.iter().find(|i| i.id == item_id)
    }

    /// Item ids sharing a one-of exclusivity group with `item_id`,
    /// including `item_id` itself. `None` when no one-of rule governs it.
    pub fn one_of_group(&self, item_id: &str) -> Option<Vec<String>> {
        self.wargear_options.iter().find_map(|option| match option {
            WargearOption::WargearAddOneOf { items, .. } => {
                let group: Vec<String> = if items.is_empty() {
                    self.wargear_items.iter().map(|i| i.id.clone()).collect()
                } else {
                    items.clone()
                };
                group.iter().any(|id| id == item_id).then_some(group)
            }
            _ => None,
        })
    }
}
