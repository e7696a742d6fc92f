//! Shared test fixtures.

#![allow(dead_code, unused_imports)]

use rosterforge::catalog::Catalog;
use rosterforge::config::EngineSettings;
use rosterforge::roster::{EventFilter, EventKind, ReferencePolicy, RosterEngine, RosterEvent};
use std::path::Path;
use parking_lot::Mutex;
use std::sync::Arc;

pub const UNITS_JSON: &str = r#"{"units": [
    {
        "id": "ranger_squad", "name": "Skitarii Ranger Squad", "role": "Battleline",
        "stats": {"M": "6\"", "T": 3, "Sv": "4+", "W": 1, "Ld": "7+", "OC": 2},
        "keywords": ["INFANTRY", "BATTLELINE"],
        "min_models": 5, "max_models": 10, "points_base": 90, "points_per_model": 18,
        "ranged_weapons": [
            {"id": "galvanic_rifle", "name": "Galvanic rifle", "range": "30\"", "A": 1, "BS": "4+", "S": 4, "AP": 0, "D": 1,
             "abilities": ["HEAVY"], "default": true},
            {"id": "radium_carbine", "name": "Radium carbine", "range": "18\"", "A": 3, "BS": "4+", "S": 3, "AP": 0, "D": 1},
            {"id": "arc_rifle", "name": "Arc rifle", "range": "24\"", "A": 1, "BS": "4+", "S": 6, "AP": -1, "D": 1},
            {"id": "plasma_caliver_standard", "name": "Plasma caliver - standard", "range": "18\"", "A": 2, "BS": "4+", "S": 7, "AP": -2, "D": 1},
            {"id": "plasma_caliver_supercharge", "name": "Plasma caliver - supercharge", "range": "18\"", "A": 2, "BS": "4+", "S": 8, "AP": -3, "D": 2,
             "abilities": ["HAZARDOUS"], "paired_with": "plasma_caliver_standard"},
            {"id": "transuranic_arquebus", "name": "Transuranic arquebus", "range": "60\"", "A": 1, "BS": "4+", "S": 7, "AP": -2, "D": 3}
        ],
        "melee_weapons": [
            {"id": "close_combat_weapon", "name": "Close combat weapon", "range": "Melee", "A": 1, "WS": "4+", "S": 3, "AP": 0, "D": 1, "default": true}
        ],
        "wargear_options": [
            {"type": "any_swap", "description": "Any model can replace its galvanic rifle with a radium carbine.",
             "replace": "galvanic_rifle", "with": "radium_carbine"},
            {"type": "special_weapon_choice", "description": "One model can take a special weapon.",
             "replace": "galvanic_rifle",
             "options": ["arc_rifle", "plasma_caliver_standard", "plasma_caliver_supercharge", "transuranic_arquebus"]},
            {"type": "wargear_add_one_of", "description": "One model can take one of the following.",
             "items": ["enhanced_data_tether", "omnispex"]}
        ],
        "wargear_items": [
            {"id": "enhanced_data_tether", "name": "Enhanced data-tether"},
            {"id": "omnispex", "name": "Omnispex"},
            {"id": "mace_of_rust", "name": "Mace of rust"}
        ]
    },
    {
        "id": "U1", "name": "Body Unit", "role": "Elites",
        "min_models": 3, "max_models": 6, "points_base": 100, "points_per_model": 30
    },
    {
        "id": "L1", "name": "Leader Unit", "role": "Character", "is_leader": true,
        "keywords": ["CHARACTER"], "attachable_to": ["U1", "ranger_squad"],
        "min_models": 1, "max_models": 1, "points_base": 65
    },
    {
        "id": "L2", "name": "Second Leader", "role": "Character", "is_leader": true,
        "keywords": ["CHARACTER"], "attachable_to": ["U1"],
        "min_models": 1, "max_models": 1, "points_base": 50
    },
    {
        "id": "onager", "name": "Onager Dunecrawler", "role": "Vehicle",
        "detachments": ["rad_zone_corps"],
        "min_models": 1, "max_models": 1, "points_base": 155,
        "ranged_weapons": [
            {"id": "eradication_beamer", "name": "Eradication beamer", "A": "D6+1", "BS": "4+", "S": 10, "AP": -2, "D": 3, "default": true}
        ]
    }
]}"#;

pub const PROFILES_JSON: &str = r#"{
    "detachments": [
        {"id": "rad_zone_corps", "name": "Rad-Zone Corps",
         "rule": {"name": "Rad-bombardment", "description": "Enemy units start the battle irradiated."},
         "stratagems": [{"name": "Vigilant Fusillade", "cost": 1, "phase": "Shooting"}],
         "enhancements": [
            {"id": "omni_scrambler", "name": "Omni-scrambler", "cost": 10},
            {"id": "cognitive_reinforcement", "name": "Cognitive Reinforcement", "cost": 20}
         ]},
        {"id": "skitarii_hunter_cohort", "name": "Skitarii Hunter Cohort",
         "enhancements": [{"id": "battle_sphere_uplink", "name": "Battle-sphere Uplink", "cost": 30}]}
    ],
    "forge_worlds": [
        {"id": "mars", "name": "Mars", "stat_modifiers": {"T": 1}},
        {"id": "lucius", "name": "Lucius", "stat_modifiers": {"Sv": -1}}
    ],
    "doctrines": [
        {"id": "protector", "name": "Protector Doctrina", "stat_modifiers": {"weapon_keyword_add": ["HEAVY", "IGNORES COVER"]}},
        {"id": "conqueror", "name": "Conqueror Doctrina", "stat_modifiers": {"T": -1, "Sv": 1}}
    ],
    "core_stratagems": [{"name": "Command Re-roll", "cost": 1, "phase": "Any"}]
}"#;

pub const CONFIG_JSON: &str =
    r#"{"default_limit": 2000, "points_limits": {"incursion": 1000, "strike_force": 2000, "onslaught": 3000}}"#;

pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_json(UNITS_JSON, PROFILES_JSON, CONFIG_JSON).expect("fixture catalog is valid"))
}

pub fn engine_with(settings: EngineSettings) -> RosterEngine {
    let mut engine = RosterEngine::new(catalog(), &settings);
    engine.initialize();
    engine
}

/// Initialized, permissive engine over the fixture catalog.
pub fn engine() -> RosterEngine {
    engine_with(EngineSettings::default())
}

pub fn strict_engine() -> RosterEngine {
    engine_with(EngineSettings {
        reference_policy: ReferencePolicy::Strict,
        ..EngineSettings::default()
    })
}

/// Write the fixture documents into `dir` under their default names.
pub fn write_catalog(dir: &Path) {
    std::fs::write(dir.join("units.json"), UNITS_JSON).unwrap();
    std::fs::write(dir.join("profiles.json"), PROFILES_JSON).unwrap();
    std::fs::write(dir.join("config.json"), CONFIG_JSON).unwrap();
}

/// Every event delivered to a wildcard subscriber, in order.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<RosterEvent>>>);

impl EventLog {
    pub fn attach(engine: &mut RosterEngine, filter: EventFilter) -> Self {
        let log = Self::default();
        let sink = Arc::clone(&log.0);
        engine.on(filter, move |event: &RosterEvent| {
            sink.lock().push(event.clone());
            Ok(())
        });
        log
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.0.lock().iter().map(|e| e.kind).collect()
    }

    pub fn last(&self) -> Option<RosterEvent> {
        self.0.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }
}
