//! Derived-stat calculator.
//!
//! Pure functions only: identical inputs always give identical outputs and
//! nothing here touches roster state.

mod points;
mod stats;

pub use points::calculate_points;
pub use stats::{
    apply_doctrine, apply_forge_world, apply_modifiers, compute_final_stats,
    compute_weapon_stats, ActiveProfiles, StatMode, MIN_SKILL_THRESHOLD,
};
