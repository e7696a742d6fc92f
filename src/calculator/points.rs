//! Points cost of a unit at a given model count.

use crate::catalog::UnitDefinition;

/// Cost of `unit` fielded with `model_count` models.
///
/// The count is clamped into the unit's model bounds first, so the result is
/// always the cost of a legal unit size. Fixed-size units have no per-model
/// cost and always cost `points_base`.
pub fn calculate_points(unit: &UnitDefinition, model_count: u32) -> u32 {
    let count = unit.clamp_models(model_count);
    let extra_models = count.saturating_sub(unit.min_models);
    unit.points_base
        .saturating_add(extra_models.saturating_mul(unit.points_per_model.unwrap_or(0)))
}
