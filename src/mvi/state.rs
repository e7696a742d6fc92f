//! Base trait for model state.

/// Marker trait for state objects driven by a reducer.
///
/// States should be:
/// - Cloneable (snapshots are taken by cloning)
/// - Comparable (PartialEq for detecting changes)
/// - Defaultable (so the owner can `mem::take` during a transition)
pub trait ModelState: Clone + PartialEq + Default + Send + 'static {}
