//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents describe a single state transition: add a unit, toggle a
/// weapon, change the points limit. They carry everything the reducer needs
/// and are consumed by it.
pub trait Intent: Send + 'static {}
