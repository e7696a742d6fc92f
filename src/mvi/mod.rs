//! Model-Intent-Reducer primitives.
//!
//! Every change to army state is expressed as an intent and applied by a
//! reducer, so state transitions live in exactly one place.
//!
//! # Architecture
//!
//! ```text
//! Command ──→ Intent ──→ Reducer ──→ State ──→ Snapshot ──→ Subscribers
//!    ↑                                                          │
//!    └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: owned, cloneable representation of the model
//! - **Intent**: a requested change, already validated by the caller
//! - **Reducer**: pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ModelState;
