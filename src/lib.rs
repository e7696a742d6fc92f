//! Army list builder core.
//!
//! Load a [`catalog::Catalog`] once, build a [`roster::RosterEngine`] on top
//! of it and drive the engine with commands. Observers subscribe to the
//! engine and re-render from the [`roster::Snapshot`] each event carries.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod roster;
