//! Core types: entity ids, errors, configuration.
//!
//! These are the building blocks every other module shares. Worlds are
//! described with `Scenario`/`ShipSpec` rather than by editing the engine.

pub mod config;
pub mod entity;
pub mod error;

pub use config::{IslandSpec, RoleSpec, Scenario, ShipKind, ShipPlacement, ShipSpec};
pub use entity::{EntityId, EntityKind};
pub use error::{SimError, SimResult};
