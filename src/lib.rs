//! # fleet-sim
//!
//! A tick-based simulation of ships moving between fuel-producing islands.
//!
//! ## Design Principles
//!
//! 1. **No Globals**: The world is an explicitly constructed [`Model`].
//!    Ships reach islands and the notification queue through a
//!    [`SimContext`] passed into every command and tick.
//!
//! 2. **Handles, Not Pointers**: Ships refer to islands and to each other by
//!    [`EntityId`]. Ids are never reused, and every handle is re-checked
//!    against the registry when used.
//!
//! 3. **Configuration Over Convention**: Ship performance and the starting
//!    world come from [`ShipSpec`] and [`Scenario`], with the standard
//!    values available as defaults.
//!
//! ## Architecture
//!
//! - **Ships as Hull + Role**: [`Ship`] pairs the shared movement/fuel
//!   machine ([`Hull`]) with a [`Role`]: warship, tanker, or cruise ship.
//!
//! - **Deterministic Ticks**: Entities update once per tick in name order.
//!   Ships sunk during a tick are removed after it.
//!
//! - **Deferred Notifications**: State changes are queued and delivered to
//!   [`Observer`]s when a command or tick completes.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, errors, configuration
//! - `geometry`: Points, compass math, dead reckoning
//! - `entities`: Islands, hulls, ship roles
//! - `events`: Notifications and observers
//! - `model`: The registry and tick driver

pub mod core;
pub mod entities;
pub mod events;
pub mod geometry;
pub mod model;

// Re-export commonly used types
pub use crate::core::{
    EntityId, EntityKind,
    SimError, SimResult,
    IslandSpec, RoleSpec, Scenario, ShipKind, ShipPlacement, ShipSpec,
};

pub use crate::geometry::{
    cartesian_distance, CartesianVector, CompassPosition, CompassVector, CourseSpeed, Point, Track,
};

pub use crate::entities::{
    AttackState, CruiseShip, CruiseState, Directory, Fleet, Hull, Island, Islands, Role, Ship,
    ShipState, SimContext, SimObject, Tanker, TankerState, Warship, DOCKING_DISTANCE,
};

pub use crate::events::{Notification, NotificationKind, ObjectStatus, Observer, ObserverId, StatusTable};

pub use crate::model::{Model, SharedObserver};
