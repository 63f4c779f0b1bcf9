//! Simulated objects: islands and ships.
//!
//! ## Layout
//!
//! - [`Island`] / [`Islands`]: fuel reservoirs and their spatial queries
//! - [`Hull`]: movement and fuel state machine shared by every ship
//! - [`Ship`]: a `Hull` plus a [`Role`] (warship, tanker, or cruise ship)
//!
//! ## Context passing
//!
//! Ships never reach for a global registry. Anything they need beyond their
//! own state arrives through a [`SimContext`]: the islands (mutable, since
//! refueling and cargo move fuel around) and the notification queue. During
//! a tick the other ships arrive separately as a [`Fleet`].

mod cruise_ship;
mod hull;
mod island;
mod ship;
mod tanker;
mod warship;

use rustc_hash::FxHashMap;

use crate::core::EntityId;
use crate::events::Notification;
use crate::geometry::Point;

pub use cruise_ship::{CruiseShip, CruiseState};
pub use hull::{Hull, ShipState, DOCKING_DISTANCE};
pub use island::{Island, Islands};
pub use ship::{Role, Ship};
pub use tanker::{Tanker, TankerState};
pub use warship::{AttackState, Warship};

/// Ships keyed by id.
pub type Fleet = FxHashMap<EntityId, Ship>;

/// Behavior common to every simulated object.
pub trait SimObject {
    /// Display name, unique within a model.
    fn name(&self) -> &str;

    /// Current position.
    fn location(&self) -> Point;

    /// Human-readable state report.
    fn describe(&self, directory: &dyn Directory) -> String;

    /// Queue notifications carrying the complete current state.
    fn broadcast_current_state(&self, events: &mut Vec<Notification>);
}

/// Resolves entity ids for descriptions.
pub trait Directory {
    fn name_of(&self, id: EntityId) -> Option<&str>;

    fn location_of(&self, id: EntityId) -> Option<Point>;
}

impl Directory for Islands {
    fn name_of(&self, id: EntityId) -> Option<&str> {
        self.get(id).map(SimObject::name)
    }

    fn location_of(&self, id: EntityId) -> Option<Point> {
        self.get(id).map(SimObject::location)
    }
}

/// Everything a ship may touch outside itself while running a command.
pub struct SimContext<'a> {
    pub islands: &'a mut Islands,
    pub events: &'a mut Vec<Notification>,
}

impl<'a> SimContext<'a> {
    pub fn new(islands: &'a mut Islands, events: &'a mut Vec<Notification>) -> Self {
        Self { islands, events }
    }

    /// Push a notification.
    pub fn notify(&mut self, notification: Notification) {
        self.events.push(notification);
    }
}
