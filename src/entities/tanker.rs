//! Tanker role: shuttle fuel cargo from a load island to an unload island.
//!
//! Once both destinations are set the tanker runs the cycle on its own:
//!
//! ```text
//! MovingToLoading ─dock─► Loading ─full─► MovingToUnloading ─dock─► Unloading
//!        ▲                                                              │
//!        └────────────────────────── empty ─────────────────────────────┘
//! ```
//!
//! Loading is limited by what the load island has on hand: every tick in
//! `Loading` the tanker refuels, then asks the island for the rest of its
//! hold. It leaves only when the hold is full.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::hull::Hull;
use super::island::Islands;
use super::{Directory, SimContext};
use crate::core::{EntityId, SimError, SimResult};
use crate::geometry::Point;

/// Hold shortfalls smaller than this count as full.
const NEGLIGIBLE_CARGO: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankerState {
    NoCargoDestinations,
    MovingToLoading,
    Loading,
    MovingToUnloading,
    Unloading,
}

/// Cargo state of a tanker.
#[derive(Clone, Debug, PartialEq)]
pub struct Tanker {
    cargo_capacity: f64,
    cargo: f64,
    state: TankerState,
    load_destination: Option<EntityId>,
    unload_destination: Option<EntityId>,
}

impl Tanker {
    /// An empty tanker with no assignment.
    #[must_use]
    pub fn new(cargo_capacity: f64) -> Self {
        Self {
            cargo_capacity: cargo_capacity.max(0.0),
            cargo: 0.0,
            state: TankerState::NoCargoDestinations,
            load_destination: None,
            unload_destination: None,
        }
    }

    #[must_use]
    pub fn cargo(&self) -> f64 {
        self.cargo
    }

    #[must_use]
    pub fn cargo_capacity(&self) -> f64 {
        self.cargo_capacity
    }

    #[must_use]
    pub fn state(&self) -> TankerState {
        self.state
    }

    #[must_use]
    pub fn load_destination(&self) -> Option<EntityId> {
        self.load_destination
    }

    #[must_use]
    pub fn unload_destination(&self) -> Option<EntityId> {
        self.unload_destination
    }

    fn has_cargo_destinations(&self) -> bool {
        self.load_destination.is_some() || self.unload_destination.is_some()
    }

    fn check_not_assigned(&self) -> SimResult<()> {
        if self.load_destination.is_some() && self.unload_destination.is_some() {
            return Err(SimError::HasCargoDestinations);
        }
        Ok(())
    }

    // === Commands ===

    /// Manual navigation is refused while cargo destinations are assigned.
    pub fn set_destination_position_and_speed(
        &mut self,
        hull: &mut Hull,
        destination: Point,
        speed: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        if self.has_cargo_destinations() {
            return Err(SimError::HasCargoDestinations);
        }
        hull.set_destination_position_and_speed(destination, speed, ctx)
    }

    pub fn set_course_and_speed(
        &mut self,
        hull: &mut Hull,
        course: f64,
        speed: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        if self.has_cargo_destinations() {
            return Err(SimError::HasCargoDestinations);
        }
        hull.set_course_and_speed(course, speed, ctx)
    }

    pub fn set_load_destination(
        &mut self,
        hull: &mut Hull,
        island: EntityId,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        self.check_not_assigned()?;
        let previous = self.load_destination.replace(island);
        if self.unload_destination == Some(island) {
            return Err(SimError::SameDestinations);
        }
        info!(ship = %hull.name(), %island, "will load at");
        if let Err(error) = self.start_cycle_if_ready(hull, ctx) {
            self.load_destination = previous;
            return Err(error);
        }
        Ok(())
    }

    pub fn set_unload_destination(
        &mut self,
        hull: &mut Hull,
        island: EntityId,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        self.check_not_assigned()?;
        let previous = self.unload_destination.replace(island);
        if self.load_destination == Some(island) {
            return Err(SimError::SameDestinations);
        }
        info!(ship = %hull.name(), %island, "will unload at");
        if let Err(error) = self.start_cycle_if_ready(hull, ctx) {
            self.unload_destination = previous;
            return Err(error);
        }
        Ok(())
    }

    /// Drop the assignment, then stop.
    pub fn stop(&mut self, hull: &mut Hull, ctx: &mut SimContext<'_>) -> SimResult<()> {
        self.clear_destinations(hull);
        hull.stop(ctx)
    }

    fn clear_destinations(&mut self, hull: &Hull) {
        if self.has_cargo_destinations() || self.state != TankerState::NoCargoDestinations {
            info!(ship = %hull.name(), "now has no cargo destinations");
        }
        self.load_destination = None;
        self.unload_destination = None;
        self.state = TankerState::NoCargoDestinations;
    }

    /// Pick the right entry point into the cycle for where we are now.
    fn start_cycle_if_ready(&mut self, hull: &mut Hull, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let (Some(load), Some(unload)) = (self.load_destination, self.unload_destination) else {
            return Ok(());
        };
        let empty = self.cargo == 0.0;

        if hull.is_docked() && hull.docked_at() == Some(load) {
            self.state = TankerState::Loading;
        } else if empty && Self::dockable(hull, ctx.islands, load) {
            hull.dock(load, ctx)?;
            self.state = TankerState::Loading;
        } else if !empty && hull.is_docked() && hull.docked_at() == Some(unload) {
            self.state = TankerState::Unloading;
        } else if !empty && Self::dockable(hull, ctx.islands, unload) {
            hull.dock(unload, ctx)?;
            self.state = TankerState::Unloading;
        } else if empty {
            Self::sail_to(hull, load, ctx)?;
            self.state = TankerState::MovingToLoading;
        } else {
            Self::sail_to(hull, unload, ctx)?;
            self.state = TankerState::MovingToUnloading;
        }
        info!(ship = %hull.name(), state = ?self.state, "cargo cycle started");
        Ok(())
    }

    fn sail_to(hull: &mut Hull, island: EntityId, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let location = ctx
            .islands
            .location_of(island)
            .ok_or_else(|| SimError::IslandNotFound(island.to_string()))?;
        let speed = hull.maximum_speed();
        hull.set_destination_position_and_speed(location, speed, ctx)
    }

    fn dockable(hull: &Hull, islands: &Islands, island: EntityId) -> bool {
        islands.get(island).is_some_and(|i| hull.can_dock(i))
    }

    /// Dock at `island` if we have arrived there.
    fn try_dock(hull: &mut Hull, island: EntityId, ctx: &mut SimContext<'_>) -> bool {
        let arrived = !hull.is_moving() && Self::dockable(hull, ctx.islands, island);
        arrived && hull.dock(island, ctx).is_ok()
    }

    // === Tick ===

    /// Cargo step, run after the hull has moved.
    pub fn update(&mut self, hull: &mut Hull, ctx: &mut SimContext<'_>) {
        if !hull.can_move() {
            if self.state != TankerState::NoCargoDestinations {
                self.clear_destinations(hull);
            }
            return;
        }
        let (Some(load), Some(unload)) = (self.load_destination, self.unload_destination) else {
            return;
        };

        match self.state {
            TankerState::NoCargoDestinations => {}
            TankerState::MovingToLoading => {
                if Self::try_dock(hull, load, ctx) {
                    self.state = TankerState::Loading;
                }
            }
            TankerState::Loading => {
                if let Err(error) = hull.refuel(ctx) {
                    warn!(ship = %hull.name(), %error, "refuel while loading failed");
                }
                let needed = self.cargo_capacity - self.cargo;
                if needed < NEGLIGIBLE_CARGO {
                    self.cargo = self.cargo_capacity;
                    self.depart(hull, unload, TankerState::MovingToUnloading, ctx);
                } else if let Some(island) = ctx.islands.get_mut(load) {
                    self.cargo += island.provide_fuel(needed, ctx.events);
                    info!(ship = %hull.name(), cargo = self.cargo, "now has cargo");
                }
            }
            TankerState::MovingToUnloading => {
                if Self::try_dock(hull, unload, ctx) {
                    self.state = TankerState::Unloading;
                }
            }
            TankerState::Unloading => {
                if self.cargo == 0.0 {
                    self.depart(hull, load, TankerState::MovingToLoading, ctx);
                } else if let Some(island) = ctx.islands.get_mut(unload) {
                    island.accept_fuel(self.cargo, ctx.events);
                    self.cargo = 0.0;
                    info!(ship = %hull.name(), "cargo unloaded");
                }
            }
        }
    }

    fn depart(&mut self, hull: &mut Hull, island: EntityId, next: TankerState, ctx: &mut SimContext<'_>) {
        match Self::sail_to(hull, island, ctx) {
            Ok(()) => self.state = next,
            Err(error) => {
                warn!(ship = %hull.name(), %error, "cannot leave, dropping cargo destinations");
                self.clear_destinations(hull);
            }
        }
    }

    // === Reporting ===

    /// Cargo and cycle status lines.
    #[must_use]
    pub fn describe(&self, directory: &dyn Directory) -> String {
        let island = |id: Option<EntityId>| {
            id.and_then(|id| directory.name_of(id)).unwrap_or("unknown island").to_string()
        };
        let status = match self.state {
            TankerState::NoCargoDestinations => "No cargo destinations".to_string(),
            TankerState::MovingToLoading => format!("Moving to load at {}", island(self.load_destination)),
            TankerState::Loading => format!("Loading at {}", island(self.load_destination)),
            TankerState::MovingToUnloading => {
                format!("Moving to unload at {}", island(self.unload_destination))
            }
            TankerState::Unloading => format!("Unloading at {}", island(self.unload_destination)),
        };
        format!("Cargo: {:.2} tons, {status}", self.cargo)
    }
}
