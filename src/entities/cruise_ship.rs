//! Cruise ship role: tour every island once, then return to the start.
//!
//! A tour begins when the ship is sent to a position that is exactly an
//! island's location. At each stop the ship docks, refuels, waits a tick,
//! then picks the nearest island it has not visited yet.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{info, warn};

use super::hull::Hull;
use super::{Directory, SimContext, SimObject};
use crate::core::{EntityId, SimResult};
use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CruiseState {
    NoDestination,
    Moving,
    Refuel,
    Wait,
    FindNextIsland,
}

/// Tour state of a cruise ship.
#[derive(Clone, Debug, PartialEq)]
pub struct CruiseShip {
    state: CruiseState,
    /// Islands in visiting order. The first entry is where the tour started
    /// and ends; the last is the current or next stop.
    path: SmallVec<[EntityId; 8]>,
    cruise_speed: f64,
}

impl Default for CruiseShip {
    fn default() -> Self {
        Self::new()
    }
}

impl CruiseShip {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CruiseState::NoDestination,
            path: SmallVec::new(),
            cruise_speed: 0.0,
        }
    }

    #[must_use]
    pub fn state(&self) -> CruiseState {
        self.state
    }

    #[must_use]
    pub fn path(&self) -> &[EntityId] {
        &self.path
    }

    #[must_use]
    pub fn cruise_speed(&self) -> f64 {
        self.cruise_speed
    }

    #[must_use]
    pub fn is_cruising(&self) -> bool {
        self.state != CruiseState::NoDestination
    }

    // === Commands ===

    /// Sail to `destination`. An island location starts a tour there.
    pub fn set_destination_position_and_speed(
        &mut self,
        hull: &mut Hull,
        destination: Point,
        speed: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        hull.set_destination_position_and_speed(destination, speed, ctx)?;

        match ctx.islands.at_position(destination) {
            Some(island) => {
                info!(ship = %hull.name(), island = %island.name(), "cruise will start and end at");
                self.path.clear();
                self.path.push(island.id());
                self.cruise_speed = speed;
                self.state = CruiseState::Moving;
            }
            None => self.cancel(hull),
        }
        Ok(())
    }

    pub fn set_course_and_speed(
        &mut self,
        hull: &mut Hull,
        course: f64,
        speed: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        self.cancel(hull);
        hull.set_course_and_speed(course, speed, ctx)
    }

    pub fn stop(&mut self, hull: &mut Hull, ctx: &mut SimContext<'_>) -> SimResult<()> {
        self.cancel(hull);
        hull.stop(ctx)
    }

    fn cancel(&mut self, hull: &Hull) {
        if self.is_cruising() {
            info!(ship = %hull.name(), "canceling current cruise");
        }
        self.state = CruiseState::NoDestination;
        self.path.clear();
    }

    // === Tick ===

    /// Tour step, run after the hull has moved.
    pub fn update(&mut self, hull: &mut Hull, ctx: &mut SimContext<'_>) {
        if !hull.can_move() {
            self.cancel(hull);
            return;
        }
        let (Some(&start), Some(&current)) = (self.path.first(), self.path.last()) else {
            return;
        };

        match self.state {
            CruiseState::NoDestination => {}
            CruiseState::Moving => {
                let arrived = !hull.is_moving()
                    && ctx.islands.get(current).is_some_and(|island| hull.can_dock(island));
                if !arrived {
                    return;
                }
                if let Err(error) = hull.dock(current, ctx) {
                    warn!(ship = %hull.name(), %error, "could not dock during cruise");
                    return;
                }
                if start == current && self.path.len() > 1 {
                    info!(ship = %hull.name(), island = %current, "cruise is over");
                    self.state = CruiseState::NoDestination;
                    self.path.clear();
                } else {
                    self.state = CruiseState::Refuel;
                }
            }
            CruiseState::Refuel => {
                if let Err(error) = hull.refuel(ctx) {
                    warn!(ship = %hull.name(), %error, "could not refuel during cruise");
                }
                self.state = CruiseState::Wait;
            }
            CruiseState::Wait => self.state = CruiseState::FindNextIsland,
            CruiseState::FindNextIsland => {
                let next = self.next_destination(start, current, ctx);
                self.path.push(next);
                let sailed = ctx.islands.location_of(next).map(|location| {
                    hull.set_destination_position_and_speed(location, self.cruise_speed, ctx)
                });
                match sailed {
                    Some(Ok(())) => {
                        info!(ship = %hull.name(), island = %next, "will visit");
                        self.state = CruiseState::Moving;
                    }
                    Some(Err(error)) => {
                        warn!(ship = %hull.name(), %error, "cannot continue cruise");
                        self.cancel(hull);
                    }
                    None => self.cancel(hull),
                }
            }
        }
    }

    /// Nearest island to `current` not yet on the path, or the start.
    fn next_destination(&self, start: EntityId, current: EntityId, ctx: &SimContext<'_>) -> EntityId {
        let from = ctx.islands.location_of(current).unwrap_or_default();
        ctx.islands
            .ordered_by_distance_to(from)
            .into_iter()
            .find(|id| !self.path.contains(id))
            .unwrap_or(start)
    }

    // === Reporting ===

    #[must_use]
    pub fn describe(&self, directory: &dyn Directory) -> Option<String> {
        let island = self
            .path
            .last()
            .and_then(|&id| directory.name_of(id))
            .unwrap_or("unknown island");
        match self.state {
            CruiseState::NoDestination => None,
            CruiseState::Moving => Some(format!("On cruise to {island}")),
            _ => Some(format!("Waiting during cruise at {island}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ShipSpec;
    use crate::entities::{Island, Islands, ShipState};
    use crate::events::Notification;

    fn world() -> (Islands, Vec<Notification>) {
        let mut islands = Islands::new();
        islands.insert(Island::new(EntityId(10), "Alpha", Point::new(0.0, 0.0), 1000.0, 0.0));
        islands.insert(Island::new(EntityId(11), "Bravo", Point::new(0.0, 10.0), 1000.0, 0.0));
        (islands, Vec::new())
    }

    fn tick(hull: &mut Hull, cruise: &mut CruiseShip, ctx: &mut SimContext<'_>) {
        hull.update(ctx);
        cruise.update(hull, ctx);
    }

    fn hull() -> Hull {
        Hull::new(EntityId(1), "Queen", Point::new(5.0, 0.0), &ShipSpec::cruise_ship())
    }

    #[test]
    fn test_island_destination_starts_tour() {
        let (mut islands, mut events) = world();
        let mut ctx = SimContext::new(&mut islands, &mut events);
        let mut hull = hull();
        let mut cruise = CruiseShip::new();

        cruise
            .set_destination_position_and_speed(&mut hull, Point::new(0.0, 0.0), 10.0, &mut ctx)
            .unwrap();
        assert_eq!(cruise.state(), CruiseState::Moving);
        assert_eq!(cruise.path(), &[EntityId(10)]);
        assert_eq!(cruise.cruise_speed(), 10.0);
    }

    #[test]
    fn test_open_water_destination_cancels_tour() {
        let (mut islands, mut events) = world();
        let mut ctx = SimContext::new(&mut islands, &mut events);
        let mut hull = hull();
        let mut cruise = CruiseShip::new();

        cruise
            .set_destination_position_and_speed(&mut hull, Point::new(0.0, 0.0), 10.0, &mut ctx)
            .unwrap();
        cruise
            .set_destination_position_and_speed(&mut hull, Point::new(3.0, 3.0), 10.0, &mut ctx)
            .unwrap();
        assert_eq!(cruise.state(), CruiseState::NoDestination);
        assert!(cruise.path().is_empty());
        assert_eq!(hull.state(), ShipState::MovingToPosition);
    }

    #[test]
    fn test_rejected_command_keeps_tour() {
        let (mut islands, mut events) = world();
        let mut ctx = SimContext::new(&mut islands, &mut events);
        let mut hull = hull();
        let mut cruise = CruiseShip::new();

        cruise
            .set_destination_position_and_speed(&mut hull, Point::new(0.0, 0.0), 10.0, &mut ctx)
            .unwrap();
        assert!(cruise
            .set_destination_position_and_speed(&mut hull, Point::new(3.0, 3.0), 99.0, &mut ctx)
            .is_err());
        assert_eq!(cruise.state(), CruiseState::Moving);
    }

    #[test]
    fn test_stop_cancels_tour() {
        let (mut islands, mut events) = world();
        let mut ctx = SimContext::new(&mut islands, &mut events);
        let mut hull = hull();
        let mut cruise = CruiseShip::new();

        cruise
            .set_destination_position_and_speed(&mut hull, Point::new(0.0, 0.0), 10.0, &mut ctx)
            .unwrap();
        cruise.stop(&mut hull, &mut ctx).unwrap();
        assert!(!cruise.is_cruising());
        assert_eq!(hull.state(), ShipState::Stopped);
    }

    #[test]
    fn test_full_tour_of_two_islands() {
        let (mut islands, mut events) = world();
        let mut ctx = SimContext::new(&mut islands, &mut events);
        let mut hull = hull();
        let mut cruise = CruiseShip::new();

        cruise
            .set_destination_position_and_speed(&mut hull, Point::new(0.0, 0.0), 10.0, &mut ctx)
            .unwrap();

        // Arrive at Alpha and dock
        tick(&mut hull, &mut cruise, &mut ctx);
        assert_eq!(hull.state(), ShipState::Docked);
        assert_eq!(cruise.state(), CruiseState::Refuel);

        tick(&mut hull, &mut cruise, &mut ctx);
        assert_eq!(cruise.state(), CruiseState::Wait);
        assert_eq!(hull.fuel(), 500.0);

        tick(&mut hull, &mut cruise, &mut ctx);
        assert_eq!(cruise.state(), CruiseState::FindNextIsland);

        tick(&mut hull, &mut cruise, &mut ctx);
        assert_eq!(cruise.state(), CruiseState::Moving);
        assert_eq!(cruise.path(), &[EntityId(10), EntityId(11)]);

        // Ten miles at ten knots
        tick(&mut hull, &mut cruise, &mut ctx);
        assert_eq!(hull.docked_at(), Some(EntityId(11)));
        assert_eq!(cruise.state(), CruiseState::Refuel);

        for _ in 0..3 {
            tick(&mut hull, &mut cruise, &mut ctx);
        }
        assert_eq!(cruise.path(), &[EntityId(10), EntityId(11), EntityId(10)]);

        tick(&mut hull, &mut cruise, &mut ctx);
        assert_eq!(hull.docked_at(), Some(EntityId(10)));
        assert_eq!(cruise.state(), CruiseState::NoDestination);
        assert!(cruise.path().is_empty());
    }
}
