//! Movement and fuel state machine shared by all ships.
//!
//! ## States
//!
//! ```text
//!                set_destination           arrive
//!   Stopped ─────────────────────► MovingToPosition ───────► Stopped
//!      │  ▲        set_course                 │ out of fuel
//!      │  └──── stop ◄──── MovingOnCourse ────┴──────────► DeadInTheWater
//!      │ dock
//!      ▼
//!   Docked          (any) ── hit leaving resistance <= 0 ──► Sunk
//! ```
//!
//! `Sunk` is terminal. `DeadInTheWater` accepts no movement commands, but a
//! ship in that state is still afloat and can still be hit.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::island::Island;
use super::{Directory, SimContext, SimObject};
use crate::core::{EntityId, ShipSpec, SimError, SimResult};
use crate::events::Notification;
use crate::geometry::{cartesian_distance, CompassVector, CourseSpeed, Point, Track};

/// A ship must be within this many nm of an island to dock.
pub const DOCKING_DISTANCE: f64 = 0.1;

/// Shortfalls smaller than this are topped off without asking an island.
const NEGLIGIBLE_FUEL: f64 = 0.005;

/// Movement state of a ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipState {
    MovingToPosition,
    MovingOnCourse,
    Stopped,
    DeadInTheWater,
    Docked,
    Sunk,
}

/// The state every ship has regardless of role.
#[derive(Clone, Debug, PartialEq)]
pub struct Hull {
    id: EntityId,
    name: String,
    fuel_capacity: f64,
    fuel: f64,
    maximum_speed: f64,
    /// Tons per nm.
    fuel_consumption: f64,
    resistance: i32,
    state: ShipState,
    destination: Option<Point>,
    track: Track,
    docked_at: Option<EntityId>,
}

impl Hull {
    /// A stopped hull with a full tank.
    pub fn new(id: EntityId, name: impl Into<String>, position: Point, spec: &ShipSpec) -> Self {
        let fuel_capacity = spec.fuel_capacity.max(0.0);
        Self {
            id,
            name: name.into(),
            fuel_capacity,
            fuel: fuel_capacity,
            maximum_speed: spec.maximum_speed,
            fuel_consumption: spec.fuel_consumption,
            resistance: spec.resistance,
            state: ShipState::Stopped,
            destination: None,
            track: Track::new(position),
            docked_at: None,
        }
    }

    // === Readers ===

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn location(&self) -> Point {
        self.track.position()
    }

    #[must_use]
    pub fn state(&self) -> ShipState {
        self.state
    }

    #[must_use]
    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    #[must_use]
    pub fn fuel_capacity(&self) -> f64 {
        self.fuel_capacity
    }

    #[must_use]
    pub fn maximum_speed(&self) -> f64 {
        self.maximum_speed
    }

    #[must_use]
    pub fn fuel_consumption(&self) -> f64 {
        self.fuel_consumption
    }

    #[must_use]
    pub fn resistance(&self) -> i32 {
        self.resistance
    }

    #[must_use]
    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    #[must_use]
    pub fn course_speed(&self) -> CourseSpeed {
        self.track.course_speed()
    }

    /// The island currently docked at.
    #[must_use]
    pub fn docked_at(&self) -> Option<EntityId> {
        self.docked_at
    }

    /// Afloat and not dead in the water.
    #[must_use]
    pub fn can_move(&self) -> bool {
        self.is_afloat() && self.state != ShipState::DeadInTheWater
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self.state, ShipState::MovingToPosition | ShipState::MovingOnCourse)
    }

    #[must_use]
    pub fn is_docked(&self) -> bool {
        self.state == ShipState::Docked
    }

    #[must_use]
    pub fn is_afloat(&self) -> bool {
        self.state != ShipState::Sunk
    }

    /// Stopped and within docking distance of `island`.
    #[must_use]
    pub fn can_dock(&self, island: &Island) -> bool {
        self.state == ShipState::Stopped
            && cartesian_distance(self.location(), island.location()) <= DOCKING_DISTANCE
    }

    // === Commands ===

    /// Head for `destination` at `speed`.
    pub fn set_destination_position_and_speed(
        &mut self,
        destination: Point,
        speed: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        self.check_speed(speed)?;
        let leg = CompassVector::between(self.location(), destination);
        self.track.set_course_speed(CourseSpeed::new(leg.direction, speed));
        self.destination = Some(destination);
        self.docked_at = None;
        self.state = ShipState::MovingToPosition;
        info!(ship = %self.name, %destination, speed, "will sail to position");
        ctx.notify(Notification::course_speed(&self.name, self.course_speed()));
        Ok(())
    }

    /// Steer `course` at `speed` until told otherwise.
    pub fn set_course_and_speed(
        &mut self,
        course: f64,
        speed: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        self.check_speed(speed)?;
        if !(0.0..360.0).contains(&course) {
            return Err(SimError::InvalidCourse);
        }
        self.track.set_course_speed(CourseSpeed::new(course, speed));
        self.destination = None;
        self.docked_at = None;
        self.state = ShipState::MovingOnCourse;
        info!(ship = %self.name, course, speed, "will sail on course");
        ctx.notify(Notification::course_speed(&self.name, self.course_speed()));
        Ok(())
    }

    /// Stop where we are.
    pub fn stop(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        if !self.can_move() {
            return Err(SimError::CannotMove);
        }
        self.track.set_speed(0.0);
        self.destination = None;
        self.docked_at = None;
        self.state = ShipState::Stopped;
        info!(ship = %self.name, "stopping");
        ctx.notify(Notification::course_speed(&self.name, self.course_speed()));
        Ok(())
    }

    /// Dock at an island: snap to its position and enter `Docked`.
    pub fn dock(&mut self, island: EntityId, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let island = ctx
            .islands
            .get(island)
            .ok_or_else(|| SimError::IslandNotFound(island.to_string()))?;
        if !self.can_dock(island) {
            return Err(SimError::CannotDock);
        }
        let (island_id, island_location) = (island.id(), island.location());
        info!(ship = %self.name, island = %island.name(), "docked");

        self.track.set_position(island_location);
        self.docked_at = Some(island_id);
        self.state = ShipState::Docked;
        ctx.notify(Notification::location(&self.name, island_location));
        Ok(())
    }

    /// Fill the tank from the island we are docked at.
    ///
    /// The island gives what it can toward the shortfall; the tank is
    /// topped off either way.
    pub fn refuel(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        if !self.is_docked() {
            return Err(SimError::MustBeDocked);
        }
        let shortfall = self.fuel_capacity - self.fuel;
        self.fuel = self.fuel_capacity;
        if shortfall < NEGLIGIBLE_FUEL {
            return Ok(());
        }
        if let Some(id) = self.docked_at {
            if let Some(island) = ctx.islands.get_mut(id) {
                island.provide_fuel(shortfall, ctx.events);
            }
        }
        info!(ship = %self.name, fuel = self.fuel, "refueled");
        ctx.notify(Notification::fuel(&self.name, self.fuel));
        Ok(())
    }

    /// Take `force` points of damage from `attacker`.
    pub fn receive_hit(&mut self, force: i32, attacker: EntityId, ctx: &mut SimContext<'_>) {
        if !self.is_afloat() {
            return;
        }
        self.resistance -= force;
        info!(ship = %self.name, force, %attacker, resistance = self.resistance, "hit");
        if self.resistance <= 0 {
            self.sink(ctx);
        }
    }

    fn sink(&mut self, ctx: &mut SimContext<'_>) {
        self.track.set_speed(0.0);
        self.destination = None;
        self.docked_at = None;
        self.state = ShipState::Sunk;
        info!(ship = %self.name, "sunk");
        ctx.notify(Notification::course_speed(&self.name, self.course_speed()));
    }

    // === Tick ===

    /// Advance one tick of movement.
    pub fn update(&mut self, ctx: &mut SimContext<'_>) {
        match self.state {
            ShipState::MovingToPosition | ShipState::MovingOnCourse => {
                self.calculate_movement();
                debug!(
                    ship = %self.name,
                    location = %self.location(),
                    fuel = self.fuel,
                    state = ?self.state,
                    "moved"
                );
                ctx.notify(Notification::location(&self.name, self.location()));
                ctx.notify(Notification::fuel(&self.name, self.fuel));
                if !self.is_moving() {
                    ctx.notify(Notification::course_speed(&self.name, self.course_speed()));
                }
            }
            ShipState::Stopped | ShipState::Docked | ShipState::DeadInTheWater => {
                debug!(ship = %self.name, state = ?self.state, "holding position");
            }
            ShipState::Sunk => {}
        }
    }

    /// Move for one tick as far as speed and fuel allow.
    fn calculate_movement(&mut self) {
        let full_distance = self.track.speed();
        let full_fuel_required = full_distance * self.fuel_consumption;

        let (distance_possible, time_possible) =
            if full_fuel_required <= self.fuel || full_distance <= 0.0 {
                (full_distance, 1.0)
            } else {
                let distance = self.fuel / self.fuel_consumption;
                (distance, distance / full_distance)
            };

        if let (ShipState::MovingToPosition, Some(destination)) = (self.state, self.destination) {
            let destination_distance = cartesian_distance(self.location(), destination);
            if destination_distance <= distance_possible {
                self.track.set_position(destination);
                self.fuel = (self.fuel - destination_distance * self.fuel_consumption).max(0.0);
                self.track.set_speed(0.0);
                self.destination = None;
                self.state = ShipState::Stopped;
                info!(ship = %self.name, %destination, "arrived");
                return;
            }
        }

        self.track.update_position(time_possible);
        if full_fuel_required >= self.fuel && full_fuel_required > 0.0 {
            self.fuel = 0.0;
            self.track.set_speed(0.0);
            self.destination = None;
            self.state = ShipState::DeadInTheWater;
            info!(ship = %self.name, location = %self.location(), "dead in the water");
        } else {
            self.fuel -= full_fuel_required;
        }
    }

    fn check_speed(&self, speed: f64) -> SimResult<()> {
        if !self.can_move() {
            return Err(SimError::CannotMove);
        }
        if speed < 0.0 {
            return Err(SimError::NegativeSpeed);
        }
        if speed > self.maximum_speed {
            return Err(SimError::ExcessiveSpeed);
        }
        Ok(())
    }

    // === Reporting ===

    /// Queue location, fuel, and course/speed.
    pub fn broadcast_current_state(&self, events: &mut Vec<Notification>) {
        events.push(Notification::location(&self.name, self.location()));
        events.push(Notification::fuel(&self.name, self.fuel));
        events.push(Notification::course_speed(&self.name, self.course_speed()));
    }

    /// Position, fuel, resistance, and movement state.
    #[must_use]
    pub fn describe(&self, directory: &dyn Directory) -> String {
        let mut out = format!(
            "{} at {}, fuel: {:.2} tons, resistance: {}\n",
            self.name,
            self.location(),
            self.fuel,
            self.resistance
        );
        let cs = self.course_speed();
        let line = match self.state {
            ShipState::MovingToPosition => format!(
                "Moving to {} on course {:.2} deg, speed {:.2} kts",
                self.destination.unwrap_or_default(),
                cs.course,
                cs.speed
            ),
            ShipState::MovingOnCourse => {
                format!("Moving on course {:.2} deg, speed {:.2} kts", cs.course, cs.speed)
            }
            ShipState::Docked => {
                let island = self
                    .docked_at
                    .and_then(|id| directory.name_of(id))
                    .unwrap_or("unknown island");
                format!("Docked at {island}")
            }
            ShipState::Stopped => "Stopped".to_string(),
            ShipState::DeadInTheWater => "Dead in the water".to_string(),
            ShipState::Sunk => "Sunk".to_string(),
        };
        out.push_str(&line);
        out
    }
}
