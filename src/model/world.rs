//! The registry of everything in the simulation, and the tick driver.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::observers::{ObserverSet, SharedObserver};
use crate::core::{EntityId, EntityKind, IslandSpec, Scenario, ShipKind, ShipSpec, SimError, SimResult};
use crate::entities::{Directory, Fleet, Island, Islands, Ship, SimContext, SimObject};
use crate::events::{Notification, ObserverId};
use crate::geometry::Point;

/// Owns every island and ship, keyed by id, with a name index on top.
///
/// ## Example
///
/// ```
/// use fleet_sim::{Model, Point, Scenario, ShipKind};
///
/// let mut model = Model::from_scenario(&Scenario::default_world()).unwrap();
/// model.create_ship("Queen", "Cruise_ship", Point::new(0.0, 0.0)).unwrap();
/// model.set_destination_island("Queen", "Exxon", 10.0).unwrap();
/// model.update();
///
/// assert_eq!(model.time(), 1);
/// assert_eq!(model.ship("Queen").unwrap().kind(), ShipKind::CruiseShip);
/// ```
#[derive(Debug, Default)]
pub struct Model {
    time: u32,
    /// Next entity ID to allocate. Never reused.
    next_entity: EntityId,
    names: BTreeMap<String, EntityId>,
    islands: Islands,
    ships: Fleet,
    observers: ObserverSet,
    pending: Vec<Notification>,
}

impl Model {
    /// An empty world at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a world from a scenario.
    pub fn from_scenario(scenario: &Scenario) -> SimResult<Self> {
        let mut model = Self::new();
        for island in &scenario.islands {
            model.add_island(island)?;
        }
        for placement in &scenario.ships {
            model.add_ship(&placement.name, placement.position, &placement.resolved_spec())?;
        }
        info!(
            islands = model.islands.len(),
            ships = model.ships.len(),
            "model built from scenario"
        );
        Ok(model)
    }

    /// Ticks elapsed.
    #[must_use]
    pub fn time(&self) -> u32 {
        self.time
    }

    fn alloc_entity(&mut self) -> EntityId {
        let id = self.next_entity;
        self.next_entity = id.next();
        id
    }

    fn claim_name(&mut self, name: &str) -> SimResult<EntityId> {
        if self.is_name_in_use(name) {
            return Err(SimError::NameInUse(name.to_string()));
        }
        let id = self.alloc_entity();
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    // === Registration ===

    pub fn add_island(&mut self, spec: &IslandSpec) -> SimResult<EntityId> {
        let id = self.claim_name(&spec.name)?;
        let island = Island::from_spec(id, spec);
        island.broadcast_current_state(&mut self.pending);
        self.islands.insert(island);
        info!(island = %spec.name, %id, "island added");
        self.flush();
        Ok(id)
    }

    pub fn add_ship(&mut self, name: &str, position: Point, spec: &ShipSpec) -> SimResult<EntityId> {
        let id = self.claim_name(name)?;
        let ship = Ship::new(id, name, position, spec);
        ship.broadcast_current_state(&mut self.pending);
        self.ships.insert(id, ship);
        info!(ship = %name, %id, kind = %spec.kind(), "ship added");
        self.flush();
        Ok(id)
    }

    /// Create a ship from a type name: "Cruiser", "Tanker" or "Cruise_ship".
    pub fn create_ship(&mut self, name: &str, type_name: &str, position: Point) -> SimResult<EntityId> {
        if self.is_name_in_use(name) {
            return Err(SimError::NameInUse(name.to_string()));
        }
        let kind: ShipKind = type_name.parse()?;
        self.add_ship(name, position, &ShipSpec::for_kind(kind))
    }

    /// Remove a ship. Any handle still pointing at it resolves as absent.
    pub fn remove_ship(&mut self, name: &str) -> SimResult<()> {
        let id = self.ship_id(name)?;
        self.forget_ship(id);
        self.flush();
        Ok(())
    }

    fn forget_ship(&mut self, id: EntityId) {
        if let Some(ship) = self.ships.remove(&id) {
            self.names.remove(ship.name());
            info!(ship = %ship.name(), %id, "removed");
            self.pending.push(Notification::gone(ship.name()));
        }
    }

    // === Lookups ===

    #[must_use]
    pub fn is_name_in_use(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    #[must_use]
    pub fn is_island_present(&self, name: &str) -> bool {
        self.names.get(name).is_some_and(|&id| self.islands.contains(id))
    }

    #[must_use]
    pub fn is_ship_present(&self, name: &str) -> bool {
        self.names.get(name).is_some_and(|id| self.ships.contains_key(id))
    }

    pub fn island(&self, name: &str) -> SimResult<&Island> {
        self.names
            .get(name)
            .and_then(|&id| self.islands.get(id))
            .ok_or_else(|| SimError::IslandNotFound(name.to_string()))
    }

    pub fn ship(&self, name: &str) -> SimResult<&Ship> {
        self.names
            .get(name)
            .and_then(|id| self.ships.get(id))
            .ok_or_else(|| SimError::ShipNotFound(name.to_string()))
    }

    fn ship_id(&self, name: &str) -> SimResult<EntityId> {
        self.ship(name).map(Ship::id)
    }

    fn island_id(&self, name: &str) -> SimResult<EntityId> {
        self.island(name).map(Island::id)
    }

    /// Whether `name` is an island or a ship.
    #[must_use]
    pub fn entity_kind(&self, name: &str) -> Option<EntityKind> {
        let &id = self.names.get(name)?;
        if self.islands.contains(id) {
            Some(EntityKind::Island)
        } else if self.ships.contains_key(&id) {
            Some(EntityKind::Ship)
        } else {
            None
        }
    }

    fn object(&self, id: EntityId) -> Option<&dyn SimObject> {
        match self.islands.get(id) {
            Some(island) => Some(island as &dyn SimObject),
            None => self.ships.get(&id).map(|ship| ship as &dyn SimObject),
        }
    }

    /// Resolve a ship handle. `None` once the ship is gone.
    #[must_use]
    pub fn ship_by_id(&self, id: EntityId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    #[must_use]
    pub fn island_by_id(&self, id: EntityId) -> Option<&Island> {
        self.islands.get(id)
    }

    /// Ships in name order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.names.values().filter_map(|id| self.ships.get(id))
    }

    /// Islands in name order.
    pub fn islands(&self) -> impl Iterator<Item = &Island> {
        self.names.values().filter_map(|&id| self.islands.get(id))
    }

    /// All islands, nearest to `point` first, ties by name.
    #[must_use]
    pub fn islands_ordered_by_distance_to_point(&self, point: Point) -> Vec<&Island> {
        self.islands
            .ordered_by_distance_to(point)
            .into_iter()
            .filter_map(|id| self.islands.get(id))
            .collect()
    }

    /// The island located exactly at `point`.
    #[must_use]
    pub fn island_at_position(&self, point: Point) -> Option<&Island> {
        self.islands.at_position(point)
    }

    // === Commands ===

    /// Run `command` against the named ship, then flush notifications.
    fn command<T>(
        &mut self,
        ship: &str,
        command: impl FnOnce(&mut Ship, &mut SimContext<'_>) -> SimResult<T>,
    ) -> SimResult<T> {
        let id = self.ship_id(ship)?;
        let result = match self.ships.get_mut(&id) {
            Some(ship) => {
                let mut ctx = SimContext::new(&mut self.islands, &mut self.pending);
                command(ship, &mut ctx)
            }
            None => Err(SimError::ShipNotFound(ship.to_string())),
        };
        self.flush();
        result
    }

    pub fn set_destination(&mut self, ship: &str, destination: Point, speed: f64) -> SimResult<()> {
        self.command(ship, |ship, ctx| {
            ship.set_destination_position_and_speed(destination, speed, ctx)
        })
    }

    /// Head for an island's location. For a cruise ship this starts a tour.
    pub fn set_destination_island(&mut self, ship: &str, island: &str, speed: f64) -> SimResult<()> {
        let destination = self.island(island)?.location();
        self.set_destination(ship, destination, speed)
    }

    pub fn set_course(&mut self, ship: &str, course: f64, speed: f64) -> SimResult<()> {
        self.command(ship, |ship, ctx| ship.set_course_and_speed(course, speed, ctx))
    }

    pub fn stop(&mut self, ship: &str) -> SimResult<()> {
        self.command(ship, |ship, ctx| ship.stop(ctx))
    }

    pub fn dock(&mut self, ship: &str, island: &str) -> SimResult<()> {
        let island = self.island_id(island)?;
        self.command(ship, |ship, ctx| ship.dock(island, ctx))
    }

    pub fn refuel(&mut self, ship: &str) -> SimResult<()> {
        self.command(ship, |ship, ctx| ship.refuel(ctx))
    }

    pub fn set_load_destination(&mut self, ship: &str, island: &str) -> SimResult<()> {
        let island = self.island_id(island)?;
        self.command(ship, |ship, ctx| ship.set_load_destination(island, ctx))
    }

    pub fn set_unload_destination(&mut self, ship: &str, island: &str) -> SimResult<()> {
        let island = self.island_id(island)?;
        self.command(ship, |ship, ctx| ship.set_unload_destination(island, ctx))
    }

    pub fn attack(&mut self, ship: &str, target: &str) -> SimResult<()> {
        let target = self.ship_id(target)?;
        self.command(ship, |ship, _| ship.attack(target))
    }

    pub fn stop_attack(&mut self, ship: &str) -> SimResult<()> {
        self.command(ship, |ship, _| ship.stop_attack())
    }

    // === Tick ===

    /// Advance one tick: every entity updates once, in name order.
    ///
    /// Each ship is taken out of the fleet while it updates so it can act on
    /// the others. Ships sunk during the tick are removed at the end.
    pub fn update(&mut self) {
        self.time += 1;
        let order: Vec<EntityId> = self.names.values().copied().collect();

        for id in order {
            if let Some(island) = self.islands.get_mut(id) {
                island.update(&mut self.pending);
            } else if let Some(mut ship) = self.ships.remove(&id) {
                let mut ctx = SimContext::new(&mut self.islands, &mut self.pending);
                ship.update(&mut ctx, &mut self.ships);
                self.ships.insert(id, ship);
            }
        }

        let sunk: Vec<EntityId> = self
            .ships
            .values()
            .filter(|ship| !ship.is_afloat())
            .map(Ship::id)
            .collect();
        for id in sunk {
            self.forget_ship(id);
        }

        debug!(time = self.time, pending = self.pending.len(), "tick complete");
        self.flush();
    }

    // === Reporting ===

    /// Descriptions of every entity, in name order, separated by blank lines.
    #[must_use]
    pub fn describe(&self) -> String {
        self.names
            .values()
            .filter_map(|&id| self.object(id))
            .map(|object| object.describe(self))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    // === Observers ===

    /// Register an observer and replay the full current state to it alone.
    pub fn attach(&mut self, observer: SharedObserver) -> ObserverId {
        let id = self.observers.attach(observer);
        let mut replay = Vec::new();
        for object in self.names.values().filter_map(|&entity| self.object(entity)) {
            object.broadcast_current_state(&mut replay);
        }
        self.observers.send_to(id, &replay);
        info!(observer = %id, "observer attached");
        id
    }

    /// Returns false if `id` was not attached.
    pub fn detach(&mut self, id: ObserverId) -> bool {
        let removed = self.observers.detach(id);
        if removed {
            info!(observer = %id, "observer detached");
        }
        removed
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.observers.broadcast(&pending);
    }
}

impl Directory for Model {
    fn name_of(&self, id: EntityId) -> Option<&str> {
        self.islands
            .get(id)
            .map(SimObject::name)
            .or_else(|| self.ships.get(&id).map(Ship::name))
    }

    fn location_of(&self, id: EntityId) -> Option<Point> {
        self.islands
            .location_of(id)
            .or_else(|| self.ships.get(&id).map(Ship::location))
    }
}
