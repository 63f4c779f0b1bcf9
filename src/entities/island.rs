//! Islands: stationary fuel reservoirs.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::SimObject;
use crate::core::{EntityId, IslandSpec};
use crate::events::Notification;
use crate::geometry::{cartesian_distance, Point};

/// An island with a fuel stock that grows by `production_rate` every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Island {
    id: EntityId,
    name: String,
    position: Point,
    fuel: f64,
    production_rate: f64,
}

impl Island {
    /// Create an island. Negative fuel or production are clamped to zero.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        position: Point,
        fuel: f64,
        production_rate: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            fuel: fuel.max(0.0),
            production_rate: production_rate.max(0.0),
        }
    }

    /// Build an island from its scenario entry.
    #[must_use]
    pub fn from_spec(id: EntityId, spec: &IslandSpec) -> Self {
        Self::new(id, spec.name.clone(), spec.position, spec.fuel, spec.production_rate)
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    #[must_use]
    pub fn production_rate(&self) -> f64 {
        self.production_rate
    }

    /// Hand over as much of `request` as is on hand.
    pub fn provide_fuel(&mut self, request: f64, events: &mut Vec<Notification>) -> f64 {
        let provided = request.max(0.0).min(self.fuel);
        self.fuel -= provided;
        info!(island = %self.name, provided, "supplied fuel");
        events.push(Notification::fuel(&self.name, self.fuel));
        provided
    }

    /// Add `amount` to the stock.
    pub fn accept_fuel(&mut self, amount: f64, events: &mut Vec<Notification>) {
        self.fuel += amount;
        info!(island = %self.name, fuel = self.fuel, "fuel stock now");
        events.push(Notification::fuel(&self.name, self.fuel));
    }

    /// Run one tick of production.
    pub fn update(&mut self, events: &mut Vec<Notification>) {
        if self.production_rate > 0.0 {
            debug!(island = %self.name, rate = self.production_rate, "producing fuel");
            self.accept_fuel(self.production_rate, events);
        }
    }
}

impl SimObject for Island {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Point {
        self.position
    }

    fn describe(&self, _directory: &dyn super::Directory) -> String {
        format!(
            "Island {} at position {}\nFuel available: {:.2} tons",
            self.name, self.position, self.fuel
        )
    }

    fn broadcast_current_state(&self, events: &mut Vec<Notification>) {
        events.push(Notification::location(&self.name, self.position));
        events.push(Notification::fuel(&self.name, self.fuel));
    }
}

/// All islands of a world, keyed by id, with the spatial queries ships need.
#[derive(Clone, Debug, Default)]
pub struct Islands {
    islands: FxHashMap<EntityId, Island>,
}

impl Islands {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an island, replacing any island with the same id.
    pub fn insert(&mut self, island: Island) {
        self.islands.insert(island.id(), island);
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Island> {
        self.islands.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Island> {
        self.islands.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.islands.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Iterate over all islands in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Island> {
        self.islands.values()
    }

    /// Location of an island, if it exists.
    #[must_use]
    pub fn location_of(&self, id: EntityId) -> Option<Point> {
        self.get(id).map(SimObject::location)
    }

    /// The island located exactly at `position`.
    ///
    /// When several islands share a location, the alphabetically first wins.
    #[must_use]
    pub fn at_position(&self, position: Point) -> Option<&Island> {
        self.islands
            .values()
            .filter(|island| island.location() == position)
            .min_by(|a, b| a.name().cmp(b.name()))
    }

    /// Island ids sorted by distance to `point`, nearest first, ties by name.
    #[must_use]
    pub fn ordered_by_distance_to(&self, point: Point) -> Vec<EntityId> {
        let mut ranked: Vec<(f64, &Island)> = self
            .islands
            .values()
            .map(|island| (cartesian_distance(point, island.location()), island))
            .collect();

        ranked.sort_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.name().cmp(b.name())));
        ranked.into_iter().map(|(_, island)| island.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn island(id: u32, name: &str, x: f64, y: f64) -> Island {
        Island::new(EntityId(id), name, Point::new(x, y), 0.0, 0.0)
    }

    #[test]
    fn test_provide_fuel_never_goes_negative() {
        let mut events = Vec::new();
        let mut exxon = Island::new(EntityId(0), "Exxon", Point::new(10.0, 10.0), 100.0, 0.0);

        assert_eq!(exxon.provide_fuel(30.0, &mut events), 30.0);
        assert_eq!(exxon.fuel(), 70.0);

        assert_eq!(exxon.provide_fuel(500.0, &mut events), 70.0);
        assert_eq!(exxon.fuel(), 0.0);

        assert_eq!(exxon.provide_fuel(5.0, &mut events), 0.0);
        assert_eq!(exxon.fuel(), 0.0);
    }

    #[test]
    fn test_accept_fuel_and_production() {
        let mut events = Vec::new();
        let mut shell = Island::new(EntityId(1), "Shell", Point::new(0.0, 30.0), 1000.0, 200.0);

        shell.accept_fuel(50.0, &mut events);
        assert_eq!(shell.fuel(), 1050.0);

        shell.update(&mut events);
        assert_eq!(shell.fuel(), 1250.0);
        assert_eq!(events.last(), Some(&Notification::fuel("Shell", 1250.0)));
    }

    #[test]
    fn test_no_production_no_notification() {
        let mut events = Vec::new();
        let mut bermuda = island(2, "Bermuda", 20.0, 20.0);

        bermuda.update(&mut events);
        assert_eq!(bermuda.fuel(), 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_broadcast_current_state() {
        let mut events = Vec::new();
        let exxon = Island::new(EntityId(0), "Exxon", Point::new(10.0, 10.0), 5.0, 0.0);

        exxon.broadcast_current_state(&mut events);
        assert_eq!(
            events,
            vec![
                Notification::location("Exxon", Point::new(10.0, 10.0)),
                Notification::fuel("Exxon", 5.0),
            ]
        );
    }

    #[test]
    fn test_ordered_by_distance_ties_by_name() {
        let mut islands = Islands::new();
        islands.insert(island(0, "Charlie", 10.0, 0.0));
        islands.insert(island(1, "Bravo", 0.0, 10.0));
        islands.insert(island(2, "Alpha", 0.0, 20.0));
        islands.insert(island(3, "Delta", 1.0, 0.0));

        let order = islands.ordered_by_distance_to(Point::new(0.0, 0.0));
        assert_eq!(order, vec![EntityId(3), EntityId(1), EntityId(0), EntityId(2)]);
    }

    #[test]
    fn test_at_position() {
        let mut islands = Islands::new();
        islands.insert(island(0, "Exxon", 10.0, 10.0));
        islands.insert(island(1, "Shell", 0.0, 30.0));

        assert_eq!(islands.at_position(Point::new(0.0, 30.0)).map(Island::id), Some(EntityId(1)));
        assert!(islands.at_position(Point::new(0.0, 30.1)).is_none());
        assert_eq!(islands.location_of(EntityId(0)), Some(Point::new(10.0, 10.0)));
        assert_eq!(islands.location_of(EntityId(9)), None);
    }
}
