//! A ship: a [`Hull`] plus the [`Role`] that decides what it does with it.
//!
//! Every command exists on every ship. Roles that don't support a command
//! answer `SimError::Unsupported`; roles that refine a command (tankers
//! refusing manual navigation, cruise ships starting tours) wrap the hull's
//! version.

use super::cruise_ship::CruiseShip;
use super::hull::{Hull, ShipState};
use super::tanker::Tanker;
use super::warship::Warship;
use super::{Directory, Fleet, SimContext, SimObject};
use crate::core::{EntityId, RoleSpec, ShipKind, ShipSpec, SimError, SimResult};
use crate::events::Notification;
use crate::geometry::{CourseSpeed, Point};

/// What a ship does beyond moving.
#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    Warship(Warship),
    Tanker(Tanker),
    CruiseShip(CruiseShip),
}

impl Role {
    #[must_use]
    pub fn from_spec(spec: &RoleSpec) -> Self {
        match *spec {
            RoleSpec::Warship {
                firepower,
                maximum_range,
            } => Role::Warship(Warship::new(firepower, maximum_range)),
            RoleSpec::Tanker { cargo_capacity } => Role::Tanker(Tanker::new(cargo_capacity)),
            RoleSpec::CruiseShip => Role::CruiseShip(CruiseShip::new()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShipKind {
        match self {
            Role::Warship(_) => ShipKind::Cruiser,
            Role::Tanker(_) => ShipKind::Tanker,
            Role::CruiseShip(_) => ShipKind::CruiseShip,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    hull: Hull,
    role: Role,
}

impl Ship {
    pub fn new(id: EntityId, name: impl Into<String>, position: Point, spec: &ShipSpec) -> Self {
        Self {
            hull: Hull::new(id, name, position, spec),
            role: Role::from_spec(&spec.role),
        }
    }

    /// Build a ship of `kind` with that kind's standard parameters.
    pub fn from_kind(id: EntityId, name: impl Into<String>, kind: ShipKind, position: Point) -> Self {
        Self::new(id, name, position, &ShipSpec::for_kind(kind))
    }

    #[must_use]
    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    #[must_use]
    pub fn kind(&self) -> ShipKind {
        self.role.kind()
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.hull.id()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.hull.name()
    }

    #[must_use]
    pub fn location(&self) -> Point {
        self.hull.location()
    }

    #[must_use]
    pub fn state(&self) -> ShipState {
        self.hull.state()
    }

    #[must_use]
    pub fn fuel(&self) -> f64 {
        self.hull.fuel()
    }

    #[must_use]
    pub fn course_speed(&self) -> CourseSpeed {
        self.hull.course_speed()
    }

    #[must_use]
    pub fn is_afloat(&self) -> bool {
        self.hull.is_afloat()
    }

    #[must_use]
    pub fn can_move(&self) -> bool {
        self.hull.can_move()
    }

    #[must_use]
    pub fn warship(&self) -> Option<&Warship> {
        match &self.role {
            Role::Warship(warship) => Some(warship),
            _ => None,
        }
    }

    #[must_use]
    pub fn tanker(&self) -> Option<&Tanker> {
        match &self.role {
            Role::Tanker(tanker) => Some(tanker),
            _ => None,
        }
    }

    #[must_use]
    pub fn cruise_ship(&self) -> Option<&CruiseShip> {
        match &self.role {
            Role::CruiseShip(cruise) => Some(cruise),
            _ => None,
        }
    }

    // === Navigation ===

    pub fn set_destination_position_and_speed(
        &mut self,
        destination: Point,
        speed: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        let hull = &mut self.hull;
        match &mut self.role {
            Role::Tanker(tanker) => tanker.set_destination_position_and_speed(hull, destination, speed, ctx),
            Role::CruiseShip(cruise) => cruise.set_destination_position_and_speed(hull, destination, speed, ctx),
            Role::Warship(_) => hull.set_destination_position_and_speed(destination, speed, ctx),
        }
    }

    pub fn set_course_and_speed(
        &mut self,
        course: f64,
        speed: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        let hull = &mut self.hull;
        match &mut self.role {
            Role::Tanker(tanker) => tanker.set_course_and_speed(hull, course, speed, ctx),
            Role::CruiseShip(cruise) => cruise.set_course_and_speed(hull, course, speed, ctx),
            Role::Warship(_) => hull.set_course_and_speed(course, speed, ctx),
        }
    }

    pub fn stop(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let hull = &mut self.hull;
        match &mut self.role {
            Role::Tanker(tanker) => tanker.stop(hull, ctx),
            Role::CruiseShip(cruise) => cruise.stop(hull, ctx),
            Role::Warship(_) => hull.stop(ctx),
        }
    }

    pub fn dock(&mut self, island: EntityId, ctx: &mut SimContext<'_>) -> SimResult<()> {
        self.hull.dock(island, ctx)
    }

    pub fn refuel(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        self.hull.refuel(ctx)
    }

    // === Cargo ===

    pub fn set_load_destination(&mut self, island: EntityId, ctx: &mut SimContext<'_>) -> SimResult<()> {
        match &mut self.role {
            Role::Tanker(tanker) => tanker.set_load_destination(&mut self.hull, island, ctx),
            _ => Err(SimError::Unsupported("load at a destination")),
        }
    }

    pub fn set_unload_destination(&mut self, island: EntityId, ctx: &mut SimContext<'_>) -> SimResult<()> {
        match &mut self.role {
            Role::Tanker(tanker) => tanker.set_unload_destination(&mut self.hull, island, ctx),
            _ => Err(SimError::Unsupported("unload at a destination")),
        }
    }

    // === Combat ===

    /// Start attacking `target`. The caller checks the target exists.
    pub fn attack(&mut self, target: EntityId) -> SimResult<()> {
        match &mut self.role {
            Role::Warship(warship) => warship.attack(&self.hull, target),
            _ => Err(SimError::Unsupported("attack")),
        }
    }

    pub fn stop_attack(&mut self) -> SimResult<()> {
        match &mut self.role {
            Role::Warship(warship) => warship.stop_attack(&self.hull),
            _ => Err(SimError::Unsupported("attack")),
        }
    }

    /// Take a hit. An idle warship that survives turns on its attacker.
    pub fn receive_hit(&mut self, force: i32, attacker: EntityId, ctx: &mut SimContext<'_>) {
        self.hull.receive_hit(force, attacker, ctx);
        if let Role::Warship(warship) = &mut self.role {
            warship.retaliate(&self.hull, attacker);
        }
    }

    // === Tick ===

    /// Move, then run the role's step. `fleet` holds every other ship.
    pub fn update(&mut self, ctx: &mut SimContext<'_>, fleet: &mut Fleet) {
        self.hull.update(ctx);
        match &mut self.role {
            Role::Warship(warship) => warship.update(&self.hull, ctx, fleet),
            Role::Tanker(tanker) => tanker.update(&mut self.hull, ctx),
            Role::CruiseShip(cruise) => cruise.update(&mut self.hull, ctx),
        }
    }
}

impl SimObject for Ship {
    fn name(&self) -> &str {
        self.hull.name()
    }

    fn location(&self) -> Point {
        self.hull.location()
    }

    fn describe(&self, directory: &dyn Directory) -> String {
        let mut out = format!("{} {}", self.kind(), self.hull.describe(directory));
        let extra = match &self.role {
            Role::Warship(warship) => warship.describe(&self.hull, directory),
            Role::Tanker(tanker) => Some(tanker.describe(directory)),
            Role::CruiseShip(cruise) => cruise.describe(directory),
        };
        if let Some(line) = extra {
            out.push('\n');
            out.push_str(&line);
        }
        out
    }

    fn broadcast_current_state(&self, events: &mut Vec<Notification>) {
        self.hull.broadcast_current_state(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Island, Islands};

    fn world() -> (Islands, Vec<Notification>, Fleet) {
        let mut islands = Islands::new();
        islands.insert(Island::new(EntityId(10), "Exxon", Point::new(10.0, 10.0), 1000.0, 0.0));
        (islands, Vec::new(), Fleet::default())
    }

    #[test]
    fn test_from_kind_uses_standard_parameters() {
        let tanker = Ship::from_kind(EntityId(1), "Valdez", ShipKind::Tanker, Point::new(30.0, 30.0));
        assert_eq!(tanker.kind(), ShipKind::Tanker);
        assert_eq!(tanker.fuel(), 100.0);
        assert_eq!(tanker.hull().maximum_speed(), 10.0);
        assert_eq!(tanker.tanker().map(Tanker::cargo_capacity), Some(1000.0));

        let cruiser = Ship::from_kind(EntityId(2), "Ajax", ShipKind::Cruiser, Point::new(15.0, 15.0));
        assert_eq!(cruiser.hull().resistance(), 6);
        assert_eq!(cruiser.warship().map(Warship::firepower), Some(3));
    }

    #[test]
    fn test_unsupported_commands() {
        let (mut islands, mut events, _) = world();
        let mut ctx = SimContext::new(&mut islands, &mut events);
        let mut cruiser = Ship::from_kind(EntityId(1), "Ajax", ShipKind::Cruiser, Point::new(0.0, 0.0));
        let mut tanker = Ship::from_kind(EntityId(2), "Valdez", ShipKind::Tanker, Point::new(0.0, 0.0));

        assert_eq!(
            cruiser.set_load_destination(EntityId(10), &mut ctx),
            Err(SimError::Unsupported("load at a destination"))
        );
        assert_eq!(
            cruiser.set_unload_destination(EntityId(10), &mut ctx),
            Err(SimError::Unsupported("unload at a destination"))
        );
        assert_eq!(tanker.attack(EntityId(1)), Err(SimError::Unsupported("attack")));
        assert_eq!(tanker.stop_attack(), Err(SimError::Unsupported("attack")));
    }

    #[test]
    fn test_hit_makes_idle_warship_retaliate() {
        let (mut islands, mut events, _) = world();
        let mut ctx = SimContext::new(&mut islands, &mut events);
        let mut cruiser = Ship::from_kind(EntityId(1), "Ajax", ShipKind::Cruiser, Point::new(0.0, 0.0));

        cruiser.receive_hit(1, EntityId(7), &mut ctx);
        assert!(cruiser.is_afloat());
        assert_eq!(cruiser.warship().and_then(Warship::target), Some(EntityId(7)));
    }

    #[test]
    fn test_warship_fires_at_ship_in_fleet() {
        let (mut islands, mut events, mut fleet) = world();
        let mut ctx = SimContext::new(&mut islands, &mut events);
        let mut ajax = Ship::from_kind(EntityId(1), "Ajax", ShipKind::Cruiser, Point::new(0.0, 0.0));
        let valdez = Ship::from_kind(EntityId(2), "Valdez", ShipKind::Tanker, Point::new(0.0, 10.0));
        fleet.insert(valdez.id(), valdez);

        ajax.attack(EntityId(2)).unwrap();
        ajax.update(&mut ctx, &mut fleet);

        // Zero resistance: the first hit sinks it
        assert_eq!(fleet[&EntityId(2)].state(), ShipState::Sunk);

        ajax.update(&mut ctx, &mut fleet);
        assert!(!ajax.warship().is_some_and(Warship::is_attacking));
    }

    #[test]
    fn test_describe_names_kind() {
        let (islands, _, _) = world();
        let ship = Ship::from_kind(EntityId(1), "Queen", ShipKind::CruiseShip, Point::new(1.0, 1.0));
        let text = ship.describe(&islands);
        assert!(text.starts_with("Cruise_ship Queen at (1.00, 1.00)"));
    }
}
