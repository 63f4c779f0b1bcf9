//! Simulation configuration types.
//!
//! Worlds are configured at startup by providing:
//! - `ShipSpec`: performance parameters of one ship (hull plus role)
//! - `IslandSpec`: one island and its fuel economy
//! - `Scenario`: the islands and ships a model starts with
//!
//! Every type here is plain data with serde support, so scenarios can be
//! written by hand in JSON or built in code with the `with_*` helpers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SimError;
use crate::geometry::Point;

/// The ship types a factory can build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    Cruiser,
    Tanker,
    CruiseShip,
}

impl ShipKind {
    /// The type name used on the command line.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Tanker => "Tanker",
            ShipKind::CruiseShip => "Cruise_ship",
        }
    }
}

impl FromStr for ShipKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cruiser" => Ok(ShipKind::Cruiser),
            "Tanker" => Ok(ShipKind::Tanker),
            "Cruise_ship" => Ok(ShipKind::CruiseShip),
            other => Err(SimError::UnknownShipType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ShipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Role-specific parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoleSpec {
    /// Damage per shot and maximum engagement range in nm.
    Warship { firepower: i32, maximum_range: f64 },
    /// Cargo hold size in tons.
    Tanker { cargo_capacity: f64 },
    CruiseShip,
}

/// Performance parameters for one ship.
///
/// Ships start with a full tank.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipSpec {
    /// Tank size in tons.
    pub fuel_capacity: f64,

    /// Top speed in knots.
    pub maximum_speed: f64,

    /// Tons burned per nm.
    pub fuel_consumption: f64,

    /// Hit points. A hit that leaves this at or below zero sinks the ship.
    pub resistance: i32,

    pub role: RoleSpec,
}

impl ShipSpec {
    /// Standard cruiser: a warship.
    #[must_use]
    pub fn cruiser() -> Self {
        Self {
            fuel_capacity: 1000.0,
            maximum_speed: 20.0,
            fuel_consumption: 10.0,
            resistance: 6,
            role: RoleSpec::Warship {
                firepower: 3,
                maximum_range: 15.0,
            },
        }
    }

    /// Standard tanker.
    #[must_use]
    pub fn tanker() -> Self {
        Self {
            fuel_capacity: 100.0,
            maximum_speed: 10.0,
            fuel_consumption: 2.0,
            resistance: 0,
            role: RoleSpec::Tanker {
                cargo_capacity: 1000.0,
            },
        }
    }

    /// Standard cruise ship.
    #[must_use]
    pub fn cruise_ship() -> Self {
        Self {
            fuel_capacity: 500.0,
            maximum_speed: 15.0,
            fuel_consumption: 2.0,
            resistance: 0,
            role: RoleSpec::CruiseShip,
        }
    }

    /// Default parameters for a ship kind.
    #[must_use]
    pub fn for_kind(kind: ShipKind) -> Self {
        match kind {
            ShipKind::Cruiser => Self::cruiser(),
            ShipKind::Tanker => Self::tanker(),
            ShipKind::CruiseShip => Self::cruise_ship(),
        }
    }

    /// The kind these parameters describe.
    #[must_use]
    pub fn kind(&self) -> ShipKind {
        match self.role {
            RoleSpec::Warship { .. } => ShipKind::Cruiser,
            RoleSpec::Tanker { .. } => ShipKind::Tanker,
            RoleSpec::CruiseShip => ShipKind::CruiseShip,
        }
    }

    #[must_use]
    pub fn with_fuel_capacity(mut self, capacity: f64) -> Self {
        self.fuel_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_maximum_speed(mut self, speed: f64) -> Self {
        self.maximum_speed = speed;
        self
    }

    #[must_use]
    pub fn with_fuel_consumption(mut self, consumption: f64) -> Self {
        self.fuel_consumption = consumption;
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, resistance: i32) -> Self {
        self.resistance = resistance;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: RoleSpec) -> Self {
        self.role = role;
        self
    }
}

/// One island in a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IslandSpec {
    pub name: String,
    pub position: Point,

    /// Fuel on hand at startup.
    #[serde(default)]
    pub fuel: f64,

    /// Fuel added every tick.
    #[serde(default)]
    pub production_rate: f64,
}

impl IslandSpec {
    /// An island with no fuel and no production.
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            name: name.into(),
            position,
            fuel: 0.0,
            production_rate: 0.0,
        }
    }

    #[must_use]
    pub fn with_fuel(mut self, fuel: f64) -> Self {
        self.fuel = fuel;
        self
    }

    #[must_use]
    pub fn with_production_rate(mut self, rate: f64) -> Self {
        self.production_rate = rate;
        self
    }
}

/// One ship in a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipPlacement {
    pub name: String,
    pub kind: ShipKind,
    pub position: Point,

    /// Overrides the kind's default parameters.
    #[serde(default)]
    pub spec: Option<ShipSpec>,
}

impl ShipPlacement {
    pub fn new(name: impl Into<String>, kind: ShipKind, position: Point) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            spec: None,
        }
    }

    #[must_use]
    pub fn with_spec(mut self, spec: ShipSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Parameters this ship will be built with.
    #[must_use]
    pub fn resolved_spec(&self) -> ShipSpec {
        self.spec.unwrap_or_else(|| ShipSpec::for_kind(self.kind))
    }
}

/// Starting contents of a model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub islands: Vec<IslandSpec>,

    #[serde(default)]
    pub ships: Vec<ShipPlacement>,
}

impl Scenario {
    /// An empty scenario.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic starting world: four islands, two cruisers, one tanker.
    #[must_use]
    pub fn default_world() -> Self {
        Self::new()
            .with_island(
                IslandSpec::new("Exxon", Point::new(10.0, 10.0))
                    .with_fuel(1000.0)
                    .with_production_rate(200.0),
            )
            .with_island(
                IslandSpec::new("Shell", Point::new(0.0, 30.0))
                    .with_fuel(1000.0)
                    .with_production_rate(200.0),
            )
            .with_island(IslandSpec::new("Bermuda", Point::new(20.0, 20.0)))
            .with_island(
                IslandSpec::new("Treasure_Island", Point::new(50.0, 5.0))
                    .with_fuel(100.0)
                    .with_production_rate(5.0),
            )
            .with_ship(ShipPlacement::new("Ajax", ShipKind::Cruiser, Point::new(15.0, 15.0)))
            .with_ship(ShipPlacement::new("Xerxes", ShipKind::Cruiser, Point::new(25.0, 25.0)))
            .with_ship(ShipPlacement::new("Valdez", ShipKind::Tanker, Point::new(30.0, 30.0)))
    }

    #[must_use]
    pub fn with_island(mut self, island: IslandSpec) -> Self {
        self.islands.push(island);
        self
    }

    #[must_use]
    pub fn with_ship(mut self, ship: ShipPlacement) -> Self {
        self.ships.push(ship);
        self
    }
}
