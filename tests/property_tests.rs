//! Property tests: fuel, cargo, and island stocks stay in bounds under any
//! sequence of commands and ticks.

use fleet_sim::{Model, Point, Scenario, ShipState, Tanker};
use proptest::prelude::*;

const SHIPS: [&str; 5] = ["Ajax", "Xerxes", "Valdez", "Queen", "Exxon_Valdez"];
const ISLANDS: [&str; 4] = ["Exxon", "Shell", "Bermuda", "Treasure_Island"];

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
enum Command {
    Course(usize, f64, f64),
    Destination(usize, f64, f64, f64),
    ToIsland(usize, usize, f64),
    Stop(usize),
    Dock(usize, usize),
    Refuel(usize),
    Load(usize, usize),
    Unload(usize, usize),
    Attack(usize, usize),
    Tick,
}

fn arb_command() -> impl Strategy<Value = Command> {
    let ship = 0..SHIPS.len();
    let island = 0..ISLANDS.len();
    prop_oneof![
        1 => (ship.clone(), 0.0..360.0, 0.0..25.0).prop_map(|(s, c, v)| Command::Course(s, c, v)),
        1 => (ship.clone(), -10.0..60.0, -10.0..60.0, 0.0..25.0)
            .prop_map(|(s, x, y, v)| Command::Destination(s, x, y, v)),
        1 => (ship.clone(), island.clone(), 1.0..20.0).prop_map(|(s, i, v)| Command::ToIsland(s, i, v)),
        1 => ship.clone().prop_map(Command::Stop),
        1 => (ship.clone(), island.clone()).prop_map(|(s, i)| Command::Dock(s, i)),
        1 => ship.clone().prop_map(Command::Refuel),
        1 => (ship.clone(), island.clone()).prop_map(|(s, i)| Command::Load(s, i)),
        1 => (ship.clone(), island).prop_map(|(s, i)| Command::Unload(s, i)),
        1 => (ship.clone(), ship).prop_map(|(a, b)| Command::Attack(a, b)),
        3 => Just(Command::Tick),
    ]
}

fn world() -> Model {
    let mut model = Model::from_scenario(&Scenario::default_world()).unwrap();
    model.create_ship("Queen", "Cruise_ship", Point::new(5.0, 5.0)).unwrap();
    model.create_ship("Exxon_Valdez", "Tanker", Point::new(10.0, 10.0)).unwrap();
    model
}

/// Run one command. Failures are expected and ignored.
fn apply(model: &mut Model, command: &Command) {
    let _ = match *command {
        Command::Course(s, course, speed) => model.set_course(SHIPS[s], course, speed),
        Command::Destination(s, x, y, speed) => model.set_destination(SHIPS[s], Point::new(x, y), speed),
        Command::ToIsland(s, i, speed) => model.set_destination_island(SHIPS[s], ISLANDS[i], speed),
        Command::Stop(s) => model.stop(SHIPS[s]),
        Command::Dock(s, i) => model.dock(SHIPS[s], ISLANDS[i]),
        Command::Refuel(s) => model.refuel(SHIPS[s]),
        Command::Load(s, i) => model.set_load_destination(SHIPS[s], ISLANDS[i]),
        Command::Unload(s, i) => model.set_unload_destination(SHIPS[s], ISLANDS[i]),
        Command::Attack(a, b) => model.attack(SHIPS[a], SHIPS[b]),
        Command::Tick => {
            model.update();
            Ok(())
        }
    };
}

fn check_bounds(model: &Model) -> Result<(), TestCaseError> {
    for ship in model.ships() {
        let hull = ship.hull();
        prop_assert!(hull.fuel() >= 0.0, "{} fuel {}", ship.name(), hull.fuel());
        prop_assert!(
            hull.fuel() <= hull.fuel_capacity(),
            "{} fuel {} over capacity",
            ship.name(),
            hull.fuel()
        );
        if let Some(tanker) = ship.tanker() {
            prop_assert!(tanker.cargo() >= 0.0);
            prop_assert!(tanker.cargo() <= tanker.cargo_capacity());
        }
    }
    for island in model.islands() {
        prop_assert!(island.fuel() >= 0.0);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_resources_stay_in_bounds(commands in prop::collection::vec(arb_command(), 1..120)) {
        let mut model = world();
        for command in &commands {
            apply(&mut model, command);
            check_bounds(&model)?;
        }
    }

    #[test]
    fn prop_no_sunk_ship_survives_a_tick(commands in prop::collection::vec(arb_command(), 1..80)) {
        let mut model = world();
        for command in &commands {
            apply(&mut model, command);
        }
        model.update();
        for ship in model.ships() {
            prop_assert!(ship.state() != ShipState::Sunk, "{} still listed", ship.name());
        }
    }

    #[test]
    fn prop_tanker_cycle_keeps_cargo_bounded(ticks in 1usize..60, load in 0..ISLANDS.len(), unload in 0..ISLANDS.len()) {
        let mut model = world();
        let _ = model.set_load_destination("Valdez", ISLANDS[load]);
        let _ = model.set_unload_destination("Valdez", ISLANDS[unload]);
        for _ in 0..ticks {
            model.update();
        }
        let valdez = model.ship("Valdez").unwrap();
        let cargo = valdez.tanker().map(Tanker::cargo).unwrap();
        prop_assert!((0.0..=1000.0).contains(&cargo));
    }
}
