//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use fleet_sim::{IslandSpec, Model, Point, Scenario, StatusTable};

/// Route `tracing` output to the test harness. Set `RUST_LOG=debug` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The classic islands with no ships.
pub fn islands_only() -> Model {
    let scenario = Scenario {
        islands: Scenario::default_world().islands,
        ships: Vec::new(),
    };
    Model::from_scenario(&scenario).unwrap()
}

/// Two islands ten miles apart on the y axis.
pub fn two_islands(load_fuel: f64) -> Model {
    let mut model = Model::new();
    model
        .add_island(&IslandSpec::new("Exxon", Point::new(0.0, 0.0)).with_fuel(load_fuel))
        .unwrap();
    model
        .add_island(&IslandSpec::new("Bermuda", Point::new(0.0, 10.0)))
        .unwrap();
    model
}

pub fn attach_table(model: &mut Model) -> Rc<RefCell<StatusTable>> {
    let table = Rc::new(RefCell::new(StatusTable::new()));
    model.attach(table.clone());
    table
}

pub fn run(model: &mut Model, ticks: usize) {
    for _ in 0..ticks {
        model.update();
    }
}
