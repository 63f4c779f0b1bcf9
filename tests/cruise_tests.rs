//! Cruise ship touring over the classic islands.

mod common;

use fleet_sim::{CruiseShip, CruiseState, Model, Point, ShipState, SimObject};

fn cruise_state(model: &Model) -> CruiseState {
    model.ship("Queen").unwrap().cruise_ship().map(CruiseShip::state).unwrap()
}

/// Island the ship is docked at, if any.
fn docked_at(model: &Model) -> Option<String> {
    let ship = model.ship("Queen").unwrap();
    ship.hull()
        .docked_at()
        .and_then(|id| model.island_by_id(id))
        .map(|island| island.name().to_string())
}

#[test]
fn test_tour_visits_every_island_nearest_first() {
    common::init_tracing();
    let mut model = common::islands_only();
    model.create_ship("Queen", "Cruise_ship", Point::new(0.0, 0.0)).unwrap();
    model.set_destination_island("Queen", "Exxon", 15.0).unwrap();
    assert_eq!(cruise_state(&model), CruiseState::Moving);

    let mut visits: Vec<String> = Vec::new();
    for _ in 0..200 {
        model.update();
        if let Some(island) = docked_at(&model) {
            if visits.last() != Some(&island) {
                visits.push(island);
            }
        }
        if cruise_state(&model) == CruiseState::NoDestination {
            break;
        }
    }

    assert_eq!(
        visits,
        vec!["Exxon", "Bermuda", "Shell", "Treasure_Island", "Exxon"]
    );
    assert_eq!(cruise_state(&model), CruiseState::NoDestination);
    assert_eq!(model.ship("Queen").unwrap().state(), ShipState::Docked);
    assert!(model.ship("Queen").unwrap().cruise_ship().unwrap().path().is_empty());
}

#[test]
fn test_stop_cancels_tour() {
    let mut model = common::islands_only();
    model.create_ship("Queen", "Cruise_ship", Point::new(0.0, 0.0)).unwrap();
    model.set_destination_island("Queen", "Shell", 10.0).unwrap();
    model.update();

    model.stop("Queen").unwrap();
    assert_eq!(cruise_state(&model), CruiseState::NoDestination);
    assert_eq!(model.ship("Queen").unwrap().state(), ShipState::Stopped);
}

#[test]
fn test_course_change_cancels_tour() {
    let mut model = common::islands_only();
    model.create_ship("Queen", "Cruise_ship", Point::new(0.0, 0.0)).unwrap();
    model.set_destination_island("Queen", "Shell", 10.0).unwrap();

    model.set_course("Queen", 180.0, 5.0).unwrap();
    assert_eq!(cruise_state(&model), CruiseState::NoDestination);
    assert_eq!(model.ship("Queen").unwrap().state(), ShipState::MovingOnCourse);
}

#[test]
fn test_open_water_destination_is_not_a_tour() {
    let mut model = common::islands_only();
    model.create_ship("Queen", "Cruise_ship", Point::new(0.0, 0.0)).unwrap();
    model.set_destination("Queen", Point::new(5.0, 5.0), 10.0).unwrap();

    assert_eq!(cruise_state(&model), CruiseState::NoDestination);
    model.update();
    assert_eq!(model.ship("Queen").unwrap().state(), ShipState::Stopped);
    assert_eq!(cruise_state(&model), CruiseState::NoDestination);
}

#[test]
fn test_describe_reports_cruise() {
    let mut model = common::islands_only();
    model.create_ship("Queen", "Cruise_ship", Point::new(0.0, 0.0)).unwrap();
    model.set_destination_island("Queen", "Bermuda", 10.0).unwrap();

    let text = model.describe();
    assert!(text.contains("On cruise to Bermuda"), "{text}");
}
