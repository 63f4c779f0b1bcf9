//! Observers of simulation state.
//!
//! An observer is anything that wants to keep a picture of the world up to
//! date: a map renderer, a status table, a test probe. The model calls the
//! `update_*` callbacks; drawing and clearing are left to whoever owns the
//! observer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::notification::Notification;
use crate::geometry::{CourseSpeed, Point};

/// Handle returned by `Model::attach`, used to detach later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObserverId(pub u32);

impl ObserverId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observer({})", self.0)
    }
}

/// Receiver of state-change notifications.
///
/// Only `update_remove` is required; observers ignore the kinds of change
/// they do not display.
pub trait Observer {
    /// The named object is now at `location`.
    fn update_location(&mut self, _name: &str, _location: Point) {}

    /// The named object now holds `fuel` tons.
    fn update_fuel(&mut self, _name: &str, _fuel: f64) {}

    /// The named object is now steering `course_speed`.
    fn update_course_speed(&mut self, _name: &str, _course_speed: CourseSpeed) {}

    /// Forget the named object. Not an error if it is unknown.
    fn update_remove(&mut self, name: &str);

    /// Route a notification to the matching callback.
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::Location { name, location } => self.update_location(name, *location),
            Notification::Fuel { name, fuel } => self.update_fuel(name, *fuel),
            Notification::CourseSpeed { name, course_speed } => {
                self.update_course_speed(name, *course_speed);
            }
            Notification::Gone { name } => self.update_remove(name),
        }
    }
}

/// Last known state of one object, as seen by a `StatusTable`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectStatus {
    pub location: Option<Point>,
    pub fuel: Option<f64>,
    pub course_speed: Option<CourseSpeed>,
}

/// An observer that remembers the latest reported state of every object.
#[derive(Clone, Debug, Default)]
pub struct StatusTable {
    entries: BTreeMap<String, ObjectStatus>,
}

impl StatusTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known state of `name`, if it has been reported.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ObjectStatus> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Discard everything remembered so far.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry(&mut self, name: &str) -> &mut ObjectStatus {
        self.entries.entry(name.to_string()).or_default()
    }
}

impl Observer for StatusTable {
    fn update_location(&mut self, name: &str, location: Point) {
        self.entry(name).location = Some(location);
    }

    fn update_fuel(&mut self, name: &str, fuel: f64) {
        self.entry(name).fuel = Some(fuel);
    }

    fn update_course_speed(&mut self, name: &str, course_speed: CourseSpeed) {
        self.entry(name).course_speed = Some(course_speed);
    }

    fn update_remove(&mut self, name: &str) {
        self.entries.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table_records_latest() {
        let mut table = StatusTable::new();

        table.notify(&Notification::location("Ajax", Point::new(1.0, 1.0)));
        table.notify(&Notification::location("Ajax", Point::new(2.0, 3.0)));
        table.notify(&Notification::fuel("Ajax", 900.0));

        let status = table.get("Ajax").unwrap();
        assert_eq!(status.location, Some(Point::new(2.0, 3.0)));
        assert_eq!(status.fuel, Some(900.0));
        assert_eq!(status.course_speed, None);
    }

    #[test]
    fn test_status_table_remove_and_clear() {
        let mut table = StatusTable::new();
        table.notify(&Notification::location("Ajax", Point::new(0.0, 0.0)));
        table.notify(&Notification::location("Exxon", Point::new(10.0, 10.0)));

        table.notify(&Notification::gone("Ajax"));
        assert!(!table.contains("Ajax"));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Exxon"]);

        // Removing an unknown name is harmless
        table.update_remove("Nobody");

        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    fn test_default_callbacks_are_ignored() {
        struct RemovalsOnly(Vec<String>);

        impl Observer for RemovalsOnly {
            fn update_remove(&mut self, name: &str) {
                self.0.push(name.to_string());
            }
        }

        let mut probe = RemovalsOnly(Vec::new());
        probe.notify(&Notification::fuel("Ajax", 1.0));
        probe.notify(&Notification::gone("Ajax"));
        assert_eq!(probe.0, vec!["Ajax".to_string()]);
    }
}
