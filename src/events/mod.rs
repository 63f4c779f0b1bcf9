//! Change notification for observers.
//!
//! ## Key Components
//!
//! - [`Notification`]: one state change (location, fuel, course/speed, gone)
//! - [`Observer`]: receiver interface implemented by views
//! - [`StatusTable`]: an observer that remembers the latest state per object
//!
//! ## Example Usage
//!
//! ```
//! use fleet_sim::events::{Notification, Observer, StatusTable};
//! use fleet_sim::geometry::Point;
//!
//! let mut table = StatusTable::new();
//! table.notify(&Notification::location("Exxon", Point::new(10.0, 10.0)));
//!
//! assert_eq!(table.get("Exxon").unwrap().location, Some(Point::new(10.0, 10.0)));
//! ```

mod notification;
mod observer;

pub use notification::{Notification, NotificationKind};
pub use observer::{ObjectStatus, Observer, ObserverId, StatusTable};
