//! The simulation registry.
//!
//! [`Model`] owns every island and ship, resolves names to entities, drives
//! the tick, and fans state changes out to attached observers.
//!
//! Notifications raised while a command or tick runs are queued and
//! delivered once it completes, so observers never see a half-applied step.

mod observers;
mod world;

pub use observers::SharedObserver;
pub use world::Model;
