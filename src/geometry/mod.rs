//! Geometry and navigation primitives.
//!
//! Pure value types and functions: points, displacement vectors, compass
//! headings, bearing/range, and the dead-reckoning `Track` every ship moves
//! with. One unit of time is one tick.

pub mod navigation;
pub mod point;

pub use navigation::{normalize_degrees, CompassPosition, CompassVector, CourseSpeed, Track};
pub use point::{cartesian_distance, CartesianVector, Point};
