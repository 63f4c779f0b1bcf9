//! Points and Cartesian displacement vectors.
//!
//! Coordinates are in nautical miles on a flat plane: `x` grows to the east,
//! `y` grows to the north.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A location on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        cartesian_distance(self, other)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn cartesian_distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// A displacement in Cartesian components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianVector {
    pub delta_x: f64,
    pub delta_y: f64,
}

impl CartesianVector {
    /// Create a vector from its components.
    #[must_use]
    pub const fn new(delta_x: f64, delta_y: f64) -> Self {
        Self { delta_x, delta_y }
    }

    /// Length of the vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.delta_x.hypot(self.delta_y)
    }
}

impl Sub for Point {
    type Output = CartesianVector;

    fn sub(self, rhs: Point) -> CartesianVector {
        CartesianVector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<CartesianVector> for Point {
    type Output = Point;

    fn add(self, rhs: CartesianVector) -> Point {
        Point::new(self.x + rhs.delta_x, self.y + rhs.delta_y)
    }
}

impl AddAssign<CartesianVector> for Point {
    fn add_assign(&mut self, rhs: CartesianVector) {
        self.x += rhs.delta_x;
        self.y += rhs.delta_y;
    }
}

impl Mul<f64> for CartesianVector {
    type Output = CartesianVector;

    fn mul(self, rhs: f64) -> CartesianVector {
        CartesianVector::new(self.delta_x * rhs, self.delta_y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(cartesian_distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance_to(Point::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(10.0, 10.0);
        let q = Point::new(13.0, 14.0);

        let v = q - p;
        assert_eq!(v, CartesianVector::new(3.0, 4.0));
        assert_eq!(v.length(), 5.0);
        assert_eq!(p + v, q);

        let mut r = p;
        r += v * 2.0;
        assert_eq!(r, Point::new(16.0, 18.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Point::new(1.0, 2.5)), "(1.00, 2.50)");
    }
}
