//! Compass navigation and dead reckoning.
//!
//! Courses and bearings are compass degrees: 0 is north, 90 is east,
//! increasing clockwise, always normalized into `[0, 360)`.
//!
//! ```
//! use fleet_sim::geometry::{CourseSpeed, Point, Track};
//!
//! let mut track = Track::new(Point::new(0.0, 0.0));
//! track.set_course_speed(CourseSpeed::new(90.0, 10.0));
//! track.update_position(1.0);
//!
//! let p = track.position();
//! assert!((p.x - 10.0).abs() < 1e-9);
//! assert!(p.y.abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::point::{CartesianVector, Point};

/// Normalize an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// A heading and a speed in knots (nm per tick).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseSpeed {
    pub course: f64,
    pub speed: f64,
}

impl CourseSpeed {
    /// Create a course/speed pair. The course is normalized.
    #[must_use]
    pub fn new(course: f64, speed: f64) -> Self {
        Self {
            course: normalize_degrees(course),
            speed,
        }
    }
}

impl std::fmt::Display for CourseSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "course {:.2} deg, speed {:.2} kts", self.course, self.speed)
    }
}

/// A displacement expressed as compass direction and distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompassVector {
    pub direction: f64,
    pub distance: f64,
}

impl CompassVector {
    /// Create a compass vector. The direction is normalized.
    #[must_use]
    pub fn new(direction: f64, distance: f64) -> Self {
        Self {
            direction: normalize_degrees(direction),
            distance,
        }
    }

    /// The vector from `from` to `to`.
    ///
    /// A zero-length vector has direction 0.
    #[must_use]
    pub fn between(from: Point, to: Point) -> Self {
        let delta = to - from;
        let distance = delta.length();
        if distance == 0.0 {
            return Self::new(0.0, 0.0);
        }
        let direction = delta.delta_x.atan2(delta.delta_y).to_degrees();
        Self::new(direction, distance)
    }
}

impl From<CompassVector> for CartesianVector {
    fn from(cv: CompassVector) -> Self {
        let radians = cv.direction.to_radians();
        CartesianVector::new(cv.distance * radians.sin(), cv.distance * radians.cos())
    }
}

/// Bearing and range from an observer to a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompassPosition {
    pub bearing: f64,
    pub range: f64,
}

impl CompassPosition {
    /// True bearing and range from `observer` to `target`.
    #[must_use]
    pub fn new(observer: Point, target: Point) -> Self {
        let cv = CompassVector::between(observer, target);
        Self {
            bearing: cv.direction,
            range: cv.distance,
        }
    }

    /// Bearing measured from a reference heading instead of north.
    #[must_use]
    pub fn relative(observer: Point, heading: f64, target: Point) -> Self {
        let absolute = Self::new(observer, target);
        Self {
            bearing: normalize_degrees(absolute.bearing - heading),
            range: absolute.range,
        }
    }
}

impl std::fmt::Display for CompassPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bearing {:.2} deg, range {:.2} nm", self.bearing, self.range)
    }
}

/// Position plus course and speed, projected forward by dead reckoning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    position: Point,
    course_speed: CourseSpeed,
}

impl Track {
    /// A stationary track at `position`.
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self {
            position,
            course_speed: CourseSpeed::default(),
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn course_speed(&self) -> CourseSpeed {
        self.course_speed
    }

    #[must_use]
    pub fn course(&self) -> f64 {
        self.course_speed.course
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.course_speed.speed
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_course(&mut self, course: f64) {
        self.course_speed.course = normalize_degrees(course);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.course_speed.speed = speed;
    }

    pub fn set_course_speed(&mut self, course_speed: CourseSpeed) {
        self.course_speed = CourseSpeed::new(course_speed.course, course_speed.speed);
    }

    /// Move along the current course for `time` ticks.
    pub fn update_position(&mut self, time: f64) {
        let leg = CompassVector::new(self.course_speed.course, self.course_speed.speed * time);
        self.position += CartesianVector::from(leg);
    }
}
