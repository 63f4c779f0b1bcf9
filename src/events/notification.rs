//! State-change notifications.
//!
//! Entities never talk to observers directly. They push `Notification`s into
//! the simulation context while they run, and the model fans the queued
//! values out to every attached observer once the command or tick is done.

use serde::{Deserialize, Serialize};

use crate::geometry::{CourseSpeed, Point};

/// What kind of change a notification reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    Location,
    Fuel,
    CourseSpeed,
    Gone,
}

/// A single display-relevant state change, keyed by entity name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    /// The entity is now at `location`.
    Location { name: String, location: Point },

    /// The entity now holds `fuel` tons.
    Fuel { name: String, fuel: f64 },

    /// The entity is now steering `course_speed`.
    CourseSpeed { name: String, course_speed: CourseSpeed },

    /// The entity has left the simulation.
    Gone { name: String },
}

impl Notification {
    /// Create a location notification.
    pub fn location(name: impl Into<String>, location: Point) -> Self {
        Self::Location {
            name: name.into(),
            location,
        }
    }

    /// Create a fuel notification.
    pub fn fuel(name: impl Into<String>, fuel: f64) -> Self {
        Self::Fuel {
            name: name.into(),
            fuel,
        }
    }

    /// Create a course/speed notification.
    pub fn course_speed(name: impl Into<String>, course_speed: CourseSpeed) -> Self {
        Self::CourseSpeed {
            name: name.into(),
            course_speed,
        }
    }

    /// Create a removal notification.
    pub fn gone(name: impl Into<String>) -> Self {
        Self::Gone { name: name.into() }
    }

    /// Name of the entity this notification is about.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Location { name, .. }
            | Self::Fuel { name, .. }
            | Self::CourseSpeed { name, .. }
            | Self::Gone { name } => name,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Location { .. } => NotificationKind::Location,
            Self::Fuel { .. } => NotificationKind::Fuel,
            Self::CourseSpeed { .. } => NotificationKind::CourseSpeed,
            Self::Gone { .. } => NotificationKind::Gone,
        }
    }
}
