//! Warship role: attack a target ship each tick while it stays in range.
//!
//! The target is held as an `EntityId` and looked up in the fleet every time
//! it is needed. A target that has been removed simply isn't found.
//!
//! Out-of-range targets are held, not dropped: the warship stays in
//! `Attacking` and fires again as soon as the range closes.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::hull::Hull;
use super::{Directory, Fleet, SimContext};
use crate::core::{EntityId, SimError, SimResult};
use crate::geometry::{cartesian_distance, CompassPosition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackState {
    NotAttacking,
    Attacking,
}

/// Combat state of a warship.
#[derive(Clone, Debug, PartialEq)]
pub struct Warship {
    firepower: i32,
    maximum_range: f64,
    state: AttackState,
    target: Option<EntityId>,
}

impl Warship {
    #[must_use]
    pub fn new(firepower: i32, maximum_range: f64) -> Self {
        Self {
            firepower,
            maximum_range,
            state: AttackState::NotAttacking,
            target: None,
        }
    }

    #[must_use]
    pub fn firepower(&self) -> i32 {
        self.firepower
    }

    #[must_use]
    pub fn maximum_range(&self) -> f64 {
        self.maximum_range
    }

    #[must_use]
    pub fn state(&self) -> AttackState {
        self.state
    }

    #[must_use]
    pub fn is_attacking(&self) -> bool {
        self.state == AttackState::Attacking
    }

    /// Handle of the current target. It may no longer exist.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Start attacking `target`.
    pub fn attack(&mut self, hull: &Hull, target: EntityId) -> SimResult<()> {
        if !hull.is_afloat() {
            return Err(SimError::CannotAttack);
        }
        if target == hull.id() {
            return Err(SimError::SelfAttack);
        }
        if self.is_attacking() && self.target == Some(target) {
            return Err(SimError::AlreadyAttacking);
        }
        self.engage(hull, target);
        Ok(())
    }

    fn engage(&mut self, hull: &Hull, target: EntityId) {
        self.target = Some(target);
        self.state = AttackState::Attacking;
        info!(ship = %hull.name(), %target, "will attack");
    }

    pub fn stop_attack(&mut self, hull: &Hull) -> SimResult<()> {
        if !self.is_attacking() {
            return Err(SimError::NotAttacking);
        }
        self.clear_target();
        info!(ship = %hull.name(), "stopping attack");
        Ok(())
    }

    fn clear_target(&mut self) {
        self.state = AttackState::NotAttacking;
        self.target = None;
    }

    /// Combat step, run after the hull has moved.
    pub fn update(&mut self, hull: &Hull, ctx: &mut SimContext<'_>, fleet: &mut Fleet) {
        if !self.is_attacking() {
            return;
        }
        let target = self.target.and_then(|id| fleet.get_mut(&id));
        let target = match target {
            Some(target) if hull.is_afloat() && target.is_afloat() => target,
            _ => {
                self.clear_target();
                info!(ship = %hull.name(), "target gone, stopping attack");
                return;
            }
        };

        let range = cartesian_distance(hull.location(), target.location());
        if range <= self.maximum_range {
            info!(ship = %hull.name(), target = %target.name(), range, "fires");
            target.receive_hit(self.firepower, hull.id(), ctx);
        } else {
            info!(ship = %hull.name(), target = %target.name(), range, "target out of range");
        }
    }

    /// A hit while idle makes us shoot back.
    pub fn retaliate(&mut self, hull: &Hull, attacker: EntityId) {
        if hull.is_afloat() && !self.is_attacking() && attacker != hull.id() {
            self.engage(hull, attacker);
        }
    }

    /// Attack status line, with relative bearing and range to the target.
    #[must_use]
    pub fn describe(&self, hull: &Hull, directory: &dyn Directory) -> Option<String> {
        if !self.is_attacking() {
            return None;
        }
        let name = self.target.and_then(|id| directory.name_of(id));
        let location = self.target.and_then(|id| directory.location_of(id));
        Some(match (name, location) {
            (Some(name), Some(location)) => format!(
                "Attacking {name}, {}",
                CompassPosition::relative(hull.location(), hull.course_speed().course, location)
            ),
            (Some(name), None) => format!("Attacking {name}"),
            (None, _) => "Attacking absent ship".to_string(),
        })
    }
}
