use glam::DVec2;

use super::Position;
use crate::geometry;

/// Shortest lifetime a freshly drawn leg gets.
pub const MIN_LIFE: f64 = 100.0;
/// Longest lifetime a freshly drawn leg gets.
pub const MAX_LIFE: f64 = 300.0;
/// Default length range for a freshly drawn leg.
pub const LEG_SIZE_RANGE: (f64, f64) = (50.0, 200.0);
/// Max deviation (radians) of a new leg from the heading, either side.
const ANGLE_SPREAD: f64 = 0.65;
/// Fixed per-tick aging while asleep.
const SLEEP_AGING: f64 = 0.5;
/// How far an expired leg retracts while asleep.
const CONTRACTION_STEP: f64 = 20.0;

/// A single tentacle segment anchored at the creature.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Leg {
    pub start: DVec2,
    pub end: DVec2,
    pub age: f64,
    pub life: f64,
    pub length: f64,
}

impl Leg {
    pub fn expired(&self) -> bool {
        self.age > self.life
    }

    /// Re-anchor at `anchor` and refresh the cached length.
    fn anchored(mut self, anchor: DVec2) -> Self {
        self.start = anchor;
        self.length = geometry::distance(self.start, self.end);
        self
    }
}

/// Age a leg by the creature's speed, redrawing it once it outlives its life.
pub fn advance(leg: &Leg, position: &Position, rng: &mut fastrand::Rng) -> Leg {
    advance_in_range(leg, position, LEG_SIZE_RANGE, rng)
}

/// [`advance`] with an explicit length range for redrawn legs.
pub fn advance_in_range(
    leg: &Leg,
    position: &Position,
    size_range: (f64, f64),
    rng: &mut fastrand::Rng,
) -> Leg {
    let anchor = position.anchor();
    let mut next = *leg;

    if leg.expired() {
        next.life = uniform(rng, MIN_LIFE, MAX_LIFE);
        let spread = uniform(rng, -ANGLE_SPREAD, ANGLE_SPREAD);
        let length = uniform(rng, size_range.0, size_range.1);
        next.end = geometry::point_at_offset(anchor, position.direction + spread, length);
        next.age = 0.0;
    } else {
        next.age += position.speed;
    }

    next.anchored(anchor)
}

/// Follow the anchor without aging or redrawing.
pub fn hold(leg: &Leg, position: &Position) -> Leg {
    leg.anchored(position.anchor())
}

/// Sleep variant: age at a fixed rate and, on expiry, pull the endpoint
/// towards the anchor instead of redrawing it.
pub fn contract(leg: &Leg, position: &Position) -> Leg {
    let mut next = leg.anchored(position.anchor());

    if leg.expired() {
        if next.length > CONTRACTION_STEP {
            let heading = geometry::angle(next.start, next.end);
            next.end = geometry::point_at_offset(
                next.start,
                heading,
                next.length - CONTRACTION_STEP,
            );
        }
        next.age = 0.0;
    } else {
        next.age += SLEEP_AGING;
    }

    next.anchored(next.start)
}

fn uniform(rng: &mut fastrand::Rng, lo: f64, hi: f64) -> f64 {
    lo + rng.f64() * (hi - lo)
}
