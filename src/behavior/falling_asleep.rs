use super::{pointer_beckons, roaming, Mode};
use crate::creature::{Emotion, Leg, PointerSample, Position, Surface};

/// Per-tick speed decrease while dozing off.
const SPEED_STEP: f64 = 0.002;

/// Ramp down towards a standstill.
pub fn speed(current: f64) -> f64 {
    (current - SPEED_STEP).max(0.0)
}

pub fn update_position(
    position: &Position,
    pointer: &PointerSample,
    surface: &Surface,
    rng: &mut fastrand::Rng,
) -> Position {
    let heading = roaming::direction(position.direction, rng);
    let next = roaming::translate(position, pointer, surface, speed(position.speed), heading);
    Position {
        emotion: Emotion::Yawning,
        ..next
    }
}

pub fn update_leg(leg: &Leg, position: &Position, rng: &mut fastrand::Rng) -> Leg {
    roaming::update_leg(leg, position, rng)
}

pub fn next_mode(position: &Position, pointer: &PointerSample) -> Mode {
    if pointer_beckons(position, pointer) {
        Mode::Chasing
    } else if position.speed == 0.0 {
        Mode::Sleeping
    } else {
        Mode::FallingAsleep
    }
}
