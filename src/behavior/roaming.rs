use std::f64::consts::TAU;

use super::{chasing, pointer_beckons, Mode};
use crate::creature::{Emotion, Leg, PointerSample, Position, Surface};
use crate::geometry;

/// Per-tick probability of picking a brand new heading.
const TURN_CHANCE: f64 = 0.01;
/// Per-tick speed increase while roaming.
const SPEED_STEP: f64 = 0.001;
/// Roaming speed cap.
const MAX_SPEED: f64 = 1.0;
/// Minimum distance (px) kept from every surface edge.
pub const EDGE_MARGIN: f64 = 10.0;
/// Ticks of roaming before the creature starts to doze off.
const DOZE_AFTER: u32 = 6000;

/// Ramp up towards [`MAX_SPEED`].
pub fn speed(current: f64) -> f64 {
    (current + SPEED_STEP).min(MAX_SPEED)
}

/// Usually keep the heading; occasionally turn to a random one.
pub fn direction(current: f64, rng: &mut fastrand::Rng) -> f64 {
    if rng.f64() < TURN_CHANCE {
        rng.f64() * TAU
    } else {
        current
    }
}

/// Chasing's step, kept inside the surface, with distance re-measured and the
/// counter advanced. Emotion is left to the caller.
pub fn translate(
    position: &Position,
    pointer: &PointerSample,
    surface: &Surface,
    speed: f64,
    direction: f64,
) -> Position {
    let stepped = chasing::step(position, speed, direction);
    let anchor = surface.clamp_inside(stepped.anchor(), EDGE_MARGIN);

    Position {
        x: anchor.x,
        y: anchor.y,
        distance: geometry::distance(anchor, pointer.pos()),
        time: position.time + 1,
        ..stepped
    }
}

pub fn update_position(
    position: &Position,
    pointer: &PointerSample,
    surface: &Surface,
    rng: &mut fastrand::Rng,
) -> Position {
    let heading = direction(position.direction, rng);
    let next = translate(position, pointer, surface, speed(position.speed), heading);

    // Mood reflects how fast we were going a moment ago.
    let emotion = if position.speed == MAX_SPEED {
        Emotion::Worried
    } else {
        Emotion::Smirking
    };
    Position { emotion, ..next }
}

pub fn update_leg(leg: &Leg, position: &Position, rng: &mut fastrand::Rng) -> Leg {
    chasing::update_leg(leg, position, rng)
}

pub fn next_mode(position: &Position, pointer: &PointerSample) -> Mode {
    if pointer_beckons(position, pointer) {
        Mode::Chasing
    } else if position.time > DOZE_AFTER {
        Mode::FallingAsleep
    } else {
        Mode::Roaming
    }
}
