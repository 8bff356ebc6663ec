use super::Mode;
use crate::creature::{leg, Emotion, Leg, PointerSample, Position, CATCH_DISTANCE};
use crate::geometry;

/// Ticks of chasing after which the creature looks exhausted.
const EXHAUSTED_AFTER: u32 = 1500;

/// Speed as a step function of the distance to the pointer.
pub fn speed(distance: f64) -> f64 {
    if distance <= 1.0 {
        0.0
    } else if distance <= 50.0 {
        1.0
    } else if distance <= 100.0 {
        2.0
    } else if distance <= 300.0 {
        3.0
    } else {
        5.0
    }
}

/// Heading straight at the pointer.
pub fn direction(position: &Position, pointer: &PointerSample) -> f64 {
    geometry::angle(position.anchor(), pointer.pos())
}

/// Move the anchor `speed` units along `direction`, recording both.
/// Distance, counter and emotion are left to the caller.
pub fn step(position: &Position, speed: f64, direction: f64) -> Position {
    let anchor = geometry::point_at_offset(position.anchor(), direction, speed);
    Position {
        x: anchor.x,
        y: anchor.y,
        speed,
        direction,
        ..*position
    }
}

pub fn update_position(position: &Position, pointer: &PointerSample) -> Position {
    let to_pointer = geometry::distance(position.anchor(), pointer.pos());
    let moved = step(position, speed(to_pointer), direction(position, pointer));
    let time = position.time + 1;

    Position {
        distance: geometry::distance(moved.anchor(), pointer.pos()),
        time,
        emotion: if time > EXHAUSTED_AFTER {
            Emotion::Exhausted
        } else {
            Emotion::Happy
        },
        ..moved
    }
}

pub fn update_leg(leg: &Leg, position: &Position, rng: &mut fastrand::Rng) -> Leg {
    leg::advance(leg, position, rng)
}

pub fn next_mode(position: &Position) -> Mode {
    if position.distance <= CATCH_DISTANCE {
        Mode::StandingStill
    } else {
        Mode::Chasing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(x: f64, y: f64) -> PointerSample {
        PointerSample { x, y, moved: true }
    }

    #[test]
    fn speed_steps_with_distance() {
        assert_eq!(speed(0.0), 0.0);
        assert_eq!(speed(1.0), 0.0);
        assert_eq!(speed(1.01), 1.0);
        assert_eq!(speed(50.0), 1.0);
        assert_eq!(speed(100.0), 2.0);
        assert_eq!(speed(300.0), 3.0);
        assert_eq!(speed(300.5), 5.0);
    }

    #[test]
    fn moves_towards_the_pointer() {
        let start = Position::default();
        let next = update_position(&start, &pointer(200.0, 0.0));

        assert_eq!(next.direction, 0.0);
        assert_eq!(next.speed, 3.0);
        assert_eq!((next.x, next.y), (3.0, 0.0));
        assert_eq!(next.distance, 197.0);
        assert_eq!(next.time, 1);
        assert_eq!(next.emotion, Emotion::Happy);
    }

    #[test]
    fn converges_on_a_still_pointer() {
        let mut pos = Position { x: 400.0, y: 300.0, ..Position::default() };
        let target = pointer(20.0, 40.0);
        let mut mode = Mode::Chasing;
        for _ in 0..1000 {
            pos = update_position(&pos, &target);
            mode = next_mode(&pos);
            if mode != Mode::Chasing {
                break;
            }
        }
        assert_eq!(mode, Mode::StandingStill);
        assert!(pos.distance <= CATCH_DISTANCE);
    }

    #[test]
    fn gets_exhausted_after_a_long_chase() {
        let pos = Position { time: EXHAUSTED_AFTER, ..Position::default() };
        let next = update_position(&pos, &pointer(500.0, 500.0));
        assert_eq!(next.emotion, Emotion::Exhausted);

        let pos = Position { time: EXHAUSTED_AFTER - 1, ..Position::default() };
        let next = update_position(&pos, &pointer(500.0, 500.0));
        assert_eq!(next.emotion, Emotion::Happy);
    }

    #[test]
    fn catches_within_catch_distance() {
        let pos = Position { x: 0.0, y: 0.0, distance: 1.5, ..Position::default() };
        assert_eq!(next_mode(&pos), Mode::StandingStill);

        let pos = Position { distance: 2.5, ..Position::default() };
        assert_eq!(next_mode(&pos), Mode::Chasing);
    }
}
