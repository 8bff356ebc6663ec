use super::{pointer_beckons, Mode};
use crate::creature::{leg, Emotion, Leg, PointerSample, Position};
use crate::geometry;

/// Ticks of standing still before the creature wanders off.
const BORED_AFTER: u32 = 250;

/// Stop in place: zero speed, anchor unchanged, distance re-measured.
pub fn freeze(position: &Position, pointer: &PointerSample, emotion: Emotion) -> Position {
    Position {
        speed: 0.0,
        distance: geometry::distance(position.anchor(), pointer.pos()),
        time: position.time + 1,
        emotion,
        ..*position
    }
}

pub fn update_position(position: &Position, pointer: &PointerSample) -> Position {
    freeze(position, pointer, Emotion::Content)
}

pub fn update_leg(leg: &Leg, position: &Position) -> Leg {
    leg::hold(leg, position)
}

pub fn next_mode(position: &Position, pointer: &PointerSample) -> Mode {
    if pointer_beckons(position, pointer) {
        Mode::Chasing
    } else if position.time > BORED_AFTER {
        Mode::Roaming
    } else {
        Mode::StandingStill
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn stays_put_and_measures() {
        let pos = Position {
            x: 10.0,
            y: 10.0,
            speed: 2.0,
            direction: 1.2,
            time: 4,
            ..Position::default()
        };
        let pointer = PointerSample { x: 13.0, y: 14.0, moved: true };
        let next = update_position(&pos, &pointer);

        assert_eq!((next.x, next.y), (10.0, 10.0));
        assert_eq!(next.speed, 0.0);
        assert_eq!(next.direction, 1.2);
        assert_eq!(next.distance, 5.0);
        assert_eq!(next.time, 5);
        assert_eq!(next.emotion, Emotion::Content);
    }

    #[test]
    fn legs_do_not_age_while_standing() {
        let pos = Position { x: 1.0, y: 2.0, ..Position::default() };
        let mut l = Leg {
            start: DVec2::ZERO,
            end: DVec2::new(60.0, 2.0),
            age: 42.0,
            life: 150.0,
            length: 0.0,
        };
        for _ in 0..10 {
            l = update_leg(&l, &pos);
            assert_eq!(l.age, 42.0);
            assert_eq!(l.start, pos.anchor());
            assert_eq!(l.length, geometry::distance(l.start, l.end));
        }
    }

    #[test]
    fn wanders_off_when_bored() {
        let pointer = PointerSample { x: 0.0, y: 0.0, moved: false };
        let pos = Position { time: 251, ..Position::default() };
        assert_eq!(next_mode(&pos, &pointer), Mode::Roaming);

        let pos = Position { time: 250, ..Position::default() };
        assert_eq!(next_mode(&pos, &pointer), Mode::StandingStill);
    }
}
