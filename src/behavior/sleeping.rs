use super::{pointer_beckons, standing_still, Mode};
use crate::creature::{leg, Emotion, Leg, PointerSample, Position};

/// Ticks of sleep before the creature gets up and roams again.
const WAKE_AFTER: u32 = 1500;

pub fn update_position(position: &Position, pointer: &PointerSample) -> Position {
    standing_still::freeze(position, pointer, Emotion::Asleep)
}

pub fn update_leg(leg: &Leg, position: &Position) -> Leg {
    leg::contract(leg, position)
}

pub fn next_mode(position: &Position, pointer: &PointerSample) -> Mode {
    if pointer_beckons(position, pointer) {
        Mode::Chasing
    } else if position.time > WAKE_AFTER {
        Mode::Roaming
    } else {
        Mode::Sleeping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use glam::DVec2;

    #[test]
    fn sleeps_in_place() {
        let pos = Position { x: 30.0, y: 40.0, speed: 0.3, time: 9, ..Position::default() };
        let pointer = PointerSample { x: 0.0, y: 0.0, moved: false };
        let next = update_position(&pos, &pointer);
        assert_eq!((next.x, next.y), (30.0, 40.0));
        assert_eq!(next.speed, 0.0);
        assert_eq!(next.distance, 50.0);
        assert_eq!(next.time, 10);
        assert_eq!(next.emotion, Emotion::Asleep);
    }

    #[test]
    fn legs_curl_up_over_time() {
        let pos = Position { x: 0.0, y: 0.0, ..Position::default() };
        let mut l = Leg {
            start: DVec2::ZERO,
            end: DVec2::new(100.0, 0.0),
            age: 0.0,
            life: 10.0,
            length: 100.0,
        };
        for _ in 0..200 {
            let next = update_leg(&l, &pos);
            assert!(next.length <= l.length);
            assert_eq!(next.length, geometry::distance(next.start, next.end));
            l = next;
        }
        assert!(l.length <= 20.0);
        assert!(l.length > 0.0);
    }

    #[test]
    fn wakes_up_after_a_long_nap() {
        let pointer = PointerSample::default();
        let pos = Position { time: WAKE_AFTER + 1, ..Position::default() };
        assert_eq!(next_mode(&pos, &pointer), Mode::Roaming);
        let pos = Position { time: WAKE_AFTER, ..Position::default() };
        assert_eq!(next_mode(&pos, &pointer), Mode::Sleeping);
    }
}
