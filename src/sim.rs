use glam::DVec2;

use crate::behavior::Mode;
use crate::creature::{Leg, PointerSample, Position, Surface, LEG_COUNT};

/// Full simulation snapshot. Each tick consumes one and produces the next.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub pointer: PointerSample,
    pub position: Position,
    pub mode: Mode,
    pub legs: [Leg; LEG_COUNT],
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            pointer: PointerSample::default(),
            position: Position::default(),
            mode: Mode::Roaming,
            legs: [Leg::default(); LEG_COUNT],
        }
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one simulation step.
///
/// The active mode moves the anchor first; the transition is then decided on
/// the freshly moved position, and the legs follow that same position. A mode
/// change starts the entered mode's counter at zero.
pub fn tick(
    world: WorldState,
    raw_pointer: DVec2,
    surface: &Surface,
    rng: &mut fastrand::Rng,
) -> WorldState {
    let pointer = PointerSample::sample(&world.pointer, raw_pointer);
    let mut position = world
        .mode
        .update_position(&world.position, &pointer, surface, rng);

    let mode = world.mode.next_mode(&position, &pointer);
    if mode != world.mode {
        log::debug!(
            "{} -> {} after {} ticks at ({:.0}, {:.0}), pointer {:.1}px away",
            world.mode.label(),
            mode.label(),
            position.time,
            position.x,
            position.y,
            position.distance,
        );
        position.time = 0;
    }

    let active = world.mode;
    let legs = world
        .legs
        .map(|leg| active.update_leg(&leg, &position, rng));

    WorldState {
        pointer,
        position,
        mode,
        legs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Emotion;
    use crate::geometry;

    fn assert_legs_follow(world: &WorldState) {
        for leg in &world.legs {
            assert_eq!(leg.start, world.position.anchor());
            assert_eq!(leg.length, geometry::distance(leg.start, leg.end));
        }
    }

    #[test]
    fn starts_roaming_at_origin() {
        let world = WorldState::new();
        assert_eq!(world.mode, Mode::Roaming);
        assert_eq!(world.position, Position::default());
        assert!(world.legs.iter().all(|l| *l == Leg::default()));
    }

    #[test]
    fn standing_still_gets_bored_and_roams_with_fresh_counter() {
        let mut rng = fastrand::Rng::with_seed(1);
        let world = WorldState {
            mode: Mode::StandingStill,
            position: Position { time: 251, ..Position::default() },
            ..WorldState::new()
        };
        let next = tick(world, DVec2::ZERO, &Surface::new(800.0, 600.0), &mut rng);
        assert!(!next.pointer.moved);
        assert_eq!(next.mode, Mode::Roaming);
        assert_eq!(next.position.time, 0);
    }

    #[test]
    fn counter_runs_while_mode_holds() {
        let mut rng = fastrand::Rng::with_seed(2);
        let surface = Surface::new(800.0, 600.0);
        let mut world = WorldState::new();
        for expected in 1..=20 {
            world = tick(world, DVec2::ZERO, &surface, &mut rng);
            assert_eq!(world.mode, Mode::Roaming);
            assert_eq!(world.position.time, expected);
        }
    }

    #[test]
    fn moving_pointer_starts_a_chase_that_ends_standing_still() {
        let mut rng = fastrand::Rng::with_seed(3);
        let surface = Surface::new(800.0, 600.0);
        let target = DVec2::new(300.0, 200.0);

        let mut world = tick(WorldState::new(), target, &surface, &mut rng);
        assert!(world.pointer.moved);
        assert_eq!(world.mode, Mode::Chasing);
        assert_eq!(world.position.time, 0);

        let mut ticks = 0;
        while world.mode == Mode::Chasing {
            world = tick(world, target, &surface, &mut rng);
            assert_legs_follow(&world);
            ticks += 1;
            assert!(ticks < 2000, "never caught the pointer");
        }
        assert_eq!(world.mode, Mode::StandingStill);
        assert!(world.position.distance <= 2.0);

        // Standing still: legs keep their age.
        let ages: Vec<f64> = world.legs.iter().map(|l| l.age).collect();
        world = tick(world, target, &surface, &mut rng);
        world = tick(world, target, &surface, &mut rng);
        assert_eq!(world.mode, Mode::StandingStill);
        assert_eq!(world.position.emotion, Emotion::Content);
        let after: Vec<f64> = world.legs.iter().map(|l| l.age).collect();
        assert_eq!(ages, after);
    }

    #[test]
    fn left_alone_it_roams_dozes_sleeps_and_wakes() {
        let mut rng = fastrand::Rng::with_seed(4);
        let surface = Surface::new(1024.0, 768.0);
        let mut world = WorldState::new();
        let mut seen = vec![world.mode];

        for _ in 0..12_000 {
            let before = world.mode;
            world = tick(world, DVec2::ZERO, &surface, &mut rng);
            assert_legs_follow(&world);

            let speed = world.position.speed;
            match before {
                Mode::Roaming => assert!(speed <= 1.0),
                Mode::FallingAsleep => assert!(speed >= 0.0),
                Mode::Sleeping | Mode::StandingStill => assert_eq!(speed, 0.0),
                Mode::Chasing => {}
            }
            assert!(world.position.x >= 10.0 && world.position.x <= 1014.0);
            assert!(world.position.y >= 10.0 && world.position.y <= 758.0);

            if world.mode != before {
                seen.push(world.mode);
            }
        }

        assert_eq!(
            &seen[..4],
            &[Mode::Roaming, Mode::FallingAsleep, Mode::Sleeping, Mode::Roaming]
        );
    }

    #[test]
    fn moving_legs_age_with_speed() {
        let mut rng = fastrand::Rng::with_seed(5);
        let surface = Surface::new(1024.0, 768.0);
        let mut world = WorldState {
            mode: Mode::Chasing,
            position: Position { x: 500.0, y: 400.0, ..Position::default() },
            ..WorldState::new()
        };
        // Far, still pointer: a steady chase at constant speed.
        let target = DVec2::new(10.0, 10.0);
        world.pointer = PointerSample { x: 10.0, y: 10.0, moved: false };

        for _ in 0..50 {
            let prev = world.legs;
            world = tick(world, target, &surface, &mut rng);
            assert_eq!(world.mode, Mode::Chasing);
            for (before, after) in prev.iter().zip(world.legs.iter()) {
                if before.age > before.life {
                    assert_eq!(after.age, 0.0);
                    assert!((100.0..=300.0).contains(&after.life));
                } else {
                    assert!(after.age > before.age);
                }
            }
        }
    }
}
