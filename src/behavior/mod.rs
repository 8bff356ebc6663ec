//! Behavior state machine.
//!
//! Every mode lives in its own module and exposes the same operations:
//! `update_position`, `update_leg` and `next_mode`, plus whatever speed and
//! direction sub-rules it owns. Modes that share a rule call into the module
//! that owns it rather than duplicating it:
//!
//! - Roaming legs follow Chasing; FallingAsleep legs follow Roaming.
//! - Roaming moves with Chasing's step and adds the edge clamp; FallingAsleep
//!   moves with Roaming's translation.
//! - Sleeping freezes in place the same way StandingStill does.

pub mod chasing;
pub mod falling_asleep;
pub mod roaming;
pub mod sleeping;
pub mod standing_still;

use crate::creature::{Leg, PointerSample, Position, Surface, CATCH_DISTANCE};

/// The active behavioral strategy. Stateless: all variability lives in
/// [`Position`] and the legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Chasing,
    StandingStill,
    Roaming,
    FallingAsleep,
    Sleeping,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Chasing => "Chasing",
            Mode::StandingStill => "Standing still",
            Mode::Roaming => "Roaming",
            Mode::FallingAsleep => "Falling asleep",
            Mode::Sleeping => "Sleeping",
        }
    }

    /// Advance the anchor one tick under this mode.
    pub fn update_position(
        self,
        position: &Position,
        pointer: &PointerSample,
        surface: &Surface,
        rng: &mut fastrand::Rng,
    ) -> Position {
        match self {
            Mode::Chasing => chasing::update_position(position, pointer),
            Mode::StandingStill => standing_still::update_position(position, pointer),
            Mode::Roaming => roaming::update_position(position, pointer, surface, rng),
            Mode::FallingAsleep => {
                falling_asleep::update_position(position, pointer, surface, rng)
            }
            Mode::Sleeping => sleeping::update_position(position, pointer),
        }
    }

    /// Advance one leg against the already-updated `position`.
    pub fn update_leg(self, leg: &Leg, position: &Position, rng: &mut fastrand::Rng) -> Leg {
        match self {
            Mode::Chasing => chasing::update_leg(leg, position, rng),
            Mode::StandingStill => standing_still::update_leg(leg, position),
            Mode::Roaming => roaming::update_leg(leg, position, rng),
            Mode::FallingAsleep => falling_asleep::update_leg(leg, position, rng),
            Mode::Sleeping => sleeping::update_leg(leg, position),
        }
    }

    /// Pick the mode for the next tick.
    pub fn next_mode(self, position: &Position, pointer: &PointerSample) -> Mode {
        match self {
            Mode::Chasing => chasing::next_mode(position),
            Mode::StandingStill => standing_still::next_mode(position, pointer),
            Mode::Roaming => roaming::next_mode(position, pointer),
            Mode::FallingAsleep => falling_asleep::next_mode(position, pointer),
            Mode::Sleeping => sleeping::next_mode(position, pointer),
        }
    }
}

/// A moving pointer that is out of reach pulls every resting mode back into
/// the chase.
fn pointer_beckons(position: &Position, pointer: &PointerSample) -> bool {
    pointer.moved && position.distance > CATCH_DISTANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESTING: [Mode; 4] = [
        Mode::StandingStill,
        Mode::Roaming,
        Mode::FallingAsleep,
        Mode::Sleeping,
    ];

    #[test]
    fn resting_modes_chase_a_moving_pointer() {
        let position = Position { distance: 50.0, ..Position::default() };
        let pointer = PointerSample { x: 50.0, y: 0.0, moved: true };
        for mode in RESTING {
            assert_eq!(mode.next_mode(&position, &pointer), Mode::Chasing, "{mode:?}");
        }
    }

    #[test]
    fn pointer_within_catch_distance_does_not_beckon() {
        let position = Position { distance: 2.0, speed: 0.5, ..Position::default() };
        let pointer = PointerSample { x: 2.0, y: 0.0, moved: true };
        for mode in RESTING {
            assert_ne!(mode.next_mode(&position, &pointer), Mode::Chasing, "{mode:?}");
        }
    }

    #[test]
    fn still_pointer_does_not_beckon() {
        let position = Position { distance: 500.0, speed: 0.5, ..Position::default() };
        let pointer = PointerSample { x: 500.0, y: 0.0, moved: false };
        for mode in RESTING {
            assert_eq!(mode.next_mode(&position, &pointer), mode, "{mode:?}");
        }
    }
}
