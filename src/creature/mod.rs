pub mod leg;

use glam::DVec2;

pub use leg::Leg;

/// Number of legs the creature carries.
pub const LEG_COUNT: usize = 15;
/// Distance (px) below which the creature counts as having reached the pointer.
pub const CATCH_DISTANCE: f64 = 2.0;

/// One tick's view of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    /// Whether the reading differs from the previous tick's sample.
    pub moved: bool,
}

impl PointerSample {
    /// Build this tick's sample from a raw reading, comparing against the
    /// previous tick's sample.
    pub fn sample(previous: &PointerSample, raw: DVec2) -> Self {
        Self {
            x: raw.x,
            y: raw.y,
            moved: raw.x != previous.x || raw.y != previous.y,
        }
    }

    pub fn pos(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Mood glyph shown above the creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Happy,
    Exhausted,
    Content,
    Worried,
    Smirking,
    Yawning,
    Asleep,
}

impl Emotion {
    pub fn glyph(self) -> &'static str {
        match self {
            Emotion::Happy => "😃",
            Emotion::Exhausted => "🥵",
            Emotion::Content => "😊",
            Emotion::Worried => "😟",
            Emotion::Smirking => "😏",
            Emotion::Yawning => "🥱",
            Emotion::Asleep => "😴",
        }
    }
}

/// The creature's anchor point and kinematic state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    /// Heading in radians.
    pub direction: f64,
    /// Distance to the pointer as of the last update.
    pub distance: f64,
    /// Ticks spent in the active mode. Reset to 0 whenever the mode changes.
    pub time: u32,
    pub emotion: Emotion,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            speed: 0.0,
            direction: 0.0,
            distance: 0.0,
            time: 0,
            emotion: Emotion::Smirking,
        }
    }
}

impl Position {
    pub fn anchor(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Drawing surface size in physical pixels. 0x0 until the window reports one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Keep `p` at least `margin` away from every edge. An axis too small to
    /// hold the margin on both sides (or not known yet) is left alone.
    pub fn clamp_inside(&self, p: DVec2, margin: f64) -> DVec2 {
        let clamp_axis = |v: f64, extent: f64| {
            if extent > margin * 2.0 {
                v.clamp(margin, extent - margin)
            } else {
                v
            }
        };
        DVec2::new(clamp_axis(p.x, self.width), clamp_axis(p.y, self.height))
    }
}
