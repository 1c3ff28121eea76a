//! Motion state shared by the player and the pursuers.

use std::time::Duration;

use trophy_chase_core::{Aabb, Direction, WorldPoint};

/// Time each animation frame stays on screen.
const ANIMATION_FRAME_TIME: Duration = Duration::from_millis(150);
/// Number of frames in every directional animation.
const ANIMATION_FRAMES: u8 = 2;

/// Position, extent, speed, and facing of a moving actor.
#[derive(Clone, Debug)]
pub(crate) struct MotionActor {
    pub(crate) position: WorldPoint,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) speed: f32,
    pub(crate) facing: Direction,
    pub(crate) animation: AnimationClock,
}

impl MotionActor {
    pub(crate) fn new(position: WorldPoint, width: f32, height: f32, speed: f32) -> Self {
        Self {
            position,
            width,
            height,
            speed,
            facing: Direction::Up,
            animation: AnimationClock::default(),
        }
    }

    /// Bounding box at the actor's current position.
    pub(crate) fn bounds(&self) -> Aabb {
        self.bounds_at(self.position)
    }

    /// Bounding box the actor would have at `position`.
    pub(crate) fn bounds_at(&self, position: WorldPoint) -> Aabb {
        Aabb::new(position, self.width, self.height)
    }

    /// Distance covered in `dt` at the actor's speed.
    pub(crate) fn travel(&self, dt: Duration) -> f32 {
        let distance = self.speed * dt.as_secs_f32();
        debug_assert!(distance.is_finite(), "non-finite travel distance");
        distance
    }
}

/// Frame counter for the draw hook of directional sprite animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct AnimationClock {
    elapsed: Duration,
    frame: u8,
}

impl AnimationClock {
    pub(crate) fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed > ANIMATION_FRAME_TIME {
            self.frame = (self.frame + 1) % ANIMATION_FRAMES;
            self.elapsed = Duration::ZERO;
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn frame(&self) -> u8 {
        self.frame
    }
}
