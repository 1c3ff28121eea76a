//! Grid-stepping player motion.

use std::time::Duration;

use trophy_chase_core::{Aabb, Direction, Event, PlayerMotion, PlayerSnapshot, WorldPoint};

use crate::{actor::MotionActor, CollisionOracle};

/// Player width as a fraction of the tile length.
const PLAYER_WIDTH_RATIO: f32 = 0.8;

#[derive(Clone, Debug)]
pub(crate) struct Player {
    actor: MotionActor,
    spawn: WorldPoint,
    motion: PlayerMotion,
    intent: Option<Direction>,
    invincibility: Duration,
}

impl Player {
    pub(crate) fn spawn_at(spawn: WorldPoint, tile_length: f32, speed: f32) -> Self {
        let mut actor = MotionActor::new(
            spawn,
            tile_length * PLAYER_WIDTH_RATIO,
            tile_length,
            speed,
        );
        actor.facing = Direction::Down;
        Self {
            actor,
            spawn,
            motion: PlayerMotion::Idle,
            intent: None,
            invincibility: Duration::ZERO,
        }
    }

    pub(crate) fn steer(&mut self, direction: Option<Direction>) {
        self.intent = direction;
    }

    /// Advances timers and motion by `dt`, returning the resting cell when a
    /// step completes during this call.
    pub(crate) fn advance(
        &mut self,
        dt: Duration,
        oracle: &CollisionOracle<'_>,
        out_events: &mut Vec<Event>,
    ) -> Option<WorldPoint> {
        self.invincibility = self.invincibility.saturating_sub(dt);

        if self.motion == PlayerMotion::Idle {
            self.begin_step(oracle, out_events);
        }

        let arrived = self.move_toward_target(dt, out_events);

        if matches!(self.motion, PlayerMotion::Stepping { .. }) {
            self.actor.animation.advance(dt);
        } else {
            self.actor.animation.reset();
        }

        arrived
    }

    fn begin_step(&mut self, oracle: &CollisionOracle<'_>, out_events: &mut Vec<Event>) {
        let tile = oracle.map().tile_length();
        let position = self.actor.position;
        let snapped = WorldPoint::new(
            (position.x / tile).round() * tile,
            (position.y / tile).round() * tile,
        );
        self.actor.position = snapped;

        let Some(direction) = self.intent else {
            return;
        };
        self.actor.facing = direction;

        let target = snapped.offset(direction, tile);
        let inset = oracle.map().destination_inset();
        let destination = Aabb::new(
            WorldPoint::new(target.x + inset, target.y + inset),
            self.actor.width - 2.0 * inset,
            self.actor.height - 2.0 * inset,
        );
        if !oracle.can_occupy_box(destination, false) {
            return;
        }

        self.motion = PlayerMotion::Stepping { target };
        out_events.push(Event::PlayerStepStarted {
            from: snapped,
            to: target,
            direction,
        });
    }

    fn move_toward_target(
        &mut self,
        dt: Duration,
        out_events: &mut Vec<Event>,
    ) -> Option<WorldPoint> {
        let PlayerMotion::Stepping { target } = self.motion else {
            return None;
        };

        let distance = self.actor.travel(dt);
        let position = &mut self.actor.position;

        if (target.x - position.x).abs() <= distance && (target.y - position.y).abs() <= distance
        {
            *position = target;
            self.motion = PlayerMotion::Idle;
            out_events.push(Event::PlayerArrived { at: target });
            return Some(target);
        }

        if position.x < target.x {
            position.x += distance;
        } else if position.x > target.x {
            position.x -= distance;
        }
        if position.y < target.y {
            position.y += distance;
        } else if position.y > target.y {
            position.y -= distance;
        }
        None
    }

    /// Teleports the player back to its spawn and starts the invincibility window.
    pub(crate) fn reset_to_spawn(&mut self, invincibility: Duration) {
        self.actor.position = self.spawn;
        self.motion = PlayerMotion::Idle;
        self.actor.animation.reset();
        self.invincibility = invincibility;
    }

    pub(crate) fn is_vulnerable(&self) -> bool {
        self.invincibility.is_zero()
    }

    pub(crate) fn bounds(&self) -> Aabb {
        self.actor.bounds()
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.actor.position,
            bounds: self.actor.bounds(),
            facing: self.actor.facing,
            motion: self.motion,
            vulnerable: self.is_vulnerable(),
            animation_frame: self.actor.animation.frame(),
        }
    }
}
