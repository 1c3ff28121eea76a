//! Pursuer state: the one-way confinement exit and single-move attempts.

use std::time::Duration;

use tracing::debug;
use trophy_chase_core::{
    Direction, Event, PursuerId, PursuerKind, PursuerPhase, PursuerSnapshot, WorldPoint,
};

use crate::{actor::MotionActor, CollisionOracle};

/// Pursuer edge length as a fraction of the tile length.
const PURSUER_EXTENT_RATIO: f32 = 0.8;

#[derive(Clone, Debug)]
pub(crate) struct Pursuer {
    id: PursuerId,
    kind: PursuerKind,
    actor: MotionActor,
    phase: PursuerPhase,
}

impl Pursuer {
    pub(crate) fn new(
        id: PursuerId,
        kind: PursuerKind,
        position: WorldPoint,
        tile_length: f32,
        speed: f32,
    ) -> Self {
        let extent = tile_length * PURSUER_EXTENT_RATIO;
        Self {
            id,
            kind,
            actor: MotionActor::new(position, extent, extent, speed),
            phase: PursuerPhase::Confined,
        }
    }

    pub(crate) fn id(&self) -> PursuerId {
        self.id
    }

    pub(crate) fn has_left_pen(&self) -> bool {
        self.phase == PursuerPhase::Free
    }

    /// Runs one frame of the confinement phase. Free pursuers are untouched.
    ///
    /// The pen is re-sampled at the centre after a successful climb, so the
    /// release happens on the frame the centre first clears the pen.
    pub(crate) fn climb_out_of_pen(
        &mut self,
        dt: Duration,
        oracle: &CollisionOracle<'_>,
        out_events: &mut Vec<Event>,
    ) {
        if self.has_left_pen() {
            return;
        }

        let center = self.actor.bounds().center();
        if !oracle.is_pen(center) {
            self.release(out_events);
            return;
        }

        let next = self.actor.position.offset(Direction::Up, self.actor.travel(dt));
        let bounds = self.actor.bounds_at(next);
        if !oracle.can_occupy_box(bounds, false) {
            out_events.push(Event::PursuerStalled { pursuer: self.id });
            return;
        }

        self.actor.position = next;
        out_events.push(Event::PursuerMoved {
            pursuer: self.id,
            to: next,
            direction: Direction::Up,
        });

        if !oracle.is_pen(bounds.center()) {
            self.release(out_events);
        }
    }

    fn release(&mut self, out_events: &mut Vec<Event>) {
        self.phase = PursuerPhase::Free;
        debug!(pursuer = self.id.get(), kind = ?self.kind, "pursuer left the pen");
        out_events.push(Event::PursuerReleased { pursuer: self.id });
    }

    /// Attempts one free-phase move. Facing follows the move only when it
    /// succeeds; the animation clock always advances.
    pub(crate) fn attempt_move(
        &mut self,
        direction: Direction,
        dt: Duration,
        oracle: &CollisionOracle<'_>,
        out_events: &mut Vec<Event>,
    ) -> bool {
        debug_assert!(self.has_left_pen(), "free move requested while confined");

        let next = self.actor.position.offset(direction, self.actor.travel(dt));
        let moved = oracle.can_occupy_box(self.actor.bounds_at(next), true);
        if moved {
            self.actor.position = next;
            self.actor.facing = direction;
            out_events.push(Event::PursuerMoved {
                pursuer: self.id,
                to: next,
                direction,
            });
        } else {
            out_events.push(Event::PursuerStalled { pursuer: self.id });
        }

        self.actor.animation.advance(dt);
        moved
    }

    pub(crate) fn snapshot(&self) -> PursuerSnapshot {
        PursuerSnapshot {
            id: self.id,
            kind: self.kind,
            bounds: self.actor.bounds(),
            speed: self.actor.speed,
            facing: self.actor.facing,
            phase: self.phase,
            animation_frame: self.actor.animation.frame(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TileMap;

    fn pursuer_at(x: f32, y: f32) -> Pursuer {
        Pursuer::new(
            PursuerId::new(0),
            PursuerKind::Crimson,
            WorldPoint::new(x, y),
            1.0,
            1.0,
        )
    }

    #[test]
    fn pursuer_outside_pen_is_released_without_moving() {
        let map = TileMap::parse("000", 1.0);
        let oracle = CollisionOracle::new(&map);
        let mut pursuer = pursuer_at(1.0, 0.0);
        let mut events = Vec::new();

        pursuer.climb_out_of_pen(Duration::from_secs(1), &oracle, &mut events);

        assert!(pursuer.has_left_pen());
        assert_eq!(pursuer.snapshot().bounds.origin(), WorldPoint::new(1.0, 0.0));
        assert_eq!(
            events,
            vec![Event::PursuerReleased {
                pursuer: PursuerId::new(0)
            }]
        );
    }

    #[test]
    fn blocked_climb_stays_confined() {
        let map = TileMap::parse("T\n-", 1.0);
        let oracle = CollisionOracle::new(&map);
        let mut pursuer = pursuer_at(0.0, 0.0);
        let mut events = Vec::new();

        pursuer.climb_out_of_pen(Duration::from_secs(1), &oracle, &mut events);

        assert!(!pursuer.has_left_pen());
        assert_eq!(pursuer.snapshot().bounds.origin(), WorldPoint::new(0.0, 0.0));
    }

    #[test]
    fn failed_move_keeps_facing_but_animates() {
        let map = TileMap::parse("0T", 1.0);
        let oracle = CollisionOracle::new(&map);
        let mut pursuer = pursuer_at(0.0, 0.0);
        let mut events = Vec::new();
        pursuer.climb_out_of_pen(Duration::from_millis(200), &oracle, &mut events);

        assert!(!pursuer.attempt_move(
            Direction::Right,
            Duration::from_secs(1),
            &oracle,
            &mut events
        ));

        let snapshot = pursuer.snapshot();
        assert_eq!(snapshot.facing, Direction::Up);
        assert_eq!(snapshot.animation_frame, 1);
    }

    #[test]
    fn free_pursuer_cannot_reenter_pen() {
        let map = TileMap::parse("0\n-", 1.0);
        let oracle = CollisionOracle::new(&map);
        let mut pursuer = pursuer_at(0.0, 1.0);
        let mut events = Vec::new();
        pursuer.climb_out_of_pen(Duration::from_millis(100), &oracle, &mut events);

        assert!(!pursuer.attempt_move(
            Direction::Down,
            Duration::from_secs(1),
            &oracle,
            &mut events
        ));
        assert_eq!(pursuer.snapshot().bounds.origin(), WorldPoint::new(0.0, 1.0));
    }

    #[test]
    fn released_pursuer_straddling_pen_edge_moves_sideways() {
        let map = TileMap::parse("000\n0-0", 1.0);
        let oracle = CollisionOracle::new(&map);
        let mut pursuer = pursuer_at(1.0, 0.0);
        let mut events = Vec::new();
        pursuer.climb_out_of_pen(Duration::from_millis(700), &oracle, &mut events);
        assert!(pursuer.has_left_pen());

        assert!(pursuer.attempt_move(
            Direction::Right,
            Duration::from_millis(100),
            &oracle,
            &mut events
        ));
        assert_eq!(pursuer.snapshot().facing, Direction::Right);
    }
}
