#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pursuit system that steers free pursuers through the maze.
//!
//! Each pursuer consults the priority table of its [`PursuerKind`] for its
//! current facing and takes the first direction whose one-step move is legal.
//! There is no search and no randomness, so identical inputs always replay
//! identically.
//!
//! [`PursuerKind`]: trophy_chase_core::PursuerKind

use std::time::Duration;

use trophy_chase_core::{Aabb, Command, Direction, Event, PursuerPhase, PursuerSnapshot};
use trophy_chase_world::{query::PursuerView, CollisionOracle};

/// Picks the direction a free pursuer should attempt this frame.
///
/// Candidates are tested with the pen treated as blocked. When no candidate
/// is legal the current facing is returned and the pursuer stalls.
#[must_use]
pub fn choose_direction(
    pursuer: &PursuerSnapshot,
    distance: f32,
    oracle: &CollisionOracle<'_>,
) -> Direction {
    let bounds = pursuer.bounds;
    pursuer
        .kind
        .priority_table()
        .candidates(pursuer.facing)
        .iter()
        .copied()
        .find(|direction| {
            let candidate = Aabb::new(
                bounds.origin().offset(*direction, distance),
                bounds.width(),
                bounds.height(),
            );
            oracle.can_occupy_box(candidate, true)
        })
        .unwrap_or(pursuer.facing)
}

/// Pure system that reacts to ticks and emits one step per free pursuer.
#[derive(Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Consumes the events of a tick and emits [`Command::StepPursuer`] for
    /// every pursuer that was already free when the tick started.
    pub fn handle(
        &self,
        events: &[Event],
        pursuer_view: &PursuerView,
        oracle: &CollisionOracle<'_>,
        out: &mut Vec<Command>,
    ) {
        let Some(dt) = tick_duration(events) else {
            return;
        };

        for pursuer in pursuer_view.iter() {
            if pursuer.phase != PursuerPhase::Free || released_during(events, pursuer) {
                continue;
            }

            let distance = pursuer.speed * dt.as_secs_f32();
            out.push(Command::StepPursuer {
                pursuer: pursuer.id,
                direction: choose_direction(pursuer, distance, oracle),
            });
        }
    }
}

fn tick_duration(events: &[Event]) -> Option<Duration> {
    events.iter().find_map(|event| match event {
        Event::TimeAdvanced { dt } => Some(*dt),
        _ => None,
    })
}

fn released_during(events: &[Event], pursuer: &PursuerSnapshot) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::PursuerReleased { pursuer: id } if *id == pursuer.id))
}
