use std::{
    collections::{hash_map::DefaultHasher, BTreeMap, BTreeSet},
    hash::{Hash, Hasher},
    time::Duration,
};

use trophy_chase_core::{
    Command, Direction, Event, LevelSettings, PursuerId, PursuerPhase, WorldPoint,
};
use trophy_chase_system_pursuit::Pursuit;
use trophy_chase_world::{self as world, query, World};

const PEN_LAYOUT: &str = "\
0000000
0T000T0
0T---T0
0TT-TT0
0000000";

#[test]
fn deterministic_replay_produces_identical_trajectories() {
    let first = replay(80);
    let second = replay(80);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(first
        .events
        .iter()
        .any(|record| matches!(record, EventRecord::PursuerMoved { .. })));
}

#[test]
fn released_pursuers_never_return_to_the_pen() {
    let outcome = replay(120);

    for pursuer in &outcome.pursuers {
        assert_eq!(pursuer.phase, PursuerPhase::Free);
    }
    assert!(outcome.pen_violations.is_empty(), "{:?}", outcome.pen_violations);
}

#[test]
fn pursuers_keep_roaming_when_frames_do_not_divide_the_tile() {
    let outcome = replay_with(LevelSettings::default(), Duration::from_millis(16), 900);

    for pursuer in &outcome.pursuers {
        assert_eq!(pursuer.phase, PursuerPhase::Free);
    }
    assert!(outcome.pen_violations.is_empty(), "{:?}", outcome.pen_violations);

    let moves = outcome.free_moves();
    assert_eq!(moves.len(), outcome.pursuers.len());
    for (pursuer, count) in moves {
        assert!(count > 20, "{pursuer:?} made only {count} free moves");
    }
}

fn replay(frames: usize) -> ReplayOutcome {
    let mut settings = LevelSettings::for_tile_length(1.0);
    settings.pursuer_speed = 4.0;
    replay_with(settings, Duration::from_millis(250), frames)
}

fn replay_with(settings: LevelSettings, dt: Duration, frames: usize) -> ReplayOutcome {
    let mut world = World::new();
    let pursuit = Pursuit;
    let mut log = Vec::new();
    let mut pen_violations = Vec::new();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadLevel {
            layout: PEN_LAYOUT.to_owned(),
            settings,
        },
        &mut events,
    );
    record_events(&events, &mut log);

    for frame in 0..frames {
        events.clear();
        world::apply(
            &mut world,
            Command::Tick { dt },
            &mut events,
        );
        record_events(&events, &mut log);

        let mut commands = Vec::new();
        pursuit.handle(
            &events,
            &query::pursuer_view(&world),
            &query::collision(&world),
            &mut commands,
        );
        for command in commands {
            let mut generated = Vec::new();
            world::apply(&mut world, command, &mut generated);
            record_events(&generated, &mut log);
        }

        let oracle = query::collision(&world);
        for pursuer in query::pursuer_view(&world).iter() {
            if pursuer.phase == PursuerPhase::Free && oracle.is_pen(pursuer.bounds.center()) {
                pen_violations.push((frame, pursuer.id));
            }
        }
    }

    let pursuers = query::pursuer_view(&world)
        .into_vec()
        .into_iter()
        .map(|snapshot| PursuerState {
            id: snapshot.id,
            position: PointBits::from(snapshot.bounds.origin()),
            facing: snapshot.facing,
            phase: snapshot.phase,
        })
        .collect();

    ReplayOutcome {
        pursuers,
        events: log,
        pen_violations,
    }
}

fn record_events(events: &[Event], log: &mut Vec<EventRecord>) {
    log.extend(events.iter().filter_map(EventRecord::from_event));
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    pursuers: Vec<PursuerState>,
    events: Vec<EventRecord>,
    pen_violations: Vec<(usize, PursuerId)>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Moves each pursuer made after its release, keyed by released pursuer.
    fn free_moves(&self) -> BTreeMap<PursuerId, usize> {
        let mut released = BTreeSet::new();
        let mut moves = BTreeMap::new();
        for record in &self.events {
            match record {
                EventRecord::PursuerReleased { pursuer } => {
                    let _ = released.insert(*pursuer);
                    let _ = moves.entry(*pursuer).or_insert(0);
                }
                EventRecord::PursuerMoved { pursuer, .. } if released.contains(pursuer) => {
                    *moves.entry(*pursuer).or_insert(0) += 1;
                }
                _ => {}
            }
        }
        moves
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PointBits(u32, u32);

impl From<WorldPoint> for PointBits {
    fn from(point: WorldPoint) -> Self {
        Self(point.x.to_bits(), point.y.to_bits())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct PursuerState {
    id: PursuerId,
    position: PointBits,
    facing: Direction,
    phase: PursuerPhase,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    TimeAdvanced {
        dt_micros: u128,
    },
    PursuerReleased {
        pursuer: PursuerId,
    },
    PursuerMoved {
        pursuer: PursuerId,
        to: PointBits,
        direction: Direction,
    },
    PursuerStalled {
        pursuer: PursuerId,
    },
}

impl EventRecord {
    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::TimeAdvanced { dt } => Some(Self::TimeAdvanced {
                dt_micros: dt.as_micros(),
            }),
            Event::PursuerReleased { pursuer } => Some(Self::PursuerReleased { pursuer: *pursuer }),
            Event::PursuerMoved {
                pursuer,
                to,
                direction,
            } => Some(Self::PursuerMoved {
                pursuer: *pursuer,
                to: PointBits::from(*to),
                direction: *direction,
            }),
            Event::PursuerStalled { pursuer } => Some(Self::PursuerStalled { pursuer: *pursuer }),
            _ => None,
        }
    }
}
