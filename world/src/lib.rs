#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Trophy Chase.

mod actor;
mod collectibles;
mod collision;
mod player;
mod pursuer;
mod tile_map;

use std::time::Duration;

use tracing::{debug, info};
use trophy_chase_core::{
    Bounded, Command, Event, LevelSettings, PursuerId, PursuerKind, TileKind, WorldPoint,
    WELCOME_BANNER,
};

pub use collision::CollisionOracle;
pub use tile_map::TileMap;

use collectibles::CollectibleRegistry;
use player::Player;
use pursuer::Pursuer;

/// Represents the authoritative Trophy Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    settings: LevelSettings,
    map: TileMap,
    registry: CollectibleRegistry,
    player: Player,
    pursuers: Vec<Pursuer>,
    frame_dt: Duration,
    win_announced: bool,
    tick_index: u64,
}

impl World {
    /// Creates a world holding an empty level; load a map with [`Command::LoadLevel`].
    #[must_use]
    pub fn new() -> Self {
        let settings = LevelSettings::default();
        let map = TileMap::parse("", settings.tile_length);
        Self::populate(map, settings)
    }

    fn populate(map: TileMap, settings: LevelSettings) -> Self {
        let tile = map.tile_length();
        let player = Player::spawn_at(
            map.spawn_of(TileKind::PlayerSpawn),
            tile,
            settings.player_speed,
        );
        let anchor = map.pen_anchor();
        let pursuers = PursuerKind::ROSTER
            .iter()
            .zip(0_u32..)
            .map(|(kind, index)| {
                let (columns, rows) = kind.spawn_offset();
                let start = WorldPoint::new(
                    anchor.x + columns as f32 * tile,
                    anchor.y + rows as f32 * tile,
                );
                Pursuer::new(
                    PursuerId::new(index),
                    *kind,
                    start,
                    tile,
                    settings.pursuer_speed,
                )
            })
            .collect();

        Self {
            banner: WELCOME_BANNER,
            settings,
            registry: CollectibleRegistry::from_map(&map),
            map,
            player,
            pursuers,
            frame_dt: Duration::ZERO,
            win_announced: false,
            tick_index: 0,
        }
    }

    fn collect_under_player(&mut self, out_events: &mut Vec<Event>) {
        if let Some(bonus) = self.registry.collect_overlapping(&self.player.bounds()) {
            info!(
                bonus = bonus.get(),
                remaining = self.registry.remaining(),
                "bonus collected"
            );
            out_events.push(Event::BonusCollected { bonus });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { layout, settings } => {
            let map = TileMap::parse(&layout, settings.tile_length);
            let settings = LevelSettings {
                tile_length: map.tile_length(),
                ..settings
            };
            *world = World::populate(map, settings);
            debug!(
                columns = world.map.columns(),
                rows = world.map.rows(),
                bonuses = world.registry.total(),
                "level loaded"
            );
            out_events.push(Event::LevelLoaded {
                columns: world.map.columns(),
                rows: world.map.rows(),
                bonuses: world.registry.total(),
            });
        }
        Command::SteerPlayer { direction } => world.player.steer(direction),
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.frame_dt = dt;
            out_events.push(Event::TimeAdvanced { dt });

            let oracle = CollisionOracle::new(&world.map);
            let arrived = world.player.advance(dt, &oracle, out_events);
            for pursuer in &mut world.pursuers {
                pursuer.climb_out_of_pen(dt, &oracle, out_events);
            }

            if arrived.is_some() {
                world.collect_under_player(out_events);
            }
        }
        Command::StepPursuer { pursuer, direction } => {
            let dt = world.frame_dt;
            let oracle = CollisionOracle::new(&world.map);
            match world
                .pursuers
                .iter_mut()
                .find(|candidate| candidate.id() == pursuer)
            {
                Some(agent) if agent.has_left_pen() => {
                    let _ = agent.attempt_move(direction, dt, &oracle, out_events);
                }
                Some(_) => debug!(pursuer = pursuer.get(), "ignoring step for confined pursuer"),
                None => debug!(pursuer = pursuer.get(), "ignoring step for unknown pursuer"),
            }
        }
        Command::ResolveContacts => {
            if world.player.is_vulnerable() {
                let bounds = world.player.bounds();
                let attacker = world
                    .pursuers
                    .iter()
                    .map(Pursuer::snapshot)
                    .find(|snapshot| snapshot.overlaps(&bounds))
                    .map(|snapshot| snapshot.id);
                if let Some(pursuer) = attacker {
                    world.player.reset_to_spawn(world.settings.invincibility);
                    info!(pursuer = pursuer.get(), "player hit");
                    out_events.push(Event::PlayerHit { pursuer });
                }
            }

            world.collect_under_player(out_events);

            if world.registry.all_collected() && !world.win_announced {
                world.win_announced = true;
                info!(bonuses = world.registry.total(), "all bonuses collected");
                out_events.push(Event::AllBonusesCollected);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use trophy_chase_core::{BonusSnapshot, LevelSettings, PlayerSnapshot, PursuerSnapshot};

    use super::{CollisionOracle, TileMap, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the loaded tile map.
    #[must_use]
    pub fn tile_map(world: &World) -> &TileMap {
        &world.map
    }

    /// Collision queries over the loaded tile map.
    #[must_use]
    pub fn collision(world: &World) -> CollisionOracle<'_> {
        CollisionOracle::new(&world.map)
    }

    /// Tunables the current level was loaded with.
    #[must_use]
    pub fn settings(world: &World) -> LevelSettings {
        world.settings
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures a read-only view of the pursuers in roster order.
    #[must_use]
    pub fn pursuer_view(world: &World) -> PursuerView {
        let mut snapshots: Vec<PursuerSnapshot> =
            world.pursuers.iter().map(|pursuer| pursuer.snapshot()).collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        PursuerView { snapshots }
    }

    /// Snapshots of every bonus in the level, collected or not.
    #[must_use]
    pub fn bonuses(world: &World) -> Vec<BonusSnapshot> {
        world.registry.snapshots()
    }

    /// Number of bonuses not yet collected.
    #[must_use]
    pub fn remaining_bonuses(world: &World) -> usize {
        world.registry.remaining()
    }

    /// Number of bonuses registered when the level was loaded.
    #[must_use]
    pub fn total_bonuses(world: &World) -> usize {
        world.registry.total()
    }

    /// Win condition: true once no uncollected bonus remains.
    #[must_use]
    pub fn all_bonuses_collected(world: &World) -> bool {
        world.registry.all_collected()
    }

    /// Delta time of the most recent tick.
    #[must_use]
    pub fn frame_dt(world: &World) -> Duration {
        world.frame_dt
    }

    /// Number of ticks applied since the level was loaded.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Read-only snapshot describing all pursuers.
    #[derive(Clone, Debug)]
    pub struct PursuerView {
        snapshots: Vec<PursuerSnapshot>,
    }

    impl PursuerView {
        /// Iterator over the captured pursuer snapshots in roster order.
        pub fn iter(&self) -> impl Iterator<Item = &PursuerSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<PursuerSnapshot> {
            self.snapshots
        }
    }
}
