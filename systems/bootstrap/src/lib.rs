#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Trophy Chase experience.

use trophy_chase_core::BonusSnapshot;
use trophy_chase_world::{query, TileMap, World};

/// Dimensions and contents of the loaded level, for presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelSummary {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Edge length of one tile in world units.
    pub tile_length: f32,
    /// Number of bonuses placed in the level.
    pub bonuses: usize,
    /// Number of pursuers placed in the level.
    pub pursuers: usize,
}

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the tile map required for rendering.
    #[must_use]
    pub fn tile_map<'world>(&self, world: &'world World) -> &'world TileMap {
        query::tile_map(world)
    }

    /// Exposes the bonuses placed in the level for presentation purposes.
    #[must_use]
    pub fn bonuses(&self, world: &World) -> Vec<BonusSnapshot> {
        query::bonuses(world)
    }

    /// Summarises the loaded level.
    #[must_use]
    pub fn level_summary(&self, world: &World) -> LevelSummary {
        let map = query::tile_map(world);
        LevelSummary {
            columns: map.columns(),
            rows: map.rows(),
            tile_length: map.tile_length(),
            bonuses: query::total_bonuses(world),
            pursuers: query::pursuer_view(world).iter().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trophy_chase_core::{Command, LevelSettings};

    #[test]
    fn summary_reflects_loaded_level() {
        let mut world = World::new();
        let mut events = Vec::new();
        trophy_chase_world::apply(
            &mut world,
            Command::LoadLevel {
                layout: "P0b\n0b0".to_owned(),
                settings: LevelSettings::default(),
            },
            &mut events,
        );

        let bootstrap = Bootstrap;
        assert_eq!(bootstrap.welcome_banner(&world), "Welcome to Trophy Chase.");
        assert_eq!(
            bootstrap.level_summary(&world),
            LevelSummary {
                columns: 3,
                rows: 2,
                tile_length: 50.0,
                bonuses: 2,
                pursuers: 4,
            }
        );
        assert_eq!(bootstrap.bonuses(&world).len(), 2);
        assert_eq!(
            bootstrap.tile_map(&world).tile(0, 0).map(|tile| tile.glyph()),
            Some('P')
        );
    }
}
