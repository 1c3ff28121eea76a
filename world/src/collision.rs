//! Walkability and box-occupancy queries shared by the player and pursuers.

use trophy_chase_core::{Aabb, TileKind, WorldPoint};

use crate::TileMap;

/// Read-only collision queries over a borrowed [`TileMap`].
#[derive(Clone, Copy, Debug)]
pub struct CollisionOracle<'a> {
    map: &'a TileMap,
}

impl<'a> CollisionOracle<'a> {
    /// Wraps the provided map.
    #[must_use]
    pub const fn new(map: &'a TileMap) -> Self {
        Self { map }
    }

    /// Map backing the queries.
    #[must_use]
    pub const fn map(&self) -> &'a TileMap {
        self.map
    }

    /// Reports whether the tile under the world coordinate can be stood on.
    ///
    /// Coordinates outside the map are never walkable.
    #[must_use]
    pub fn is_walkable(&self, x: f32, y: f32) -> bool {
        self.map
            .tile_at(WorldPoint::new(x, y))
            .is_some_and(TileKind::is_walkable)
    }

    /// Reports whether the world point lies over a pen tile.
    #[must_use]
    pub fn is_pen(&self, point: WorldPoint) -> bool {
        self.map.tile_at(point) == Some(TileKind::Pen)
    }

    /// Tests whether a box may be placed at its current origin.
    ///
    /// All four corners, inset by the map's corner margin, must be walkable.
    /// Once an actor has left the pen, a box centred over a pen tile also
    /// fails. Corners may still overlap the pen edge.
    #[must_use]
    pub fn can_occupy_box(&self, bounds: Aabb, exited_pen: bool) -> bool {
        if exited_pen && self.is_pen(bounds.center()) {
            return false;
        }

        let margin = self.map.corner_margin();
        let origin = bounds.origin();
        let left = origin.x + margin;
        let right = origin.x + bounds.width() - margin;
        let bottom = origin.y + margin;
        let top = origin.y + bounds.height() - margin;

        [(left, bottom), (right, bottom), (left, top), (right, top)]
            .into_iter()
            .all(|(x, y)| self.is_walkable(x, y))
    }
}
