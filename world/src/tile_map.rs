//! Character-grid level layout and world/tile coordinate conversion.

use tracing::warn;
use trophy_chase_core::{TileKind, WorldPoint, DEFAULT_TILE_LENGTH};

/// Glyph used to pad rows that are shorter than the widest row.
const PADDING_GLYPH: char = ' ';

/// Immutable tile layout parsed from map text.
///
/// Tiles are stored row-major with row zero being the first text row, which is
/// the top of the maze. World coordinates grow upwards from the bottom-left
/// corner, so the last text row covers `0.0..tile_length` on the vertical axis.
#[derive(Clone, Debug)]
pub struct TileMap {
    columns: u32,
    rows: u32,
    tile_length: f32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    /// Parses map text into a tile layout.
    ///
    /// Parsing never fails: short rows are padded with non-walkable tiles and
    /// a non-positive tile length falls back to [`DEFAULT_TILE_LENGTH`].
    #[must_use]
    pub fn parse(source: &str, tile_length: f32) -> Self {
        let tile_length = if tile_length.is_finite() && tile_length > 0.0 {
            tile_length
        } else {
            warn!(tile_length, "invalid tile length, using default");
            DEFAULT_TILE_LENGTH
        };

        let mut lines: Vec<&str> = source.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            let _ = lines.pop();
        }

        let columns = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let mut tiles = Vec::with_capacity(columns * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != columns {
                warn!(row, width, columns, "ragged map row padded with blocking tiles");
            }
            tiles.extend(line.chars().map(TileKind::from_glyph));
            tiles.extend(
                std::iter::repeat(TileKind::Decoration(PADDING_GLYPH)).take(columns - width),
            );
        }

        Self {
            columns: u32::try_from(columns).unwrap_or(u32::MAX),
            rows: u32::try_from(lines.len()).unwrap_or(u32::MAX),
            tile_length,
            tiles,
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Edge length of one tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the map in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the map in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Inset applied to bounding-box corners before sampling tiles.
    #[must_use]
    pub fn corner_margin(&self) -> f32 {
        self.tile_length * 3.0 / 50.0
    }

    /// Inward margin applied to a destination box when the player commits a step.
    #[must_use]
    pub fn destination_inset(&self) -> f32 {
        self.tile_length / 50.0
    }

    /// Tile at the provided column and text row, if it lies on the map.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<TileKind> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = usize::try_from(row)
            .ok()?
            .checked_mul(usize::try_from(self.columns).ok()?)?
            .checked_add(usize::try_from(column).ok()?)?;
        self.tiles.get(index).copied()
    }

    /// Tile covering the provided world point, if it lies on the map.
    #[must_use]
    pub fn tile_at(&self, point: WorldPoint) -> Option<TileKind> {
        let (column, row) = self.cell_of(point)?;
        self.tile(column, row)
    }

    /// Column and text row covering the provided world point.
    ///
    /// The vertical axis is inverted relative to the row index.
    #[must_use]
    pub fn cell_of(&self, point: WorldPoint) -> Option<(u32, u32)> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let column = (point.x / self.tile_length).floor();
        let from_bottom = (point.y / self.tile_length).floor();
        if column < 0.0 || from_bottom < 0.0 {
            return None;
        }
        if column >= self.columns as f32 || from_bottom >= self.rows as f32 {
            return None;
        }
        let column = column as u32;
        let row = self.rows - 1 - from_bottom as u32;
        Some((column, row))
    }

    /// World position of the bottom-left corner of a cell.
    #[must_use]
    pub fn cell_origin(&self, column: u32, row: u32) -> WorldPoint {
        let from_bottom = self.rows.saturating_sub(1).saturating_sub(row);
        WorldPoint::new(
            column as f32 * self.tile_length,
            from_bottom as f32 * self.tile_length,
        )
    }

    /// World position of the first cell holding `kind`, scanning text rows top
    /// to bottom and columns left to right. Falls back to the world origin.
    #[must_use]
    pub fn spawn_of(&self, kind: TileKind) -> WorldPoint {
        self.cells_of(kind).next().unwrap_or_default()
    }

    /// World positions of every cell holding `kind`, in scan order.
    pub fn cells_of(&self, kind: TileKind) -> impl Iterator<Item = WorldPoint> + '_ {
        self.iter()
            .filter(move |(_, _, tile)| *tile == kind)
            .map(|(column, row, _)| self.cell_origin(column, row))
    }

    /// Anchor from which pursuer start positions are derived: one tile-sized
    /// box centred on the map.
    #[must_use]
    pub fn pen_anchor(&self) -> WorldPoint {
        WorldPoint::new(
            self.width() / 2.0 - self.tile_length / 2.0,
            self.height() / 2.0 - self.tile_length / 2.0,
        )
    }

    /// Iterates `(column, row, tile)` triples in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, TileKind)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (index % columns, index / columns, *tile)
        })
    }
}
