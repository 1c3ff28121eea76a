#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Trophy Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use Direction::{Down as D, Left as L, Right as R, Up as U};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Trophy Chase.";

/// Edge length of a single tile used when no explicit configuration is given.
pub const DEFAULT_TILE_LENGTH: f32 = 50.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the active level with one parsed from the provided character grid.
    LoadLevel {
        /// Raw map text, one row per line.
        layout: String,
        /// Tunables applied to the actors placed in the level.
        settings: LevelSettings,
    },
    /// Records the player's current directional intent.
    SteerPlayer {
        /// Direction requested by the player, or `None` when no key is held.
        direction: Option<Direction>,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a free pursuer attempt a single move in the given direction.
    StepPursuer {
        /// Identifier of the pursuer attempting to move.
        pursuer: PursuerId,
        /// Direction of travel chosen for the attempt.
        direction: Direction,
    },
    /// Resolves player contact with pursuers and bonuses for the current frame.
    ResolveContacts,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a level was parsed and populated.
    LevelLoaded {
        /// Number of tile columns in the parsed grid.
        columns: u32,
        /// Number of tile rows in the parsed grid.
        rows: u32,
        /// Number of bonuses registered for the level.
        bonuses: usize,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player committed to a one-cell step.
    PlayerStepStarted {
        /// Resting cell the player left, in world coordinates.
        from: WorldPoint,
        /// Cell the player is travelling towards, in world coordinates.
        to: WorldPoint,
        /// Direction of the committed step.
        direction: Direction,
    },
    /// Confirms that the player came to rest on a grid cell.
    PlayerArrived {
        /// Resting cell reached by the player, in world coordinates.
        at: WorldPoint,
    },
    /// Announces that a pursuer left its confinement pen for good.
    PursuerReleased {
        /// Identifier of the released pursuer.
        pursuer: PursuerId,
    },
    /// Confirms that a pursuer moved.
    PursuerMoved {
        /// Identifier of the pursuer that moved.
        pursuer: PursuerId,
        /// Position after the move.
        to: WorldPoint,
        /// Direction of the move.
        direction: Direction,
    },
    /// Reports that a pursuer could not move this frame.
    PursuerStalled {
        /// Identifier of the stalled pursuer.
        pursuer: PursuerId,
    },
    /// Confirms that the player picked up a bonus.
    BonusCollected {
        /// Identifier of the collected bonus.
        bonus: BonusId,
    },
    /// Reports that a pursuer touched a vulnerable player.
    PlayerHit {
        /// Identifier of the pursuer that made contact.
        pursuer: PursuerId,
    },
    /// Announces that no uncollected bonus remains in the level.
    AllBonusesCollected,
}

/// Tunables applied when a level is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Edge length of one tile in world units.
    pub tile_length: f32,
    /// Player movement speed in world units per second.
    pub player_speed: f32,
    /// Pursuer movement speed in world units per second.
    pub pursuer_speed: f32,
    /// Length of the invincibility window that follows a hit.
    pub invincibility: Duration,
}

impl LevelSettings {
    /// Creates settings scaled for the provided tile length.
    ///
    /// Speeds keep the classic ratio of four tiles per second for the player
    /// and three tiles per second for pursuers.
    #[must_use]
    pub fn for_tile_length(tile_length: f32) -> Self {
        Self {
            tile_length,
            player_speed: tile_length * 4.0,
            pursuer_speed: tile_length * 3.0,
            invincibility: Duration::from_secs(1),
        }
    }
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self::for_tile_length(DEFAULT_TILE_LENGTH)
    }
}

/// Cardinal movement directions shared by the player and pursuers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing world `y` (toward the top text row).
    Up,
    /// Movement toward decreasing world `y`.
    Down,
    /// Movement toward decreasing world `x`.
    Left,
    /// Movement toward increasing world `x`.
    Right,
}

impl Direction {
    /// Unit displacement along the world axes.
    #[must_use]
    pub const fn unit(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, 1.0),
            Self::Down => (0.0, -1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Classification of a single map tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Plain walkable floor (`0`).
    Floor,
    /// Walkable tile marking the player's spawn (`P`).
    PlayerSpawn,
    /// Walkable tile on which a bonus is placed at load time (`b`).
    BonusSpawn,
    /// Walkable confinement tile that pursuers may only leave (`-`).
    Pen,
    /// Non-walkable furniture or wall, keeping its glyph for presentation.
    Decoration(char),
}

impl TileKind {
    /// Classifies a character from the map text.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Self {
        match glyph {
            '0' => Self::Floor,
            'P' => Self::PlayerSpawn,
            'b' => Self::BonusSpawn,
            '-' => Self::Pen,
            other => Self::Decoration(other),
        }
    }

    /// Character that represents the tile in map text.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Floor => '0',
            Self::PlayerSpawn => 'P',
            Self::BonusSpawn => 'b',
            Self::Pen => '-',
            Self::Decoration(glyph) => glyph,
        }
    }

    /// Reports whether an actor may stand on the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Decoration(_))
    }
}

/// Continuous position expressed in world units, origin at the bottom-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, increasing upwards.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point displaced by `distance` along `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: f32) -> Self {
        let (dx, dy) = direction.unit();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Axis-aligned bounding box anchored at its bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    origin: WorldPoint,
    width: f32,
    height: f32,
}

impl Aabb {
    /// Creates a box from its bottom-left corner and extent.
    #[must_use]
    pub const fn new(origin: WorldPoint, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Bottom-left corner of the box.
    #[must_use]
    pub const fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Horizontal extent of the box.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the box.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Geometric centre of the box.
    #[must_use]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    /// Strict intersection test; boxes that merely touch do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.origin.x < other.origin.x + other.width
            && self.origin.x + self.width > other.origin.x
            && self.origin.y < other.origin.y + other.height
            && self.origin.y + self.height > other.origin.y
    }
}

/// Capability shared by everything that occupies space in the maze.
pub trait Bounded {
    /// Bounding box used for overlap and presentation.
    fn bounds(&self) -> Aabb;

    /// Reports whether this value's box strictly intersects another's.
    fn overlaps<B: Bounded + ?Sized>(&self, other: &B) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

impl Bounded for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

/// Unique identifier assigned to a bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BonusId(u32);

impl BonusId {
    /// Creates a new bonus identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PursuerId(u32);

impl PursuerId {
    /// Creates a new pursuer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of bonus that can be placed in the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Trophy occupying one full tile.
    Trophy,
}

/// Per-facing candidate orderings that drive a pursuer's direction choice.
///
/// Each row lists all four directions; the first legal one wins, so the
/// ordering itself is the tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriorityTable {
    up: [Direction; 4],
    down: [Direction; 4],
    left: [Direction; 4],
    right: [Direction; 4],
}

impl PriorityTable {
    /// Creates a table from one ordering per current facing.
    #[must_use]
    pub const fn new(
        up: [Direction; 4],
        down: [Direction; 4],
        left: [Direction; 4],
        right: [Direction; 4],
    ) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Ordering consulted while facing the provided direction.
    #[must_use]
    pub const fn candidates(&self, facing: Direction) -> &[Direction; 4] {
        match facing {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

const CRIMSON_TABLE: PriorityTable =
    PriorityTable::new([U, L, R, D], [D, R, L, U], [L, D, U, R], [R, U, D, L]);
const AMBER_TABLE: PriorityTable =
    PriorityTable::new([U, L, R, D], [D, L, R, U], [L, U, D, R], [R, U, D, L]);
const AZURE_TABLE: PriorityTable =
    PriorityTable::new([U, R, D, L], [D, R, L, U], [L, D, R, U], [R, D, L, U]);
const JADE_TABLE: PriorityTable =
    PriorityTable::new([U, R, L, D], [D, R, L, U], [L, D, U, R], [R, U, D, L]);

/// Behavioural identity of a pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PursuerKind {
    /// Starts at the pen anchor and prefers left turns when heading up.
    Crimson,
    /// Starts one tile right of the anchor and prefers left turns vertically.
    Amber,
    /// Starts one tile left of the anchor and favours clockwise turns.
    Azure,
    /// Starts one tile below the anchor and prefers right turns when heading up.
    Jade,
}

impl PursuerKind {
    /// Roster in the order pursuers are placed and advanced.
    pub const ROSTER: [PursuerKind; 4] = [Self::Crimson, Self::Amber, Self::Azure, Self::Jade];

    /// Priority table that distinguishes this pursuer's navigation.
    #[must_use]
    pub const fn priority_table(self) -> PriorityTable {
        match self {
            Self::Crimson => CRIMSON_TABLE,
            Self::Amber => AMBER_TABLE,
            Self::Azure => AZURE_TABLE,
            Self::Jade => JADE_TABLE,
        }
    }

    /// Offset from the pen anchor, in whole tiles, at which the pursuer starts.
    #[must_use]
    pub const fn spawn_offset(self) -> (i32, i32) {
        match self {
            Self::Crimson => (0, 0),
            Self::Amber => (1, 0),
            Self::Azure => (-1, 0),
            Self::Jade => (0, -1),
        }
    }
}

/// Phase of a pursuer's two-phase behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PursuerPhase {
    /// Still climbing out of the confinement pen.
    Confined,
    /// Navigating the maze with the priority table; terminal.
    Free,
}

/// Motion state of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerMotion {
    /// Resting on a grid cell and accepting input.
    Idle,
    /// Interpolating toward a committed cell; input is ignored.
    Stepping {
        /// Cell the player is travelling towards.
        target: WorldPoint,
    },
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Current position of the player's bottom-left corner.
    pub position: WorldPoint,
    /// Box used for collision tests.
    pub bounds: Aabb,
    /// Direction the player is facing.
    pub facing: Direction,
    /// Current motion state.
    pub motion: PlayerMotion,
    /// Whether contact with a pursuer currently counts as a hit.
    pub vulnerable: bool,
    /// Animation frame index for the current facing.
    pub animation_frame: u8,
}

impl Bounded for PlayerSnapshot {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// Immutable representation of a single pursuer's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PursuerSnapshot {
    /// Unique identifier assigned to the pursuer.
    pub id: PursuerId,
    /// Behavioural identity of the pursuer.
    pub kind: PursuerKind,
    /// Box used for collision tests; its origin is the pursuer's position.
    pub bounds: Aabb,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Direction the pursuer is facing.
    pub facing: Direction,
    /// Current behaviour phase.
    pub phase: PursuerPhase,
    /// Animation frame index for the current facing.
    pub animation_frame: u8,
}

impl Bounded for PursuerSnapshot {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// Immutable representation of a single bonus used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BonusSnapshot {
    /// Unique identifier assigned to the bonus.
    pub id: BonusId,
    /// Kind of bonus.
    pub kind: BonusKind,
    /// Area covered by the bonus.
    pub bounds: Aabb,
    /// Whether the bonus has been picked up.
    pub collected: bool,
}

impl Bounded for BonusSnapshot {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn glyphs_classify_walkability() {
        assert!(TileKind::from_glyph('0').is_walkable());
        assert!(TileKind::from_glyph('P').is_walkable());
        assert!(TileKind::from_glyph('b').is_walkable());
        assert!(TileKind::from_glyph('-').is_walkable());
        assert!(!TileKind::from_glyph('T').is_walkable());
        assert!(!TileKind::from_glyph('#').is_walkable());
        assert_eq!(TileKind::from_glyph('C').glyph(), 'C');
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let left = Aabb::new(WorldPoint::new(0.0, 0.0), 1.0, 1.0);
        let right = Aabb::new(WorldPoint::new(1.0, 0.0), 1.0, 1.0);
        assert!(!left.overlaps(&right));
        assert!(!right.overlaps(&left));

        let shifted = Aabb::new(WorldPoint::new(0.5, 0.5), 1.0, 1.0);
        assert!(left.overlaps(&shifted));
        assert!(Bounded::overlaps(&shifted, &left));
    }

    #[test]
    fn every_table_row_is_a_permutation_led_by_its_facing() {
        let all = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        for kind in PursuerKind::ROSTER {
            let table = kind.priority_table();
            for facing in all {
                let row = table.candidates(facing);
                assert_eq!(row[0], facing, "{kind:?} does not keep heading {facing:?}");
                for direction in all {
                    assert_eq!(
                        row.iter().filter(|candidate| **candidate == direction).count(),
                        1
                    );
                }
            }
        }
    }

    #[test]
    fn roster_tables_are_distinct() {
        for (index, kind) in PursuerKind::ROSTER.iter().enumerate() {
            for other in &PursuerKind::ROSTER[index + 1..] {
                assert_ne!(kind.priority_table(), other.priority_table());
            }
        }
    }

    #[test]
    fn offset_follows_world_axes() {
        let origin = WorldPoint::new(2.0, 2.0);
        assert_eq!(origin.offset(Direction::Up, 1.0), WorldPoint::new(2.0, 3.0));
        assert_eq!(origin.offset(Direction::Left, 0.5), WorldPoint::new(1.5, 2.0));
    }

    #[test]
    fn priority_table_round_trips_through_bincode() {
        assert_round_trip(&PursuerKind::Azure.priority_table());
    }

    #[test]
    fn tile_kind_round_trips_through_bincode() {
        assert_round_trip(&TileKind::Decoration('T'));
    }

    #[test]
    fn level_settings_round_trip_through_bincode() {
        assert_round_trip(&LevelSettings::for_tile_length(1.0));
    }
}
