#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controller system that turns held keys into player steering commands.

use trophy_chase_core::{Command, Direction};

/// Directional keys held down during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldKeys {
    /// Whether the right key is held.
    pub right: bool,
    /// Whether the left key is held.
    pub left: bool,
    /// Whether the up key is held.
    pub up: bool,
    /// Whether the down key is held.
    pub down: bool,
}

impl HeldKeys {
    /// No key held.
    pub const NONE: Self = Self {
        right: false,
        left: false,
        up: false,
        down: false,
    };

    /// Only the key for `direction` held.
    #[must_use]
    pub fn only(direction: Direction) -> Self {
        let mut keys = Self::NONE;
        match direction {
            Direction::Right => keys.right = true,
            Direction::Left => keys.left = true,
            Direction::Up => keys.up = true,
            Direction::Down => keys.down = true,
        }
        keys
    }

    /// Reduces the held keys to at most one direction.
    ///
    /// Horizontal keys win over vertical ones; within an axis the positive
    /// direction wins.
    #[must_use]
    pub const fn resolve(self) -> Option<Direction> {
        if self.right {
            Some(Direction::Right)
        } else if self.left {
            Some(Direction::Left)
        } else if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Input half of the player controller.
#[derive(Debug, Default)]
pub struct Controller;

impl Controller {
    /// Emits the steering command for the keys held this frame.
    pub fn handle(&self, keys: HeldKeys, out: &mut Vec<Command>) {
        out.push(Command::SteerPlayer {
            direction: keys.resolve(),
        });
    }
}
