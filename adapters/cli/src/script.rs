//! Scripted input: one symbol per frame.

use thiserror::Error;
use trophy_chase_core::Direction;
use trophy_chase_system_controller::HeldKeys;

/// Symbol rejected while parsing an input script.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown input symbol {symbol:?} at frame {frame}; expected one of R, L, U, D, .")]
pub(crate) struct ScriptError {
    frame: usize,
    symbol: char,
}

/// Keys held on each frame of a headless run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct InputScript {
    frames: Vec<HeldKeys>,
}

impl InputScript {
    /// Parses `R`, `L`, `U`, `D` and `.` (no key). Whitespace is ignored.
    pub(crate) fn parse(source: &str) -> Result<Self, ScriptError> {
        let frames = source
            .chars()
            .filter(|symbol| !symbol.is_whitespace())
            .enumerate()
            .map(|(frame, symbol)| match symbol.to_ascii_uppercase() {
                'R' => Ok(HeldKeys::only(Direction::Right)),
                'L' => Ok(HeldKeys::only(Direction::Left)),
                'U' => Ok(HeldKeys::only(Direction::Up)),
                'D' => Ok(HeldKeys::only(Direction::Down)),
                '.' => Ok(HeldKeys::NONE),
                _ => Err(ScriptError { frame, symbol }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { frames })
    }

    /// Keys held on `frame`; frames past the end of the script hold nothing.
    pub(crate) fn keys(&self, frame: usize) -> HeldKeys {
        self.frames.get(frame).copied().unwrap_or(HeldKeys::NONE)
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }
}
