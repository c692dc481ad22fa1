//! This module defines the `Head` struct, a read/write cursor pairing a tape
//! with a current integer position.

use crate::tape::Tape;
use crate::types::{Direction, Symbol};
use serde::{Deserialize, Serialize};

/// A read/write cursor over a [`Tape`].
///
/// The head owns its tape by value, and every operation returns a new head,
/// so no mutation of an existing head is ever observable. The position is an
/// unbounded signed integer; the tape is conceptually infinite in both
/// directions and no bounds apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head<S: Symbol> {
    tape: Tape<S>,
    position: i64,
}

impl<S: Symbol> Head<S> {
    /// Creates a head over `tape` at `position`. Any position is accepted.
    pub fn new(tape: Tape<S>, position: i64) -> Self {
        Self { tape, position }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> &S {
        self.tape.read(self.position)
    }

    /// Returns a new head whose tape has `symbol` written at the current
    /// position. The position is unchanged.
    pub fn write(&self, symbol: S) -> Self {
        Self {
            tape: self.tape.write(self.position, symbol),
            position: self.position,
        }
    }

    /// Returns a new head moved one cell in `direction` (or left in place
    /// for [`Direction::Stay`]). The tape is unchanged.
    pub fn shift(&self, direction: Direction) -> Self {
        Self {
            tape: self.tape.clone(),
            position: self.position + direction.offset(),
        }
    }

    /// Returns the head's current position.
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Returns the tape under the head.
    pub fn tape(&self) -> &Tape<S> {
        &self.tape
    }
}
