//! This module defines the core types shared across the simulator: the trait
//! bounds for tape symbols and control states, head movement directions, and
//! the error types surfaced by validation and stepping.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Bound for tape symbols. Any cloneable, hashable, equality-comparable type
/// with a debug representation qualifies; the blanket impl means callers never
/// implement this by hand.
pub trait Symbol: Clone + Eq + Hash + Debug {}
impl<T: Clone + Eq + Hash + Debug> Symbol for T {}

/// Bound for control states, identical to [`Symbol`]. Kept as a separate
/// trait so signatures say which role a type parameter plays.
pub trait State: Clone + Eq + Hash + Debug {}
impl<T: Clone + Eq + Hash + Debug> State for T {}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Returns the offset this direction applies to a head position.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }

    /// Returns the single-character encoding of this direction, as used in
    /// snapshots and textual rule formats.
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'S',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = InvalidDirection;

    /// Decodes a direction from its character encoding. This is the gate for
    /// untrusted instruction data; typed [`Direction`] values are always valid.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            'S' => Ok(Direction::Stay),
            _ => Err(InvalidDirection(c)),
        }
    }
}

/// Error produced when decoding a direction from a character that is not one
/// of `'L'`, `'R'`, or `'S'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid direction (expected 'L', 'R' or 'S')")]
pub struct InvalidDirection(pub char);

/// Errors found when validating a tape against an alphabet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TapeError<S: Symbol> {
    /// The tape's blank symbol is not a member of the alphabet.
    #[error("blank symbol {0:?} is not in the alphabet")]
    BlankNotInAlphabet(S),
    /// A stored cell holds a symbol outside the alphabet.
    #[error("tape symbol {symbol:?} at position {position} is not in the alphabet")]
    SymbolNotInAlphabet { position: i64, symbol: S },
}

/// Errors found when validating an instruction table against an alphabet and
/// a set of possible states. Conditions are checked per category, in the
/// order the variants are declared.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError<S: Symbol, Q: State> {
    /// An instruction matches on a symbol outside the alphabet.
    #[error("instruction reads symbol {0:?} which is not in the alphabet")]
    ReadSymbolNotInAlphabet(S),
    /// An instruction matches on a state outside the possible states.
    #[error("instruction matches state {0:?} which is not a possible state")]
    ReadStateUnknown(Q),
    /// An instruction writes a symbol outside the alphabet.
    #[error("instruction writes symbol {0:?} which is not in the alphabet")]
    WriteSymbolNotInAlphabet(S),
    /// An instruction transitions to a state outside the possible states.
    #[error("instruction transitions to state {0:?} which is not a possible state")]
    NextStateUnknown(Q),
    /// An instruction carries an undecodable direction. Typed tables cannot
    /// hit this; it surfaces when rules are decoded from snapshots or text.
    #[error(transparent)]
    Direction(#[from] InvalidDirection),
}

/// Errors found by full-machine validation, reported in check order: blank
/// symbol, current state, halt states, instruction table, tape contents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError<S: Symbol, Q: State> {
    /// The machine's current state is not a member of its possible states.
    #[error("current state {0:?} is not one of the machine's possible states")]
    UnknownState(Q),
    /// A halt state is not a member of the possible states.
    #[error("halt state {0:?} is not one of the machine's possible states")]
    HaltStateNotPossible(Q),
    #[error(transparent)]
    Table(#[from] TableError<S, Q>),
    #[error(transparent)]
    Tape(#[from] TapeError<S>),
}

/// Errors produced by [`crate::Machine::step`]. Both indicate caller errors
/// rather than transient conditions: a halted machine has no successor, and a
/// lookup miss means the instruction table does not cover the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionError<S: Symbol, Q: State> {
    /// The machine is already in a halt state; stepping it is an error so
    /// callers can tell "finished" from "stuck".
    #[error("machine already halted in state {0:?}")]
    AlreadyHalted(Q),
    /// No instruction is defined for the symbol under the head and the
    /// current state.
    #[error("no instruction defined for symbol {symbol:?} in state {state:?}")]
    UndefinedInstruction { symbol: S, state: Q },
}
