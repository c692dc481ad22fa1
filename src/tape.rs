//! This module defines the `Tape` struct, a sparse, bi-infinite sequence of
//! symbols addressed by signed integer position. Positions never written hold
//! the tape's blank symbol implicitly; only non-blank cells are stored.

use crate::types::{Symbol, TapeError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// A sparse, unbounded-in-both-directions tape of symbols.
///
/// The tape is an immutable value: [`Tape::write`] returns a new tape and
/// leaves the receiver untouched. The sparse store is kept canonical (no
/// stored cell ever equals the blank symbol), so two tapes with the same
/// logical content always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape<S: Symbol> {
    blank: S,
    cells: BTreeMap<i64, S>,
}

impl<S: Symbol> Tape<S> {
    /// Creates an empty tape: every position reads as `blank`.
    pub fn new(blank: S) -> Self {
        Self {
            blank,
            cells: BTreeMap::new(),
        }
    }

    /// Creates a tape by writing each `(position, symbol)` pair in order onto
    /// an initially empty tape. Later pairs win at the same position, and
    /// blank-valued pairs leave no stored cell.
    ///
    /// Accepts any iterator of pairs, so both explicit cell lists and maps
    /// work as input.
    pub fn from_cells<I>(blank: S, cells: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
    {
        cells
            .into_iter()
            .fold(Self::new(blank), |tape, (position, symbol)| {
                tape.write(position, symbol)
            })
    }

    /// Returns every non-blank cell as a `(position, symbol)` list, ordered
    /// by position. Feeding the result back into [`Tape::from_cells`] with
    /// the same blank reproduces the tape exactly.
    pub fn to_cells(&self) -> Vec<(i64, S)> {
        self.cells
            .iter()
            .map(|(&position, symbol)| (position, symbol.clone()))
            .collect()
    }

    /// Returns the symbol at `position`: the stored symbol if the cell was
    /// written, the blank symbol otherwise. Defined for every `i64`.
    pub fn read(&self, position: i64) -> &S {
        self.cells.get(&position).unwrap_or(&self.blank)
    }

    /// Returns a new tape with `position` set to `symbol`.
    ///
    /// Writing the blank symbol removes the cell from storage instead of
    /// storing it, preserving the canonical sparse form.
    pub fn write(&self, position: i64, symbol: S) -> Self {
        let mut cells = self.cells.clone();
        if symbol == self.blank {
            cells.remove(&position);
        } else {
            cells.insert(position, symbol);
        }

        Self {
            blank: self.blank.clone(),
            cells,
        }
    }

    /// Returns the set of positions currently holding a non-blank symbol.
    pub fn nonblank_positions(&self) -> BTreeSet<i64> {
        self.cells.keys().copied().collect()
    }

    /// Returns the tape's blank symbol.
    pub fn blank(&self) -> &S {
        &self.blank
    }

    /// Checks the tape against an alphabet: the blank symbol must be a
    /// member, and so must every stored symbol. Cells are checked in
    /// position order and the first violation is reported.
    ///
    /// Returns the tape unchanged on success so validation chains.
    pub fn validate(&self, alphabet: &HashSet<S>) -> Result<&Self, TapeError<S>> {
        if !alphabet.contains(&self.blank) {
            return Err(TapeError::BlankNotInAlphabet(self.blank.clone()));
        }

        for (&position, symbol) in &self.cells {
            if !alphabet.contains(symbol) {
                return Err(TapeError::SymbolNotInAlphabet {
                    position,
                    symbol: symbol.clone(),
                });
            }
        }

        Ok(self)
    }
}
