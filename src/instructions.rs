//! This module defines the `InstructionTable`, the deterministic partial
//! mapping from (symbol under head, current state) to the action a machine
//! takes: the symbol to write, the head movement, and the next state.

use crate::types::{Direction, State, Symbol, TableError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The output of an instruction: what to write, where to move, and which
/// state to adopt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action<S: Symbol, Q: State> {
    /// The symbol written at the head's current position.
    pub write: S,
    /// The head movement applied after the write.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: Q,
}

impl<S: Symbol, Q: State> Action<S, Q> {
    pub fn new(write: S, direction: Direction, next_state: Q) -> Self {
        Self {
            write,
            direction,
            next_state,
        }
    }
}

/// A deterministic partial function from `(symbol, state)` inputs to
/// [`Action`] outputs.
///
/// Stored two levels deep (by symbol, then by state) purely for lookup;
/// logically the table is a set of input/output pairs with unique inputs.
/// Like every other component, the table is an immutable value: `insert` and
/// `remove` return new tables. Inner maps left empty by removal are pruned so
/// equal logical tables are structurally equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionTable<S: Symbol, Q: State> {
    rules: HashMap<S, HashMap<Q, Action<S, Q>>>,
}

impl<S: Symbol, Q: State> Default for InstructionTable<S, Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, Q: State> InstructionTable<S, Q> {
    /// Creates a table with no instructions.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Builds a table by inserting each `((symbol, state), action)` pair in
    /// order; later pairs for the same input replace earlier ones.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = ((S, Q), Action<S, Q>)>,
    {
        rules
            .into_iter()
            .fold(Self::new(), |table, ((symbol, state), action)| {
                table.insert(symbol, state, action)
            })
    }

    /// Returns every instruction as an `((symbol, state), action)` pair, one
    /// per distinct input. Order is unspecified; feeding the result back into
    /// [`InstructionTable::from_rules`] reproduces the table.
    pub fn to_rules(&self) -> Vec<((S, Q), Action<S, Q>)> {
        self.rules
            .iter()
            .flat_map(|(symbol, by_state)| {
                by_state.iter().map(|(state, action)| {
                    ((symbol.clone(), state.clone()), action.clone())
                })
            })
            .collect()
    }

    /// Returns a new table mapping `(symbol, state)` to `action`. An existing
    /// instruction for the same input is replaced.
    pub fn insert(&self, symbol: S, state: Q, action: Action<S, Q>) -> Self {
        let mut rules = self.rules.clone();
        rules.entry(symbol).or_default().insert(state, action);
        Self { rules }
    }

    /// Returns a new table with the instruction for `(symbol, state)` absent.
    /// Removing an input that is not mapped yields an equal table.
    pub fn remove(&self, symbol: &S, state: &Q) -> Self {
        let mut rules = self.rules.clone();
        if let Some(by_state) = rules.get_mut(symbol) {
            by_state.remove(state);
            if by_state.is_empty() {
                rules.remove(symbol);
            }
        }
        Self { rules }
    }

    /// Looks up the action for `(symbol, state)`. A miss is a normal outcome
    /// (the mapping is partial), so the result is an `Option`, not an error.
    pub fn lookup(&self, symbol: &S, state: &Q) -> Option<&Action<S, Q>> {
        self.rules.get(symbol).and_then(|by_state| by_state.get(state))
    }

    /// Returns the set of distinct `(symbol, state)` inputs currently mapped.
    pub fn inputs(&self) -> HashSet<(S, Q)> {
        self.rules
            .iter()
            .flat_map(|(symbol, by_state)| {
                by_state.keys().map(|state| (symbol.clone(), state.clone()))
            })
            .collect()
    }

    /// Returns the set of distinct actions reachable via any mapped input.
    pub fn outputs(&self) -> HashSet<Action<S, Q>> {
        self.rules
            .values()
            .flat_map(|by_state| by_state.values().cloned())
            .collect()
    }

    /// Returns the number of instructions in the table.
    pub fn len(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks every instruction against an alphabet and a set of possible
    /// states, one condition category at a time: read symbols, then read
    /// states, then written symbols, then next states. The first violated
    /// category is reported. Directions need no check here since typed
    /// [`Direction`] values are exhaustive.
    ///
    /// Returns the table unchanged on success so validation chains.
    pub fn validate(
        &self,
        alphabet: &HashSet<S>,
        states: &HashSet<Q>,
    ) -> Result<&Self, TableError<S, Q>> {
        if let Some(symbol) = self.rules.keys().find(|s| !alphabet.contains(*s)) {
            return Err(TableError::ReadSymbolNotInAlphabet(symbol.clone()));
        }

        if let Some(state) = self
            .rules
            .values()
            .flat_map(HashMap::keys)
            .find(|q| !states.contains(*q))
        {
            return Err(TableError::ReadStateUnknown(state.clone()));
        }

        let actions = || self.rules.values().flat_map(HashMap::values);

        if let Some(action) = actions().find(|a| !alphabet.contains(&a.write)) {
            return Err(TableError::WriteSymbolNotInAlphabet(action.write.clone()));
        }

        if let Some(action) = actions().find(|a| !states.contains(&a.next_state)) {
            return Err(TableError::NextStateUnknown(action.next_state.clone()));
        }

        Ok(self)
    }
}
