//! This module provides a flat, serialization-friendly projection of a
//! machine. A [`Snapshot`] carries the full configuration (tape cells, head
//! position, state metadata, and rules) as plain vectors, with directions
//! encoded as characters, so it serializes to readable JSON and survives
//! transport through systems that know nothing about the crate's types.

use crate::head::Head;
use crate::instructions::{Action, InstructionTable};
use crate::machine::Machine;
use crate::tape::Tape;
use crate::types::{Direction, InvalidDirection, State, Symbol};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One instruction in wire form. The direction is a character (`'L'`, `'R'`,
/// `'S'`) and is re-validated when the snapshot is restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRule<S: Symbol, Q: State> {
    pub read: S,
    pub state: Q,
    pub write: S,
    pub direction: char,
    pub next_state: Q,
}

/// A machine configuration flattened for serialization.
///
/// Collection order within the vectors is unspecified (the underlying sets
/// and maps are unordered); restoring a snapshot rebuilds the canonical
/// in-memory forms, so `capture` followed by `restore` reproduces a machine
/// equal to the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S: Symbol, Q: State> {
    pub blank: S,
    pub cells: Vec<(i64, S)>,
    pub position: i64,
    pub alphabet: Vec<S>,
    pub states: Vec<Q>,
    pub halt_states: Vec<Q>,
    pub state: Q,
    pub rules: Vec<SnapshotRule<S, Q>>,
}

impl<S: Symbol, Q: State> Snapshot<S, Q> {
    /// Captures the full configuration of `machine`.
    pub fn capture(machine: &Machine<S, Q>) -> Self {
        let rules = machine
            .instructions()
            .to_rules()
            .into_iter()
            .map(|((read, state), action)| SnapshotRule {
                read,
                state,
                write: action.write,
                direction: action.direction.as_char(),
                next_state: action.next_state,
            })
            .collect();

        Self {
            blank: machine.head().tape().blank().clone(),
            cells: machine.head().tape().to_cells(),
            position: machine.head().position(),
            alphabet: machine.alphabet().iter().cloned().collect(),
            states: machine.states().iter().cloned().collect(),
            halt_states: machine.halt_states().iter().cloned().collect(),
            state: machine.state().clone(),
            rules,
        }
    }

    /// Rebuilds a machine from this snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDirection`] if any rule carries a direction character
    /// other than `'L'`, `'R'`, or `'S'`. Snapshot data is the one place
    /// untrusted directions can enter, so they are checked here rather than
    /// trusted into the typed table.
    pub fn restore(&self) -> Result<Machine<S, Q>, InvalidDirection> {
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                let direction = Direction::try_from(rule.direction)?;
                Ok((
                    (rule.read.clone(), rule.state.clone()),
                    Action::new(rule.write.clone(), direction, rule.next_state.clone()),
                ))
            })
            .collect::<Result<Vec<_>, InvalidDirection>>()?;

        let tape = Tape::from_cells(self.blank.clone(), self.cells.iter().cloned());

        Ok(Machine::new(
            self.alphabet.iter().cloned().collect(),
            Head::new(tape, self.position),
            self.states.iter().cloned().collect(),
            self.halt_states.iter().cloned().collect(),
            self.state.clone(),
            InstructionTable::from_rules(rules),
        ))
    }
}

impl<S, Q> Snapshot<S, Q>
where
    S: Symbol + Serialize,
    Q: State + Serialize,
{
    /// Serializes the snapshot to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<S, Q> Snapshot<S, Q>
where
    S: Symbol + DeserializeOwned,
    Q: State + DeserializeOwned,
{
    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> Machine<char, String> {
        let instructions = InstructionTable::from_rules(vec![
            (
                ('0', "scan".to_string()),
                Action::new('1', Direction::Right, "scan".to_string()),
            ),
            (
                ('1', "scan".to_string()),
                Action::new('1', Direction::Stay, "done".to_string()),
            ),
        ]);

        Machine::new(
            ['0', '1'].into_iter().collect(),
            Head::new(Tape::from_cells('0', vec![(0, '1'), (3, '1')]), 0),
            ["scan".to_string(), "done".to_string()].into_iter().collect(),
            ["done".to_string()].into_iter().collect(),
            "scan".to_string(),
            instructions,
        )
    }

    #[test]
    fn test_capture_restore_round_trip() {
        let original = machine();
        let restored = Snapshot::capture(&original).restore().unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_capture_projects_configuration() {
        let snapshot = Snapshot::capture(&machine());

        assert_eq!(snapshot.blank, '0');
        assert_eq!(snapshot.cells, vec![(0, '1'), (3, '1')]);
        assert_eq!(snapshot.position, 0);
        assert_eq!(snapshot.state, "scan");
        assert_eq!(snapshot.rules.len(), 2);
        assert!(snapshot
            .rules
            .iter()
            .all(|rule| rule.direction == 'R' || rule.direction == 'S'));
    }

    #[test]
    fn test_json_round_trip() {
        let original = machine();

        let json = Snapshot::capture(&original).to_json().unwrap();
        let restored = Snapshot::<char, String>::from_json(&json)
            .unwrap()
            .restore()
            .unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_restore_rejects_invalid_direction() {
        let mut snapshot = Snapshot::capture(&machine());
        snapshot.rules[0].direction = 'X';

        assert_eq!(snapshot.restore(), Err(InvalidDirection('X')));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = Snapshot::<char, String>::from_json("not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_restored_machine_steps_like_the_original() {
        let original = machine();
        let restored = Snapshot::capture(&original).restore().unwrap();

        assert_eq!(restored.step().unwrap(), original.step().unwrap());
    }
}
