//! This module defines the `Machine` struct, which composes a head, the
//! state and alphabet metadata, and an instruction table into a complete
//! single-tape Turing Machine with a single-step transition function and
//! explicit full-object validation.

use crate::head::Head;
use crate::instructions::InstructionTable;
use crate::types::{State, Symbol, TapeError, TransitionError, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single-tape Turing Machine.
///
/// A machine is an immutable value: [`Machine::step`] returns the successor
/// machine and leaves the receiver untouched. Construction is unchecked so
/// that tooling and tests can build transiently-invalid machines; callers
/// assembling a machine from untrusted input should run [`Machine::validate`]
/// before trusting `step` to behave per the documented invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine<S: Symbol, Q: State> {
    alphabet: HashSet<S>,
    head: Head<S>,
    states: HashSet<Q>,
    halt_states: HashSet<Q>,
    state: Q,
    instructions: InstructionTable<S, Q>,
}

impl<S: Symbol, Q: State> Machine<S, Q> {
    /// Assembles a machine from its six attributes. No validation is
    /// performed; see [`Machine::validate`].
    pub fn new(
        alphabet: HashSet<S>,
        head: Head<S>,
        states: HashSet<Q>,
        halt_states: HashSet<Q>,
        state: Q,
        instructions: InstructionTable<S, Q>,
    ) -> Self {
        Self {
            alphabet,
            head,
            states,
            halt_states,
            state,
            instructions,
        }
    }

    /// Checks if the machine's current state is a halt state. A machine may
    /// be constructed already halted.
    pub fn is_halted(&self) -> bool {
        self.halt_states.contains(&self.state)
    }

    /// Executes a single step: reads the symbol under the head, looks up the
    /// instruction for (symbol, current state), and returns the successor
    /// machine with the symbol written, the head moved, and the next state
    /// adopted. The write happens at the old position and the move is
    /// relative to it.
    ///
    /// # Errors
    ///
    /// * [`TransitionError::AlreadyHalted`] if the current state is a halt
    ///   state; stepping a finished machine is a caller error, not a no-op.
    /// * [`TransitionError::UndefinedInstruction`] if the table has no entry
    ///   for the current (symbol, state) configuration.
    pub fn step(&self) -> Result<Self, TransitionError<S, Q>> {
        if self.is_halted() {
            return Err(TransitionError::AlreadyHalted(self.state.clone()));
        }

        let symbol = self.head.read().clone();
        let action = self
            .instructions
            .lookup(&symbol, &self.state)
            .cloned()
            .ok_or_else(|| TransitionError::UndefinedInstruction {
                symbol: symbol.clone(),
                state: self.state.clone(),
            })?;

        Ok(Self {
            alphabet: self.alphabet.clone(),
            head: self.head.write(action.write).shift(action.direction),
            states: self.states.clone(),
            halt_states: self.halt_states.clone(),
            state: action.next_state,
            instructions: self.instructions.clone(),
        })
    }

    /// Validates the whole machine, checking in order: the blank symbol is in
    /// the alphabet, the current state is a possible state, the halt states
    /// are a subset of the possible states, the instruction table only
    /// references the alphabet and possible states, and every non-blank tape
    /// symbol is in the alphabet. Only the first violation is reported.
    ///
    /// Returns the machine unchanged on success.
    pub fn validate(&self) -> Result<&Self, ValidationError<S, Q>> {
        let blank = self.head.tape().blank();
        if !self.alphabet.contains(blank) {
            return Err(TapeError::BlankNotInAlphabet(blank.clone()).into());
        }

        if !self.states.contains(&self.state) {
            return Err(ValidationError::UnknownState(self.state.clone()));
        }

        if let Some(halt) = self.halt_states.difference(&self.states).next() {
            return Err(ValidationError::HaltStateNotPossible(halt.clone()));
        }

        self.instructions.validate(&self.alphabet, &self.states)?;
        self.head.tape().validate(&self.alphabet)?;

        Ok(self)
    }

    /// Returns the machine's alphabet.
    pub fn alphabet(&self) -> &HashSet<S> {
        &self.alphabet
    }

    /// Returns the machine's head.
    pub fn head(&self) -> &Head<S> {
        &self.head
    }

    /// Returns the machine's set of possible states.
    pub fn states(&self) -> &HashSet<Q> {
        &self.states
    }

    /// Returns the machine's halt states.
    pub fn halt_states(&self) -> &HashSet<Q> {
        &self.halt_states
    }

    /// Returns the machine's current control state.
    pub fn state(&self) -> &Q {
        &self.state
    }

    /// Returns the machine's instruction table.
    pub fn instructions(&self) -> &InstructionTable<S, Q> {
        &self.instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::Action;
    use crate::tape::Tape;
    use crate::types::{Direction, TableError};

    /// The incrementer-style machine: alphabet {0, 1}, blank '0', a single
    /// '1' at position 0, states {A, H} with H halting.
    fn machine() -> Machine<char, &'static str> {
        let instructions = InstructionTable::from_rules(vec![
            (('0', "A"), Action::new('1', Direction::Right, "A")),
            (('1', "A"), Action::new('1', Direction::Stay, "H")),
        ]);

        Machine::new(
            ['0', '1'].into_iter().collect(),
            Head::new(Tape::from_cells('0', vec![(0, '1')]), 0),
            ["A", "H"].into_iter().collect(),
            ["H"].into_iter().collect(),
            "A",
            instructions,
        )
    }

    #[test]
    fn test_single_step_to_halt() {
        let stepped = machine().step().unwrap();

        assert_eq!(*stepped.state(), "H");
        assert!(stepped.is_halted());
        assert_eq!(stepped.head().position(), 0);
        assert_eq!(*stepped.head().read(), '1');
        assert_eq!(stepped.head().tape().to_cells(), vec![(0, '1')]);
    }

    #[test]
    fn test_step_leaves_original_machine_untouched() {
        let original = machine();
        let before = original.clone();

        original.step().unwrap();

        assert_eq!(original, before);
        assert_eq!(*original.state(), "A");
        assert_eq!(original.head().position(), 0);
        assert_eq!(original.head().tape().to_cells(), vec![(0, '1')]);
    }

    #[test]
    fn test_step_write_happens_before_move() {
        let instructions = InstructionTable::from_rules(vec![(
            ('1', "A"),
            Action::new('0', Direction::Right, "A"),
        )]);
        let machine = Machine::new(
            ['0', '1'].into_iter().collect(),
            Head::new(Tape::from_cells('0', vec![(0, '1')]), 0),
            ["A"].into_iter().collect(),
            HashSet::new(),
            "A",
            instructions,
        );

        let stepped = machine.step().unwrap();

        // The '1' at the old position was overwritten, then the head moved.
        assert_eq!(stepped.head().position(), 1);
        assert!(stepped.head().tape().nonblank_positions().is_empty());
    }

    #[test]
    fn test_step_already_halted() {
        let halted = machine().step().unwrap();

        assert_eq!(halted.step(), Err(TransitionError::AlreadyHalted("H")));
    }

    #[test]
    fn test_step_fails_for_every_halt_state() {
        for halt_state in ["H1", "H2"] {
            let machine: Machine<char, &str> = Machine::new(
                ['0'].into_iter().collect(),
                Head::new(Tape::new('0'), 0),
                ["H1", "H2"].into_iter().collect(),
                ["H1", "H2"].into_iter().collect(),
                halt_state,
                InstructionTable::new(),
            );

            assert_eq!(
                machine.step(),
                Err(TransitionError::AlreadyHalted(halt_state))
            );
        }
    }

    #[test]
    fn test_step_undefined_instruction() {
        let machine = Machine::new(
            ['0', '1'].into_iter().collect(),
            Head::new(Tape::new('0'), 5),
            ["A", "H"].into_iter().collect(),
            ["H"].into_iter().collect(),
            "A",
            InstructionTable::from_rules(vec![(
                ('1', "A"),
                Action::new('1', Direction::Stay, "H"),
            )]),
        );

        // The head reads blank '0' at position 5, and no ('0', "A") rule exists.
        assert_eq!(
            machine.step(),
            Err(TransitionError::UndefinedInstruction {
                symbol: '0',
                state: "A"
            })
        );
    }

    #[test]
    fn test_machine_constructed_halted() {
        let machine: Machine<char, &str> = Machine::new(
            ['0'].into_iter().collect(),
            Head::new(Tape::new('0'), 0),
            ["H"].into_iter().collect(),
            ["H"].into_iter().collect(),
            "H",
            InstructionTable::new(),
        );

        assert!(machine.is_halted());
        assert_eq!(machine.step(), Err(TransitionError::AlreadyHalted("H")));
    }

    #[test]
    fn test_validate_ok() {
        let machine = machine();
        assert_eq!(machine.validate(), Ok(&machine));
    }

    #[test]
    fn test_validate_blank_not_in_alphabet() {
        let machine: Machine<char, &str> = Machine::new(
            ['1'].into_iter().collect(),
            Head::new(Tape::new('0'), 0),
            ["A"].into_iter().collect(),
            HashSet::new(),
            "A",
            InstructionTable::new(),
        );

        assert_eq!(
            machine.validate(),
            Err(TapeError::BlankNotInAlphabet('0').into())
        );
    }

    #[test]
    fn test_validate_unknown_current_state() {
        let machine: Machine<char, &str> = Machine::new(
            ['0'].into_iter().collect(),
            Head::new(Tape::new('0'), 0),
            ["A"].into_iter().collect(),
            HashSet::new(),
            "ghost",
            InstructionTable::new(),
        );

        assert_eq!(
            machine.validate(),
            Err(ValidationError::UnknownState("ghost"))
        );
    }

    #[test]
    fn test_validate_halt_states_not_subset() {
        let machine: Machine<char, &str> = Machine::new(
            ['0'].into_iter().collect(),
            Head::new(Tape::new('0'), 0),
            ["A"].into_iter().collect(),
            ["X"].into_iter().collect(),
            "A",
            InstructionTable::new(),
        );

        assert_eq!(
            machine.validate(),
            Err(ValidationError::HaltStateNotPossible("X"))
        );
    }

    #[test]
    fn test_validate_bad_instruction_table() {
        let machine: Machine<char, &str> = Machine::new(
            ['0'].into_iter().collect(),
            Head::new(Tape::new('0'), 0),
            ["A"].into_iter().collect(),
            HashSet::new(),
            "A",
            InstructionTable::from_rules(vec![(
                ('0', "A"),
                Action::new('0', Direction::Left, "ghost"),
            )]),
        );

        assert_eq!(
            machine.validate(),
            Err(TableError::NextStateUnknown("ghost").into())
        );
    }

    #[test]
    fn test_validate_bad_tape_symbol() {
        let machine: Machine<char, &str> = Machine::new(
            ['0'].into_iter().collect(),
            Head::new(Tape::from_cells('0', vec![(2, 'x')]), 0),
            ["A"].into_iter().collect(),
            HashSet::new(),
            "A",
            InstructionTable::new(),
        );

        assert_eq!(
            machine.validate(),
            Err(TapeError::SymbolNotInAlphabet {
                position: 2,
                symbol: 'x'
            }
            .into())
        );
    }

    #[test]
    fn test_validate_reports_first_violation_only() {
        // Unknown current state and bad halt set; the current-state check
        // comes first in the fixed order.
        let machine: Machine<char, &str> = Machine::new(
            ['0'].into_iter().collect(),
            Head::new(Tape::new('0'), 0),
            ["A"].into_iter().collect(),
            ["X"].into_iter().collect(),
            "ghost",
            InstructionTable::new(),
        );

        assert_eq!(
            machine.validate(),
            Err(ValidationError::UnknownState("ghost"))
        );
    }

    #[test]
    fn test_run_to_fixed_point_is_a_caller_loop() {
        // Repeated stepping lives outside the core; this is the idiom.
        let mut machine = machine();
        let mut steps = 0;
        while !machine.is_halted() {
            machine = machine.step().unwrap();
            steps += 1;
        }

        assert_eq!(steps, 1);
        assert!(machine.is_halted());
    }
}
