//! A small collection of ready-made machines over `char` symbols and
//! `&'static str` states, useful as demos and as fixtures for callers that
//! want a working machine without assembling one by hand.

use crate::head::Head;
use crate::instructions::{Action, InstructionTable};
use crate::machine::Machine;
use crate::tape::Tape;
use crate::types::Direction;

/// The symbol/state types all built-in machines share.
pub type BuiltinMachine = Machine<char, &'static str>;

lazy_static::lazy_static! {
    /// Registry of built-in machines, keyed by name.
    pub static ref MACHINES: Vec<(&'static str, BuiltinMachine)> = vec![
        ("binary-increment", binary_increment()),
        ("bit-flipper", bit_flipper()),
        ("busy-beaver-3", busy_beaver_3()),
    ];
}

/// Lists the names of all built-in machines.
pub fn names() -> Vec<&'static str> {
    MACHINES.iter().map(|(name, _)| *name).collect()
}

/// Returns a copy of the built-in machine with the given name.
pub fn find(name: &str) -> Option<BuiltinMachine> {
    MACHINES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, machine)| machine.clone())
}

/// Builds a binary incrementer over the tape `1011` (most significant bit at
/// position 0). It scans right to the end of the number, then carries back
/// left: trailing `1`s become `0`s until a `0` or blank absorbs the carry.
pub fn binary_increment() -> BuiltinMachine {
    let instructions = InstructionTable::from_rules(vec![
        (('0', "right"), Action::new('0', Direction::Right, "right")),
        (('1', "right"), Action::new('1', Direction::Right, "right")),
        (('_', "right"), Action::new('_', Direction::Left, "carry")),
        (('1', "carry"), Action::new('0', Direction::Left, "carry")),
        (('0', "carry"), Action::new('1', Direction::Stay, "done")),
        (('_', "carry"), Action::new('1', Direction::Stay, "done")),
    ]);

    Machine::new(
        ['0', '1', '_'].into_iter().collect(),
        Head::new(Tape::from_cells('_', cells_of("1011")), 0),
        ["right", "carry", "done"].into_iter().collect(),
        ["done"].into_iter().collect(),
        "right",
        instructions,
    )
}

/// Builds a machine that flips every bit of the tape `0110`, halting at the
/// first blank.
pub fn bit_flipper() -> BuiltinMachine {
    let instructions = InstructionTable::from_rules(vec![
        (('0', "flip"), Action::new('1', Direction::Right, "flip")),
        (('1', "flip"), Action::new('0', Direction::Right, "flip")),
        (('_', "flip"), Action::new('_', Direction::Stay, "done")),
    ]);

    Machine::new(
        ['0', '1', '_'].into_iter().collect(),
        Head::new(Tape::from_cells('_', cells_of("0110")), 0),
        ["flip", "done"].into_iter().collect(),
        ["done"].into_iter().collect(),
        "flip",
        instructions,
    )
}

/// Builds the 3-state, 2-symbol busy beaver champion. Started on an empty
/// tape it halts after 14 steps with six `1`s written.
pub fn busy_beaver_3() -> BuiltinMachine {
    let instructions = InstructionTable::from_rules(vec![
        (('0', "A"), Action::new('1', Direction::Right, "B")),
        (('1', "A"), Action::new('1', Direction::Right, "H")),
        (('0', "B"), Action::new('0', Direction::Right, "C")),
        (('1', "B"), Action::new('1', Direction::Right, "B")),
        (('0', "C"), Action::new('1', Direction::Left, "C")),
        (('1', "C"), Action::new('1', Direction::Left, "A")),
    ]);

    Machine::new(
        ['0', '1'].into_iter().collect(),
        Head::new(Tape::new('0'), 0),
        ["A", "B", "C", "H"].into_iter().collect(),
        ["H"].into_iter().collect(),
        "A",
        instructions,
    )
}

/// Lays a string out as tape cells starting at position 0.
fn cells_of(s: &str) -> Vec<(i64, char)> {
    s.chars()
        .enumerate()
        .map(|(i, c)| (i as i64, c))
        .collect()
}
