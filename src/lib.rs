//! This crate provides the core logic for a single-tape Turing Machine
//! simulator built from immutable values: a sparse bi-infinite tape, a
//! read/write head, a deterministic instruction table, and the machine that
//! composes them. Every operation returns a new value rather than mutating
//! in place, validation is explicit and opt-in, and the whole surface is
//! generic over caller-supplied symbol and state types.

pub mod head;
pub mod instructions;
pub mod machine;
pub mod programs;
pub mod snapshot;
pub mod tape;
pub mod types;

/// Re-exports the `Head` struct from the head module.
pub use head::Head;
/// Re-exports the `Action` and `InstructionTable` types from the instructions module.
pub use instructions::{Action, InstructionTable};
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the `Snapshot` types from the snapshot module.
pub use snapshot::{Snapshot, SnapshotRule};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the shared types and errors from the types module.
pub use types::{
    Direction, InvalidDirection, State, Symbol, TableError, TapeError, TransitionError,
    ValidationError,
};
