//! This crate provides the execution engine for a single-tape Turing Machine simulator.
//! It includes modules for validating machine specifications, a sparse infinite tape, the
//! stepping engine with undo history, tape viewports for renderers, and a registry of machines.

pub mod config;
pub mod history;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod spec;
pub mod tape;
pub mod types;
pub mod viewport;

/// Re-exports the engine and run options from the config module.
pub use config::{EngineConfig, RunConfig};
/// Re-exports the `SpecLoader` struct from the loader module.
pub use loader::SpecLoader;
/// Re-exports the `TuringMachine` engine and its observer `Frame` from the machine module.
pub use machine::{Frame, TuringMachine};
/// Re-exports the `MachineRegistry` from the programs module.
pub use programs::MachineRegistry;
/// Re-exports specification types and the `validate` function from the spec module.
pub use spec::{validate, Spec, SpecSummary, Transition, ValidSpec};
/// Re-exports the sparse `Tape` from the tape module.
pub use tape::Tape;
/// Re-exports the shared enums and error types from the types module.
pub use types::{Direction, Mode, Outcome, SpecError, Status, TuringMachineError};
/// Re-exports the `view` projection and `Viewport` from the viewport module.
pub use viewport::{view, Viewport};
