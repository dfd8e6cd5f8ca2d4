//! This module defines the core data structures and types shared by the engine, including
//! head directions, execution status and outcomes, and the error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The blank symbol used by the built-in machines.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The default step budget for `run`.
pub const MAX_EXECUTION_STEPS: usize = 10000;
/// The default number of blank cells shown on each side of a viewport.
pub const DEFAULT_VIEW_PADDING: usize = 10;

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
    /// The offset applied to the head position.
    pub fn delta(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }

    /// The character used for this direction in rule definitions.
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'N',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = char;

    /// Accepts `L`, `R`, and both `N` and `S` for "no move" (case-insensitive).
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            'N' | 'S' => Ok(Direction::Stay),
            _ => Err(c),
        }
    }
}

/// The execution status of an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The machine can still take steps.
    #[default]
    Running,
    /// Halted in a final state.
    Accepted,
    /// Halted in a non-final state with no applicable rule.
    Rejected,
    /// The step budget ran out while the machine was still running.
    Unknown,
}

impl Status {
    pub fn is_halted(self) -> bool {
        matches!(self, Status::Accepted | Status::Rejected)
    }
}

/// The result reported by a call to `run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Halted in the contained final state.
    Accepted(String),
    /// Halted in the contained non-final state.
    Rejected(String),
    /// The step budget was exhausted; the engine is still running.
    Unknown,
}

impl Outcome {
    pub fn status(&self) -> Status {
        match self {
            Outcome::Accepted(_) => Status::Accepted,
            Outcome::Rejected(_) => Status::Rejected,
            Outcome::Unknown => Status::Unknown,
        }
    }

    /// The state the machine halted in, if it halted.
    pub fn final_state(&self) -> Option<&str> {
        match self {
            Outcome::Accepted(state) | Outcome::Rejected(state) => Some(state),
            Outcome::Unknown => None,
        }
    }
}

/// How strictly the engine treats input strings.
///
/// - `Strict` (default): every input character must belong to the input alphabet.
/// - `Lenient`: characters outside the input alphabet are written to the tape unchecked.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Strict,
    Lenient,
}

/// Errors found while validating a machine specification.
///
/// Rules are named as `state/symbol -> next/write/direction`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("Rule {rule} references unknown state '{state}'")]
    UnknownState { rule: String, state: String },
    #[error("Rule {rule} references symbol '{symbol}' outside the tape alphabet")]
    UnknownSymbol { rule: String, symbol: char },
    #[error("Rule {rule} has invalid direction '{direction}'")]
    InvalidDirection { rule: String, direction: char },
    #[error("More than one rule for state '{state}' reading '{symbol}'")]
    Nondeterministic { state: String, symbol: char },
    #[error("Initial state '{0}' is not a declared state")]
    UnknownInitialState(String),
    #[error("Blank symbol '{0}' is not in the tape alphabet")]
    BlankNotInTapeAlphabet(char),
    #[error("Blank symbol '{0}' must not be an input symbol")]
    BlankInInputAlphabet(char),
    #[error("Input symbol '{0}' is not in the tape alphabet")]
    InputSymbolNotInTapeAlphabet(char),
    #[error("Final state '{0}' is not a declared state")]
    UnknownFinalState(String),
}

/// Represents various errors that can occur while building or loading machines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The machine specification is inconsistent.
    #[error("Invalid specification: {0}")]
    Spec(#[from] SpecError),
    /// The input string contains a symbol outside the input alphabet.
    #[error("Input symbol '{symbol}' at position {position} is not in the input alphabet")]
    InvalidInput { symbol: char, position: usize },
    /// No machine with this name is registered.
    #[error("Program '{0}' not found")]
    ProgramNotFound(String),
    /// Reading or writing a specification file failed.
    #[error("File error: {0}")]
    FileError(String),
    /// A specification could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
