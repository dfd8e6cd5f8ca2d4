//! Named machine collections.
//!
//! A [`MachineRegistry`] is a plain value owned by whatever builds engines; nothing in the engine
//! looks machines up by name.

use crate::config::EngineConfig;
use crate::machine::TuringMachine;
use crate::spec::{Spec, ValidSpec};
use crate::types::{TuringMachineError, DEFAULT_BLANK_SYMBOL};

pub const PARITY_MACHINE: &str = "Even number of 1s";
pub const ANBN_MACHINE: &str = "a^n b^n";

/// Accepts binary strings containing an even number of `1`s.
pub fn parity_machine() -> Spec {
    Spec::new(PARITY_MACHINE, "q_even", DEFAULT_BLANK_SYMBOL)
        .states(["q_odd", "q_accept", "q_reject"])
        .input_alphabet(['0', '1'])
        .final_states(["q_accept"])
        .rule("q_even", '1', "q_odd", '1', 'R')
        .rule("q_even", '0', "q_even", '0', 'R')
        .rule("q_even", '_', "q_accept", '_', 'N')
        .rule("q_odd", '1', "q_even", '1', 'R')
        .rule("q_odd", '0', "q_odd", '0', 'R')
        .rule("q_odd", '_', "q_reject", '_', 'N')
}

/// Accepts `a^n b^n` for n >= 0 by crossing off one `a` (as `X`) and one `b` (as `Y`) per pass.
pub fn anbn_machine() -> Spec {
    Spec::new(ANBN_MACHINE, "q0", DEFAULT_BLANK_SYMBOL)
        .states(["q1", "q2", "q_accept"])
        .input_alphabet(['a', 'b'])
        .tape_alphabet(['X', 'Y'])
        .final_states(["q_accept"])
        .rule("q0", 'a', "q1", 'X', 'R')
        .rule("q0", 'Y', "q0", 'Y', 'R')
        .rule("q0", '_', "q_accept", '_', 'N')
        .rule("q1", 'a', "q1", 'a', 'R')
        .rule("q1", 'Y', "q1", 'Y', 'R')
        .rule("q1", 'b', "q2", 'Y', 'L')
        .rule("q2", 'a', "q2", 'a', 'L')
        .rule("q2", 'Y', "q2", 'Y', 'L')
        .rule("q2", 'X', "q0", 'X', 'R')
}

/// An ordered collection of validated machines, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MachineRegistry {
    machines: Vec<ValidSpec>,
}

impl MachineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in machines.
    pub fn with_builtins() -> Result<Self, TuringMachineError> {
        let mut registry = Self::new();
        registry.register(parity_machine())?;
        registry.register(anbn_machine())?;
        Ok(registry)
    }

    /// Validates and adds a machine. A machine with the same name is replaced in place.
    pub fn register(&mut self, spec: Spec) -> Result<(), TuringMachineError> {
        self.insert(spec.validate()?);
        Ok(())
    }

    pub fn insert(&mut self, spec: ValidSpec) {
        match self.machines.iter_mut().find(|m| m.name() == spec.name()) {
            Some(existing) => *existing = spec,
            None => self.machines.push(spec),
        }
    }

    /// Get a machine by its name
    pub fn get(&self, name: &str) -> Result<&ValidSpec, TuringMachineError> {
        self.machines
            .iter()
            .find(|spec| spec.name() == name)
            .ok_or_else(|| TuringMachineError::ProgramNotFound(name.to_string()))
    }

    /// Get a machine by its registration index
    pub fn get_by_index(&self, index: usize) -> Option<&ValidSpec> {
        self.machines.get(index)
    }

    /// List all machine names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.machines.iter().map(ValidSpec::name).collect()
    }

    /// Indices of the machines whose name contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        self.machines
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.name().to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidSpec> {
        self.machines.iter()
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Builds an engine for the named machine.
    pub fn engine(
        &self,
        name: &str,
        input: &str,
        config: EngineConfig,
    ) -> Result<TuringMachine, TuringMachineError> {
        TuringMachine::with_config(self.get(name)?.clone(), input, config)
    }
}
