//! Machine specifications and their validation.
//!
//! A [`Spec`] is the raw, serializable definition of a single-tape machine. It is turned into a
//! [`ValidSpec`] by [`validate`], which runs a fixed sequence of consistency checks and reports
//! the first violation. Engines are only ever built from a `ValidSpec`, so a malformed machine is
//! rejected before any step is taken.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::types::{Direction, SpecError};

/// Represents a Turing Machine definition (Q, Σ, Γ, δ, q0, blank, F).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Spec {
    /// A human readable name for the machine.
    #[serde(default)]
    pub name: String,
    /// The set of states (Q).
    pub states: BTreeSet<String>,
    /// The symbols the input string may use (Σ).
    pub input_alphabet: BTreeSet<char>,
    /// The symbols usable on the tape (Γ).
    pub tape_alphabet: BTreeSet<char>,
    /// The transition rules, grouped by source state.
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<Transition>>,
    /// The state the machine starts in (q0).
    pub initial_state: String,
    /// The symbol of every cell never written.
    pub blank: char,
    /// The accepting states (F).
    #[serde(default)]
    pub final_states: BTreeSet<String>,
}

/// A single, unvalidated transition rule out of some source state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol under the head that enables this rule.
    pub read: char,
    /// The symbol written in place of `read`.
    pub write: char,
    /// One of `L`, `R`, `N` (or `S`).
    pub direction: char,
    /// The state the machine moves to.
    pub next_state: String,
}

impl Spec {
    /// Starts an empty specification with the given name, initial state and blank symbol.
    ///
    /// The initial state is added to the state set and the blank to the tape alphabet.
    pub fn new(name: &str, initial_state: &str, blank: char) -> Self {
        Self {
            name: name.to_string(),
            states: BTreeSet::from([initial_state.to_string()]),
            input_alphabet: BTreeSet::new(),
            tape_alphabet: BTreeSet::from([blank]),
            rules: BTreeMap::new(),
            initial_state: initial_state.to_string(),
            blank,
            final_states: BTreeSet::new(),
        }
    }

    pub fn states<'a>(mut self, states: impl IntoIterator<Item = &'a str>) -> Self {
        self.states.extend(states.into_iter().map(str::to_string));
        self
    }

    /// Adds input symbols. They are also added to the tape alphabet.
    pub fn input_alphabet(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        for symbol in symbols {
            self.input_alphabet.insert(symbol);
            self.tape_alphabet.insert(symbol);
        }
        self
    }

    pub fn tape_alphabet(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.tape_alphabet.extend(symbols);
        self
    }

    pub fn final_states<'a>(mut self, states: impl IntoIterator<Item = &'a str>) -> Self {
        self.final_states
            .extend(states.into_iter().map(str::to_string));
        self
    }

    /// Adds the rule `δ(state, read) = (next_state, write, direction)`.
    pub fn rule(
        mut self,
        state: &str,
        read: char,
        next_state: &str,
        write: char,
        direction: char,
    ) -> Self {
        self.rules
            .entry(state.to_string())
            .or_default()
            .push(Transition {
                read,
                write,
                direction,
                next_state: next_state.to_string(),
            });
        self
    }

    /// Total number of transition rules.
    pub fn transition_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Validates this specification, see [`validate`].
    pub fn validate(self) -> Result<ValidSpec, SpecError> {
        validate(self)
    }
}

/// The effect of a validated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub next_state: String,
    pub write: char,
    pub direction: Direction,
}

/// A specification that passed every consistency check.
///
/// The transition table is indexed by state and then by the symbol read, so a lookup never
/// allocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSpec {
    spec: Spec,
    table: HashMap<String, HashMap<char, Action>>,
}

/// The formal summary of a machine, as shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecSummary {
    pub name: String,
    pub states: Vec<String>,
    pub input_alphabet: Vec<char>,
    pub tape_alphabet: Vec<char>,
    pub initial_state: String,
    pub final_states: Vec<String>,
    pub transition_count: usize,
}

impl ValidSpec {
    /// Finds the rule for the given state and symbol.
    pub fn action(&self, state: &str, symbol: char) -> Option<&Action> {
        self.table.get(state)?.get(&symbol)
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn initial_state(&self) -> &str {
        &self.spec.initial_state
    }

    pub fn blank(&self) -> char {
        self.spec.blank
    }

    pub fn is_final(&self, state: &str) -> bool {
        self.spec.final_states.contains(state)
    }

    pub fn is_input_symbol(&self, symbol: char) -> bool {
        self.spec.input_alphabet.contains(&symbol)
    }

    /// The underlying raw specification.
    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Returns the states that cannot be reached from the initial state, sorted.
    pub fn unreachable_states(&self) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([self.spec.initial_state.as_str()]);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if let Some(actions) = self.table.get(state) {
                queue.extend(actions.values().map(|action| action.next_state.as_str()));
            }
        }

        // `states` is a BTreeSet, so the result is already sorted.
        self.spec
            .states
            .iter()
            .filter(|state| !visited.contains(state.as_str()))
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> SpecSummary {
        SpecSummary {
            name: self.spec.name.clone(),
            states: self.spec.states.iter().cloned().collect(),
            input_alphabet: self.spec.input_alphabet.iter().copied().collect(),
            tape_alphabet: self.spec.tape_alphabet.iter().copied().collect(),
            initial_state: self.spec.initial_state.clone(),
            final_states: self.spec.final_states.iter().cloned().collect(),
            transition_count: self.spec.transition_count(),
        }
    }
}

/// Validates a `Spec` and builds its transition table.
///
/// Checks run in this order and the first failure is returned:
/// 1. every rule references declared states and tape symbols;
/// 2. every rule has a valid direction;
/// 3. no two rules share a `(state, symbol)` pair;
/// 4. the initial state is declared;
/// 5. the blank is a tape symbol but not an input symbol;
/// 6. the input alphabet is contained in the tape alphabet;
/// 7. every final state is declared.
pub fn validate(spec: Spec) -> Result<ValidSpec, SpecError> {
    let checks: [fn(&Spec) -> Result<(), SpecError>; 7] = [
        check_references,
        check_directions,
        check_determinism,
        check_initial_state,
        check_blank,
        check_input_alphabet,
        check_final_states,
    ];

    for check in checks {
        check(&spec)?;
    }

    let mut table: HashMap<String, HashMap<char, Action>> = HashMap::new();
    for (state, transitions) in &spec.rules {
        let actions = table.entry(state.clone()).or_default();
        for t in transitions {
            // Directions were checked by `check_directions`.
            let direction = Direction::try_from(t.direction).map_err(|direction| {
                SpecError::InvalidDirection {
                    rule: rule_label(state, t),
                    direction,
                }
            })?;
            actions.insert(
                t.read,
                Action {
                    next_state: t.next_state.clone(),
                    write: t.write,
                    direction,
                },
            );
        }
    }

    Ok(ValidSpec { spec, table })
}

fn rule_label(state: &str, t: &Transition) -> String {
    format!(
        "{}/{} -> {}/{}/{}",
        state, t.read, t.next_state, t.write, t.direction
    )
}

fn check_references(spec: &Spec) -> Result<(), SpecError> {
    for (state, transitions) in &spec.rules {
        for t in transitions {
            let rule = || rule_label(state, t);

            if !spec.states.contains(state) {
                return Err(SpecError::UnknownState {
                    rule: rule(),
                    state: state.clone(),
                });
            }
            if !spec.tape_alphabet.contains(&t.read) {
                return Err(SpecError::UnknownSymbol {
                    rule: rule(),
                    symbol: t.read,
                });
            }
            if !spec.states.contains(&t.next_state) {
                return Err(SpecError::UnknownState {
                    rule: rule(),
                    state: t.next_state.clone(),
                });
            }
            if !spec.tape_alphabet.contains(&t.write) {
                return Err(SpecError::UnknownSymbol {
                    rule: rule(),
                    symbol: t.write,
                });
            }
        }
    }

    Ok(())
}

fn check_directions(spec: &Spec) -> Result<(), SpecError> {
    for (state, transitions) in &spec.rules {
        if let Some(t) = transitions
            .iter()
            .find(|t| Direction::try_from(t.direction).is_err())
        {
            return Err(SpecError::InvalidDirection {
                rule: rule_label(state, t),
                direction: t.direction,
            });
        }
    }

    Ok(())
}

fn check_determinism(spec: &Spec) -> Result<(), SpecError> {
    for (state, transitions) in &spec.rules {
        let mut seen = HashSet::new();

        if let Some(t) = transitions.iter().find(|t| !seen.insert(t.read)) {
            return Err(SpecError::Nondeterministic {
                state: state.clone(),
                symbol: t.read,
            });
        }
    }

    Ok(())
}

fn check_initial_state(spec: &Spec) -> Result<(), SpecError> {
    if !spec.states.contains(&spec.initial_state) {
        return Err(SpecError::UnknownInitialState(spec.initial_state.clone()));
    }

    Ok(())
}

fn check_blank(spec: &Spec) -> Result<(), SpecError> {
    if !spec.tape_alphabet.contains(&spec.blank) {
        return Err(SpecError::BlankNotInTapeAlphabet(spec.blank));
    }
    if spec.input_alphabet.contains(&spec.blank) {
        return Err(SpecError::BlankInInputAlphabet(spec.blank));
    }

    Ok(())
}

fn check_input_alphabet(spec: &Spec) -> Result<(), SpecError> {
    spec.input_alphabet
        .iter()
        .find(|&&symbol| !spec.tape_alphabet.contains(&symbol))
        .map_or(Ok(()), |&symbol| {
            Err(SpecError::InputSymbolNotInTapeAlphabet(symbol))
        })
}

fn check_final_states(spec: &Spec) -> Result<(), SpecError> {
    spec.final_states
        .iter()
        .find(|state| !spec.states.contains(*state))
        .map_or(Ok(()), |state| Err(SpecError::UnknownFinalState(state.clone())))
}
