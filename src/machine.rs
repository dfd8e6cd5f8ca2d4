//! This module defines the `TuringMachine` engine, which executes a validated single-tape machine
//! over a sparse infinite tape. It handles stepping, bounded runs, undo, and reset.

use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::history::{History, Snapshot};
use crate::spec::ValidSpec;
use crate::tape::Tape;
use crate::types::{Mode, Outcome, Status, TuringMachineError};
use crate::viewport::{view, Viewport};

/// A borrowed view of the engine after a step, handed to run observers.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a str,
    pub head: i64,
    pub step_count: usize,
    pub status: Status,
    pub tape: &'a Tape,
}

impl Frame<'_> {
    pub fn view(&self, padding: usize) -> Viewport {
        view(self.tape, self.head, padding)
    }
}

/// Represents a running single-tape Turing Machine.
///
/// The engine owns its tape, head, current state, step counter, status, and undo history. All
/// run-time outcomes (accepting, rejecting, running out of budget) are reported as values; the
/// only fallible operations are construction and [`reset`](Self::reset), which check the input.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    spec: ValidSpec,
    mode: Mode,
    state: String,
    tape: Tape,
    head: i64,
    step_count: usize,
    status: Status,
    history: History,
}

impl TuringMachine {
    /// Creates a machine with the default configuration, see [`with_config`](Self::with_config).
    pub fn new(spec: ValidSpec, input: &str) -> Result<Self, TuringMachineError> {
        Self::with_config(spec, input, EngineConfig::default())
    }

    /// Creates a new `TuringMachine` with `input` written at positions `0..len`.
    ///
    /// In [`Mode::Strict`], every input character must be in the input alphabet.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidInput)` naming the first offending character.
    pub fn with_config(
        spec: ValidSpec,
        input: &str,
        config: EngineConfig,
    ) -> Result<Self, TuringMachineError> {
        check_input(&spec, config.mode, input)?;

        let unreachable = spec.unreachable_states();
        if !unreachable.is_empty() {
            warn!(machine = spec.name(), ?unreachable, "machine has unreachable states");
        }

        debug!(machine = spec.name(), input, "creating machine");

        Ok(Self {
            state: spec.initial_state().to_string(),
            tape: Tape::with_input(spec.blank(), input),
            head: 0,
            step_count: 0,
            status: Status::Running,
            history: History::new(config.history_limit),
            mode: config.mode,
            spec,
        })
    }

    /// Executes a single step of the machine's computation.
    ///
    /// Reads the symbol under the head and looks up the rule for the current state. If there is
    /// none, the machine halts: accepted when the current state is final, rejected otherwise.
    /// If there is one, the machine writes, moves, changes state and counts the step; entering
    /// a final state halts it with acceptance.
    ///
    /// A snapshot is pushed before anything changes, so [`undo`](Self::undo) can reverse the
    /// step, including a halt. Halted machines do nothing.
    ///
    /// # Returns
    ///
    /// * `true` if a transition was applied.
    /// * `false` if the machine was already halted or has just halted for lack of a rule.
    pub fn step(&mut self) -> bool {
        if self.status != Status::Running {
            return false;
        }

        self.history.push(self.snapshot());

        let symbol = self.tape.read(self.head);
        let Some(action) = self.spec.action(&self.state, symbol) else {
            self.status = if self.spec.is_final(&self.state) {
                Status::Accepted
            } else {
                Status::Rejected
            };
            debug!(
                state = %self.state,
                symbol = %symbol,
                steps = self.step_count,
                status = ?self.status,
                "no rule, machine halted"
            );
            return false;
        };

        self.tape.write(self.head, action.write);
        self.head += action.direction.delta();
        self.state.clone_from(&action.next_state);
        self.step_count += 1;

        trace!(
            step = self.step_count,
            state = %self.state,
            head = self.head,
            read = %symbol,
            wrote = %action.write,
            "applied transition"
        );

        if self.spec.is_final(&self.state) {
            self.status = Status::Accepted;
            debug!(state = %self.state, steps = self.step_count, "entered final state");
        }

        true
    }

    /// Runs the machine for at most `max_steps` steps, see [`run_with`](Self::run_with).
    pub fn run(&mut self, max_steps: usize) -> Outcome {
        self.run_with(max_steps, |_| {})
    }

    /// Runs the machine until it halts or `max_steps` steps have been attempted.
    ///
    /// `observer` is called with the new configuration after every applied transition. Running
    /// out of budget leaves the machine running, so a later call resumes where this one stopped.
    ///
    /// # Returns
    ///
    /// * `Outcome::Accepted` / `Outcome::Rejected` with the halting state.
    /// * `Outcome::Unknown` if the machine is still running.
    pub fn run_with<F>(&mut self, max_steps: usize, mut observer: F) -> Outcome
    where
        F: FnMut(&Frame<'_>),
    {
        for _ in 0..max_steps {
            if self.status != Status::Running {
                break;
            }
            if self.step() {
                observer(&self.frame());
            }
        }

        let outcome = self.outcome();
        if outcome == Outcome::Unknown {
            debug!(max_steps, steps = self.step_count, "step budget exhausted");
        }
        outcome
    }

    /// Reverts the most recent step.
    ///
    /// # Returns
    ///
    /// * `true` if a snapshot was restored, `false` if the history was empty.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };

        self.state = snapshot.state;
        self.tape = snapshot.tape;
        self.head = snapshot.head;
        self.step_count = snapshot.step_count;
        self.status = snapshot.status;
        true
    }

    /// Resets the machine to its initial configuration with a new input, clearing the history.
    ///
    /// On error the machine is left untouched.
    pub fn reset(&mut self, input: &str) -> Result<(), TuringMachineError> {
        check_input(&self.spec, self.mode, input)?;

        debug!(machine = self.spec.name(), input, "resetting machine");

        self.state = self.spec.initial_state().to_string();
        self.tape = Tape::with_input(self.spec.blank(), input);
        self.head = 0;
        self.step_count = 0;
        self.status = Status::Running;
        self.history.clear();
        Ok(())
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn head(&self) -> i64 {
        self.head
    }

    /// Returns the number of transitions applied since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn spec(&self) -> &ValidSpec {
        &self.spec
    }

    /// Returns the symbol under the head.
    pub fn current_symbol(&self) -> char {
        self.tape.read(self.head)
    }

    pub fn is_halted(&self) -> bool {
        self.status.is_halted()
    }

    pub fn is_accepted(&self) -> bool {
        self.status == Status::Accepted
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// The current result: the halting state if halted, `Unknown` while running.
    pub fn outcome(&self) -> Outcome {
        match self.status {
            Status::Accepted => Outcome::Accepted(self.state.clone()),
            Status::Rejected => Outcome::Rejected(self.state.clone()),
            Status::Running | Status::Unknown => Outcome::Unknown,
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            state: &self.state,
            head: self.head,
            step_count: self.step_count,
            status: self.status,
            tape: &self.tape,
        }
    }

    /// Returns a window over the tape around the head and every non-blank cell.
    pub fn view(&self, padding: usize) -> Viewport {
        view(&self.tape, self.head, padding)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            tape: self.tape.clone(),
            head: self.head,
            step_count: self.step_count,
            status: self.status,
        }
    }
}

fn check_input(spec: &ValidSpec, mode: Mode, input: &str) -> Result<(), TuringMachineError> {
    if mode == Mode::Lenient {
        return Ok(());
    }

    match input
        .chars()
        .enumerate()
        .find(|&(_, symbol)| !spec.is_input_symbol(symbol))
    {
        Some((position, symbol)) => Err(TuringMachineError::InvalidInput { symbol, position }),
        None => Ok(()),
    }
}
