//! Options for building engines and driving runs.

use serde::{Deserialize, Serialize};

use crate::types::{Mode, DEFAULT_VIEW_PADDING, MAX_EXECUTION_STEPS};

/// Options fixed when an engine is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether input strings are checked against the input alphabet.
    pub mode: Mode,
    /// Maximum number of undo snapshots kept. `None` keeps every step.
    pub history_limit: Option<usize>,
}

impl EngineConfig {
    pub fn lenient() -> Self {
        Self {
            mode: Mode::Lenient,
            ..Self::default()
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}

/// Options for a single batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Step budget before the run reports `Unknown`.
    pub max_steps: usize,
    /// Blank cells shown on each side of the viewport.
    pub padding: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: MAX_EXECUTION_STEPS,
            padding: DEFAULT_VIEW_PADDING,
        }
    }
}
