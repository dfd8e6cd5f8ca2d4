//! A finite, head-centered window onto an infinite tape.

use serde::{Deserialize, Serialize};

use crate::tape::Tape;

/// Largest padding honored by [`view`]; larger values are clamped.
pub const MAX_VIEW_PADDING: usize = 4096;

/// The symbols of a contiguous tape range and where the head falls inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Tape position of `cells[0]`.
    pub start: i64,
    /// Symbols for every position in `start..start + cells.len()`.
    pub cells: Vec<char>,
    /// Index of the head within `cells`.
    pub head_offset: usize,
}

impl Viewport {
    /// Tape position of the last cell.
    pub fn end(&self) -> i64 {
        self.start + self.cells.len() as i64 - 1
    }

    /// The cells as a string.
    pub fn symbols(&self) -> String {
        self.cells.iter().collect()
    }

    /// The symbol under the head.
    pub fn head_symbol(&self) -> char {
        self.cells[self.head_offset]
    }
}

/// Projects the range spanning the head and every non-blank cell, widened by `padding` on both
/// sides. An empty tape is treated as if its only cell of interest were position 0.
///
/// `padding` is clamped to [`MAX_VIEW_PADDING`].
pub fn view(tape: &Tape, head: i64, padding: usize) -> Viewport {
    let (min, max) = tape.bounds().unwrap_or((0, 0));
    let padding = padding.min(MAX_VIEW_PADDING) as i64;

    let low = min.min(head).saturating_sub(padding);
    let high = max.max(head).saturating_add(padding);

    Viewport {
        start: low,
        cells: (low..=high).map(|position| tape.read(position)).collect(),
        head_offset: head.abs_diff(low) as usize,
    }
}
