//! A sparse, two-way infinite tape.

use std::collections::HashMap;

/// Stores only non-blank cells, keyed by position.
///
/// Every position that has no entry holds the blank symbol, and writing the blank removes the
/// entry. The store therefore never contains the blank, and its size tracks the number of
/// non-blank cells rather than how far the head has wandered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: HashMap<i64, char>,
    blank: char,
}

impl Tape {
    /// Creates an all-blank tape.
    pub fn new(blank: char) -> Self {
        Self {
            cells: HashMap::new(),
            blank,
        }
    }

    /// Creates a tape holding `input` at positions `0..len`.
    pub fn with_input(blank: char, input: &str) -> Self {
        let mut tape = Self::new(blank);
        for (position, symbol) in (0_i64..).zip(input.chars()) {
            tape.write(position, symbol);
        }
        tape
    }

    /// Returns the symbol at `position`, or the blank if it was never written.
    pub fn read(&self, position: i64) -> char {
        self.cells.get(&position).copied().unwrap_or(self.blank)
    }

    /// Writes `symbol` at `position`. Writing the blank erases the cell.
    pub fn write(&mut self, position: i64, symbol: char) {
        if symbol == self.blank {
            self.cells.remove(&position);
        } else {
            self.cells.insert(position, symbol);
        }
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    /// Number of non-blank cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Lowest and highest non-blank positions, if any.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let min = self.cells.keys().min()?;
        let max = self.cells.keys().max()?;
        Some((*min, *max))
    }

    /// Non-blank cells in position order.
    pub fn cells(&self) -> Vec<(i64, char)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(&p, &s)| (p, s)).collect();
        cells.sort_unstable_by_key(|&(position, _)| position);
        cells
    }

    /// The symbols from the lowest to the highest non-blank cell, blanks included.
    pub fn contents(&self) -> String {
        match self.bounds() {
            Some((low, high)) => (low..=high).map(|p| self.read(p)).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_unset_is_blank() {
        let tape = Tape::new('_');

        assert_eq!(tape.read(0), '_');
        assert_eq!(tape.read(-42), '_');
        assert_eq!(tape.read(i64::MAX), '_');
        assert!(tape.is_empty());
    }

    #[test]
    fn test_with_input() {
        let tape = Tape::with_input('_', "101");

        assert_eq!(tape.read(0), '1');
        assert_eq!(tape.read(1), '0');
        assert_eq!(tape.read(2), '1');
        assert_eq!(tape.read(3), '_');
        assert_eq!(tape.len(), 3);
        assert_eq!(tape.bounds(), Some((0, 2)));
    }

    #[test]
    fn test_input_blanks_are_not_stored() {
        let tape = Tape::with_input('_', "1_1");

        assert_eq!(tape.len(), 2);
        assert_eq!(tape.contents(), "1_1");
    }

    #[test]
    fn test_write_overwrites() {
        let mut tape = Tape::new('_');
        tape.write(-3, 'a');
        tape.write(-3, 'b');

        assert_eq!(tape.read(-3), 'b');
        assert_eq!(tape.len(), 1);
    }

    #[test]
    fn test_write_blank_erases() {
        let mut tape = Tape::with_input('_', "ab");

        tape.write(0, '_');
        assert_eq!(tape.read(0), '_');
        assert_eq!(tape.len(), 1);

        // Erasing an already blank cell is a no-op.
        tape.write(0, '_');
        tape.write(100, '_');
        assert_eq!(tape.len(), 1);
        assert_eq!(tape.cells(), vec![(1, 'b')]);
    }

    #[test]
    fn test_cells_are_ordered() {
        let mut tape = Tape::new(' ');
        tape.write(5, 'c');
        tape.write(-2, 'a');
        tape.write(1, 'b');

        assert_eq!(tape.cells(), vec![(-2, 'a'), (1, 'b'), (5, 'c')]);
        assert_eq!(tape.contents(), "a  b   c");
    }
}
