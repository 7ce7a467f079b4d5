//! The cyclic tape
//!
//! A fixed-size ring of cells with a cursor. Both the cursor and the cell
//! values wrap around: moving before cell 0 lands on the last cell, and
//! incrementing the largest representable value yields 0. There is no
//! overflow error anywhere in this module.

use std::fmt;

/// Bit width of a single tape cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellWidth {
    #[default]
    Bits8,
    Bits16,
    Bits32,
}

impl CellWidth {
    /// Build a width from a bit count (8, 16 or 32)
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(CellWidth::Bits8),
            16 => Some(CellWidth::Bits16),
            32 => Some(CellWidth::Bits32),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            CellWidth::Bits8 => 8,
            CellWidth::Bits16 => 16,
            CellWidth::Bits32 => 32,
        }
    }

    /// Largest value a cell of this width can hold
    pub fn max_value(self) -> u32 {
        match self {
            CellWidth::Bits8 => u8::MAX as u32,
            CellWidth::Bits16 => u16::MAX as u32,
            CellWidth::Bits32 => u32::MAX,
        }
    }
}

impl fmt::Display for CellWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Fixed-size ring of cells
///
/// Cells are stored as `u32` and masked down to the configured width after
/// every mutation, so a single type serves every supported width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u32>,
    cursor: usize,
    width: CellWidth,
}

impl Tape {
    /// Create a zeroed tape. A zero cell count is bumped to one cell so the
    /// cursor always has somewhere to point.
    pub fn new(cell_count: usize, width: CellWidth) -> Self {
        Tape {
            cells: vec![0; cell_count.max(1)],
            cursor: 0,
            width,
        }
    }

    pub fn width(&self) -> CellWidth {
        self.width
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Value of the cell under the cursor
    pub fn read(&self) -> u32 {
        self.cells[self.cursor]
    }

    /// Overwrite the cell under the cursor, truncated to the cell width
    pub fn write(&mut self, value: u32) {
        self.cells[self.cursor] = value & self.width.max_value();
    }

    pub fn increment(&mut self) {
        self.add(1);
    }

    pub fn decrement(&mut self) {
        self.sub(1);
    }

    /// Add `amount` to the current cell modulo `2^width`
    pub fn add(&mut self, amount: u32) {
        let value = self.read().wrapping_add(amount);
        self.write(value);
    }

    /// Subtract `amount` from the current cell modulo `2^width`
    pub fn sub(&mut self, amount: u32) {
        let value = self.read().wrapping_sub(amount);
        self.write(value);
    }

    /// Move the cursor `steps` cells to the right
    pub fn move_right(&mut self, steps: usize) {
        let len = self.cells.len();
        self.cursor = (self.cursor + steps % len) % len;
    }

    /// Move the cursor `steps` cells to the left
    pub fn move_left(&mut self, steps: usize) {
        let len = self.cells.len();
        self.cursor = (self.cursor + len - steps % len) % len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps_left_from_zero() {
        for len in [1, 2, 7, 1024, 4096] {
            let mut tape = Tape::new(len, CellWidth::Bits8);
            tape.move_left(1);
            assert_eq!(tape.cursor(), len - 1);
        }
    }

    #[test]
    fn test_cursor_wraps_right_from_last() {
        for len in [1, 2, 7, 1024, 4096] {
            let mut tape = Tape::new(len, CellWidth::Bits8);
            tape.move_left(1);
            tape.move_right(1);
            assert_eq!(tape.cursor(), 0);
        }
    }

    #[test]
    fn test_counted_moves_wrap() {
        let mut tape = Tape::new(10, CellWidth::Bits8);
        tape.move_right(25);
        assert_eq!(tape.cursor(), 5);
        tape.move_left(17);
        assert_eq!(tape.cursor(), 8);
        tape.move_left(8);
        assert_eq!(tape.cursor(), 0);
        tape.move_left(1);
        assert_eq!(tape.cursor(), 9);
    }

    #[test]
    fn test_cell_wraps_8bit() {
        let mut tape = Tape::new(4, CellWidth::Bits8);
        tape.decrement();
        assert_eq!(tape.read(), 255);
        tape.increment();
        assert_eq!(tape.read(), 0);
        tape.write(255);
        tape.increment();
        assert_eq!(tape.read(), 0);
    }

    #[test]
    fn test_counted_add_wraps() {
        let mut tape = Tape::new(1, CellWidth::Bits8);
        tape.add(300);
        assert_eq!(tape.read(), 44);
        tape.sub(45);
        assert_eq!(tape.read(), 255);
    }

    #[test]
    fn test_wider_cells() {
        let mut tape = Tape::new(1, CellWidth::Bits16);
        tape.decrement();
        assert_eq!(tape.read(), 65535);
        tape.increment();
        assert_eq!(tape.read(), 0);

        let mut tape = Tape::new(1, CellWidth::Bits32);
        tape.decrement();
        assert_eq!(tape.read(), u32::MAX);
    }

    #[test]
    fn test_write_truncates_to_width() {
        let mut tape = Tape::new(1, CellWidth::Bits8);
        tape.write(0x1_41);
        assert_eq!(tape.read(), 0x41);
    }
}
