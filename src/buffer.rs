use crate::rotation::{Block, Rotation};

pub const LINES_PER_CHIP: usize = 8;

/// Row bytes for every chip in the cascade, chip after chip.
///
/// The byte for `(chip, line)` lives at `chip * LINES_PER_CHIP + line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixBuffer {
    chips: usize,
    lines: Vec<u8>,
}

impl MatrixBuffer {
    /// Zeroed buffer for `chips` cascaded chips. `None` for an empty cascade.
    pub fn new(chips: usize) -> Option<Self> {
        if chips == 0 {
            return None;
        }
        Some(Self {
            chips,
            lines: vec![0; chips * LINES_PER_CHIP],
        })
    }

    pub fn chip_count(&self) -> usize {
        self.chips
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.lines
    }

    pub fn get(&self, chip: usize, line: usize) -> Option<u8> {
        self.index(chip, line).map(|i| self.lines[i])
    }

    pub fn get_mut(&mut self, chip: usize, line: usize) -> Option<&mut u8> {
        self.index(chip, line).map(|i| &mut self.lines[i])
    }

    pub fn chip(&self, chip: usize) -> Option<&[u8]> {
        self.lines.chunks_exact(LINES_PER_CHIP).nth(chip)
    }

    pub fn chip_mut(&mut self, chip: usize) -> Option<&mut [u8]> {
        self.lines.chunks_exact_mut(LINES_PER_CHIP).nth(chip)
    }

    pub fn clear(&mut self) {
        self.lines.fill(0);
    }

    /// Shifts the whole cascade one line towards the start. Lines cross
    /// from one chip into the previous one; a zero enters at the end.
    pub fn scroll_left(&mut self) {
        self.lines.rotate_left(1);
        if let Some(last) = self.lines.last_mut() {
            *last = 0;
        }
    }

    /// Shifts the whole cascade one line towards the end. A zero enters
    /// at the start.
    pub fn scroll_right(&mut self) {
        self.lines.rotate_right(1);
        if let Some(first) = self.lines.first_mut() {
            *first = 0;
        }
    }

    /// Each chip's block turned for the given mounting, in chain order.
    pub fn rotated(&self, rotation: Rotation) -> Vec<Block> {
        self.lines
            .chunks_exact(LINES_PER_CHIP)
            .map(|chunk| {
                let mut block = [0u8; LINES_PER_CHIP];
                block.copy_from_slice(chunk);
                rotation.apply(&block)
            })
            .collect()
    }

    fn index(&self, chip: usize, line: usize) -> Option<usize> {
        (chip < self.chips && line < LINES_PER_CHIP).then(|| chip * LINES_PER_CHIP + line)
    }
}
