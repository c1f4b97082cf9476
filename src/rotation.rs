//! Bit-matrix rotation between the row-major pixel buffer and the chip's
//! digit registers.
//!
//! Every chip owns an 8x8 block: byte `i` is row `i`, bit `j` is column `j`.
//! The MAX7219 latches one byte per digit register, and on the common
//! modules those digits run across the rows, so each block is turned 90
//! degrees before it is sent.

pub type Block = [u8; 8];

/// Rotates one 8x8 block a quarter turn clockwise.
///
/// Bit `j` of row `i` lands on bit `7 - i` of row `j`.
pub fn rotate_clockwise(block: &Block) -> Block {
    let mut rotated = [0u8; 8];
    for (i, row) in block.iter().enumerate() {
        for (j, out) in rotated.iter_mut().enumerate() {
            let bit = (row >> j) & 1;
            *out |= bit << (7 - i);
        }
    }
    rotated
}

/// How a module is mounted relative to the buffer's row-major layout.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Buffer rows go to the digit registers unchanged.
    Deg0,
    /// Quarter turn clockwise.
    #[default]
    Deg90,
    Deg180,
    /// Quarter turn anticlockwise: bit `j` of row `i` lands on bit `i` of row `7 - j`.
    Deg270,
}

impl Rotation {
    pub fn apply(self, block: &Block) -> Block {
        let turns = match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        };
        (0..turns).fold(*block, |acc, _| rotate_clockwise(&acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Block; 4] = [
        [0x81, 0, 0, 0, 0, 0, 0, 0],
        [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80],
        [0x3E, 0x63, 0x73, 0x7B, 0x6F, 0x67, 0x3E, 0x00],
        [0xDE, 0xAD, 0xBE, 0xEF, 0x12, 0x34, 0x56, 0x78],
    ];

    #[test]
    fn four_quarter_turns_restore_the_block() {
        for block in SAMPLES {
            let mut turned = block;
            for _ in 0..4 {
                turned = rotate_clockwise(&turned);
            }
            assert_eq!(turned, block);
        }
    }

    #[test]
    fn corner_bits_of_first_row() {
        // bit 0 of row 0 -> row 0 bit 7, bit 7 of row 0 -> row 7 bit 7
        let rotated = rotate_clockwise(&[0b1000_0001, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(rotated, [0x80, 0, 0, 0, 0, 0, 0, 0x80]);
    }

    #[test]
    fn last_row_lands_in_low_bit() {
        let rotated = rotate_clockwise(&[0, 0, 0, 0, 0, 0, 0, 0b0000_0100]);
        assert_eq!(rotated, [0, 0, 0x01, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn every_single_bit_follows_the_mapping() {
        for i in 0..8 {
            for j in 0..8 {
                let mut block = [0u8; 8];
                block[i] = 1 << j;
                let rotated = rotate_clockwise(&block);
                let mut expected = [0u8; 8];
                expected[j] = 1 << (7 - i);
                assert_eq!(rotated, expected, "row {i} bit {j}");
            }
        }
    }

    #[test]
    fn anticlockwise_is_three_clockwise_turns() {
        for i in 0..8 {
            for j in 0..8 {
                let mut block = [0u8; 8];
                block[i] = 1 << j;
                let mut expected = [0u8; 8];
                expected[7 - j] = 1 << i;
                assert_eq!(Rotation::Deg270.apply(&block), expected);
            }
        }
    }

    #[test]
    fn default_orientation_is_clockwise() {
        assert_eq!(Rotation::default(), Rotation::Deg90);
        for block in SAMPLES {
            assert_eq!(Rotation::default().apply(&block), rotate_clockwise(&block));
            assert_eq!(Rotation::Deg0.apply(&block), block);
        }
    }

    #[test]
    fn half_turn_reverses_rows_and_bits() {
        let block = [0x01, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(Rotation::Deg180.apply(&block), [0, 0, 0, 0, 0, 0, 0, 0x80]);
    }
}
