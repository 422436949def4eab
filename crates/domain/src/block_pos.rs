//! Integer block position with the host world-coordinate packing convention
//!
//! Positions pack into a single sign-extended i64 word: X in bits 38..63
//! (26 bits), Z in bits 12..37 (26 bits), Y in bits 0..11 (12 bits). The
//! vertical axis gets the narrow field since the playable vertical range is
//! far smaller than the horizontal one.

use serde::{Deserialize, Serialize};

const PACKED_X_BITS: u32 = 26;
const PACKED_Z_BITS: u32 = 26;
const PACKED_Y_BITS: u32 = 12;

const X_SHIFT: u32 = PACKED_Z_BITS + PACKED_Y_BITS;
const Z_SHIFT: u32 = PACKED_Y_BITS;

const X_MASK: i64 = (1 << PACKED_X_BITS) - 1;
const Z_MASK: i64 = (1 << PACKED_Z_BITS) - 1;
const Y_MASK: i64 = (1 << PACKED_Y_BITS) - 1;

/// A block coordinate within a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Pack into the single 64-bit storage word.
    pub fn as_long(&self) -> i64 {
        ((self.x as i64 & X_MASK) << X_SHIFT)
            | ((self.z as i64 & Z_MASK) << Z_SHIFT)
            | (self.y as i64 & Y_MASK)
    }

    /// Unpack a storage word, sign-extending each axis field.
    pub fn from_long(packed: i64) -> Self {
        // Shift left so the field's sign bit lands in bit 63, then arithmetic
        // shift right to extend it.
        let x = (packed << (64 - X_SHIFT as i64 - PACKED_X_BITS as i64)
            >> (64 - PACKED_X_BITS as i64)) as i32;
        let z = (packed << (64 - Z_SHIFT as i64 - PACKED_Z_BITS as i64)
            >> (64 - PACKED_Z_BITS as i64)) as i32;
        let y = (packed << (64 - PACKED_Y_BITS as i64) >> (64 - PACKED_Y_BITS as i64)) as i32;
        Self { x, y, z }
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_origin_to_zero() {
        assert_eq!(BlockPos::new(0, 0, 0).as_long(), 0);
    }

    #[test]
    fn round_trips_positive_coordinates() {
        let pos = BlockPos::new(10, 64, 10);
        assert_eq!(BlockPos::from_long(pos.as_long()), pos);
    }

    #[test]
    fn round_trips_negative_coordinates() {
        let pos = BlockPos::new(-1500, -42, -987_654);
        assert_eq!(BlockPos::from_long(pos.as_long()), pos);
    }

    #[test]
    fn round_trips_axis_extremes() {
        // 26-bit signed horizontal range, 12-bit signed vertical range
        let max = BlockPos::new((1 << 25) - 1, (1 << 11) - 1, (1 << 25) - 1);
        let min = BlockPos::new(-(1 << 25), -(1 << 11), -(1 << 25));
        assert_eq!(BlockPos::from_long(max.as_long()), max);
        assert_eq!(BlockPos::from_long(min.as_long()), min);
    }

    #[test]
    fn axes_do_not_bleed_into_each_other() {
        let pos = BlockPos::new(-1, 0, 0);
        let unpacked = BlockPos::from_long(pos.as_long());
        assert_eq!(unpacked.y, 0);
        assert_eq!(unpacked.z, 0);
        assert_eq!(unpacked.x, -1);
    }
}
