//! Axis identifiers and the step/direction output bit layout.
//!
//! The engine emits a single `u8` combining step and direction bits for all
//! three axes. Bits 0-2 are the step pulses, bits 3-5 the direction levels.

/// One of the three linear axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X = 0,
    /// Y axis.
    Y = 1,
    /// Z axis.
    Z = 2,
}

/// All axes in stepping order.
pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

/// Mask covering the three step bits.
pub const STEP_MASK: u8 = 0b0000_0111;

/// Mask covering the three direction bits.
pub const DIRECTION_MASK: u8 = 0b0011_1000;

/// Mask covering every bit the engine drives.
pub const STEPPING_MASK: u8 = STEP_MASK | DIRECTION_MASK;

impl Axis {
    /// Step-pulse bit for this axis.
    #[inline]
    pub const fn step_bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Direction-level bit for this axis.
    #[inline]
    pub const fn direction_bit(self) -> u8 {
        1 << (self as u8 + 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout_is_disjoint() {
        let mut seen = 0u8;
        for axis in ALL {
            assert_eq!(seen & axis.step_bit(), 0);
            assert_eq!(seen & axis.direction_bit(), 0);
            seen |= axis.step_bit() | axis.direction_bit();
        }
        assert_eq!(seen, STEPPING_MASK);
        assert_eq!(STEP_MASK & DIRECTION_MASK, 0);
    }
}
