//! Motion segment data model.
//!
//! A [`Segment`] is one queued unit of future motion or idle time: either a
//! `Run` segment that steps the axes, or a `Halt` segment that burns a fixed
//! amount of time and can force the engine to go idle at a precise point in
//! the command stream.

use crate::axis::{self, Axis};

/// What the engine should do with a queued segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentMode {
    /// Step the axes according to the per-axis step counts.
    #[default]
    Run,
    /// Pure time delay; `max_steps` encodes the duration in rate units.
    /// A `Halt` with zero duration stops the engine when it is dequeued.
    Halt,
}

/// One buffered unit of motion or delay.
///
/// Segments are created fully populated by a single enqueue call and are
/// read-only once queued. The engine consumes a `Run` segment over
/// `max_steps` timer ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// Unsigned step counts per axis (zero for non-moving axes).
    pub steps: [u32; 3],
    /// Absolute position (in steps) the machine reaches at the end of this
    /// segment. Used to resynchronize the position tracker on load.
    pub target: [i32; 3],
    /// Dominant axis step count for `Run`, duration in rate units for `Halt`.
    pub max_steps: u32,
    /// Per-axis sign mask; a set direction bit means negative motion.
    pub direction_bits: u8,
    /// Inter-step interval in microseconds.
    pub rate_us: u32,
    /// True for a synthesized backlash-compensation segment.
    pub is_backlash: bool,
    /// Run or halt.
    pub mode: SegmentMode,
    /// Provenance tag for diagnostics; no effect on stepping.
    pub line_number: i32,
}

impl Segment {
    /// Build a `Run` segment from unsigned per-axis step counts.
    ///
    /// `max_steps` is derived as the dominant axis count and `rate_us` as
    /// `duration_us / max_steps` (integer division; truncation accepted).
    /// Returns `None` when no axis moves.
    pub fn run(
        steps: [u32; 3],
        target: [i32; 3],
        direction_bits: u8,
        duration_us: u32,
        line_number: i32,
    ) -> Option<Self> {
        let max_steps = steps[0].max(steps[1]).max(steps[2]);
        if max_steps == 0 {
            return None;
        }
        Some(Self {
            steps,
            target,
            max_steps,
            direction_bits,
            rate_us: duration_us / max_steps,
            is_backlash: false,
            mode: SegmentMode::Run,
            line_number,
        })
    }

    /// Build a `Halt` segment lasting `duration_ms` milliseconds.
    ///
    /// The duration is carried in `max_steps` with a fixed 1000 µs rate, so
    /// the engine ticks it down once per millisecond.
    pub fn halt(duration_ms: u32, line_number: i32) -> Self {
        Self {
            steps: [0; 3],
            target: [0; 3],
            max_steps: duration_ms,
            direction_bits: 0,
            rate_us: 1000,
            is_backlash: false,
            mode: SegmentMode::Halt,
            line_number,
        }
    }

    /// Step count for one axis.
    #[inline]
    pub fn steps_for(&self, axis: Axis) -> u32 {
        self.steps[axis as usize]
    }

    /// Whether this segment moves the given axis in the negative direction.
    #[inline]
    pub fn is_negative(&self, axis: Axis) -> bool {
        self.direction_bits & axis.direction_bit() != 0
    }
}

/// Compute the direction-bit mask for signed per-axis deltas.
///
/// A set bit marks negative-direction motion on that axis.
pub fn direction_bits_for(deltas: [i32; 3]) -> u8 {
    let mut bits = 0;
    for axis in axis::ALL {
        if deltas[axis as usize] < 0 {
            bits |= axis.direction_bit();
        }
    }
    bits
}

/// Dominant-axis step count for signed deltas.
#[inline]
pub fn dominant_steps(deltas: [i32; 3]) -> u32 {
    deltas
        .iter()
        .map(|d| d.unsigned_abs())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;

    #[test]
    fn run_segment_derives_max_steps_and_rate() {
        let seg = Segment::run([100, 40, 0], [100, 40, 0], 0, 10_000, 7).unwrap();
        assert_eq!(seg.max_steps, 100);
        assert_eq!(seg.rate_us, 100);
        assert_eq!(seg.mode, SegmentMode::Run);
        assert_eq!(seg.line_number, 7);
        assert!(seg.steps.iter().all(|&s| s <= seg.max_steps));
    }

    #[test]
    fn run_segment_rejects_zero_motion() {
        assert!(Segment::run([0, 0, 0], [0, 0, 0], 0, 1000, 1).is_none());
    }

    #[test]
    fn halt_segment_encodes_duration() {
        let seg = Segment::halt(250, 3);
        assert_eq!(seg.mode, SegmentMode::Halt);
        assert_eq!(seg.max_steps, 250);
        assert_eq!(seg.rate_us, 1000);
        assert_eq!(seg.steps, [0; 3]);
    }

    #[test]
    fn direction_bits_mark_negative_axes() {
        let bits = direction_bits_for([-10, 5, -1]);
        assert_ne!(bits & Axis::X.direction_bit(), 0);
        assert_eq!(bits & Axis::Y.direction_bit(), 0);
        assert_ne!(bits & Axis::Z.direction_bit(), 0);
        assert_eq!(direction_bits_for([1, 2, 3]), 0);
    }

    #[test]
    fn dominant_steps_uses_absolute_values() {
        assert_eq!(dominant_steps([-120, 80, 0]), 120);
        assert_eq!(dominant_steps([0, 0, 0]), 0);
    }
}
