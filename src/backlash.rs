//! Backlash compensation.
//!
//! When a motion request reverses direction on any axis, the mechanical
//! slack in that axis must be taken up before real motion lands where the
//! planner thinks it does. The compensator watches the direction mask of
//! successive enqueues and synthesizes a free-step segment for every
//! reversing axis, queued immediately ahead of the real segment. Producer
//! context only; the engine never touches the latch.

use crate::segment::{Segment, SegmentMode};

/// Direction-reversal tracker and compensation segment factory.
#[derive(Debug, Clone, Default)]
pub struct BacklashCompensator {
    /// Direction mask of the previous enqueue.
    latch: u8,
    /// Configured free steps per axis, consumed on reversal.
    counts: [u32; 3],
}

impl BacklashCompensator {
    /// Create a compensator with per-axis backlash step counts.
    pub fn new(counts: [u32; 3]) -> Self {
        Self { latch: 0, counts }
    }

    /// Direction mask seen on the previous enqueue.
    #[inline]
    pub fn latched_direction(&self) -> u8 {
        self.latch
    }

    /// Reset the latch, e.g. at subsystem start.
    pub fn reset(&mut self) {
        self.latch = 0;
    }

    /// Decide whether the upcoming enqueue needs a compensation segment.
    ///
    /// Compares `direction_bits` against the latch and always updates the
    /// latch. Axes whose direction bit flipped get their configured free
    /// steps at the same per-step rate as the upcoming real segment. A
    /// compensation move in which every flipped axis has a zero count is
    /// discarded — it must never occupy a queue slot.
    pub fn prepare(
        &mut self,
        direction_bits: u8,
        target: [i32; 3],
        rate_us: u32,
        line_number: i32,
    ) -> Option<Segment> {
        let changed = direction_bits ^ self.latch;
        self.latch = direction_bits;
        if changed == 0 {
            return None;
        }

        let mut steps = [0u32; 3];
        for axis in crate::axis::ALL {
            if changed & axis.direction_bit() != 0 {
                steps[axis as usize] = self.counts[axis as usize];
            }
        }
        let max_steps = steps[0].max(steps[1]).max(steps[2]);
        if max_steps == 0 {
            return None;
        }

        Some(Segment {
            steps,
            target,
            max_steps,
            direction_bits,
            rate_us,
            is_backlash: true,
            mode: SegmentMode::Run,
            line_number,
        })
    }
}
