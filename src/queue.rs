//! Fixed-capacity circular buffer of motion segments.
//!
//! Single producer writes at `head`, single consumer reads at `tail`. The
//! producer-facing [`SegmentQueue::is_full`] predicate is deliberately
//! conservative: it reports full while fewer than two slots remain, so an
//! enqueue that triggers backlash compensation always has room for both the
//! synthesized segment and the real one.
//!
//! Known risk, inherited from the original design: a batch producer (arc
//! decomposition, for instance) that enqueues several segments between a
//! single `is_full` check and the last push can still overrun. This module
//! does not arbitrate that race; callers performing batch enqueues must
//! re-check `is_full` per segment.

use crate::error::{Error, Result};
use crate::segment::Segment;

/// Circular buffer of [`Segment`]s with a two-slot full reserve.
///
/// `CAP` is the slot count; one slot is always left empty to distinguish
/// full from empty, so at most `CAP - 1` segments are buffered.
#[derive(Debug)]
pub struct SegmentQueue<const CAP: usize> {
    slots: [Segment; CAP],
    head: usize,
    tail: usize,
}

impl<const CAP: usize> Default for SegmentQueue<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> SegmentQueue<CAP> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            slots: [Segment::default(); CAP],
            head: 0,
            tail: 0,
        }
    }

    /// True while fewer than two slots are free.
    ///
    /// Producers must treat this as backpressure and wait, never drop.
    pub fn is_full(&self) -> bool {
        let nb1 = (self.head + 1) % CAP;
        let nb2 = (self.head + 2) % CAP;
        nb1 == self.tail || nb2 == self.tail
    }

    /// True when no segments are buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Number of buffered segments.
    pub fn len(&self) -> usize {
        (self.head + CAP - self.tail) % CAP
    }

    /// Total slot count.
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Write a segment at `head` and advance it.
    ///
    /// Fails with [`Error::QueueFull`] when no slot is free; the segment is
    /// never dropped silently.
    pub fn push(&mut self, segment: Segment) -> Result<()> {
        let next = (self.head + 1) % CAP;
        if next == self.tail {
            return Err(Error::QueueFull);
        }
        self.slots[self.head] = segment;
        self.head = next;
        Ok(())
    }

    /// Read the segment at `tail` and advance it, if any.
    pub fn pop(&mut self) -> Option<Segment> {
        if self.is_empty() {
            return None;
        }
        let segment = self.slots[self.tail];
        self.tail = (self.tail + 1) % CAP;
        Some(segment)
    }

    /// Peek at the segment at `tail` without consuming it.
    pub fn peek(&self) -> Option<&Segment> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.tail])
        }
    }

    /// Discard all buffered segments by forcing `tail` onto `head`.
    pub fn flush(&mut self) {
        self.tail = self.head;
    }
}
