//! Step-rate timer planning.
//!
//! Converts a desired inter-step interval in microseconds into a prescaler
//! and counter ceiling for a 16-bit compare-match timer, picking the
//! coarsest prescaler that still covers the interval so timing resolution
//! stays as fine as possible. Intervals beyond the coarsest prescaler's
//! range clamp to the slowest representable rate instead of failing.
//!
//! A second, independent one-shot governs pulse width: it resets the step
//! output bits a fixed number of microseconds after they were raised,
//! decoupled from the step-rate timer so pulses stay constant-width at any
//! step rate.

/// Frequency-division factor for the step-rate timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    /// Divide by 1.
    Direct,
    /// Divide by 8.
    Div8,
    /// Divide by 64.
    Div64,
    /// Divide by 256.
    Div256,
    /// Divide by 1024.
    Div1024,
}

impl Prescaler {
    /// The division factor.
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

/// A planned step-rate timer setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RatePlan {
    /// Prescaler to apply.
    pub prescaler: Prescaler,
    /// Compare-match ceiling in prescaled ticks.
    pub ceiling: u16,
}

impl RatePlan {
    /// Interval this plan reproduces, in timer ticks.
    pub fn ticks(&self) -> u32 {
        self.ceiling as u32 * self.prescaler.divisor()
    }
}

/// Plan the prescaler and ceiling reproducing `interval_us` between steps.
///
/// Chooses the coarsest prescaler whose 16-bit ceiling still covers the
/// interval; requests slower than the ÷1024 range clamp to the maximum.
pub fn plan_step_rate(interval_us: u32, ticks_per_us: u32) -> RatePlan {
    let ticks = interval_us.saturating_mul(ticks_per_us);
    if ticks <= 0xFFFF {
        RatePlan {
            prescaler: Prescaler::Direct,
            ceiling: ticks as u16,
        }
    } else if ticks <= 0x7FFFF {
        RatePlan {
            prescaler: Prescaler::Div8,
            ceiling: (ticks >> 3) as u16,
        }
    } else if ticks <= 0x3F_FFFF {
        RatePlan {
            prescaler: Prescaler::Div64,
            ceiling: (ticks >> 6) as u16,
        }
    } else if ticks <= 0xFF_FFFF {
        RatePlan {
            prescaler: Prescaler::Div256,
            ceiling: (ticks >> 8) as u16,
        }
    } else if ticks <= 0x3FF_FFFF {
        RatePlan {
            prescaler: Prescaler::Div1024,
            ceiling: (ticks >> 10) as u16,
        }
    } else {
        // Slower than we can actually go. Pin to the slowest rate.
        RatePlan {
            prescaler: Prescaler::Div1024,
            ceiling: 0xFFFF,
        }
    }
}

/// One-shot preload ending a step pulse after `pulse_us` microseconds.
///
/// The pulse-reset timer runs at a fixed ÷8 prescale; two microseconds of
/// fixed handler overhead are subtracted from the requested width.
pub fn pulse_reset_preload(pulse_us: u32, ticks_per_us: u32) -> u16 {
    let effective = pulse_us.saturating_sub(2);
    ((effective.saturating_mul(ticks_per_us)) / 8).min(u16::MAX as u32) as u16
}
