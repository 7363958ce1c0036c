//! Capability traits the stepping core requires from its environment.
//!
//! Raw register wiring stays outside this crate; the core only sees an
//! abstract step/direction output port, a programmable step-rate timer with
//! a pulse-width one-shot, and the host planner's side channels (position
//! reconciliation, motion-active flag, jog intent, low-power wait).

use crate::axis::{self, STEP_MASK};
use crate::timer::RatePlan;

use embedded_hal::digital::OutputPin;

/// Combined step/direction output port.
///
/// The engine hands over a single byte per tick: direction bits already at
/// their final level, step bits raised for the axes pulsing this tick, and
/// the configured inversion mask already XORed in.
pub trait StepPort {
    /// Drive the full step/direction byte onto the outputs.
    fn write(&mut self, bits: u8) -> Result<(), PortError>;

    /// Reset only the step bits, leaving direction levels untouched.
    ///
    /// `idle_bits` is the inverted-mask resting level of the step lines.
    fn reset_step_bits(&mut self, idle_bits: u8) -> Result<(), PortError>;

    /// Energize or de-energize the driver output-enable signal.
    fn set_enabled(&mut self, on: bool) -> Result<(), PortError>;
}

/// Opaque port failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortError;

/// Variable-rate step timer plus the pulse-width one-shot.
pub trait StepTimer {
    /// Apply a planned prescaler/ceiling pair to the periodic step timer.
    fn program_rate(&mut self, plan: RatePlan);

    /// Arm the one-shot that ends the current step pulse.
    fn arm_pulse_reset(&mut self, preload: u16);

    /// Gate the periodic step interrupt on or off.
    fn set_running(&mut self, on: bool);
}

/// Host planner/operator side channels.
pub trait Host {
    /// Reconciliation point: copy the engine's absolute position into the
    /// planner's authoritative position state.
    fn sync_position(&mut self, position: [i32; 3]);

    /// Engine-driven "motion in progress" flag.
    fn set_motion_active(&mut self, active: bool);

    /// Line number of the segment currently executing, for diagnostics.
    fn set_active_line(&mut self, line: i32);

    /// Manual jog intent per axis: magnitude is a speed class 0-8, sign is
    /// the direction. All-zero means no jog requested.
    fn jog_intent(&self) -> [i8; 3];

    /// Low-power wait used while the producer spins on a full queue.
    fn idle_wait(&mut self);
}

/// [`StepPort`] adapter over individual `embedded-hal` output pins.
///
/// Maps the engine's combined output byte onto one STEP and one DIR pin per
/// axis plus a shared enable pin.
pub struct GpioStepPort<P: OutputPin> {
    step: [P; 3],
    dir: [P; 3],
    enable: P,
}

impl<P: OutputPin> GpioStepPort<P> {
    /// Build the adapter from per-axis STEP/DIR pins and an enable pin.
    pub fn new(step: [P; 3], dir: [P; 3], enable: P) -> Self {
        Self { step, dir, enable }
    }

    fn apply(pin: &mut P, high: bool) -> Result<(), PortError> {
        if high {
            pin.set_high().map_err(|_| PortError)
        } else {
            pin.set_low().map_err(|_| PortError)
        }
    }
}

impl<P: OutputPin> StepPort for GpioStepPort<P> {
    fn write(&mut self, bits: u8) -> Result<(), PortError> {
        // Direction levels settle before the step edges.
        for a in axis::ALL {
            Self::apply(&mut self.dir[a as usize], bits & a.direction_bit() != 0)?;
        }
        for a in axis::ALL {
            Self::apply(&mut self.step[a as usize], bits & a.step_bit() != 0)?;
        }
        Ok(())
    }

    fn reset_step_bits(&mut self, idle_bits: u8) -> Result<(), PortError> {
        let step_idle = idle_bits & STEP_MASK;
        for a in axis::ALL {
            Self::apply(&mut self.step[a as usize], step_idle & a.step_bit() != 0)?;
        }
        Ok(())
    }

    fn set_enabled(&mut self, on: bool) -> Result<(), PortError> {
        Self::apply(&mut self.enable, on)
    }
}
