//! # stepper-pulse
//!
//! Real-time step/direction pulse generation for 3-axis CNC motion.
//!
//! A foreground producer (motion planner / command interpreter) enqueues
//! relative motion segments; a periodic timer callback consumes them and
//! emits step pulses with a synchronized multi-axis Bresenham tracer.
//!
//! ## Features
//!
//! - **Motion block queue**: fixed-capacity circular buffer with a
//!   two-slot full reserve, so a direction reversal always has room for
//!   its compensation segment
//! - **Backlash compensation**: free take-up steps synthesized on any
//!   axis direction reversal
//! - **Bresenham stepping**: dominant axis paces the timer, subordinate
//!   axes pulse proportionally with error bounded by one step
//! - **Variable-rate timer planning**: coarsest prescaler covering the
//!   requested interval, constant pulse width from an independent one-shot
//! - **Manual jog fallback**: operator intent drives ad-hoc steps while
//!   the queue is empty
//! - **no_std compatible**: no allocation, bounded-time interrupt body
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_pulse::{CoreConfig, StepperCore};
//!
//! let config = stepper_pulse::load_config("machine.toml")?;
//! let mut core = StepperCore::<_, _, _>::new(port, timer, host, config);
//! core.init()?;
//!
//! // Producer context: 100 X steps over 10 ms, ending at x=100.
//! core.enqueue_motion([100, 0, 0], [100, 0, 0], 10_000, line)?;
//!
//! // Interrupt context, once per programmed step interval:
//! core.on_step_timer();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod axis;
pub mod backlash;
pub mod config;
pub mod engine;
pub mod error;
pub mod hal;
pub mod queue;
pub mod segment;
pub mod timer;

// Re-exports for ergonomic API
pub use axis::Axis;
pub use backlash::BacklashCompensator;
pub use config::{validate_config, CoreConfig};
pub use engine::{StepperCore, DEFAULT_QUEUE_CAPACITY};
pub use error::{Error, Result};
pub use hal::{GpioStepPort, Host, PortError, StepPort, StepTimer};
pub use queue::SegmentQueue;
pub use segment::{Segment, SegmentMode};
pub use timer::{plan_step_rate, pulse_reset_preload, Prescaler, RatePlan};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
