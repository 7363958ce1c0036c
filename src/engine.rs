//! The stepping core: motion block queue front end, Bresenham stepper
//! engine and position tracker.
//!
//! [`StepperCore`] is the owned context shared between the two execution
//! contexts of the system. The producer half ([`StepperCore::enqueue_motion`]
//! and friends) runs cooperatively and may wait; the interrupt half
//! ([`StepperCore::on_step_timer`], [`StepperCore::on_pulse_timer`]) is the
//! periodic timer callback body and must complete in bounded time without
//! blocking. Deployments hand the core to the interrupt context as an
//! exclusive resource (an RTIC resource or a critical-section mutex); the
//! `&mut self` discipline here is what makes `flush` safe against a
//! concurrent tick.
//!
//! Queue backpressure is a spin-wait: the producer loops on the
//! conservative full predicate, entering the host's low-power wait each
//! iteration, and never drops a segment.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::axis::{self, STEP_MASK};
use crate::backlash::BacklashCompensator;
use crate::config::CoreConfig;
use crate::error::{Error, Result};
use crate::hal::{Host, StepPort, StepTimer};
use crate::queue::SegmentQueue;
use crate::segment::{self, Segment, SegmentMode};
use crate::timer::{plan_step_rate, pulse_reset_preload};

/// Default segment queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 20;

/// Owned stepping context: queue, compensator, engine cursor and position.
pub struct StepperCore<PORT, TIMER, HOST, const CAP: usize = DEFAULT_QUEUE_CAPACITY>
where
    PORT: StepPort,
    TIMER: StepTimer,
    HOST: Host,
{
    port: PORT,
    timer: TIMER,
    host: HOST,
    config: CoreConfig,

    queue: SegmentQueue<CAP>,
    compensator: BacklashCompensator,

    /// Absolute machine position in steps, authoritative while running.
    actual_position: [i32; 3],

    /// Engine cursor: segment being traced, remaining ticks, per-axis DDA
    /// accumulators. Reset whenever a new segment is loaded.
    current: Option<Segment>,
    iterations: u32,
    counters: [i64; 3],

    /// Reentrancy guard for the periodic callback. A failed try-acquire is
    /// a re-entrant invocation and returns without touching shared state.
    busy: AtomicBool,

    /// Edge detector for manual jog: set while jog pulses are being
    /// generated, so the position is reconciled exactly once on release.
    jog_active: bool,

    /// Port failures observed in interrupt context, where errors cannot
    /// propagate.
    port_faults: u32,
}

impl<PORT, TIMER, HOST, const CAP: usize> StepperCore<PORT, TIMER, HOST, CAP>
where
    PORT: StepPort,
    TIMER: StepTimer,
    HOST: Host,
{
    /// Create a core around its environment capabilities.
    pub fn new(port: PORT, timer: TIMER, host: HOST, config: CoreConfig) -> Self {
        let compensator = BacklashCompensator::new(config.backlash_steps);
        Self {
            port,
            timer,
            host,
            config,
            queue: SegmentQueue::new(),
            compensator,
            actual_position: [0; 3],
            current: None,
            iterations: 0,
            counters: [0; 3],
            busy: AtomicBool::new(false),
            jog_active: false,
            port_faults: 0,
        }
    }

    /// One-time startup: energize the drivers, program a conservative
    /// default step rate and clear the direction latch.
    pub fn init(&mut self) -> Result<()> {
        self.port.set_enabled(true).map_err(|_| Error::Port)?;
        self.timer.program_rate(plan_step_rate(
            self.config.default_rate_us,
            self.config.ticks_per_us,
        ));
        self.compensator.reset();
        Ok(())
    }

    /// Current absolute position in steps.
    #[inline]
    pub fn position(&self) -> [i32; 3] {
        self.actual_position
    }

    /// Number of buffered segments.
    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Conservative full predicate: true while fewer than two queue slots
    /// are free, leaving room for a reversal-compensation segment.
    #[inline]
    pub fn is_queue_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Port failures swallowed by the interrupt context so far.
    #[inline]
    pub fn port_faults(&self) -> u32 {
        self.port_faults
    }

    /// Enqueue a relative motion of `delta` steps per axis, to be executed
    /// over `duration_us` microseconds, ending at absolute `target`.
    ///
    /// Returns `Ok(false)` without queuing anything when no axis moves.
    /// A direction reversal on any axis enqueues a backlash-compensation
    /// segment immediately ahead of the real one.
    pub fn enqueue_motion(
        &mut self,
        delta: [i32; 3],
        target: [i32; 3],
        duration_us: u32,
        line_number: i32,
    ) -> Result<bool> {
        let max_steps = segment::dominant_steps(delta);
        // Don't process empty segments.
        if max_steps == 0 {
            return Ok(false);
        }
        let direction_bits = segment::direction_bits_for(delta);

        self.wait_for_slot_pair();

        let rate_us = duration_us / max_steps;
        if let Some(comp) =
            self.compensator
                .prepare(direction_bits, target, rate_us, line_number)
        {
            self.queue.push(comp)?;
        }

        let steps = [
            delta[0].unsigned_abs(),
            delta[1].unsigned_abs(),
            delta[2].unsigned_abs(),
        ];
        // max_steps > 0 was checked above, so the constructor cannot refuse.
        if let Some(seg) = Segment::run(steps, target, direction_bits, duration_us, line_number) {
            self.queue.push(seg)?;
        }

        self.timer.set_running(true);
        Ok(true)
    }

    /// Enqueue a pure time delay of `duration_ms` milliseconds.
    ///
    /// A zero duration is defined as an immediate full stop: the queue is
    /// flushed and `Ok(false)` reports that no work was queued.
    pub fn enqueue_delay(&mut self, duration_ms: u32, line_number: i32) -> Result<bool> {
        if duration_ms == 0 {
            self.stop();
            return Ok(false);
        }
        self.wait_for_slot_pair();
        self.queue.push(Segment::halt(duration_ms, line_number))?;
        self.timer.set_running(true);
        Ok(true)
    }

    /// Discard all pending motion: `tail` jumps to `head` and the engine
    /// cursor is cleared. Exclusive ownership of the core stands in for the
    /// interrupt-disable critical section this multi-field reset needs.
    pub fn flush(&mut self) {
        self.queue.flush();
        self.current = None;
    }

    /// Flush and reconcile the tracked position into the planner.
    pub fn stop(&mut self) {
        self.flush();
        // Rather brutal, but works.
        self.current = None;
        self.host.sync_position(self.actual_position);
    }

    /// Homing cycle. Not implemented upstream; surfaces as an explicit
    /// not-implemented outcome instead of silently succeeding.
    pub fn go_home(&mut self) -> Result<()> {
        Err(Error::Unimplemented("homing cycle"))
    }

    /// Spin until the queue has the two free slots an enqueue may need,
    /// entering the host's low-power wait each iteration. The interrupt
    /// context drains the queue concurrently in deployment.
    fn wait_for_slot_pair(&mut self) {
        while self.queue.is_full() {
            self.host.idle_wait();
        }
    }

    /// Periodic step-timer callback body.
    ///
    /// Executes in bounded time: loads the next segment when idle, emits at
    /// most one step pulse per axis, and retires the segment once its tick
    /// budget is exhausted. Re-entrant invocations return immediately.
    pub fn on_step_timer(&mut self) {
        if self.busy.swap(true, Ordering::AcqRel) {
            return;
        }

        if self.current.is_none() && !self.load_next() {
            self.busy.store(false, Ordering::Release);
            return;
        }

        if let Some(seg) = self.current {
            self.host.set_motion_active(true);
            let mut out_bits = seg.direction_bits;
            if seg.mode == SegmentMode::Run {
                for a in axis::ALL {
                    let i = a as usize;
                    self.counters[i] += seg.steps[i] as i64;
                    if self.counters[i] > 0 {
                        out_bits |= a.step_bit();
                        self.counters[i] -= seg.max_steps as i64;
                        if seg.is_negative(a) {
                            self.actual_position[i] -= 1;
                        } else {
                            self.actual_position[i] += 1;
                        }
                    }
                }
            }
            self.emit(out_bits ^ self.config.invert_mask);

            self.iterations = self.iterations.saturating_sub(1);
            if self.iterations == 0 {
                // Segment finished; free the slot for the producer.
                self.current = None;
                let _ = self.queue.pop();
            }
        }

        self.busy.store(false, Ordering::Release);
    }

    /// Pulse-width one-shot callback body: reset the step lines to their
    /// resting level, leaving the direction lines untouched.
    pub fn on_pulse_timer(&mut self) {
        if self
            .port
            .reset_step_bits(self.config.invert_mask & STEP_MASK)
            .is_err()
        {
            self.port_faults = self.port_faults.saturating_add(1);
        }
    }

    /// Load the segment at `tail` into the cursor, or fall back to manual
    /// jog / idle when the queue is empty.
    ///
    /// Returns true when a segment is loaded and stepping should proceed
    /// this tick.
    fn load_next(&mut self) -> bool {
        let Some(seg) = self.queue.peek().copied() else {
            self.serve_jog_or_idle();
            return false;
        };

        self.host.set_active_line(seg.line_number);
        self.timer
            .program_rate(plan_step_rate(seg.rate_us, self.config.ticks_per_us));
        self.iterations = seg.max_steps;

        match seg.mode {
            SegmentMode::Run => {
                // Symmetric Bresenham offset distributes rounding error
                // evenly across the segment.
                let offset = -((seg.max_steps >> 1) as i64);
                self.counters = [offset; 3];
                // Re-synchronize the tracker to the segment's start point
                // so retiring the segment lands exactly on its target.
                for a in axis::ALL {
                    let i = a as usize;
                    let signed = if seg.is_negative(a) {
                        -(seg.steps[i] as i32)
                    } else {
                        seg.steps[i] as i32
                    };
                    self.actual_position[i] = seg.target[i] - signed;
                }
                self.current = Some(seg);
                true
            }
            SegmentMode::Halt => {
                if seg.max_steps == 0 {
                    // A stop marker placed on the queue has now arrived.
                    self.queue.flush();
                    self.current = None;
                    self.timer.set_running(false);
                    if self.port.set_enabled(false).is_err() {
                        self.port_faults = self.port_faults.saturating_add(1);
                    }
                    self.host.set_motion_active(false);
                    false
                } else {
                    self.current = Some(seg);
                    true
                }
            }
        }
    }

    /// Queue empty: synthesize jog steps from the operator intent vector,
    /// or go idle and reconcile the position once after a jog ends.
    fn serve_jog_or_idle(&mut self) {
        let intent = self.host.jog_intent();
        if intent != [0; 3] {
            self.jog_active = true;
            self.host.set_active_line(0);
            self.run_jog(intent);
            if self.port.set_enabled(true).is_err() {
                self.port_faults = self.port_faults.saturating_add(1);
            }
            self.timer.set_running(true);
            self.host.set_motion_active(true);
        } else {
            if self.jog_active {
                self.jog_active = false;
                self.host.sync_position(self.actual_position);
            }
            self.timer.set_running(false);
            if self.port.set_enabled(false).is_err() {
                self.port_faults = self.port_faults.saturating_add(1);
            }
            self.host.set_motion_active(false);
        }
    }

    /// One tick of manual jog: pulse every axis with nonzero intent and
    /// pace the shared timer to the slowest interval any of them needs.
    fn run_jog(&mut self, intent: [i8; 3]) {
        let mut out_bits = 0u8;
        let mut slowest_us = 0u32;

        for a in axis::ALL {
            let i = a as usize;
            let magnitude = u32::from(intent[i].unsigned_abs()).min(8);
            if magnitude == 0 {
                continue;
            }
            // Exponential speed mapping: class 8 runs at the base interval,
            // each class below doubles it.
            let interval = self.config.jog_base_interval_us << (8 - magnitude);
            slowest_us = slowest_us.max(interval);

            out_bits |= a.step_bit();
            if intent[i] < 0 {
                out_bits |= a.direction_bit();
                self.actual_position[i] -= 1;
            } else {
                self.actual_position[i] += 1;
            }
        }

        self.timer
            .program_rate(plan_step_rate(slowest_us, self.config.ticks_per_us));
        self.emit(out_bits ^ self.config.invert_mask);
    }

    /// Drive a combined output byte and arm the pulse-width one-shot.
    /// Interrupt context: a port failure is counted, never propagated.
    fn emit(&mut self, bits: u8) {
        if self.port.write(bits).is_err() {
            self.port_faults = self.port_faults.saturating_add(1);
        }
        self.timer.arm_pulse_reset(pulse_reset_preload(
            self.config.pulse_width_us,
            self.config.ticks_per_us,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::hal::PortError;

    #[derive(Default)]
    struct RecordingPort {
        writes: std::vec::Vec<u8>,
        resets: u32,
        enabled: Option<bool>,
    }

    impl StepPort for RecordingPort {
        fn write(&mut self, bits: u8) -> core::result::Result<(), PortError> {
            self.writes.push(bits);
            Ok(())
        }
        fn reset_step_bits(&mut self, _idle: u8) -> core::result::Result<(), PortError> {
            self.resets += 1;
            Ok(())
        }
        fn set_enabled(&mut self, on: bool) -> core::result::Result<(), PortError> {
            self.enabled = Some(on);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingTimer {
        rates: std::vec::Vec<crate::timer::RatePlan>,
        running: Option<bool>,
        pulses_armed: u32,
    }

    impl StepTimer for RecordingTimer {
        fn program_rate(&mut self, plan: crate::timer::RatePlan) {
            self.rates.push(plan);
        }
        fn arm_pulse_reset(&mut self, _preload: u16) {
            self.pulses_armed += 1;
        }
        fn set_running(&mut self, on: bool) {
            self.running = Some(on);
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        synced: std::vec::Vec<[i32; 3]>,
        motion_active: Option<bool>,
        active_line: i32,
        jog: [i8; 3],
    }

    impl Host for RecordingHost {
        fn sync_position(&mut self, position: [i32; 3]) {
            self.synced.push(position);
        }
        fn set_motion_active(&mut self, active: bool) {
            self.motion_active = Some(active);
        }
        fn set_active_line(&mut self, line: i32) {
            self.active_line = line;
        }
        fn jog_intent(&self) -> [i8; 3] {
            self.jog
        }
        fn idle_wait(&mut self) {}
    }

    type TestCore = StepperCore<RecordingPort, RecordingTimer, RecordingHost, 8>;

    fn core_with(config: CoreConfig) -> TestCore {
        let mut core = StepperCore::new(
            RecordingPort::default(),
            RecordingTimer::default(),
            RecordingHost::default(),
            config,
        );
        core.init().unwrap();
        core
    }

    fn core() -> TestCore {
        core_with(CoreConfig::default())
    }

    fn step_pulses(core: &TestCore, axis: Axis) -> usize {
        // init programs no writes; every write during a run carries the
        // direction bits plus the step bits raised that tick.
        core.port
            .writes
            .iter()
            .filter(|&&w| w & axis.step_bit() != 0)
            .count()
    }

    #[test]
    fn single_axis_run_lands_on_target() {
        let mut core = core();
        assert!(core
            .enqueue_motion([100, 0, 0], [100, 0, 0], 10_000, 1)
            .unwrap());
        assert_eq!(core.queue_len(), 1);

        for _ in 0..100 {
            core.on_step_timer();
        }

        assert_eq!(core.position(), [100, 0, 0]);
        assert_eq!(core.queue_len(), 0);
        assert_eq!(step_pulses(&core, Axis::X), 100);
        assert_eq!(step_pulses(&core, Axis::Y), 0);
        assert_eq!(step_pulses(&core, Axis::Z), 0);
    }

    #[test]
    fn run_segment_rate_is_programmed() {
        let mut core = core();
        core.enqueue_motion([100, 0, 0], [100, 0, 0], 10_000, 1)
            .unwrap();
        core.on_step_timer();
        // init programs the default rate, the load programs 100 us/step.
        let plan = *core.timer.rates.last().unwrap();
        assert_eq!(plan, plan_step_rate(100, core.config.ticks_per_us));
    }

    #[test]
    fn subordinate_axis_steps_proportionally() {
        let mut core = core();
        core.enqueue_motion([100, 25, 0], [100, 25, 0], 10_000, 1)
            .unwrap();
        for _ in 0..100 {
            core.on_step_timer();
        }
        assert_eq!(core.position(), [100, 25, 0]);
        assert_eq!(step_pulses(&core, Axis::X), 100);
        assert_eq!(step_pulses(&core, Axis::Y), 25);
    }

    #[test]
    fn negative_motion_decrements_position() {
        let mut core = core();
        core.enqueue_motion([0, -50, 0], [0, -50, 0], 5_000, 2)
            .unwrap();
        for _ in 0..50 {
            core.on_step_timer();
        }
        assert_eq!(core.position(), [0, -50, 0]);
    }

    #[test]
    fn zero_delta_is_rejected_without_queueing() {
        let mut core = core();
        assert!(!core.enqueue_motion([0, 0, 0], [5, 5, 5], 1000, 3).unwrap());
        assert_eq!(core.queue_len(), 0);
    }

    #[test]
    fn reversal_inserts_backlash_segment_first() {
        let config = CoreConfig {
            backlash_steps: [4, 0, 0],
            ..CoreConfig::default()
        };
        let mut core = core_with(config);

        // Direction latch starts at zero; a negative X move reverses X.
        core.enqueue_motion([-50, 0, 0], [-50, 0, 0], 5_000, 7)
            .unwrap();
        assert_eq!(core.queue_len(), 2);

        // Backlash segment: 4 free X steps, direction bit set, same rate.
        core.on_step_timer();
        let comp = core.current.unwrap();
        assert!(comp.is_backlash);
        assert_eq!(comp.steps, [4, 0, 0]);
        assert_eq!(comp.max_steps, 4);
        assert_eq!(comp.rate_us, 100);
        assert_ne!(comp.direction_bits & Axis::X.direction_bit(), 0);

        for _ in 0..3 {
            core.on_step_timer();
        }
        assert_eq!(core.queue_len(), 1);

        // Real segment follows with the full step count.
        core.on_step_timer();
        let real = core.current.unwrap();
        assert!(!real.is_backlash);
        assert_eq!(real.steps, [50, 0, 0]);

        for _ in 0..49 {
            core.on_step_timer();
        }
        // Backlash steps do not leak into the reconciled position.
        assert_eq!(core.position(), [-50, 0, 0]);
    }

    #[test]
    fn same_direction_inserts_no_compensation() {
        let config = CoreConfig {
            backlash_steps: [4, 4, 4],
            ..CoreConfig::default()
        };
        let mut core = core_with(config);

        core.enqueue_motion([10, 0, 0], [10, 0, 0], 1_000, 1).unwrap();
        assert_eq!(core.queue_len(), 1);
        core.enqueue_motion([10, 0, 0], [20, 0, 0], 1_000, 2).unwrap();
        assert_eq!(core.queue_len(), 2);
    }

    #[test]
    fn zero_count_reversal_occupies_no_slot() {
        let mut core = core();
        core.enqueue_motion([-10, 0, 0], [-10, 0, 0], 1_000, 1)
            .unwrap();
        // Default config has no backlash configured: only the real segment.
        assert_eq!(core.queue_len(), 1);
    }

    #[test]
    fn delay_segment_burns_ticks_without_stepping() {
        let mut core = core();
        assert!(core.enqueue_delay(3, 4).unwrap());
        for _ in 0..3 {
            core.on_step_timer();
        }
        assert_eq!(core.queue_len(), 0);
        assert_eq!(core.position(), [0, 0, 0]);
        // Delay ticks still emit the (empty) output byte.
        assert!(core.port.writes.iter().all(|&w| w & STEP_MASK == 0));
    }

    #[test]
    fn elapsed_halt_marker_stops_the_engine() {
        let mut core = core();
        core.enqueue_motion([2, 0, 0], [2, 0, 0], 200, 1).unwrap();
        core.queue.push(Segment::halt(0, 2)).unwrap();
        for _ in 0..2 {
            core.on_step_timer();
        }
        // The marker arrives: flush, stop the timer, de-energize.
        core.on_step_timer();
        assert_eq!(core.queue_len(), 0);
        assert_eq!(core.timer.running, Some(false));
        assert_eq!(core.port.enabled, Some(false));
        assert_eq!(core.host.motion_active, Some(false));
    }

    #[test]
    fn zero_delay_is_an_immediate_stop() {
        let mut core = core();
        core.enqueue_motion([10, 0, 0], [10, 0, 0], 1_000, 1).unwrap();
        assert!(!core.enqueue_delay(0, 2).unwrap());
        assert_eq!(core.queue_len(), 0);
        assert_eq!(core.host.synced.len(), 1);
    }

    #[test]
    fn idle_tick_disables_timer_and_drivers() {
        let mut core = core();
        core.on_step_timer();
        assert_eq!(core.timer.running, Some(false));
        assert_eq!(core.port.enabled, Some(false));
        assert_eq!(core.host.motion_active, Some(false));
    }

    #[test]
    fn flush_twice_leaves_queue_empty() {
        let mut core = core();
        core.enqueue_motion([10, 0, 0], [10, 0, 0], 1_000, 1).unwrap();
        core.flush();
        assert_eq!(core.queue_len(), 0);
        core.flush();
        assert_eq!(core.queue_len(), 0);
    }

    #[test]
    fn stop_reconciles_position() {
        let mut core = core();
        core.enqueue_motion([10, 0, 0], [10, 0, 0], 1_000, 1).unwrap();
        for _ in 0..4 {
            core.on_step_timer();
        }
        let mid = core.position();
        core.stop();
        assert_eq!(core.host.synced.as_slice(), &[mid]);
        assert_eq!(core.queue_len(), 0);
        // The cut segment is gone; the next tick idles.
        core.on_step_timer();
        assert_eq!(core.timer.running, Some(false));
    }

    #[test]
    fn go_home_is_explicitly_unimplemented() {
        let mut core = core();
        assert!(matches!(
            core.go_home(),
            Err(Error::Unimplemented("homing cycle"))
        ));
    }

    #[test]
    fn reentrant_tick_is_a_no_op() {
        let mut core = core();
        core.enqueue_motion([10, 0, 0], [10, 0, 0], 1_000, 1).unwrap();
        core.busy.store(true, Ordering::Release);
        core.on_step_timer();
        assert!(core.port.writes.is_empty());
        assert_eq!(core.queue_len(), 1);
        core.busy.store(false, Ordering::Release);
    }

    #[test]
    fn invert_mask_is_applied_to_output() {
        let config = CoreConfig {
            invert_mask: STEP_MASK,
            ..CoreConfig::default()
        };
        let mut core = core_with(config);
        core.enqueue_motion([1, 0, 0], [1, 0, 0], 100, 1).unwrap();
        core.on_step_timer();
        // X pulses, so its inverted step bit reads low; Y/Z read high.
        let last = *core.port.writes.last().unwrap();
        assert_eq!(last & Axis::X.step_bit(), 0);
        assert_ne!(last & Axis::Y.step_bit(), 0);
        assert_ne!(last & Axis::Z.step_bit(), 0);
    }

    #[test]
    fn jog_pulses_active_axes_and_reconciles_once() {
        let mut core = core();
        core.host.jog = [8, 0, -3];
        core.on_step_timer();
        core.on_step_timer();
        assert_eq!(core.position(), [2, 0, -2]);
        assert_eq!(core.host.motion_active, Some(true));

        // Slowest needed interval wins: class 3 maps to base << 5.
        let expected = plan_step_rate(
            core.config.jog_base_interval_us << 5,
            core.config.ticks_per_us,
        );
        assert_eq!(*core.timer.rates.last().unwrap(), expected);

        core.host.jog = [0, 0, 0];
        core.on_step_timer();
        assert_eq!(core.host.synced.as_slice(), &[[2, 0, -2]]);
        // Further idle ticks do not reconcile again.
        core.on_step_timer();
        assert_eq!(core.host.synced.len(), 1);
    }

    #[test]
    fn pulse_timer_resets_step_lines() {
        let mut core = core();
        core.enqueue_motion([1, 0, 0], [1, 0, 0], 100, 1).unwrap();
        core.on_step_timer();
        assert_eq!(core.timer.pulses_armed, 1);
        core.on_pulse_timer();
        assert_eq!(core.port.resets, 1);
    }

    #[test]
    fn queue_reports_full_before_push_can_fail() {
        let mut core = core();
        let mut enqueued = 0;
        while !core.is_queue_full() {
            assert!(core
                .enqueue_motion([1, 0, 0], [enqueued + 1, 0, 0], 100, enqueued)
                .unwrap());
            enqueued += 1;
        }
        assert!(enqueued > 0);
    }
}
