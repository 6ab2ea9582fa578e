use super::ticks::Ticks;

/// Default step duration: 166 667 ticks (~60.0009 Hz), the NTSC-style rate
/// rather than an exact 1/60 s.
pub const DEFAULT_TARGET_ELAPSED_TIME: Ticks = Ticks(166_667);

/// Upper bound on the elapsed time a single host tick may contribute.
pub const MAXIMUM_ELAPSED_TIME: Ticks = Ticks::from_millis(500);

/// Number of ticks after a second catch-up burst during which the loop
/// still reports itself as running slowly.
pub const DEFAULT_SLOW_RUN_WINDOW: u32 = 20;

/// Outcome of folding one host tick into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    /// Elapsed time after clamping and snapping.
    pub elapsed: Ticks,
    /// Number of fixed steps to run this tick.
    pub steps: u64,
    /// Slow-running state after this tick was recorded.
    pub running_slowly: bool,
}

/// Fixed timestep accumulator.
/// Turns irregular host tick durations into whole fixed-size steps.
///
/// Each call to [`accumulate`](Self::accumulate) normalizes the elapsed time
/// (negative → 0, pending reset → 0, > 500ms → 500ms, within `target / 64`
/// of the target → exactly the target), adds it to the accumulator and
/// extracts as many whole steps as fit. The remainder stays in the
/// accumulator, so it is always in `[0, target)` afterwards.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed duration of one step.
    target: Ticks,
    /// Leftover time carried between ticks.
    accumulator: Ticks,
    max_elapsed: Ticks,
    force_elapsed_to_zero: bool,
    slow: SlowRunTracker,
}

impl FixedTimestep {
    /// Panics if `target` is not positive.
    pub fn new(target: Ticks) -> Self {
        assert!(target > Ticks::ZERO, "target elapsed time must be positive, got {target}");
        Self {
            target,
            accumulator: Ticks::ZERO,
            max_elapsed: MAXIMUM_ELAPSED_TIME,
            force_elapsed_to_zero: false,
            slow: SlowRunTracker::new(DEFAULT_SLOW_RUN_WINDOW),
        }
    }

    /// Replaces the slow-running window (number of ticks after a second
    /// catch-up burst that still count as running slowly).
    pub fn with_slow_run_window(mut self, window: u32) -> Self {
        self.slow = SlowRunTracker::new(window);
        self
    }

    /// The fixed duration of one step.
    pub fn target(&self) -> Ticks {
        self.target
    }

    /// Panics if `target` is not positive.
    pub fn set_target(&mut self, target: Ticks) {
        assert!(target > Ticks::ZERO, "target elapsed time must be positive, got {target}");
        self.target = target;
    }

    pub fn accumulated(&self) -> Ticks {
        self.accumulator
    }

    pub fn max_elapsed(&self) -> Ticks {
        self.max_elapsed
    }

    pub fn running_slowly(&self) -> bool {
        self.slow.running_slowly
    }

    /// Forces the next tick to count as zero elapsed time and forgets any
    /// slow-running history. Used after a pause or seek.
    pub fn reset_elapsed_time(&mut self) {
        self.force_elapsed_to_zero = true;
        self.slow.reset();
    }

    /// Applies the clamp, reset and snap rules to a raw host elapsed time.
    /// Consumes a pending reset request.
    pub fn normalize(&mut self, elapsed: Ticks) -> Ticks {
        let mut elapsed = elapsed.max(Ticks::ZERO);

        if self.force_elapsed_to_zero {
            elapsed = Ticks::ZERO;
            self.force_elapsed_to_zero = false;
        }

        if elapsed > self.max_elapsed {
            log::warn!("tick elapsed {elapsed} exceeds {}, clamping", self.max_elapsed);
            elapsed = self.max_elapsed;
        }

        // Absorb host timer jitter so a steady frame rate never alternates
        // between zero- and two-step frames.
        if (elapsed - self.target).abs() < Ticks(self.target.get() >> 6) {
            elapsed = self.target;
        }

        elapsed
    }

    /// Add one host tick to the accumulator. Returns the steps to run.
    pub fn accumulate(&mut self, elapsed: Ticks) -> StepPlan {
        let elapsed = self.normalize(elapsed);

        self.accumulator += elapsed;
        let target = self.target.get();
        let steps = (self.accumulator.get() / target) as u64;
        self.accumulator = Ticks(self.accumulator.get() % target);

        let running_slowly = self.slow.record(steps);
        if steps > 1 {
            log::warn!("catching up {steps} steps (running slowly: {running_slowly})");
        }

        StepPlan {
            elapsed,
            steps,
            running_slowly,
        }
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_ELAPSED_TIME)
    }
}

/// Hysteresis over catch-up bursts.
///
/// `since_latest` counts ticks since the most recent burst, `since_previous`
/// ticks since the one before it; `None` means no such burst happened. The
/// loop is running slowly while the previous burst is inside the window,
/// i.e. two bursts landed within `window` ticks of each other.
#[derive(Debug, Clone)]
struct SlowRunTracker {
    since_latest: Option<u32>,
    since_previous: Option<u32>,
    window: u32,
    running_slowly: bool,
}

impl SlowRunTracker {
    fn new(window: u32) -> Self {
        Self {
            since_latest: None,
            since_previous: None,
            window,
            running_slowly: false,
        }
    }

    fn record(&mut self, steps: u64) -> bool {
        if steps > 1 {
            self.since_previous = self.since_latest;
            self.since_latest = Some(0);
        } else {
            self.since_latest = self.since_latest.map(|n| n.saturating_add(1));
            self.since_previous = self.since_previous.map(|n| n.saturating_add(1));
        }
        self.running_slowly = self.since_previous.is_some_and(|n| n < self.window);
        self.running_slowly
    }

    fn reset(&mut self) {
        self.since_latest = None;
        self.since_previous = None;
        self.running_slowly = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Ticks = DEFAULT_TARGET_ELAPSED_TIME;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::default();
        let plan = ts.accumulate(T);
        assert_eq!(plan.steps, 1);
        assert_eq!(ts.accumulated(), Ticks::ZERO);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::default();
        let plan = ts.accumulate(Ticks::from_millis(8)); // half a step
        assert_eq!(plan.steps, 0);
        let plan = ts.accumulate(Ticks::from_millis(10)); // over one step total
        assert_eq!(plan.steps, 1);
        assert_eq!(ts.accumulated(), Ticks::from_millis(18) - T);
    }

    #[test]
    fn forty_millis_runs_two_steps() {
        let mut ts = FixedTimestep::default();
        let plan = ts.accumulate(Ticks::from_millis(40));
        assert_eq!(plan.steps, 2);
        assert_eq!(ts.accumulated(), Ticks(400_000 - 2 * 166_667));
    }

    #[test]
    fn clamps_long_stalls_to_half_a_second() {
        let mut ts = FixedTimestep::new(Ticks::from_millis(10));
        let plan = ts.accumulate(Ticks::from_millis(600));
        assert_eq!(plan.elapsed, MAXIMUM_ELAPSED_TIME);
        assert_eq!(plan.steps, 50);

        // 5 000 000 / 166 667 is just under 30.
        let mut ts = FixedTimestep::default();
        assert_eq!(ts.accumulate(Ticks::from_millis(600)).steps, 29);
    }

    #[test]
    fn negative_elapsed_counts_as_zero() {
        let mut ts = FixedTimestep::default();
        ts.accumulate(Ticks::from_millis(10));
        let plan = ts.accumulate(Ticks::from_millis(-5));
        assert_eq!(plan.elapsed, Ticks::ZERO);
        assert_eq!(plan.steps, 0);
        assert_eq!(ts.accumulated(), Ticks::from_millis(10));
    }

    #[test]
    fn snaps_jitter_to_target() {
        let mut ts = FixedTimestep::default();
        let jitter = Ticks(T.get() / 64 - 1);
        assert_eq!(ts.normalize(T + jitter), T);
        assert_eq!(ts.normalize(T - jitter), T);
        let outside = Ticks(T.get() / 64 + 1);
        assert_eq!(ts.normalize(T + outside), T + outside);
    }

    #[test]
    fn reset_forces_next_tick_to_zero_once() {
        let mut ts = FixedTimestep::default();
        ts.reset_elapsed_time();
        let plan = ts.accumulate(Ticks::from_millis(100));
        assert_eq!(plan.elapsed, Ticks::ZERO);
        assert_eq!(plan.steps, 0);
        let plan = ts.accumulate(T);
        assert_eq!(plan.steps, 1);
    }

    #[test]
    fn single_burst_is_not_slow() {
        let mut ts = FixedTimestep::default();
        assert!(!ts.accumulate(Ticks::from_millis(40)).running_slowly);
    }

    #[test]
    fn two_bursts_trip_slow_flag_for_the_window() {
        let mut ts = FixedTimestep::default();
        ts.accumulate(Ticks::from_millis(40));
        assert!(ts.accumulate(Ticks::from_millis(40)).running_slowly);

        for _ in 0..DEFAULT_SLOW_RUN_WINDOW - 1 {
            assert!(ts.accumulate(T).running_slowly);
        }
        assert!(!ts.accumulate(T).running_slowly);
    }

    #[test]
    fn bursts_far_apart_are_not_slow() {
        let mut ts = FixedTimestep::default();
        ts.accumulate(Ticks::from_millis(40));
        for _ in 0..DEFAULT_SLOW_RUN_WINDOW {
            ts.accumulate(T);
        }
        // The previous burst is now outside the window.
        assert!(!ts.accumulate(Ticks::from_millis(40)).running_slowly);
    }

    #[test]
    fn reset_clears_slow_state() {
        let mut ts = FixedTimestep::default();
        ts.accumulate(Ticks::from_millis(40));
        ts.accumulate(Ticks::from_millis(40));
        assert!(ts.running_slowly());
        ts.reset_elapsed_time();
        assert!(!ts.running_slowly());
        ts.accumulate(T);
        // First burst since the reset: no previous burst on record.
        assert!(!ts.accumulate(Ticks::from_millis(40)).running_slowly);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn rejects_negative_target() {
        FixedTimestep::default().set_target(Ticks(-1));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn rejects_zero_target() {
        FixedTimestep::new(Ticks::ZERO);
    }
}
