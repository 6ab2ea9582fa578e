use cadence_engine::Ticks;

/// Turns `requestAnimationFrame` timestamps into the `(elapsed, total)`
/// pairs the engine ticks on.
///
/// Timestamps are `performance.now()` milliseconds. The first frame reports
/// zero elapsed time; total time is measured from that first frame and keeps
/// running while paused.
#[derive(Debug, Clone, Default)]
pub struct HostClock {
    start_ms: Option<f64>,
    last_ms: Option<f64>,
    paused: bool,
}

impl HostClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time since the previous frame and total time since the first.
    pub fn advance(&mut self, now_ms: f64) -> (Ticks, Ticks) {
        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = self.last_ms.map_or(0.0, |last| now_ms - last);
        self.last_ms = Some(now_ms);
        (Ticks::from_millis_f64(elapsed), Ticks::from_millis_f64(now_ms - start))
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
