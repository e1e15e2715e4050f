//! Fixed-timestep game clock using an accumulator pattern.
//!
//! The host calls `update` with wall-clock milliseconds at whatever
//! cadence it likes; the clock converts that into whole 1-second ticks
//! for `logic::auto_tick`, keeping the simulation deterministic. Long
//! gaps are clamped; time spent away is the offline reward's job, not
//! the live clock's.

/// Longest catch-up window processed live, in ticks.
const MAX_CATCHUP_TICKS: f64 = 30.0;

pub struct GameTime {
    /// Milliseconds per tick (1000 for the 1-second auto tick).
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks.
    accumulator: f64,
    /// Total elapsed ticks since creation.
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None on the first call.
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// The standard clock for the automatic damage tick.
    pub fn auto_tick_clock() -> Self {
        Self::new(1)
    }

    /// Feed a wall-clock timestamp. Returns the number of whole ticks to
    /// process since the previous call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_CATCHUP_TICKS * self.ms_per_tick),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
