use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started. Monotonic, never reset.
    ///
    /// Kept in `f64` so animation derived from it stays precise over long runs.
    pub elapsed: f64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The clock measures wall-clock time from its creation. Animation reads
/// `FrameTime::elapsed` directly, so playback speed does not depend on the
/// achieved frame rate and no error accumulates between frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    /// Starts a clock at the current instant.
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    /// Starts a clock at `start`.
    pub fn started_at(start: Instant) -> Self {
        Self { start, last: start }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    ///
    /// Instants earlier than the previous tick are treated as the previous tick,
    /// so `elapsed` never goes backwards.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let now = now.max(self.last);
        self.last = now;

        FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f64(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
