//! Frame clock with clamped delta

use std::time::Instant;

/// Clock configuration
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    /// Ceiling applied to the per-frame delta in seconds. A tab that was
    /// suspended and resumed reports one huge delta; clamping it keeps
    /// playback and physics stable.
    pub max_frame_delta: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_frame_delta: 0.1,
        }
    }
}

/// Tracks wall-clock time across frames. Call `tick()` once per rendered frame.
pub struct FrameClock {
    /// Total elapsed time in seconds (sum of clamped deltas)
    pub total_time: f64,
    /// Time since last frame in seconds, after clamping
    pub delta_time: f64,
    config: ClockConfig,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

impl FrameClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            config,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }

    /// Advance the clock and return the clamped delta.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        self.delta_time = elapsed.min(self.config.max_frame_delta);
        self.total_time += self.delta_time;
        self.delta_time
    }
}
