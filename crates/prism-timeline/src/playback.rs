//! Playback state and scroll-linked drive

use serde::{Deserialize, Serialize};

/// Transport state of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Which input source advances the timeline. Exactly one is active:
/// enabling scroll-linked mode disables free playback and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    #[default]
    Clock,
    Scroll,
}

/// Scroll-window configuration, in page percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSettings {
    /// Page scroll percentage where the animation starts
    pub start_pct: f64,
    /// Page scroll percentage where the animation ends
    pub end_pct: f64,
    /// Smooth the scrubbing instead of applying raw progress
    pub smooth: bool,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            start_pct: 0.0,
            end_pct: 100.0,
            smooth: true,
        }
    }
}

/// Time constant for smoothed scrubbing: the applied progress closes the
/// gap to the raw progress with this half-life-style lag, the same feel
/// as a 0.5 scrub catch-up in the export target library.
const SMOOTH_LAG_SECONDS: f64 = 0.5;

/// Maps a raw page-scroll fraction through the configured window and
/// optionally smooths it over subsequent ticks.
#[derive(Debug, Clone, Default)]
pub struct ScrollDrive {
    pub settings: ScrollSettings,
    /// Windowed target progress in [0, 1]
    target: f64,
    /// Progress actually applied (lags target when smoothing)
    current: f64,
}

impl ScrollDrive {
    /// Feed a raw page-scroll fraction `p ∈ [0, 1]`. Returns the progress
    /// to apply immediately (un-smoothed settings apply it at once).
    pub fn set_fraction(&mut self, p: f64) -> f64 {
        let pct = p.clamp(0.0, 1.0) * 100.0;
        let span = self.settings.end_pct - self.settings.start_pct;
        self.target = if span > 0.0 {
            ((pct - self.settings.start_pct) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !self.settings.smooth {
            self.current = self.target;
        }
        self.current
    }

    /// Advance smoothing by `dt` seconds, returning the progress to apply.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.settings.smooth {
            let alpha = (dt / SMOOTH_LAG_SECONDS).clamp(0.0, 1.0);
            self.current += (self.target - self.current) * alpha;
            // Snap once the gap is imperceptible
            if (self.target - self.current).abs() < 1e-4 {
                self.current = self.target;
            }
        } else {
            self.current = self.target;
        }
        self.current
    }

    pub fn progress(&self) -> f64 {
        self.current
    }

    /// Reset applied progress (when re-entering scroll mode)
    pub fn reset(&mut self) {
        self.target = 0.0;
        self.current = 0.0;
    }
}
