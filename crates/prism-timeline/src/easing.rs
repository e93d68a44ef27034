//! Easing functions
//!
//! The variants and formulas match the animation library the exporter
//! targets, keyed by the same string names. The generated code embeds
//! those names, so a downstream consumer interprets them identically to
//! the live preview.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

/// How eased progress is shaped between two keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Easing {
    Linear,
    Power1InOut,
    #[default]
    Power2InOut,
    ElasticOut,
    BounceOut,
    BackInOut,
}

impl Easing {
    /// Map local progress `t ∈ [0, 1]` to eased progress.
    ///
    /// `e(0) = 0` and `e(1) = 1` for every variant; elastic and back
    /// overshoot outside [0, 1] in between, which is expected.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }
            Easing::ElasticOut => {
                let p = 0.3;
                2f32.powf(-10.0 * t) * ((t - p / 4.0) * (2.0 * PI) / p).sin() + 1.0
            }
            Easing::BounceOut => {
                let mut t = t;
                if t < 1.0 / 2.75 {
                    7.5625 * t * t
                } else if t < 2.0 / 2.75 {
                    t -= 1.5 / 2.75;
                    7.5625 * t * t + 0.75
                } else if t < 2.5 / 2.75 {
                    t -= 2.25 / 2.75;
                    7.5625 * t * t + 0.9375
                } else {
                    t -= 2.625 / 2.75;
                    7.5625 * t * t + 0.984375
                }
            }
            Easing::BackInOut => {
                let s = 1.70158 * 1.525;
                if t < 0.5 {
                    let u = 2.0 * t;
                    0.5 * (u * u * ((s + 1.0) * u - s))
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * (u * u * ((s + 1.0) * u + s) + 2.0)
                }
            }
        }
    }

    /// The string name the export format uses for this easing
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Power1InOut => "power1.inOut",
            Easing::Power2InOut => "power2.inOut",
            Easing::ElasticOut => "elastic.out",
            Easing::BounceOut => "bounce.out",
            Easing::BackInOut => "back.inOut",
        }
    }

    /// Parse an easing from its export name; unknown names fall back to linear,
    /// matching how the original treats unrecognized values.
    pub fn parse(name: &str) -> Self {
        match name {
            "power1.inOut" => Easing::Power1InOut,
            "power2.inOut" => Easing::Power2InOut,
            "elastic.out" => Easing::ElasticOut,
            "bounce.out" => Easing::BounceOut,
            "back.inOut" => Easing::BackInOut,
            _ => Easing::Linear,
        }
    }

    pub const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::Power1InOut,
        Easing::Power2InOut,
        Easing::ElasticOut,
        Easing::BounceOut,
        Easing::BackInOut,
    ];
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
