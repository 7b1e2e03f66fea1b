//! Easing curves mapping linear progress in [0, 1] onto eased progress.

mod bezier;

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

pub use bezier::bezier_ease;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineInOut,
    /// Control points (x1, y1, x2, y2).
    Bezier { ctrl: [f32; 4] },
    /// Holds the start value until the transition ends.
    Step,
}

impl Ease {
    /// Eased progress. Input is clamped to [0, 1]; both endpoints are exact.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Ease::CubicIn => t * t * t,
            Ease::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Ease::SineInOut => {
                if t == 1.0 {
                    1.0
                } else {
                    0.5 * (1.0 - (PI * t).cos())
                }
            }
            Ease::Bezier { ctrl } => bezier_ease(t, ctrl[0], ctrl[1], ctrl[2], ctrl[3]),
            Ease::Step => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}
