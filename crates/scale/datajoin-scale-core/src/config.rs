//! Serializable scale configuration.

use serde::{Deserialize, Serialize};

use datajoin_api_core::Value;

/// How domain values are transformed before interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Linear,
    Log {
        #[serde(default = "default_log_base")]
        base: f32,
    },
}

fn default_log_base() -> f32 {
    10.0
}

/// How range values are blended inside a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RangeInterpolation {
    /// Component-wise (colors per channel in stored sRGB).
    #[default]
    Linear,
    /// Colors blended in linear-light sRGB; other kinds as `Linear`.
    LinearRgb,
    /// Colors blended in CIE L*a*b*.
    Lab,
    /// Colors blended in HSL along the shorter hue arc.
    Hsl,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    pub domain: Vec<f32>,
    pub range: Vec<Value>,
    #[serde(default)]
    pub mode: ScaleMode,
    #[serde(default)]
    pub clamp: bool,
    #[serde(default)]
    pub interpolation: RangeInterpolation,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            domain: vec![0.0, 1.0],
            range: vec![Value::Float(0.0), Value::Float(1.0)],
            mode: ScaleMode::Linear,
            clamp: false,
            interpolation: RangeInterpolation::Linear,
        }
    }
}

impl ScaleConfig {
    /// Numeric linear config from plain boundaries.
    pub fn linear(domain: &[f32], range: &[f32]) -> Self {
        Self {
            domain: domain.to_vec(),
            range: range.iter().copied().map(Value::Float).collect(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: ScaleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}
