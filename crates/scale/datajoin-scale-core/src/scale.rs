//! Piecewise continuous scale.
//!
//! A scale pairs N strictly monotonic domain boundaries with N range values.
//! `map` finds the domain segment holding the input, computes the fractional
//! position inside it (after the log transform in log mode) and interpolates
//! the matching range segment. Inputs outside the domain extrapolate along the
//! first/last segment unless clamping is on.

use datajoin_api_core::interp::{self, lerp_f32};
use datajoin_api_core::{InterpolateFn, Value};

use crate::config::{RangeInterpolation, ScaleConfig, ScaleMode};
use crate::error::ScaleError;
use crate::ticks;

#[derive(Clone, Debug)]
pub struct Scale {
    domain: Vec<f32>,
    range: Vec<Value>,
    mode: ScaleMode,
    clamp: bool,
    interpolation: RangeInterpolation,
    /// Domain after the mode transform; what segment lookup works on.
    transformed: Vec<f32>,
    /// -1 for log scales over a negative domain, else 1.
    sign: f32,
}

impl Default for Scale {
    /// Identity scale over [0, 1].
    fn default() -> Self {
        Self {
            domain: vec![0.0, 1.0],
            range: vec![Value::Float(0.0), Value::Float(1.0)],
            mode: ScaleMode::Linear,
            clamp: false,
            interpolation: RangeInterpolation::Linear,
            transformed: vec![0.0, 1.0],
            sign: 1.0,
        }
    }
}

fn strictly_monotonic(values: &[f32]) -> bool {
    values.windows(2).all(|w| w[0] < w[1]) || values.windows(2).all(|w| w[0] > w[1])
}

/// Index of the segment `[bounds[i], bounds[i + 1]]` holding `x`, clamped to
/// the first/last segment for values outside.
fn segment_index(bounds: &[f32], x: f32) -> usize {
    let n = bounds.len();
    let interior = &bounds[1..n - 1];
    if bounds[n - 1] > bounds[0] {
        interior.partition_point(|&b| b <= x)
    } else {
        interior.partition_point(|&b| b >= x)
    }
}

impl Scale {
    /// Build a scale from a validated config.
    pub fn new(config: &ScaleConfig) -> Result<Self, ScaleError> {
        let mut scale = Scale::default();
        scale.configure(
            config.domain.clone(),
            config.range.clone(),
            config.mode,
            config.clamp,
        )?;
        scale.interpolation = config.interpolation;
        Ok(scale)
    }

    /// Numeric linear scale.
    pub fn linear(domain: &[f32], range: &[f32]) -> Result<Self, ScaleError> {
        Self::new(&ScaleConfig::linear(domain, range))
    }

    /// Numeric log scale with the given base.
    pub fn log(domain: &[f32], range: &[f32], base: f32) -> Result<Self, ScaleError> {
        Self::new(&ScaleConfig::linear(domain, range).with_mode(ScaleMode::Log { base }))
    }

    /// Replace domain, range, mode and clamp in one step. On error the previous
    /// configuration is kept.
    pub fn configure(
        &mut self,
        domain: Vec<f32>,
        range: Vec<Value>,
        mode: ScaleMode,
        clamp: bool,
    ) -> Result<(), ScaleError> {
        if domain.len() < 2 {
            return Err(ScaleError::TooFewBoundaries(domain.len()));
        }
        if domain.len() != range.len() {
            return Err(ScaleError::DomainRangeMismatch {
                domain_len: domain.len(),
                range_len: range.len(),
            });
        }
        if let Some(bad) = domain.iter().find(|d| !d.is_finite()) {
            return Err(ScaleError::NonFiniteDomain(*bad));
        }
        if !strictly_monotonic(&domain) {
            return Err(ScaleError::NonMonotonicDomain(domain));
        }

        let sign = match mode {
            ScaleMode::Linear => 1.0,
            ScaleMode::Log { base } => {
                if !(base.is_finite() && base > 0.0 && base != 1.0) {
                    return Err(ScaleError::InvalidLogBase(base));
                }
                if domain.iter().all(|d| *d > 0.0) {
                    1.0
                } else if domain.iter().all(|d| *d < 0.0) {
                    -1.0
                } else {
                    return Err(ScaleError::LogDomainCrossesZero(domain));
                }
            }
        };

        self.sign = sign;
        self.mode = mode;
        self.transformed = domain.iter().map(|d| self.transform(*d)).collect();
        self.domain = domain;
        self.range = range;
        self.clamp = clamp;
        Ok(())
    }

    pub fn domain(&self) -> &[f32] {
        &self.domain
    }

    pub fn range(&self) -> &[Value] {
        &self.range
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    pub fn is_clamped(&self) -> bool {
        self.clamp
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_interpolation(mut self, interpolation: RangeInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    fn interpolator(&self) -> InterpolateFn {
        match self.interpolation {
            RangeInterpolation::Linear => interp::interpolate,
            RangeInterpolation::LinearRgb => interp::interpolate_linear_rgb,
            RangeInterpolation::Lab => interp::interpolate_lab,
            RangeInterpolation::Hsl => interp::interpolate_hsl,
        }
    }

    #[inline]
    fn transform(&self, x: f32) -> f32 {
        match self.mode {
            ScaleMode::Linear => x,
            ScaleMode::Log { base } => self.sign * (self.sign * x).ln() / base.ln(),
        }
    }

    #[inline]
    fn untransform(&self, y: f32) -> f32 {
        match self.mode {
            ScaleMode::Linear => y,
            ScaleMode::Log { base } => self.sign * base.powf(self.sign * y),
        }
    }

    /// Map a domain value to its range value.
    pub fn map(&self, x: f32) -> Value {
        let tx = self.transform(x);
        let i = segment_index(&self.transformed, tx);
        let (d0, d1) = (self.transformed[i], self.transformed[i + 1]);
        let mut t = (tx - d0) / (d1 - d0);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        (self.interpolator())(&self.range[i], &self.range[i + 1], t)
    }

    /// Map to a number; fails when the range is not all `Float`.
    pub fn map_number(&self, x: f32) -> Result<f32, ScaleError> {
        self.numeric_range()?;
        match self.map(x) {
            Value::Float(v) => Ok(v),
            other => Err(ScaleError::NonNumericRange(other.kind())),
        }
    }

    fn numeric_range(&self) -> Result<Vec<f32>, ScaleError> {
        self.range
            .iter()
            .map(|v| v.as_float().ok_or(ScaleError::NonNumericRange(v.kind())))
            .collect()
    }

    /// Map a range value back to the domain. Only numeric, strictly monotonic
    /// ranges are invertible.
    pub fn invert(&self, y: f32) -> Result<f32, ScaleError> {
        let range = self.numeric_range().map_err(|e| {
            ScaleError::UnsupportedOperation(format!("cannot invert: {e}"))
        })?;
        if !strictly_monotonic(&range) {
            return Err(ScaleError::UnsupportedOperation(format!(
                "cannot invert: range is not strictly monotonic: {range:?}"
            )));
        }
        let i = segment_index(&range, y);
        let (r0, r1) = (range[i], range[i + 1]);
        let mut t = (y - r0) / (r1 - r0);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        let tx = lerp_f32(self.transformed[i], self.transformed[i + 1], t);
        Ok(self.untransform(tx))
    }

    /// Human-friendly reference values across the domain extent.
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let first = self.domain[0];
        let last = self.domain[self.domain.len() - 1];
        match self.mode {
            ScaleMode::Linear => ticks::ticks(first, last, count as f32),
            ScaleMode::Log { base } => self.log_ticks(first, last, base, count as f32),
        }
    }

    fn log_ticks(&self, first: f32, last: f32, base: f32, count: f32) -> Vec<f32> {
        let reverse = last < first;
        let (u, v) = if reverse { (last, first) } else { (first, last) };
        // Work on magnitudes; negative domains are mirrored back at the end.
        let (lo, hi) = if self.sign > 0.0 { (u, v) } else { (-v, -u) };
        let i = lo.ln() / base.ln();
        let j = hi.ln() / base.ln();

        let mut out = Vec::new();
        if base.fract() == 0.0 && j - i < count {
            for exp in (i.floor() as i32)..=(j.ceil() as i32) {
                for k in 1..(base as i32) {
                    let t = k as f32 * base.powi(exp);
                    if t < lo {
                        continue;
                    }
                    if t > hi {
                        break;
                    }
                    out.push(t);
                }
            }
        } else {
            out = ticks::ticks(i, j, count.min(j - i))
                .into_iter()
                .map(|e| base.powf(e))
                .collect();
        }

        if self.sign < 0.0 {
            out = out.into_iter().rev().map(|t| -t).collect();
        }
        if reverse {
            out.reverse();
        }
        out
    }

    /// Extend the first/last domain boundary outward to round values.
    pub fn nice(mut self, count: Option<usize>) -> Self {
        let n = self.domain.len();
        let (first, last) = (self.domain[0], self.domain[n - 1]);
        let (niced_first, niced_last) = match self.mode {
            ScaleMode::Linear => nice_linear(first, last, count.unwrap_or(10) as f32),
            ScaleMode::Log { base } => {
                let floor = |x: f32| snap_to_power(self.untransform(self.transform(x).floor()), base);
                let ceil = |x: f32| snap_to_power(self.untransform(self.transform(x).ceil()), base);
                if first < last {
                    (floor(first), ceil(last))
                } else {
                    (ceil(first), floor(last))
                }
            }
        };
        self.domain[0] = niced_first;
        self.domain[n - 1] = niced_last;
        self.transformed = self.domain.iter().map(|d| self.transform(*d)).collect();
        self
    }
}

/// Snap a value that landed a hair off an integer power of `base` back onto it.
fn snap_to_power(x: f32, base: f32) -> f32 {
    let e = (x.abs().ln() / base.ln()).round();
    let p = base.powi(e as i32).copysign(x);
    if ((p - x) / p).abs() < 1e-5 {
        p
    } else {
        x
    }
}

fn nice_linear(first: f32, last: f32, count: f32) -> (f32, f32) {
    if first == last || first.is_nan() || last.is_nan() {
        return (first, last);
    }
    let reverse = last < first;
    let (mut start, mut stop) = if reverse { (last, first) } else { (first, last) };
    let mut prestep = 0.0;
    for _ in 0..10 {
        let step = ticks::tick_increment(start, stop, count);
        if step == prestep {
            break;
        } else if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        prestep = step;
    }
    if reverse {
        (stop, start)
    } else {
        (start, stop)
    }
}
