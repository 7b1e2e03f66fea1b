//! Tick generation shared by linear and log scales.
//! Increments follow the 1/2/5 x 10^k progression.

/// Evenly spaced, human-friendly values between `start` and `stop` (inclusive
/// where they land on a tick). Reversed when `stop < start`.
pub fn ticks(start: f32, stop: f32, count: f32) -> Vec<f32> {
    if count <= 0.0 || count.is_nan() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };

    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let k = if reverse { i2 - i as f32 } else { i1 + i as f32 };
        // Negative increments encode 1/inc to keep decimal ticks exact.
        let val = if inc < 0.0 { k / -inc } else { k * inc };
        out.push(val);
    }
    out
}

fn tick_spec(start: f32, stop: f32, count: f32) -> (f32, f32, f32) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10.0_f32.powf(power);
    let factor = step_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let temp_inc = 10.0_f32.powf(-power) / factor;
        i1 = (start * temp_inc).round();
        i2 = (stop * temp_inc).round();
        if i1 / temp_inc < start {
            i1 += 1.0;
        }
        if i2 / temp_inc > stop {
            i2 -= 1.0;
        }
        inc = -temp_inc;
    } else {
        inc = 10.0_f32.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

#[inline]
fn step_factor(error: f32) -> f32 {
    // Thresholds are sqrt(50), sqrt(10) and sqrt(2).
    if error >= 7.071_068 {
        10.0
    } else if error >= 3.162_277_7 {
        5.0
    } else if error >= 1.414_213_5 {
        2.0
    } else {
        1.0
    }
}

/// Tick step for the given interval and count. Negative results encode the
/// reciprocal of a fractional step, as in [`ticks`].
pub fn tick_increment(start: f32, stop: f32, count: f32) -> f32 {
    if !(count > 0.0) {
        return f32::NAN;
    }
    if start == stop {
        return f32::NEG_INFINITY;
    }
    let step = (stop - start) / count;
    if step == 0.0 {
        return f32::NAN;
    }
    let power = step.log10().floor();
    let error = step / 10.0_f32.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        10.0_f32.powf(power) * factor
    } else {
        -10.0_f32.powf(-power) / factor
    }
}
