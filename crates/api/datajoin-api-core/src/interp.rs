//! Interpolation between Values.
//! - f32 linear interpolation for floats and vector components
//! - per-channel interpolation for colors
//! - elementwise blending for generic Vector
//! - step blending for Bool/Text (choose left or right by t < 0.5)
//! - color-space blends (linear-light sRGB, Lab, HSL) through `palette`

use palette::{FromColor, Hsla, IntoColor, Laba, LinSrgba, Mix, Srgba};

use crate::coercion;
use crate::Value;

/// Signature shared by every value interpolator.
pub type InterpolateFn = fn(&Value, &Value, f32) -> Value;

/// Linear interpolation for f32
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Lerp for fixed-size arrays
fn lerp_array<const N: usize>(a: &[f32; N], b: &[f32; N], t: f32) -> [f32; N] {
    let mut out = [0.0f32; N];
    for i in 0..N {
        out[i] = lerp_f32(a[i], b[i], t);
    }
    out
}

/// Blend two generic vectors elementwise. If lengths differ, treat missing elements as 0.0.
fn blend_vector(a: &[f32], b: &[f32], t: f32) -> Vec<f32> {
    let n = std::cmp::max(a.len(), b.len());
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let ai = *a.get(i).unwrap_or(&0.0);
        let bi = *b.get(i).unwrap_or(&0.0);
        out.push(lerp_f32(ai, bi, t));
    }
    out
}

/// Interpolate two Values according to their kinds.
/// For mismatched kinds we attempt reasonable coercions:
/// - Float <-> Vector: broadcast scalar to vector
/// - Vec2/Color <-> Vector: convert to Vector and blend elementwise
///   Step kinds (Bool/Text) are chosen based on t < 0.5 -> a else b.
pub fn interpolate(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Float(af), Value::Float(bf)) => Value::Float(lerp_f32(*af, *bf, t)),
        (Value::Vec2(aa), Value::Vec2(bb)) => Value::Vec2(lerp_array(aa, bb, t)),
        (Value::ColorRgba(ac), Value::ColorRgba(bc)) => Value::ColorRgba(lerp_array(ac, bc, t)),
        (Value::Vector(va), Value::Vector(vb)) => Value::Vector(blend_vector(va, vb, t)),

        (Value::Bool(_), _) | (_, Value::Bool(_)) | (Value::Text(_), _) | (_, Value::Text(_)) => {
            step(a, b, t)
        }

        (Value::Float(af), Value::Vector(vb)) => {
            let a_vec = vec![*af; vb.len()];
            Value::Vector(blend_vector(&a_vec, vb, t))
        }
        (Value::Vector(va), Value::Float(bf)) => {
            let b_vec = vec![*bf; va.len()];
            Value::Vector(blend_vector(va, &b_vec, t))
        }

        // Remaining numeric mixes blend through the generic vector form.
        (a_val, b_val) => {
            let va = coercion::to_vector(a_val);
            let vb = coercion::to_vector(b_val);
            Value::Vector(blend_vector(&va, &vb, t))
        }
    }
}

/// Step blending for step-only kinds: choose a for t < 0.5, else b.
pub fn step(a: &Value, b: &Value, t: f32) -> Value {
    if t < 0.5 {
        a.clone()
    } else {
        b.clone()
    }
}

fn srgba(c: &[f32; 4]) -> Srgba {
    Srgba::new(c[0], c[1], c[2], c[3])
}

fn rgba_array(c: Srgba) -> [f32; 4] {
    let (r, g, b, a) = c.into_components();
    [r, g, b, a]
}

/// Blend two colors in the color space `C`; other kinds fall back to
/// `interpolate`.
fn mix_in<C>(a: &Value, b: &Value, t: f32) -> Value
where
    C: Mix<Scalar = f32> + FromColor<Srgba>,
    Srgba: FromColor<C>,
{
    match (a, b) {
        (Value::ColorRgba(ac), Value::ColorRgba(bc)) => {
            let from: C = srgba(ac).into_color();
            let to: C = srgba(bc).into_color();
            let mixed: Srgba = from.mix(to, t).into_color();
            Value::ColorRgba(rgba_array(mixed))
        }
        _ => interpolate(a, b, t),
    }
}

/// Blend RGBA colors in linear-light sRGB. Alpha stays linear.
pub fn interpolate_linear_rgb(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::ColorRgba(ac), Value::ColorRgba(bc)) => {
            let from: LinSrgba = srgba(ac).into_linear();
            let to: LinSrgba = srgba(bc).into_linear();
            let mixed: Srgba = Srgba::from_linear(from.mix(to, t));
            Value::ColorRgba(rgba_array(mixed))
        }
        _ => interpolate(a, b, t),
    }
}

/// Blend colors in CIE L*a*b*.
pub fn interpolate_lab(a: &Value, b: &Value, t: f32) -> Value {
    mix_in::<Laba>(a, b, t)
}

/// Blend colors in HSL along the shorter hue arc.
pub fn interpolate_hsl(a: &Value, b: &Value, t: f32) -> Value {
    mix_in::<Hsla>(a, b, t)
}
