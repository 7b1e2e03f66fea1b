//! Coercion helpers between Value kinds.
//! Used when interpolating mismatched numeric kinds: vec2/color <-> Vector.

use crate::Value;

/// Convert a Value into a Vec<f32> (generic vector).
/// - Vec2/ColorRgba -> vector of components
/// - Float -> single-element vec
/// - Bool -> single 0/1
/// - Vector -> clone
/// - Text -> empty
pub fn to_vector(v: &Value) -> Vec<f32> {
    match v {
        Value::Float(f) => vec![*f],
        Value::Bool(b) => vec![if *b { 1.0 } else { 0.0 }],
        Value::Vec2(a) => vec![a[0], a[1]],
        Value::ColorRgba(a) => vec![a[0], a[1], a[2], a[3]],
        Value::Vector(vec) => vec.clone(),
        Value::Text(_) => vec![],
    }
}
