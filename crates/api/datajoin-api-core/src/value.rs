//! Value: attribute payloads written to rendered elements.
//! All numeric types use f32.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lightweight kind enum used for dispatch and diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    Bool,
    Vec2,
    ColorRgba,
    Vector,
    Text,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// Boolean (step)
    Bool(bool),

    /// 2D point or offset
    Vec2([f32; 2]),

    /// RGBA color, channels in [0, 1]
    #[serde(rename = "color")]
    ColorRgba([f32; 4]),

    /// Generic, variable-length numeric vector
    Vector(Vec<f32>),

    /// Text / string; step-only for interpolation
    Text(String),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::ColorRgba(_) => ValueKind::ColorRgba,
            Value::Vector(_) => ValueKind::Vector,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Convenience constructors
    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Value::ColorRgba([r, g, b, a])
    }

    /// Scalar payload, if this is a `Float`.
    #[inline]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Renders the value the way a markup attribute would carry it.
/// Colors use `rgba(r, g, b, a)` with 0-255 channels.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Vec2([x, y]) => write!(f, "{x},{y}"),
            Value::ColorRgba(c) => write!(f, "{}", crate::color::to_css(*c)),
            Value::Vector(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                f.write_str(&parts.join(" "))
            }
            Value::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_is_tagged() {
        let s = serde_json::to_string(&Value::Float(1.5)).unwrap();
        assert_eq!(s, r#"{"type":"float","data":1.5}"#);
        let c: Value = serde_json::from_str(r#"{"type":"color","data":[1,0,0,1]}"#).unwrap();
        assert_eq!(c, Value::ColorRgba([1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn display_matches_attribute_text() {
        assert_eq!(Value::Float(60.0).to_string(), "60");
        assert_eq!(Value::Vec2([1.0, 2.5]).to_string(), "1,2.5");
        assert_eq!(Value::text("hi").to_string(), "hi");
        assert_eq!(
            Value::rgba(1.0, 0.5, 0.0, 1.0).to_string(),
            "rgba(255, 128, 0, 1)"
        );
    }
}
