//! Color parsing and formatting for `Value::ColorRgba`.
//!
//! Any CSS color literal is accepted (hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`,
//! named colors, `transparent`). Channels are stored as f32 in [0, 1].

use thiserror::Error;

use crate::Value;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color literal '{input}': {reason}")]
    Invalid { input: String, reason: String },
}

/// Parse a CSS color literal into RGBA channels.
pub fn parse_color(input: &str) -> Result<[f32; 4], ColorError> {
    let c = csscolorparser::parse(input.trim()).map_err(|err| ColorError::Invalid {
        input: input.to_string(),
        reason: err.to_string(),
    })?;
    Ok([c.r as f32, c.g as f32, c.b as f32, c.a as f32])
}

/// Parse a color literal straight into a `Value::ColorRgba`.
pub fn color(input: &str) -> Result<Value, ColorError> {
    parse_color(input).map(Value::ColorRgba)
}

#[inline]
fn channel_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Format channels as a CSS `rgba(...)` string.
pub fn to_css(c: [f32; 4]) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        channel_u8(c[0]),
        channel_u8(c[1]),
        channel_u8(c[2]),
        c[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgba(input: &str, expected: [f32; 4]) {
        let c = parse_color(input).unwrap();
        for (got, want) in c.iter().zip(expected) {
            assert!((got - want).abs() < 1e-4, "{input}: {c:?} != {expected:?}");
        }
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#fff").unwrap(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(parse_color("#ff0000").unwrap(), [1.0, 0.0, 0.0, 1.0]);
        assert_rgba("#00000080", [0.0, 0.0, 0.0, 128.0 / 255.0]);
    }

    #[test]
    fn parses_css_functions_and_names() {
        assert_rgba("rgb(255, 0, 0)", [1.0, 0.0, 0.0, 1.0]);
        assert_rgba("hsl(120, 100%, 50%)", [0.0, 1.0, 0.0, 1.0]);
        assert_rgba("purple", [128.0 / 255.0, 0.0, 128.0 / 255.0, 1.0]);
        assert_rgba("RebeccaPurple", [0.4, 0.2, 0.6, 1.0]);
        assert_rgba("transparent", [0.0, 0.0, 0.0, 0.0]);
        assert_rgba(" steelblue ", [70.0 / 255.0, 130.0 / 255.0, 180.0 / 255.0, 1.0]);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["#12", "#gg0000", "chartreuse-ish", ""] {
            let err = parse_color(bad).unwrap_err();
            assert!(matches!(&err, ColorError::Invalid { input, .. } if input == bad));
        }
    }

    #[test]
    fn css_output_uses_byte_channels() {
        assert_eq!(to_css(parse_color("orange").unwrap()), "rgba(255, 165, 0, 1)");
    }
}
