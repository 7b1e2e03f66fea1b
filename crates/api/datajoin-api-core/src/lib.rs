//! datajoin-api-core: value, attribute and renderer contracts (core, engine-agnostic)

pub mod attr;
pub mod coercion;
pub mod color;
pub mod interp;
pub mod render_ops;
pub mod renderer;
pub mod value;

pub use attr::{AttrKey, AttrKeyError};
pub use color::{color, parse_color, ColorError};
pub use interp::{interpolate, InterpolateFn};
pub use render_ops::{RenderBatch, RenderOp};
pub use renderer::{ElementHandle, ElementState, RecordingRenderer, Renderer};
pub use value::{Value, ValueKind};
