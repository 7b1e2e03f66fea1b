//! Render operations issued by the engine to the rendering collaborator.
//!
//! RenderOp serializes to JSON as:
//!   { "op": "set_attribute", "element": 3, "name": "width", "value": { "type": "float", "data": 60 } }
//!
//! RenderBatch is a simple Vec<RenderOp> with helpers. Hosts that live across
//! a process boundary (wasm, a UI thread) can forward a batch verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ElementHandle, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderOp {
    Create {
        element: ElementHandle,
        tag: String,
    },
    Remove {
        element: ElementHandle,
    },
    SetAttribute {
        element: ElementHandle,
        name: String,
        value: Value,
    },
    SetStyle {
        element: ElementHandle,
        name: String,
        value: Value,
    },
    SetText {
        element: ElementHandle,
        text: String,
    },
}

impl RenderOp {
    /// Element the op targets.
    pub fn element(&self) -> ElementHandle {
        match self {
            RenderOp::Create { element, .. }
            | RenderOp::Remove { element }
            | RenderOp::SetAttribute { element, .. }
            | RenderOp::SetStyle { element, .. }
            | RenderOp::SetText { element, .. } => *element,
        }
    }
}

/// A batch of render operations, in issue order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderBatch(pub Vec<RenderOp>);

impl RenderBatch {
    pub fn new() -> Self {
        RenderBatch(Vec::new())
    }

    pub fn push(&mut self, op: RenderOp) {
        self.0.push(op);
    }

    pub fn into_vec(self) -> Vec<RenderOp> {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderOp> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove and return every op recorded so far.
    pub fn take(&mut self) -> RenderBatch {
        RenderBatch(std::mem::take(&mut self.0))
    }
}

impl fmt::Display for RenderOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderOp::Create { element, tag } => write!(f, "create <{tag}> as {element}"),
            RenderOp::Remove { element } => write!(f, "remove {element}"),
            RenderOp::SetAttribute {
                element,
                name,
                value,
            } => write!(f, "{element}.{name} = {value}"),
            RenderOp::SetStyle {
                element,
                name,
                value,
            } => write!(f, "{element}.style.{name} = {value}"),
            RenderOp::SetText { element, text } => write!(f, "{element}.text = {text:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderop_roundtrip_json() {
        let op = RenderOp::SetAttribute {
            element: ElementHandle(3),
            name: "width".into(),
            value: Value::Float(60.0),
        };
        let s = serde_json::to_string(&op).unwrap();
        assert!(s.contains(r#""op":"set_attribute""#), "{s}");
        let parsed: RenderOp = serde_json::from_str(&s).unwrap();
        assert_eq!(op, parsed);
    }

    #[test]
    fn batch_take_drains() {
        let mut b = RenderBatch::new();
        b.push(RenderOp::Remove {
            element: ElementHandle(0),
        });
        let taken = b.take();
        assert_eq!(taken.len(), 1);
        assert!(b.is_empty());
    }
}
