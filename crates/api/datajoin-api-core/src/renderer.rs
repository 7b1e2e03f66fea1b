//! Renderer collaborator contract.
//!
//! The engine never draws anything. It asks a `Renderer` to create and remove
//! elements and to write attribute, style and text values. Element handles are
//! minted and owned by the renderer; the engine only stores copies of them.

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AttrKey, RenderBatch, RenderOp, Value};

/// Opaque reference to an element owned by the renderer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(pub u64);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-side element factory and attribute sink.
pub trait Renderer {
    fn create(&mut self, tag: &str) -> ElementHandle;
    fn remove(&mut self, element: ElementHandle);
    fn set_attribute(&mut self, element: ElementHandle, name: &str, value: &Value);
    fn set_style(&mut self, element: ElementHandle, name: &str, value: &Value);
    fn set_text(&mut self, element: ElementHandle, text: &str);

    /// Write a value to whichever slot `key` names.
    fn apply_value(&mut self, element: ElementHandle, key: &AttrKey, value: &Value) {
        match key {
            AttrKey::Attr(name) => self.set_attribute(element, name, value),
            AttrKey::Style(name) => self.set_style(element, name, value),
            AttrKey::Text => self.set_text(element, &value.to_string()),
        }
    }
}

/// Live state of one element inside a [`RecordingRenderer`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementState {
    pub tag: String,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
    #[serde(default)]
    pub styles: IndexMap<String, Value>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Headless renderer that records every call and keeps the resulting element
/// state. Writes to unknown (removed or never created) elements are recorded
/// in the op log but do not resurrect state.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_id: u64,
    ops: RenderBatch,
    elements: HashMap<ElementHandle, ElementState>,
    /// Creation order of live elements.
    order: Vec<ElementHandle>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every op recorded so far, in issue order.
    pub fn ops(&self) -> &RenderBatch {
        &self.ops
    }

    /// Drain the op log, keeping element state.
    pub fn take_ops(&mut self) -> RenderBatch {
        self.ops.take()
    }

    pub fn element(&self, element: ElementHandle) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    pub fn is_live(&self, element: ElementHandle) -> bool {
        self.elements.contains_key(&element)
    }

    /// Live elements in creation order.
    pub fn live(&self) -> impl Iterator<Item = (ElementHandle, &ElementState)> {
        self.order
            .iter()
            .filter_map(|h| self.elements.get(h).map(|s| (*h, s)))
    }

    pub fn live_count(&self) -> usize {
        self.elements.len()
    }

    /// Current attribute value on a live element.
    pub fn attribute(&self, element: ElementHandle, name: &str) -> Option<&Value> {
        self.elements.get(&element)?.attributes.get(name)
    }

    /// Current style value on a live element.
    pub fn style(&self, element: ElementHandle, name: &str) -> Option<&Value> {
        self.elements.get(&element)?.styles.get(name)
    }

    /// Current text on a live element.
    pub fn text(&self, element: ElementHandle) -> Option<&str> {
        self.elements.get(&element)?.text.as_deref()
    }
}

impl Renderer for RecordingRenderer {
    fn create(&mut self, tag: &str) -> ElementHandle {
        let element = ElementHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.elements.insert(
            element,
            ElementState {
                tag: tag.to_string(),
                ..ElementState::default()
            },
        );
        self.order.push(element);
        self.ops.push(RenderOp::Create {
            element,
            tag: tag.to_string(),
        });
        element
    }

    fn remove(&mut self, element: ElementHandle) {
        self.elements.remove(&element);
        self.order.retain(|h| *h != element);
        self.ops.push(RenderOp::Remove { element });
    }

    fn set_attribute(&mut self, element: ElementHandle, name: &str, value: &Value) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.attributes.insert(name.to_string(), value.clone());
        }
        self.ops.push(RenderOp::SetAttribute {
            element,
            name: name.to_string(),
            value: value.clone(),
        });
    }

    fn set_style(&mut self, element: ElementHandle, name: &str, value: &Value) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.styles.insert(name.to_string(), value.clone());
        }
        self.ops.push(RenderOp::SetStyle {
            element,
            name: name.to_string(),
            value: value.clone(),
        });
    }

    fn set_text(&mut self, element: ElementHandle, text: &str) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.text = Some(text.to_string());
        }
        self.ops.push(RenderOp::SetText {
            element,
            text: text.to_string(),
        });
    }
}
