//! Binding table.
//!
//! A Binding ties a join key to the element handle the renderer minted for it,
//! plus the attribute values last written to that element. The table keeps
//! bindings in snapshot order; lookups by key are O(1).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use datajoin_api_core::{AttrKey, ElementHandle, Value};

use crate::key::Key;

/// One bound element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub key: Key,
    pub element: ElementHandle,
    /// Position of the bound record in the snapshot that last touched it.
    pub index: usize,
    /// Last value written per attribute (including in-flight animation frames).
    #[serde(default)]
    pub attrs: IndexMap<AttrKey, Value>,
}

impl Binding {
    pub fn new(key: Key, element: ElementHandle, index: usize) -> Self {
        Self {
            key,
            element,
            index,
            attrs: IndexMap::new(),
        }
    }

    /// Last value written for `attr`.
    pub fn attr(&self, attr: &AttrKey) -> Option<&Value> {
        self.attrs.get(attr)
    }

    /// Record a value written to the element.
    pub fn record(&mut self, attr: AttrKey, value: Value) {
        self.attrs.insert(attr, value);
    }
}

/// Bindings keyed by join key, in snapshot order. Serializes as a list of
/// bindings so integer keys survive a JSON round-trip.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Binding>", into = "Vec<Binding>")]
pub struct BindingTable {
    rows: IndexMap<Key, Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self {
            rows: IndexMap::new(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            rows: IndexMap::with_capacity(n),
        }
    }

    /// Look up a binding by key.
    pub fn get(&self, key: &Key) -> Option<&Binding> {
        self.rows.get(key)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Binding> {
        self.rows.get_mut(key)
    }

    /// Binding at a table position.
    pub fn get_index(&self, position: usize) -> Option<&Binding> {
        self.rows.get_index(position).map(|(_, b)| b)
    }

    /// Table position of a key.
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.rows.get_index_of(key)
    }

    /// Insert or replace the binding for its key. Returns the replaced binding.
    pub fn insert(&mut self, binding: Binding) -> Option<Binding> {
        self.rows.insert(binding.key.clone(), binding)
    }

    /// Remove a binding, keeping the order of the rest.
    pub fn remove(&mut self, key: &Key) -> Option<Binding> {
        self.rows.shift_remove(key)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.rows.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Binding> {
        self.rows.values_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.keys()
    }

    /// Element handles in table order.
    pub fn elements(&self) -> Vec<ElementHandle> {
        self.rows.values().map(|b| b.element).collect()
    }

    /// Linear scan for the binding holding `element`.
    pub fn find_by_element(&self, element: ElementHandle) -> Option<&Binding> {
        self.rows.values().find(|b| b.element == element)
    }

    /// Reorder rows by their snapshot index.
    pub fn sort_by_index(&mut self) {
        self.rows.sort_by(|_, a, _, b| a.index.cmp(&b.index));
    }
}

impl FromIterator<Binding> for BindingTable {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        let mut table = BindingTable::new();
        for b in iter {
            table.insert(b);
        }
        table
    }
}

impl From<Vec<Binding>> for BindingTable {
    fn from(rows: Vec<Binding>) -> Self {
        rows.into_iter().collect()
    }
}

impl From<BindingTable> for Vec<Binding> {
    fn from(table: BindingTable) -> Self {
        table.into_iter().collect()
    }
}

impl IntoIterator for BindingTable {
    type Item = Binding;
    type IntoIter = indexmap::map::IntoValues<Key, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_values()
    }
}
