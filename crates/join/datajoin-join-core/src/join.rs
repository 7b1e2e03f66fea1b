//! Update/enter/exit partitioning.
//!
//! `reconcile` pairs a snapshot with the bindings left by the previous pass.
//! It never touches the renderer and never mutates `existing`; the caller
//! decides when the returned table replaces the old one.

use hashbrown::HashMap;

use datajoin_api_core::ElementHandle;

use crate::binding::{Binding, BindingTable};
use crate::error::JoinError;
use crate::key::Key;

/// A record that matched an existing binding.
#[derive(Debug)]
pub struct Update<'a, R> {
    /// Position in the new snapshot.
    pub index: usize,
    pub record: &'a R,
    pub key: Key,
    pub element: ElementHandle,
    /// Position the binding held in the previous snapshot.
    pub previous_index: usize,
}

impl<'a, R> Update<'a, R> {
    /// True when the record moved relative to the previous snapshot.
    pub fn moved(&self) -> bool {
        self.index != self.previous_index
    }
}

/// A record with no binding yet.
#[derive(Debug)]
pub struct Enter<'a, R> {
    pub index: usize,
    pub key: Key,
    pub record: &'a R,
}

/// Result of one reconciliation pass.
#[derive(Debug)]
pub struct Join<'a, R> {
    pub updates: Vec<Update<'a, R>>,
    pub enters: Vec<Enter<'a, R>>,
    /// Bindings whose key is absent from the snapshot, in their previous order.
    pub exits: Vec<Binding>,
    /// Update bindings re-indexed to their new positions, in snapshot order.
    /// Enters are not in here; the caller inserts them once elements exist.
    pub table: BindingTable,
}

impl<'a, R> Join<'a, R> {
    /// No element has to be created or removed.
    pub fn is_noop_shape(&self) -> bool {
        self.enters.is_empty() && self.exits.is_empty()
    }

    /// Number of records in the snapshot this join was built from.
    pub fn snapshot_len(&self) -> usize {
        self.updates.len() + self.enters.len()
    }
}

/// Pair `snapshot` with `existing` by key equality.
///
/// Identity follows the key alone: a record keeps its element however far it
/// moves in the snapshot. Fails on the first repeated key.
pub fn reconcile<'a, R, F>(
    snapshot: &'a [R],
    mut key_fn: F,
    existing: &BindingTable,
) -> Result<Join<'a, R>, JoinError>
where
    F: FnMut(&R) -> Key,
{
    let mut seen: HashMap<Key, usize> = HashMap::with_capacity(snapshot.len());
    let mut keys = Vec::with_capacity(snapshot.len());
    for (i, record) in snapshot.iter().enumerate() {
        let key = key_fn(record);
        if let Some(&first) = seen.get(&key) {
            return Err(JoinError::DuplicateKey {
                key,
                first,
                second: i,
            });
        }
        seen.insert(key.clone(), i);
        keys.push(key);
    }

    let mut join = Join {
        updates: Vec::new(),
        enters: Vec::new(),
        exits: Vec::new(),
        table: BindingTable::with_capacity(snapshot.len()),
    };

    for (index, (record, key)) in snapshot.iter().zip(keys).enumerate() {
        match existing.get(&key) {
            Some(prev) => {
                let mut binding = prev.clone();
                binding.index = index;
                join.table.insert(binding);
                join.updates.push(Update {
                    index,
                    record,
                    key,
                    element: prev.element,
                    previous_index: prev.index,
                });
            }
            None => join.enters.push(Enter { index, key, record }),
        }
    }

    join.exits = existing
        .iter()
        .filter(|b| !seen.contains_key(&b.key))
        .cloned()
        .collect();

    Ok(join)
}

/// Pair record `i` with whatever binding sits at table position `i`.
///
/// Keys are the positions themselves (`Key::Int(i)`), so identity does not
/// survive reordering. Surplus bindings exit; surplus records enter.
pub fn reconcile_positional<'a, R>(snapshot: &'a [R], existing: &BindingTable) -> Join<'a, R> {
    let mut join = Join {
        updates: Vec::new(),
        enters: Vec::new(),
        exits: Vec::new(),
        table: BindingTable::with_capacity(snapshot.len()),
    };

    for (index, record) in snapshot.iter().enumerate() {
        let key = Key::from(index);
        match existing.get_index(index) {
            Some(prev) => {
                let mut binding = prev.clone();
                binding.key = key.clone();
                binding.index = index;
                join.table.insert(binding);
                join.updates.push(Update {
                    index,
                    record,
                    key,
                    element: prev.element,
                    previous_index: prev.index,
                });
            }
            None => join.enters.push(Enter { index, key, record }),
        }
    }

    join.exits = existing.iter().skip(snapshot.len()).cloned().collect();
    join
}
