use crate::model_building::domain::Handle;
use indexmap::IndexSet;
use std::hash::Hash;

/// Insert-if-absent registry collapsing structurally equal values to one entry.
///
/// Entries keep their insertion order and are never removed, so a handle stays
/// valid for the lifetime of the interner. `M` is the type the handles point at
/// in the finished model, which may differ from the interned payload `T` (scan
/// results are interned by their core and finalized later).
#[derive(Debug, Clone)]
pub struct Interner<T, M = T> {
    values: IndexSet<T>,
    _marker: std::marker::PhantomData<fn() -> M>,
}

impl<T: Eq + Hash, M> Interner<T, M> {
    pub fn new() -> Self {
        Self {
            values: IndexSet::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the handle of the entry equal to `value`, inserting it first if absent.
    pub fn add_if_required(&mut self, value: T) -> Handle<M> {
        let (index, _) = self.values.insert_full(value);
        Handle::from_index(index)
    }

    /// Interns every value and returns the distinct handles in order of first occurrence.
    pub fn add_all_if_required(&mut self, values: impl IntoIterator<Item = T>) -> Vec<Handle<M>> {
        let handles: IndexSet<Handle<M>> = values
            .into_iter()
            .map(|value| self.add_if_required(value))
            .collect();
        handles.into_iter().collect()
    }

    pub fn find(&self, value: &T) -> Option<Handle<M>> {
        self.values.get_index_of(value).map(Handle::from_index)
    }

    pub fn get(&self, handle: Handle<M>) -> Option<&T> {
        self.values.get_index(handle.index())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values.into_iter().collect()
    }
}

impl<T: Eq + Hash, M> Default for Interner<T, M> {
    fn default() -> Self {
        Self::new()
    }
}
