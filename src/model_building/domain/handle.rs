use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed index into one of the model's entity arenas.
///
/// Every cross-entity reference in the model (including the back-references that
/// close cycles, such as issue -> package) is a `Handle` instead of an owning
/// pointer. A handle is only meaningful for the arena that produced it.
pub struct Handle<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn from_index(index: usize) -> Self {
        Self {
            index: index as u32,
            _marker: PhantomData,
        }
    }

    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Marker;

    #[test]
    fn test_handle_equality_is_by_index() {
        let a: Handle<Marker> = Handle::from_index(3);
        let b: Handle<Marker> = Handle::from_index(3);
        let c: Handle<Marker> = Handle::from_index(4);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
    }

    #[test]
    fn test_handle_is_copy_and_hashable() {
        let a: Handle<Marker> = Handle::from_index(1);
        let copied = a;
        let set: HashSet<_> = [a, copied].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_eq!(a.index(), 1);
        assert_eq!(format!("{:?}", a), "#1");
    }
}
