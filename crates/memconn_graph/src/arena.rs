//! Dense, ID-indexed storage for topology graph entities.
//!
//! Items are appended and never removed, so a handle handed out by
//! [`Arena::alloc`] stays valid for the lifetime of the arena and of the
//! graph that takes ownership of it.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::Index;

/// Trait for opaque ID types used as arena keys.
///
/// Implementors must provide a bijection between `u32` indices and the ID type.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// A dense, append-only container indexed by an opaque ID type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the ID the next call to [`alloc`](Self::alloc) will hand out.
    pub fn next_id(&self) -> I {
        I::from_raw(self.items.len() as u32)
    }

    /// Allocates a new item in the arena and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.items.push(item);
        id
    }

    /// Returns `true` if `id` was allocated by an arena of at least this size.
    pub fn contains(&self, id: I) -> bool {
        (id.as_raw() as usize) < self.items.len()
    }

    /// Returns a reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }

    /// Returns the item with the given ID, or `None` if it is out of bounds.
    pub fn try_get(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    /// Returns a mutable reference to the item with the given ID, or `None`
    /// if it is out of bounds.
    pub fn try_get_mut(&mut self, id: I) -> Option<&mut T> {
        self.items.get_mut(id.as_raw() as usize)
    }

    /// Returns the number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(ID, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over references to items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VertexId;

    #[test]
    fn alloc_and_get() {
        let mut arena: Arena<VertexId, String> = Arena::new();
        let id = arena.alloc("axi_m".to_string());
        assert_eq!(arena[id], "axi_m");
    }

    #[test]
    fn ids_are_sequential() {
        let mut arena: Arena<VertexId, u32> = Arena::new();
        assert_eq!(arena.next_id().as_raw(), 0);
        let a = arena.alloc(10);
        let b = arena.alloc(20);
        assert_eq!(a.as_raw(), 0);
        assert_eq!(b.as_raw(), 1);
        assert_eq!(arena.next_id().as_raw(), 2);
        let ids: Vec<u32> = arena.iter().map(|(id, _)| id.as_raw()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn contains_and_try_get() {
        let mut arena: Arena<VertexId, &str> = Arena::new();
        let id = arena.alloc("s0");
        let foreign = VertexId::from_raw(7);
        assert!(arena.contains(id));
        assert!(!arena.contains(foreign));
        assert_eq!(arena.try_get(id), Some(&"s0"));
        assert!(arena.try_get(foreign).is_none());
    }

    #[test]
    fn try_get_mut_modifies() {
        let mut arena: Arena<VertexId, bool> = Arena::new();
        let id = arena.alloc(false);
        *arena.try_get_mut(id).unwrap() = true;
        assert!(arena[id]);
        assert!(arena.try_get_mut(VertexId::from_raw(3)).is_none());
    }

    #[test]
    fn empty_arena() {
        let arena: Arena<VertexId, u32> = Arena::default();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.values().count(), 0);
    }
}
