/*!
# Generalized Sets

This module provides an abstraction over node `Set` data structures, allowing traversals
to choose the most efficient implementation based on context:

- Sparse sets (a small BFS ball in a huge network) -> `FxHashSet`
- Dense sets (a traversal of a whole component) -> [`NodeBitSet`]
*/

use std::{collections::HashSet, hash::BuildHasher};

use crate::node::*;

/// Minimalist trait for a set of nodes.
pub trait Set<T> {
    /// Inserts `value` into the set.
    /// Returns `true` if the element was **not** present before.
    fn insert(&mut self, value: T) -> bool;

    /// Returns `true` if the set contains `value`.
    fn contains(&self, value: &T) -> bool;

    /// Clears all elements from the set.
    fn clear(&mut self);

    /// Returns the number of elements in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> Set<Node> for HashSet<Node, S>
where
    S: BuildHasher,
{
    fn insert(&mut self, value: Node) -> bool {
        HashSet::insert(self, value)
    }

    fn contains(&self, value: &Node) -> bool {
        HashSet::contains(self, value)
    }

    fn clear(&mut self) {
        HashSet::clear(self);
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl Set<Node> for NodeBitSet {
    fn insert(&mut self, value: Node) -> bool {
        !self.put(value as usize)
    }

    fn contains(&self, value: &Node) -> bool {
        NodeBitSet::contains(self, *value as usize)
    }

    fn clear(&mut self) {
        NodeBitSet::clear(self);
    }

    fn len(&self) -> usize {
        self.count_ones(..)
    }
}
