/*!
Breadth-first traversals that report the hop distance of every visited node.

Every ring query reduces to *balls*: the set of nodes within a given number of hops around a
root. [`LayeredBfs`] enumerates such a ball lazily, layer by layer, so callers can stop as soon
as they found what they are looking for. The visited-set is a type parameter:

- [`NodeBitSet`] for traversals that are expected to cover a large part of the graph,
- `FxHashSet<Node>` for small balls in large networks, where allocating `n` bits per query
  would dominate the running time.

The [`Traversal`] trait exposes the common configurations directly on graphs.
*/

use std::collections::VecDeque;

use fxhash::FxHashSet;

use super::*;

/// Number of visited nodes a sparse traversal pre-allocates for
const SPARSE_CAPACITY_HINT: usize = 64;

/// Lazy breadth-first search yielding `(node, distance)` pairs in non-decreasing distance.
///
/// If a depth limit is set, nodes further than the limit are neither yielded nor expanded.
pub struct LayeredBfs<'a, G, V>
where
    G: AdjacencyList,
    V: Set<Node>,
{
    graph: &'a G,
    visited: V,
    queue: VecDeque<(Node, Distance)>,
    max_depth: Option<Distance>,
}

/// BFS with a dense visited-set
pub type BFS<'a, G> = LayeredBfs<'a, G, NodeBitSet>;

/// BFS with a sparse visited-set
pub type SparseBFS<'a, G> = LayeredBfs<'a, G, FxHashSet<Node>>;

impl<'a, G, V> LayeredBfs<'a, G, V>
where
    G: AdjacencyList,
    V: Set<Node> + FromCapacity,
{
    /// Creates a new traversal starting at `start` (which is yielded first with distance `0`).
    /// `expected_size` only sizes sparse visited-sets.
    pub fn new(graph: &'a G, start: Node, expected_size: usize) -> Self {
        let mut visited = V::from_total_used_capacity(graph.len(), expected_size);
        visited.insert(start);

        Self {
            graph,
            visited,
            queue: VecDeque::from(vec![(start, 0)]),
            max_depth: None,
        }
    }
}

impl<G, V> LayeredBfs<'_, G, V>
where
    G: AdjacencyList,
    V: Set<Node>,
{
    /// Limits the traversal to nodes with distance at most `max_depth` (if `Some`)
    pub fn with_max_depth(mut self, max_depth: Option<Distance>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Treats `u` as if it was already visited: it is never yielded and never expanded.
    ///
    /// # Warning
    /// Has no effect on nodes already in the queue; call directly after the constructor.
    pub fn with_node_excluded(mut self, u: Node) -> Self {
        self.visited.insert(u);
        self
    }

    /// Returns the distance of `target` from the start, if it is within the depth limit.
    /// Stops as soon as `target` is reached.
    ///
    /// # Warning
    /// Only meaningful on a freshly constructed traversal.
    pub fn distance_to(mut self, target: Node) -> Option<Distance> {
        self.find_map(|(u, d)| (u == target).then_some(d))
    }
}

impl<G, V> Iterator for LayeredBfs<'_, G, V>
where
    G: AdjacencyList,
    V: Set<Node>,
{
    type Item = (Node, Distance);

    fn next(&mut self) -> Option<Self::Item> {
        let (u, d) = self.queue.pop_front()?;

        if self.max_depth.is_none_or(|max| d < max) {
            for v in self.graph.neighbors_of(u) {
                if self.visited.insert(v) {
                    self.queue.push_back((v, d + 1));
                }
            }
        }

        Some((u, d))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.queue.len(),
            Some(self.graph.len() + self.queue.len() - self.visited.len()),
        )
    }
}

/// Traversals directly available on graphs
pub trait Traversal: AdjacencyList + Sized {
    /// Unbounded BFS from `start` with a dense visited-set.
    ///
    /// # Examples
    /// ```
    /// use ringstats::{prelude::*, algo::*};
    ///
    /// let g = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
    /// let order: Vec<_> = g.bfs(1).collect();
    /// assert_eq!(order, vec![(1, 0), (0, 1), (2, 1), (3, 2)]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start, self.len())
    }

    /// BFS from `start` restricted to nodes within `max_depth` hops, using a sparse visited-set.
    ///
    /// # Examples
    /// ```
    /// use ringstats::{prelude::*, algo::*};
    ///
    /// let g = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
    /// assert_eq!(g.bfs_within(0, 2).count(), 3);
    /// ```
    fn bfs_within(&self, start: Node, max_depth: Distance) -> SparseBFS<'_, Self> {
        SparseBFS::new(self, start, SPARSE_CAPACITY_HINT).with_max_depth(Some(max_depth))
    }

    /// Returns the hop distance from `start` to every node (`None` if unreachable)
    fn hop_distances(&self, start: Node) -> Vec<Option<Distance>> {
        let mut distances = vec![None; self.len()];
        for (u, d) in self.bfs(start) {
            distances[u as usize] = Some(d);
        }
        distances
    }

    /// Returns *true* if every node is reachable from every other node.
    /// The empty graph is considered connected.
    fn is_connected(&self) -> bool {
        self.is_empty() || self.bfs(0).count() == self.len()
    }
}

impl<G: AdjacencyList> Traversal for G {}
