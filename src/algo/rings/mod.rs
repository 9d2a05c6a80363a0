/*!
# Shortest-Path Rings

A *ring* is a node-simple cycle of at least three nodes. A ring is a **shortest-path (SP) ring**
if for every pair of its nodes the graph distance equals their distance along the ring, i.e.
no path through the rest of the network is a shortcut. SP rings are the standard topological
descriptor of amorphous networks such as silica glasses or amorphous carbon.

The module is organised bottom-up:

- [`Ring`]: a canonical cycle, comparable and hashable irrespective of discovery order,
- [`RingFinder`]: all SP rings through a single root bond or node,
- [`RingEnumerator`]: the configurable whole-graph enumeration (parallel, cancellable),
- [`RingSet`] / [`RingHistogram`]: immutable results,
- [`SpRings`]: shortcuts for the common cases, implemented on [`BondGraph`].

# Example
```
use ringstats::{prelude::*, algo::*, gens::*};

// every plaquette of a periodic square lattice is an SP 4-ring
let graph = PeriodicSquareLattice::new(6, 6).build().unwrap();
let histogram = graph.sp_ring_statistics(Some(8));

assert_eq!(histogram[4], 36);
assert_eq!(histogram.total(), 36);
```
*/

mod enumerator;
mod finder;
mod ring;
mod set;

pub use enumerator::*;
pub use finder::*;
pub use ring::*;
pub use set::*;

use super::*;

/// Largest distance a search for rings of at most `max_size` nodes asks its oracle for
fn required_distance(max_size: Option<usize>) -> Option<Distance> {
    max_size.map(|k| (k / 2) as Distance)
}

/// The anchor of a ring search: every reported ring passes through it
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RingRoot {
    /// Rings containing this node
    Node(Node),
    /// Rings containing this bond
    Edge(Edge),
}

impl From<Node> for RingRoot {
    fn from(u: Node) -> Self {
        Self::Node(u)
    }
}

impl From<Edge> for RingRoot {
    fn from(edge: Edge) -> Self {
        Self::Edge(edge)
    }
}

impl From<(Node, Node)> for RingRoot {
    fn from((u, v): (Node, Node)) -> Self {
        Self::Edge(Edge(u, v))
    }
}

/// Shortest-path ring queries directly available on a [`BondGraph`].
///
/// These use the default [`RingEnumerator`] configuration; use the enumerator itself for
/// sequential execution, cancellation or a different distance strategy.
pub trait SpRings {
    /// Distances of all node pairs up to `max_distance` (`None` for all reachable pairs)
    fn distances_on_graph(&self, max_distance: Option<Distance>) -> DistanceTable;

    /// All SP rings with at most `max_size` nodes through `root`,
    /// canonicalised, deduplicated and sorted by size and node sequence.
    ///
    /// # Errors
    /// Returns [`RingError::InvalidRootNode`] or [`RingError::InvalidRootEdge`] if `root` is
    /// not part of the graph.
    ///
    /// # Examples
    /// ```
    /// use ringstats::{prelude::*, algo::*};
    ///
    /// let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
    /// let rings = graph.find_sp_rings(0, None).unwrap();
    ///
    /// assert_eq!(rings.len(), 2);
    /// assert_eq!(rings[0].nodes(), &[0, 1, 2]);
    /// assert_eq!(rings[1].nodes(), &[0, 2, 3]);
    /// ```
    fn find_sp_rings<R: Into<RingRoot>>(
        &self,
        root: R,
        max_size: Option<usize>,
    ) -> Result<Vec<Ring>, RingError>;

    /// All SP rings of the graph with at most `max_size` nodes
    fn enum_sp_rings(&self, max_size: Option<usize>) -> RingSet;

    /// Number of SP rings per size, for rings with at most `max_size` nodes
    fn sp_ring_statistics(&self, max_size: Option<usize>) -> RingHistogram;
}

impl SpRings for BondGraph {
    fn distances_on_graph(&self, max_distance: Option<Distance>) -> DistanceTable {
        DistanceTable::new(self, max_distance)
    }

    fn find_sp_rings<R: Into<RingRoot>>(
        &self,
        root: R,
        max_size: Option<usize>,
    ) -> Result<Vec<Ring>, RingError> {
        let root = root.into();
        let lazy = LazyDistances::new(self).with_cutoff(max_size.map(|k| (k / 2) as Distance));
        let finder = RingFinder::new(self, &lazy).max_size(max_size);

        match root {
            RingRoot::Node(u) => finder.rings_through_node(u),
            RingRoot::Edge(Edge(a, b)) => finder.rings_through_edge(a, b),
        }
    }

    fn enum_sp_rings(&self, max_size: Option<usize>) -> RingSet {
        // without roots and cancel token, the enumeration cannot fail
        RingEnumerator::new()
            .max_size(max_size)
            .enumerate(self)
            .unwrap_or_default()
    }

    fn sp_ring_statistics(&self, max_size: Option<usize>) -> RingHistogram {
        self.enum_sp_rings(max_size).histogram()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::random_bond_graph;

    fn nodes_of<'a>(rings: impl IntoIterator<Item = &'a Ring>) -> Vec<Vec<Node>> {
        rings.into_iter().map(|r| r.nodes().to_vec()).collect_vec()
    }

    #[test]
    fn triangle() {
        let graph = BondGraph::from_edges(3, [(0, 1), (1, 2), (2, 0)]).unwrap();

        assert_eq!(nodes_of(&graph.enum_sp_rings(Some(3))), vec![vec![0, 1, 2]]);
        assert_eq!(nodes_of(&graph.find_sp_rings(1, Some(3)).unwrap()), vec![vec![0, 1, 2]]);
        assert_eq!(graph.sp_ring_statistics(None).as_slice(), &[0, 0, 0, 1]);
    }

    #[test]
    fn square() {
        let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();

        assert_eq!(nodes_of(&graph.enum_sp_rings(Some(4))), vec![vec![0, 1, 2, 3]]);
        assert!(graph.enum_sp_rings(Some(3)).is_empty());
        assert_eq!(graph.distances_on_graph(None).get(0, 2), Some(2));
    }

    #[test]
    fn square_with_diagonal() {
        let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();

        let rings = graph.enum_sp_rings(Some(4));
        assert_eq!(nodes_of(&rings), vec![vec![0, 1, 2], vec![0, 2, 3]]);
        assert_eq!(graph.sp_ring_statistics(Some(4)).count(4), 0);
    }

    #[test]
    fn two_disjoint_triangles() {
        let graph =
            BondGraph::from_edges(6, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]).unwrap();

        assert_eq!(graph.distances_on_graph(None).get(0, 4), None);
        assert_eq!(graph.sp_ring_statistics(Some(6)).count(3), 2);
        assert_eq!(nodes_of(&graph.find_sp_rings((3, 4), None).unwrap()), vec![vec![3, 4, 5]]);
    }

    #[test]
    fn trees_have_no_rings() {
        let graph =
            BondGraph::from_edges(7, [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)]).unwrap();
        assert!(graph.enum_sp_rings(None).is_empty());
        assert_eq!(graph.sp_ring_statistics(None).max_size(), None);
    }

    #[test]
    fn find_agrees_with_enumeration() {
        let rng = &mut Pcg64Mcg::seed_from_u64(21);
        let graph = random_bond_graph(rng, 40, 0.08);
        let all = graph.enum_sp_rings(Some(8));

        for u in graph.vertices() {
            let through_u = graph.find_sp_rings(u, Some(8)).unwrap();
            assert_eq!(nodes_of(&through_u), nodes_of(all.containing(u)));
        }
    }

    #[test]
    fn every_ring_found_once() {
        let rng = &mut Pcg64Mcg::seed_from_u64(22);
        let graph = random_bond_graph(rng, 40, 0.1);
        let rings = graph.enum_sp_rings(Some(7));

        assert!(rings.iter().tuple_windows().all(|(a, b)| a < b));
        assert_eq!(rings.histogram().total(), rings.len());
    }
}
