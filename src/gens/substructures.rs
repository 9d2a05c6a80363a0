/*!
# Substructure Generators

Appends common motifs to an edge list under construction:

- **Paths**
- **Cycles**
- **Cliques**

This is handy for assembling small networks with a known ring structure in tests.

# Example

```rust
use ringstats::{prelude::*, gens::*};

let mut edges: Vec<Edge> = Vec::new();
edges.connect_path([0, 1, 2]);
edges.connect_cycle([2, 3, 4]);
edges.connect_clique(&[5, 6, 7]);

let graph = BondGraph::from_edges(8, edges).unwrap();
assert_eq!(graph.number_of_edges(), 8);
```
*/

use itertools::Itertools;

use super::*;

/// Trait for appending **substructures** (paths, cycles, cliques) to a collection of edges.
///
/// Implemented for everything that can be extended by edges.
pub trait GeneratorSubstructures {
    /// Connects the given nodes in order with a **simple path**.
    ///
    /// # Example
    /// ```rust
    /// use ringstats::{prelude::*, gens::*};
    ///
    /// let mut edges: Vec<Edge> = Vec::new();
    /// edges.connect_path([0, 1, 2, 3]);
    /// assert_eq!(edges, vec![Edge(0, 1), Edge(1, 2), Edge(2, 3)]);
    /// ```
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>;

    /// Connects the given nodes with a **cycle**: consecutive nodes are bonded and the last
    /// node is bonded back to the first.
    ///
    /// # Example
    /// ```rust
    /// use ringstats::{prelude::*, gens::*};
    ///
    /// let mut edges: Vec<Edge> = Vec::new();
    /// edges.connect_cycle([0, 1, 2]);
    /// assert_eq!(edges, vec![Edge(0, 1), Edge(1, 2), Edge(2, 0)]);
    /// ```
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>;

    /// Bonds every pair of the given (distinct) nodes, emitting normalised edges
    fn connect_clique(&mut self, nodes: &[Node]);
}

impl<T> GeneratorSubstructures for T
where
    T: Extend<Edge>,
{
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>,
    {
        self.extend(
            nodes_on_path
                .into_iter()
                .tuple_windows()
                .map(|(u, v)| Edge(u, v)),
        );
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        // a single node yields no bond, two nodes yield the same bond twice
        if let Some(first) = iter.next() {
            let mut prev = first;
            let mut len = 1;
            for cur in iter {
                self.extend(std::iter::once(Edge(prev, cur)));
                prev = cur;
                len += 1;
            }

            if len > 1 {
                self.extend(std::iter::once(Edge(prev, first)));
            }
        }
    }

    fn connect_clique(&mut self, nodes: &[Node]) {
        self.extend(
            nodes
                .iter()
                .tuple_combinations()
                .map(|(&u, &v)| Edge(u, v).normalized()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::*;

    #[test]
    fn test_connect_path() {
        let mut edges: Vec<Edge> = Vec::new();
        edges.connect_path([]);
        edges.connect_path([1]);
        assert!(edges.is_empty());

        edges.connect_path([0, 3, 1, 4]);
        assert_eq!(edges, vec![Edge(0, 3), Edge(3, 1), Edge(1, 4)]);
    }

    #[test]
    fn test_connect_cycle() {
        let mut edges: Vec<Edge> = Vec::new();
        edges.connect_cycle([]);
        edges.connect_cycle([4]);
        assert!(edges.is_empty());

        edges.connect_cycle([2, 1]);
        assert_eq!(edges, vec![Edge(2, 1), Edge(1, 2)]);
        assert!(BondGraph::from_edges(3, edges).is_err());

        let mut edges: Vec<Edge> = Vec::new();
        edges.connect_cycle([0, 3, 1, 4]);
        assert_eq!(edges, vec![Edge(0, 3), Edge(3, 1), Edge(1, 4), Edge(4, 0)]);
    }

    #[test]
    fn test_connect_clique() {
        let mut edges: Vec<Edge> = Vec::new();
        edges.connect_clique(&[3, 0, 2]);
        assert_eq!(edges, vec![Edge(0, 3), Edge(2, 3), Edge(0, 2)]);

        // K_4 contains four SP triangles and no SP 4-ring
        let mut edges: Vec<Edge> = Vec::new();
        edges.connect_clique(&[0, 1, 2, 3]);
        let graph = BondGraph::from_edges(4, edges).unwrap();
        let histogram = graph.sp_ring_statistics(None);
        assert_eq!(histogram.count(3), 4);
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn fused_rings() {
        // naphthalene-like: two hexagons sharing the bond (0, 5)
        let mut edges: Vec<Edge> = Vec::new();
        edges.connect_cycle([0, 1, 2, 3, 4, 5]);
        edges.connect_path([5, 6, 7, 8, 9, 0]);
        let graph = BondGraph::from_edges(10, edges).unwrap();

        let rings = graph.enum_sp_rings(None);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|r| r.size() == 6 && r.contains_edge(Edge(5, 0))));
    }
}
