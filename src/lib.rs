/*!
`ringstats` computes **shortest-path ring statistics** of bond networks: unlabelled, unweighted,
undirected graphs such as the bond networks of amorphous solids, glasses or molecular frameworks.

# Rings

A *ring* is a closed path that visits each of its nodes once. A ring is a
**shortest-path (SP) ring** if, for every pair of its nodes, the shortest path through the whole
network is no shorter than the shorter way around the ring. The SP ring size distribution is
the standard descriptor of network topology in materials science.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of atoms.
For **edges** (bonds), we use a simple tuple-struct `Edge(Node, Node)`.
A network is stored as an immutable [`BondGraph`](crate::repr::BondGraph) in CSR layout that
is validated once on construction and then shared read-only between worker threads.

# Design

Algorithms are provided as configurable structs that one can alter to their needs using the
*Builder* / *Setter* pattern before running them on a graph. The common functionality is also
implemented via traits on the graph itself, making it usable without configuring anything:

```
use ringstats::{prelude::*, algo::*};

// two triangles fused along the bond (0, 2)
let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();

let rings = graph.enum_sp_rings(Some(8));
assert_eq!(rings.len(), 2);
assert_eq!(graph.sp_ring_statistics(Some(8))[3], 2);

// fallible, cancellable and sequential variant
let rings = RingEnumerator::new()
    .max_size(Some(8))
    .parallel(false)
    .enumerate(&graph)
    .unwrap();
assert_eq!(rings.as_slice()[1].nodes(), &[0, 2, 3]);
```

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, basic graph operations, and the graph representation,
- [`algo`] includes traversals (`graph.bfs(u)`), distance oracles and the ring enumeration,
- [`gens`] includes random networks and deterministic lattices for testing,
- [`utils`] includes helpers such as the [`CancelToken`](crate::utils::CancelToken).

Errors are collected in [`error`]. Diagnostics are emitted through [`tracing`]; install a
subscriber to see graph construction, distance table builds and enumeration progress.

In most use-cases, `use ringstats::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;

/// `ringstats::prelude` includes definitions for nodes and edges, all basic graph operation traits as well as the graph representation.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*};
}
