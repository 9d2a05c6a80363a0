/*!
# Network Generators

Generators for bond networks used to test and benchmark ring statistics:

- [`Gnp`]: random `G(n,p)` networks (every bond independently with probability `p`),
- [`CycleGraph`], [`SquareGrid`], [`HoneycombSheet`]: deterministic lattices whose SP rings
  are known in closed form,
- [`PeriodicSquareLattice`]: a square lattice on a torus, with periodic image shifts on the
  bonds crossing the cell boundary,
- [`GeneratorSubstructures`]: paths, cycles and cliques appended to an edge list.

Random generators follow the builder pattern: create the generator, configure it
(`Gnp::new().nodes(n).prob(p)`), and call [`GraphGenerator::generate`] or
[`GraphGenerator::stream`].

```
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use ringstats::{prelude::*, gens::*};

let rng = &mut Pcg64Mcg::seed_from_u64(3);
let graph = BondGraph::gnp(rng, 50, 0.1).unwrap();
assert_eq!(graph.number_of_nodes(), 50);

let sheet = HoneycombSheet::new(5, 4).build().unwrap();
assert!(sheet.max_degree() <= 3);
```
*/

use rand::Rng;

use crate::{error::InvalidGraph, prelude::*};

mod gnp;
mod lattice;
mod substructures;

pub use gnp::*;
pub use lattice::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes
pub trait NumNodesGen {
    /// Sets the number of nodes in the generated network
    fn nodes(self, n: NumNodes) -> Self;
}

/// General trait for a configurable random edge generator.
///
/// Types implementing this trait can produce a complete edge list
/// or a lazily-evaluated stream (iterator) of edges.
pub trait GraphGenerator {
    /// Generates a list of random edges
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;
}

/// Construction of whole random networks
pub trait RandomBondGraph: Sized {
    /// Creates a random `G(n,p)` network
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Result<Self, InvalidGraph>
    where
        R: Rng;

    /// Creates a random `G(n,p)` network with `p` chosen for the given expected degree
    fn gnp_avg_deg<R>(rng: &mut R, n: NumNodes, avg_deg: f64) -> Result<Self, InvalidGraph>
    where
        R: Rng;
}

impl RandomBondGraph for BondGraph {
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Result<Self, InvalidGraph>
    where
        R: Rng,
    {
        BondGraph::from_edges(n, Gnp::new().nodes(n).prob(p).stream(rng))
    }

    fn gnp_avg_deg<R>(rng: &mut R, n: NumNodes, avg_deg: f64) -> Result<Self, InvalidGraph>
    where
        R: Rng,
    {
        BondGraph::from_edges(n, Gnp::new().nodes(n).avg_deg(avg_deg).stream(rng))
    }
}
