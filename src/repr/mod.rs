/*!
# Graph Representation

Bond networks are stored in a single immutable representation, [`BondGraph`], a validated
CSR adjacency structure with optional periodic image shifts per bond.

All read access goes through the traits of [`crate::ops`], so algorithms are written against
[`AdjacencyList`], [`AdjacencyTest`] and friends rather than against the concrete type.
*/

use crate::{edge::*, node::*, ops::*};

mod bond_graph;

pub use bond_graph::*;
