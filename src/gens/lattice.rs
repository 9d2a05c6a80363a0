/*!
Deterministic lattices with known ring statistics.

Nodes of two-dimensional lattices are numbered row by row: node `(x, y)` has index
`y * width + x`.
*/

use super::*;
use crate::repr::ImageShift;

#[inline]
fn grid_node(width: NumNodes, x: NumNodes, y: NumNodes) -> Node {
    y * width + x
}

/// A single ring of `n` nodes: `0 - 1 - ... - (n-1) - 0`
///
/// # Examples
/// ```
/// use ringstats::{prelude::*, gens::*};
///
/// let graph = CycleGraph::new(5).build().unwrap();
/// assert_eq!(graph.number_of_edges(), 5);
/// assert!(graph.has_edge(4, 0));
/// ```
#[derive(Debug, Copy, Clone)]
pub struct CycleGraph {
    n: NumNodes,
}

impl CycleGraph {
    /// Creates the generator for a cycle with `n` nodes
    pub fn new(n: NumNodes) -> Self {
        Self { n }
    }

    /// The bonds of the cycle
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = Vec::with_capacity(self.n as usize);
        edges.connect_cycle(0..self.n);
        edges
    }

    /// # Errors
    /// Fails for `n < 3` (self-loop or duplicate bond)
    pub fn build(&self) -> Result<BondGraph, InvalidGraph> {
        BondGraph::from_edges(self.n, self.edges())
    }
}

/// A non-periodic `width x height` square grid
#[derive(Debug, Copy, Clone)]
pub struct SquareGrid {
    width: NumNodes,
    height: NumNodes,
}

impl SquareGrid {
    /// Creates the generator for a grid of `width x height` nodes
    pub fn new(width: NumNodes, height: NumNodes) -> Self {
        Self { width, height }
    }

    /// Number of nodes of the grid
    pub fn number_of_nodes(&self) -> NumNodes {
        self.width * self.height
    }

    /// The bonds of the grid
    pub fn edges(&self) -> Vec<Edge> {
        let (w, h) = (self.width, self.height);
        let mut edges: Vec<Edge> = Vec::new();

        for y in 0..h {
            edges.connect_path((0..w).map(|x| grid_node(w, x, y)));
        }
        for x in 0..w {
            edges.connect_path((0..h).map(|y| grid_node(w, x, y)));
        }

        edges
    }

    /// # Errors
    /// Never fails for valid dimensions; the result type mirrors the other lattices
    pub fn build(&self) -> Result<BondGraph, InvalidGraph> {
        BondGraph::from_edges(self.number_of_nodes(), self.edges())
    }
}

/// A `width x height` square lattice with periodic boundaries in both directions.
///
/// Bonds crossing the right (bottom) boundary carry an image shift of `+1` in `x` (`y`), so a
/// closed walk winding around the torus has a non-zero total shift and is not reported as a ring.
///
/// # Examples
/// ```
/// use ringstats::{prelude::*, gens::*};
///
/// let graph = PeriodicSquareLattice::new(4, 3).build().unwrap();
/// assert_eq!(graph.number_of_edges(), 24);
/// assert!(graph.degrees().all(|d| d == 4));
/// assert_eq!(graph.image_shift(3, 0), Some([1, 0, 0]));
/// assert_eq!(graph.image_shift(0, 3), Some([-1, 0, 0]));
///
/// // Two columns would require two distinct bonds between the same pair of atoms
/// assert!(PeriodicSquareLattice::new(2, 3).build().is_err());
/// ```
#[derive(Debug, Copy, Clone)]
pub struct PeriodicSquareLattice {
    width: NumNodes,
    height: NumNodes,
}

impl PeriodicSquareLattice {
    /// Creates the generator for a periodic cell of `width x height` nodes
    pub fn new(width: NumNodes, height: NumNodes) -> Self {
        Self { width, height }
    }

    /// Number of nodes of the cell
    pub fn number_of_nodes(&self) -> NumNodes {
        self.width * self.height
    }

    /// The bonds of the cell with the image shift of their second endpoint
    pub fn bonds(&self) -> Vec<(Edge, ImageShift)> {
        let (w, h) = (self.width, self.height);
        let mut bonds = Vec::with_capacity(2 * self.number_of_nodes() as usize);

        for y in 0..h {
            for x in 0..w {
                let u = grid_node(w, x, y);

                let right = grid_node(w, (x + 1) % w, y);
                let shift = if x + 1 == w { [1, 0, 0] } else { [0, 0, 0] };
                bonds.push((Edge(u, right), shift));

                let down = grid_node(w, x, (y + 1) % h);
                let shift = if y + 1 == h { [0, 1, 0] } else { [0, 0, 0] };
                bonds.push((Edge(u, down), shift));
            }
        }

        bonds
    }

    /// # Errors
    /// Fails if a dimension is smaller than `3`, since the bonds would then repeat or
    /// form self-loops
    pub fn build(&self) -> Result<BondGraph, InvalidGraph> {
        BondGraph::from_edges_with_shifts(self.number_of_nodes(), self.bonds())
    }
}

/// A finite honeycomb (graphene-like) sheet in brick-wall layout.
///
/// All nodes of a row are bonded horizontally; `(x, y)` and `(x, y + 1)` are bonded if
/// `x + y` is even. Every brick is a hexagon.
#[derive(Debug, Copy, Clone)]
pub struct HoneycombSheet {
    width: NumNodes,
    height: NumNodes,
}

impl HoneycombSheet {
    /// Creates the generator for a sheet of `width x height` nodes
    pub fn new(width: NumNodes, height: NumNodes) -> Self {
        Self { width, height }
    }

    /// Number of nodes of the sheet
    pub fn number_of_nodes(&self) -> NumNodes {
        self.width * self.height
    }

    /// Number of hexagons of the sheet
    pub fn number_of_hexagons(&self) -> usize {
        (0..self.height.saturating_sub(1))
            .map(|y| {
                let rungs = (0..self.width).filter(|x| (x + y) % 2 == 0).count();
                rungs.saturating_sub(1)
            })
            .sum()
    }

    /// The bonds of the sheet
    pub fn edges(&self) -> Vec<Edge> {
        let (w, h) = (self.width, self.height);
        let mut edges: Vec<Edge> = Vec::new();

        for y in 0..h {
            edges.connect_path((0..w).map(|x| grid_node(w, x, y)));
        }
        for y in 1..h {
            for x in (0..w).filter(|x| (x + y - 1) % 2 == 0) {
                edges.push(Edge(grid_node(w, x, y - 1), grid_node(w, x, y)));
            }
        }

        edges
    }

    /// # Errors
    /// Never fails for valid dimensions; the result type mirrors the other lattices
    pub fn build(&self) -> Result<BondGraph, InvalidGraph> {
        BondGraph::from_edges(self.number_of_nodes(), self.edges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::*;

    #[test]
    fn cycles() {
        for n in 3..10 {
            let graph = CycleGraph::new(n).build().unwrap();
            assert!(graph.degrees().all(|d| d == 2));
            assert!(graph.is_connected());

            let histogram = graph.sp_ring_statistics(None);
            assert_eq!(histogram.total(), 1);
            assert_eq!(histogram.count(n as usize), 1);
        }

        assert!(CycleGraph::new(2).build().is_err());
    }

    #[test]
    fn square_grid() {
        let grid = SquareGrid::new(5, 4);
        let graph = grid.build().unwrap();

        assert_eq!(graph.number_of_edges(), 4 * 4 + 5 * 3);

        let histogram = graph.sp_ring_statistics(Some(12));
        assert_eq!(histogram.total(), 4 * 3);
        assert_eq!(histogram.count(4), 4 * 3);
    }

    #[test]
    fn periodic_square_lattice() {
        for (w, h) in [(3, 3), (4, 5), (6, 6)] {
            let graph = PeriodicSquareLattice::new(w, h).build().unwrap();
            assert!(graph.has_image_shifts());

            let histogram = graph.sp_ring_statistics(Some(8));
            assert_eq!(histogram.count(4), (w * h) as usize);
            assert_eq!(histogram.count(3), 0);
            assert_eq!(histogram.total(), (w * h) as usize);
        }
    }

    #[test]
    fn honeycomb() {
        for (w, h) in [(3, 2), (7, 4), (10, 6)] {
            let sheet = HoneycombSheet::new(w, h);
            let graph = sheet.build().unwrap();
            assert!(graph.max_degree() <= 3);

            let rings = graph.enum_sp_rings(Some(6));
            assert!(rings.iter().all(|r| r.size() == 6));
            assert_eq!(rings.len(), sheet.number_of_hexagons());
        }

        assert_eq!(HoneycombSheet::new(7, 4).number_of_hexagons(), 8);
    }
}
