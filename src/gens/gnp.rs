use itertools::Either;

use super::*;
use crate::utils::{Probability, geometric::GeometricJumper};

/// A G(n, p) network can be defined by either a probability or the average degree which is more
/// common for bond networks
#[derive(Debug, Copy, Clone, Default)]
enum GnpType {
    /// No value has been set yet
    #[default]
    NotSet,
    /// Direct probability value
    Prob(f64),
    /// Average degree of a node
    AvgDeg(f64),
}

/// `G(n,p)` networks contain every possible bond between `n` nodes with probability `p`
/// independent from each other.
///
/// The generator only ever produces normalised edges without self-loops, each at most once, so
/// its output can be fed into [`BondGraph::from_edges`] directly.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
/// use ringstats::{prelude::*, gens::*};
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(1);
/// let edges = Gnp::new().nodes(100).avg_deg(3.0).generate(rng);
///
/// assert!(edges.iter().all(|e| e.is_normalized() && !e.is_loop()));
/// assert!(BondGraph::from_edges(100, edges).is_ok());
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: u64,
    p: GnpType,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    ///
    /// ** Panics if `prob` is not a valid probability **
    pub fn prob(mut self, prob: f64) -> Self {
        assert!(prob.is_valid_probability());
        self.p = GnpType::Prob(prob);
        self
    }

    /// Updates `p` such that every node has `deg` neighbours in expectation.
    /// The conversion is done when calling `stream/generate`.
    pub fn avg_deg(mut self, deg: f64) -> Self {
        self.p = GnpType::AvgDeg(deg);
        self
    }

    fn probability(&self) -> f64 {
        let p = match self.p {
            GnpType::NotSet => panic!("Probability of Gnp was not set!"),
            GnpType::Prob(p) => p,
            GnpType::AvgDeg(d) => d / (self.n.saturating_sub(1).max(1)) as f64,
        };
        assert!(
            p.is_valid_probability(),
            "The average degree is invalid for the given n!"
        );
        p
    }
}

impl NumNodesGen for Gnp {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n as u64;
        self
    }
}

impl GraphGenerator for Gnp {
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Edge> {
        let p = self.probability();
        let n = self.n;

        // Number of possible bonds
        let max_value = n * n.saturating_sub(1) / 2;
        let to_edge = move |x: u64| Edge::from_u64_undir(x, n);

        if p == 1.0 {
            Either::Left((0..max_value).map(to_edge))
        } else {
            Either::Right(
                GeometricJumper::new(p)
                    .stop_at(max_value)
                    .iter(rng)
                    .map(to_edge),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use fxhash::FxHashSet;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn complete_and_empty() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        for n in [0 as NumNodes, 1, 2, 5, 10] {
            let complete = Gnp::new().nodes(n).prob(1.0).generate(rng);
            assert_eq!(complete.len() as NumNodes, n * n.saturating_sub(1) / 2);
            assert!(complete.iter().all_unique());

            assert!(Gnp::new().nodes(n).prob(0.0).generate(rng).is_empty());
        }
    }

    #[test]
    fn valid_bond_lists() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        for n in [10 as NumNodes, 31, 64] {
            for p in [0.05, 0.3, 0.5] {
                let edges = Gnp::new().nodes(n).prob(p).generate(rng);
                let unique: FxHashSet<Edge> = edges.iter().copied().collect();

                assert_eq!(unique.len(), edges.len());
                assert!(edges.iter().all(|e| e.is_normalized() && !e.is_loop() && e.1 < n));
            }
        }
    }

    #[test]
    fn average_degree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let n = 2000;

        let edges = Gnp::new().nodes(n).avg_deg(4.0).generate(rng);
        let avg = 2.0 * edges.len() as f64 / n as f64;
        assert!((3.7..4.3).contains(&avg), "average degree {avg}");

        let graph = BondGraph::gnp_avg_deg(rng, n, 4.0).unwrap();
        let avg = 2.0 * graph.number_of_edges() as f64 / n as f64;
        assert!((3.7..4.3).contains(&avg), "average degree {avg}");
    }
}
