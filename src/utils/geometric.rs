use rand::Rng;
use rand_distr::{Distribution, Geometric, StandardGeometric};

use crate::utils::Probability;

/// A geometric distribution.
/// As the case for `p = 1/2` can be siginificantly sped up by using `StandardGeometric` instead of
/// `Geometric`, we abstract over both using an enum.
#[derive(Debug, Copy, Clone)]
pub enum GeometricDistribution {
    /// General geometric distribution
    General(Geometric),
    /// Geometric distribution for `p = 1/2`
    OneHalf(StandardGeometric),
}

impl Distribution<u64> for GeometricDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match self {
            GeometricDistribution::General(distr) => distr.sample(rng),
            GeometricDistribution::OneHalf(distr) => distr.sample(rng),
        }
    }
}

impl GeometricDistribution {
    /// Creates a new geometric distribution from a given probability.
    /// Returns `None` if `prob` is not a probability in `(0, 1]`.
    pub fn from_prob(prob: f64) -> Option<Self> {
        if prob == 0.5 {
            Some(Self::OneHalf(StandardGeometric))
        } else if prob > 0.0 {
            Geometric::new(prob).ok().map(Self::General)
        } else {
            None
        }
    }
}

/// A geometric jumper selects every position in `0..stop` independently with probability
/// `prob` by jumping over the non-selected positions with geometrically distributed steps.
#[derive(Debug, Copy, Clone)]
pub struct GeometricJumper {
    /// Probability of the geometric distribution
    prob: f64,
    /// Stop if this value is reached
    stop: u64,
}

impl GeometricJumper {
    /// Creates a new geometric jumper from a probability with no stop value
    ///
    /// ** Panics if `prob` is not a valid probability **
    pub fn new(prob: f64) -> Self {
        assert!(prob.is_valid_probability());

        Self {
            prob,
            stop: u64::MAX,
        }
    }

    /// Updates the (exclusive) stop value of the jumper
    pub fn stop_at(mut self, stop: u64) -> Self {
        self.stop = stop;
        self
    }

    /// Creates an iterator of geometric jumps starting at `0`
    pub fn iter<R: Rng>(self, rng: &mut R) -> GeometricJumperIter<'_, R> {
        GeometricJumperIter {
            geom_distr: GeometricDistribution::from_prob(self.prob),
            rng,
            stop: self.stop,
            cur: 0,
        }
    }
}

/// An iterator over geometric jumps starting at `0` with an exclusive stop value
#[derive(Debug)]
pub struct GeometricJumperIter<'a, R>
where
    R: Rng,
{
    geom_distr: Option<GeometricDistribution>,
    rng: &'a mut R,
    stop: u64,
    cur: u64,
}

impl<R> Iterator for GeometricJumperIter<'_, R>
where
    R: Rng,
{
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let distr = self.geom_distr?;
        if self.cur >= self.stop {
            return None;
        }

        let skip = self.rng.sample(distr);
        let pos = self.cur.checked_add(skip).filter(|&pos| pos < self.stop);
        match pos {
            Some(pos) => {
                self.cur = pos + 1;
                Some(pos)
            }
            None => {
                self.cur = self.stop;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn wrong_prob() {
        for prob in [-10.0, -0.001, 1.0001, 3.4] {
            assert!(std::panic::catch_unwind(|| GeometricJumper::new(prob)).is_err());
        }
    }

    #[test]
    fn edge_cases() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        // p = 1.0
        for stop in [3, 10] {
            assert_eq!(
                GeometricJumper::new(1.0).stop_at(stop).iter(rng).count(),
                stop as usize
            );
        }

        // p = 0.0
        assert_eq!(GeometricJumper::new(0.0).iter(rng).count(), 0);
    }

    #[test]
    fn strictly_increasing() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let positions: Vec<u64> = GeometricJumper::new(0.3).stop_at(500).iter(rng).collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(positions.iter().all(|&x| x < 500));
    }

    #[test]
    fn occurences() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        let stop = 100u64;
        let mut occurences = vec![0; stop as usize];
        for _ in 0..1000 {
            for x in GeometricJumper::new(0.25).stop_at(stop).iter(rng) {
                occurences[x as usize] += 1;
            }
        }

        assert!(occurences.into_iter().all(|x| (150..350).contains(&x)));
    }
}
