use std::ops::Index;

use itertools::Itertools;

use super::*;

/// An immutable, deduplicated collection of canonical rings, sorted by size and node sequence.
///
/// A `RingSet` is built fresh by every enumeration; its order does not depend on the order in
/// which rings were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RingSet {
    rings: Vec<Ring>,
}

impl FromIterator<Ring> for RingSet {
    fn from_iter<I: IntoIterator<Item = Ring>>(iter: I) -> Self {
        let mut rings = iter.into_iter().collect_vec();
        rings.sort_unstable();
        rings.dedup();
        Self { rings }
    }
}

impl RingSet {
    /// Number of distinct rings
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    /// Returns *true* if no ring was found
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Iterator over all rings in canonical order
    pub fn iter(&self) -> std::slice::Iter<'_, Ring> {
        self.rings.iter()
    }

    /// All rings in canonical order
    pub fn as_slice(&self) -> &[Ring] {
        &self.rings
    }

    /// Returns *true* if `ring` is part of the set
    pub fn contains(&self, ring: &Ring) -> bool {
        self.rings.binary_search(ring).is_ok()
    }

    /// All rings with exactly `size` nodes
    pub fn of_size(&self, size: usize) -> &[Ring] {
        let begin = self.rings.partition_point(|r| r.size() < size);
        let end = self.rings.partition_point(|r| r.size() <= size);
        &self.rings[begin..end]
    }

    /// Iterator over all rings containing node `u`
    pub fn containing(&self, u: Node) -> impl Iterator<Item = &Ring> + '_ {
        self.rings.iter().filter(move |r| r.contains(u))
    }

    /// Counts the rings per size
    pub fn histogram(&self) -> RingHistogram {
        self.rings.iter().map(Ring::size).collect()
    }

    /// Consumes the set and returns the sorted rings
    pub fn into_vec(self) -> Vec<Ring> {
        self.rings
    }
}

impl IntoIterator for RingSet {
    type Item = Ring;
    type IntoIter = std::vec::IntoIter<Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.into_iter()
    }
}

impl<'a> IntoIterator for &'a RingSet {
    type Item = &'a Ring;
    type IntoIter = std::slice::Iter<'a, Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.iter()
    }
}

/// Number of rings per ring size: `histogram[k]` is the number of rings with `k` nodes.
///
/// # Examples
/// ```
/// use ringstats::algo::RingHistogram;
///
/// let histogram: RingHistogram = [6, 6, 5, 7, 6].into_iter().collect();
/// assert_eq!(histogram[6], 3);
/// assert_eq!(histogram[4], 0);
/// assert_eq!(histogram[100], 0);
/// assert_eq!(histogram.total(), 5);
/// assert_eq!(histogram.max_size(), Some(7));
/// assert_eq!(histogram.iter().collect::<Vec<_>>(), vec![(5, 1), (6, 3), (7, 1)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RingHistogram {
    /// Never ends with a zero entry
    counts: Vec<usize>,
}

impl FromIterator<usize> for RingHistogram {
    fn from_iter<I: IntoIterator<Item = usize>>(sizes: I) -> Self {
        let mut counts = Vec::new();
        for size in sizes {
            if counts.len() <= size {
                counts.resize(size + 1, 0);
            }
            counts[size] += 1;
        }
        Self { counts }
    }
}

impl RingHistogram {
    /// Number of rings with exactly `size` nodes
    pub fn count(&self, size: usize) -> usize {
        self.counts.get(size).copied().unwrap_or(0)
    }

    /// Total number of rings
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Size of the largest ring, if any
    pub fn max_size(&self) -> Option<usize> {
        self.counts.len().checked_sub(1)
    }

    /// Iterator over `(size, count)` for all sizes with at least one ring
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(k, c)| (k, *c))
    }

    /// Counts indexed by size, from size `0` up to the largest ring
    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }
}

impl Index<usize> for RingHistogram {
    type Output = usize;

    fn index(&self, size: usize) -> &usize {
        self.counts.get(size).unwrap_or(&0)
    }
}

impl From<RingHistogram> for Vec<usize> {
    fn from(histogram: RingHistogram) -> Self {
        histogram.counts
    }
}
