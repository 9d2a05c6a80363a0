/*!
# Utilities

Provides a variety of utility traits/structs such as
- [`SlicedBuffer`](self::sliced_buffer::SlicedBuffer): the CSR storage behind [`BondGraph`](crate::repr::BondGraph) and [`DistanceTable`](crate::algo::DistanceTable),
- [`GeometricJumper`](self::geometric::GeometricJumper): the sampler for [`G(n,p)`](crate::gens::Gnp) test networks,
- an abstraction over node [`Set`]s for traversals,
- the [`CancelToken`] used to abort long-running enumerations.

Apart from [`CancelToken`], you probably do not need to interact with this module directly.
*/

use fxhash::{FxBuildHasher, FxHashSet};

use crate::node::*;

pub mod cancel;
pub mod geometric;
pub mod set;
pub mod sliced_buffer;

pub use cancel::CancelToken;
pub use set::Set;

/// Helper trait for probalities
pub trait Probability {
    /// Returns *true* if the probality is valid (ie. between `0` and `1`)
    fn is_valid_probability(&self) -> bool;
}

impl Probability for f64 {
    fn is_valid_probability(&self) -> bool {
        (0.0..=1.0).contains(self)
    }
}

/// Helper trait for datastructure that can be initialized with capacity.
///
/// `total` is the largest element that may be stored (e.g. the number of nodes),
/// `used` is the number of elements that will actually be stored.
/// Dense structures size themselves by `total`, sparse ones by `used`.
pub trait FromCapacity: Sized {
    /// Create a new instance with a given capacity
    fn from_capacity(capacity: usize) -> Self {
        Self::from_total_used_capacity(capacity, capacity)
    }

    /// Creates a new instance from the total capacity (ie. max-value for example) and the actual
    /// capacity that will be used (space-wise).
    fn from_total_used_capacity(total: usize, used: usize) -> Self;
}

impl FromCapacity for NodeBitSet {
    fn from_total_used_capacity(total: usize, _used: usize) -> Self {
        // Using a bitset as a Set requires intializing to the maximum element
        NodeBitSet::with_capacity(total)
    }
}

impl<T> FromCapacity for FxHashSet<T> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        // Using `FxHashSet<T>` as a Set only requires intializing to the number of elements
        Self::with_capacity_and_hasher(used, FxBuildHasher::default())
    }
}
