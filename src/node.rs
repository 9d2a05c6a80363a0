/*!
# Node Representation

We choose `Node = u32` as atomistic networks practically never exceed `2^32` atoms.
This allows us to (1) save space by not using `usize` or `u64` in neighbour lists and ring
sequences and (2) hand plain integers to parallel workers without any ownership contention.
*/

use fixedbitset::FixedBitSet;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// Hop count between two nodes of a graph.
///
/// Unreachable pairs (or pairs beyond a requested cutoff) are never encoded as a large
/// sentinel value in the public API, but as `None` of an `Option<Distance>`.
pub type Distance = u32;

/// Dense BitSet over Nodes
pub type NodeBitSet = FixedBitSet;

/// Helper to convert a `usize` index (e.g. from `enumerate`) back into a [`Node`].
///
/// ** Panics if `idx` does not fit into a `Node` **
#[inline]
pub fn node_from_index(idx: usize) -> Node {
    debug_assert!(idx < INVALID_NODE as usize);
    idx as Node
}
