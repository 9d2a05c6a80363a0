/*!
# Graph Algorithms

This module provides the algorithms behind ring statistics. All of them are re-exported at the
top level of this module, so you can simply do:
```rust
use ringstats::algo::*;
```
and gain access to traversals, distance oracles and ring enumeration.
Where possible, algorithms are provided as **iterators** or as extension traits implemented
directly on graphs (`graph.bfs(u)`, `graph.enum_sp_rings(Some(8))`).
*/

mod distances;
mod rings;
mod traversal;

use crate::{error::*, prelude::*, utils::*};

pub use distances::*;
pub use rings::*;
pub use traversal::*;
