/*!
# CSR-based Sliced Buffers

This module provides a **Compressed Sparse Row (CSR)**-like data structure for storing
variable-length rows efficiently. It backs both the neighbour lists of a
[`BondGraph`](crate::repr::BondGraph) and the rows of a
[`DistanceTable`](crate::algo::DistanceTable).

The key idea:

- A contiguous `buffer: Vec<T>` stores all elements.
- A non-decreasing `offsets: Vec<usize>` stores row boundaries, where row `i` is `buffer[offsets[i]..offsets[i+1]]`.

### Invariants
All constructions verify the following invariants:

1. `offsets.len() >= 1`
2. `offsets` is non-decreasing and starts at `0`
3. the last offset equals `buffer.len()`

These invariants allow **unchecked access** in the indexing methods.
*/

use std::ops::Index;

use crate::node::*;

/// CSR-like structure storing rows of elements.
///
/// - `buffer`: all elements contiguously
/// - `offsets`: start indices of each row (plus the end of the last row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicedBuffer<T> {
    buffer: Vec<T>,
    offsets: Vec<usize>,
}

impl<T> Default for SlicedBuffer<T> {
    fn default() -> Self {
        Self {
            buffer: Vec::new(),
            offsets: vec![0],
        }
    }
}

impl<T> SlicedBuffer<T> {
    /// Constructs a new `SlicedBuffer`.
    ///
    /// # Panics
    /// Panics if:
    /// - `offsets` is empty or does not start at `0`
    /// - `offsets` is not sorted
    /// - the last offset is not `buffer.len()`
    pub fn new(buffer: Vec<T>, offsets: Vec<usize>) -> Self {
        assert_eq!(offsets.first().copied(), Some(0));
        assert!(offsets.is_sorted());
        assert_eq!(offsets.last().copied(), Some(buffer.len()));

        Self { buffer, offsets }
    }

    /// Builds a `SlicedBuffer` by concatenating rows in order.
    ///
    /// # Examples
    /// ```
    /// use ringstats::utils::sliced_buffer::SlicedBuffer;
    ///
    /// let sb = SlicedBuffer::from_rows([vec![1u32, 2], vec![], vec![4, 5, 6]]);
    /// assert_eq!(sb.len(), 3);
    /// assert_eq!(&sb[2], &[4, 5, 6]);
    /// assert!(sb[1].is_empty());
    /// ```
    pub fn from_rows<R, I>(rows: I) -> Self
    where
        R: IntoIterator<Item = T>,
        I: IntoIterator<Item = R>,
    {
        let mut buffer = Vec::new();
        let mut offsets = vec![0];
        for row in rows {
            buffer.extend(row);
            offsets.push(buffer.len());
        }

        Self { buffer, offsets }
    }

    /// Returns the number of rows.
    ///
    /// # Examples
    /// ```
    /// use ringstats::utils::sliced_buffer::SlicedBuffer;
    ///
    /// let sb = SlicedBuffer::new(vec![1u32, 2, 4, 5, 6, 7, 8], vec![0, 2, 4, 7]);
    /// assert_eq!(sb.len(), 3);
    /// ```
    #[allow(clippy::len_without_is_empty)]
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of rows as [`NumNodes`].
    #[inline(always)]
    pub fn number_of_rows(&self) -> NumNodes {
        node_from_index(self.len())
    }

    /// Returns the total number of entries in the buffer.
    #[inline(always)]
    pub fn number_of_entries(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the length of row `u`.
    ///
    /// # Examples
    /// ```
    /// use ringstats::utils::sliced_buffer::SlicedBuffer;
    ///
    /// let sb = SlicedBuffer::new(vec![1u32, 2, 4, 5, 6, 7, 8], vec![0, 2, 4, 7]);
    /// assert_eq!(sb.size_of(2), 3);
    /// ```
    #[inline(always)]
    pub fn size_of(&self, u: Node) -> usize {
        let u = u as usize;
        self.offsets[u + 1] - self.offsets[u]
    }

    /// Returns the global buffer position of the first entry of row `u`.
    #[inline(always)]
    pub fn offset_of(&self, u: Node) -> usize {
        self.offsets[u as usize]
    }

    /// Returns an iterator over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.offsets
            .windows(2)
            .map(|w| &self.buffer[w[0]..w[1]])
    }
}

impl<T> Index<Node> for SlicedBuffer<T> {
    type Output = [T];

    #[inline(always)]
    fn index(&self, idx: Node) -> &Self::Output {
        let idx = idx as usize;
        let end = self.offsets[idx + 1];
        let start = self.offsets[idx];

        // using unchecked here is safe, since we established in the
        // constructor that all entries within `self.offsets` are
        //  (i) non-decreasing (i.e. produce a valid range) and
        //  (ii) are within bounds of `self.buffer`
        unsafe { self.buffer.get_unchecked(start..end) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_roundtrip() {
        let rows = vec![vec![3u32], vec![], vec![0, 1, 2], vec![]];
        let sb = SlicedBuffer::from_rows(rows.clone());

        assert_eq!(sb.len(), 4);
        assert_eq!(sb.number_of_entries(), 4);
        assert_eq!(sb.offset_of(2), 1);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(&sb[i as Node], row.as_slice());
            assert_eq!(sb.size_of(i as Node), row.len());
        }
        assert_eq!(sb.rows().map(|r| r.to_vec()).collect::<Vec<_>>(), rows);
    }

    #[test]
    #[should_panic]
    fn offsets_must_cover_buffer() {
        SlicedBuffer::new(vec![1u32, 2, 3], vec![0, 2]);
    }

    #[test]
    fn empty_buffer() {
        let sb: SlicedBuffer<u32> = SlicedBuffer::default();
        assert_eq!(sb.len(), 0);
        assert_eq!(sb.rows().count(), 0);
    }
}
