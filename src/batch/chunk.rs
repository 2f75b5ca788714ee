//! Chunking primitive: splits a collection into contiguous, bounded groups.

use super::entries::Entries;
use tracing::warn;

/// Split `collection` into groups of at most `size` entries.
///
/// Groups are contiguous and keep the original relative order; only the last
/// one may be short. An empty collection yields no groups at all. A `size` of
/// zero is treated as one.
///
/// ```rust
/// use bounded_batch::chunk;
///
/// let groups = chunk(vec![1, 2, 3, 4, 5], 2);
/// assert_eq!(groups, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn chunk<C: Entries>(collection: C, size: usize) -> Vec<C::Rebuilt<C::Value>> {
    split_entries(collection.into_entries(), effective_size(size))
        .into_iter()
        .map(C::rebuild)
        .collect()
}

/// Number of groups `chunk` produces for `len` entries: `ceil(len / size)`.
pub fn chunk_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}

pub(crate) fn effective_size(size: usize) -> usize {
    if size == 0 {
        warn!("chunk size 0 is not allowed, using 1");
        1
    } else {
        size
    }
}

/// `size` must already be at least 1.
pub(crate) fn split_entries<K, V>(entries: Vec<(K, V)>, size: usize) -> Vec<Vec<(K, V)>> {
    let mut groups = Vec::with_capacity(chunk_count(entries.len(), size));
    let mut iter = entries.into_iter().peekable();
    while iter.peek().is_some() {
        groups.push(iter.by_ref().take(size).collect());
    }
    groups
}
