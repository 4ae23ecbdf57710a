//! Key-based binary search and sorted insertion.
//!
//! Both helpers assume `seq` is already sorted ascending by `key`. The key is
//! extracted explicitly by the caller, so a bare comparison value (for example
//! a window start time) can be searched for without wrapping it in an element.

/// Smallest index `i` such that `key(&seq[i]) >= *target`, or `seq.len()` if
/// there is none.
pub fn lower_bound_by_key<T, K, F>(seq: &[T], target: &K, mut key: F) -> usize
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    seq.partition_point(|element| key(element) < *target)
}

/// Insert `item` before the first element whose key is not less than its own.
///
/// Returns the index the item was inserted at. An item whose key equals
/// existing keys lands in front of all of them.
pub fn insert_sorted_by_key<T, K, F>(seq: &mut Vec<T>, item: T, mut key: F) -> usize
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let target = key(&item);
    let index = lower_bound_by_key(seq, &target, &mut key);
    seq.insert(index, item);
    index
}
