//! # In-Place Merge Sort
//!
//! A block-merge sort after Jyrki Katajainen, Tomi Pasanen and Jukka
//! Teuhola, "Practical in-place mergesort", Nordic Journal of Computing,
//! 1996.
//!
//! Instead of merging into an auxiliary array, each merge swaps elements
//! into a destination region carved out of the working range itself, so the
//! extra space is O(1) at the cost of O(n log n) swaps. The price of the
//! index-rotation merge is stability: equal elements may not keep their
//! relative order. Callers that need a stable order should reach for an
//! auxiliary-buffer merge sort and pay the O(n) space.

use crate::sort::collection::IndexedCollection;
use crate::sort::sorter::Sorter;

/// In-place merge sort over any [`IndexedCollection`].
///
/// Not stable for tied elements; see the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl Sorter for MergeSort {
    fn sort<T, C, F>(&self, mut comparator: F, collection: &mut C)
    where
        C: IndexedCollection<T> + ?Sized,
        F: FnMut(&T, &T) -> bool,
    {
        let len = collection.len();
        sort_range(collection, &mut comparator, 0, len);
    }
}

/// Sorts `collection` in place with [`MergeSort`].
pub fn merge_sort<T, C, F>(comparator: F, collection: &mut C)
where
    C: IndexedCollection<T> + ?Sized,
    F: FnMut(&T, &T) -> bool,
{
    MergeSort.sort(comparator, collection);
}

/// Merges the sorted runs `[start1, end1)` and `[start2, end2)` into the
/// region beginning at `dest`, swapping displaced elements back into the
/// vacated source slots.
fn merge_into<T, C, F>(
    collection: &mut C,
    comparator: &mut F,
    mut start1: usize,
    end1: usize,
    mut start2: usize,
    end2: usize,
    mut dest: usize,
) where
    C: IndexedCollection<T> + ?Sized,
    F: FnMut(&T, &T) -> bool,
{
    while start1 < end1 && start2 < end2 {
        let source = if comparator(collection.get(start1), collection.get(start2)) {
            let i = start1;
            start1 += 1;
            i
        } else {
            let i = start2;
            start2 += 1;
            i
        };
        collection.swap(dest, source);
        dest += 1;
    }

    while start1 < end1 {
        collection.swap(dest, start1);
        dest += 1;
        start1 += 1;
    }

    while start2 < end2 {
        collection.swap(dest, start2);
        dest += 1;
        start2 += 1;
    }
}

/// Sorts `[start, end)` and deposits the sorted run at `dest` via swaps,
/// leaving the displaced elements behind in `[start, end)`.
fn sort_into<T, C, F>(collection: &mut C, comparator: &mut F, mut start: usize, end: usize, mut dest: usize)
where
    C: IndexedCollection<T> + ?Sized,
    F: FnMut(&T, &T) -> bool,
{
    if end - start > 1 {
        let middle = start + (end - start) / 2;
        sort_range(collection, comparator, start, middle);
        sort_range(collection, comparator, middle, end);
        merge_into(collection, comparator, start, middle, middle, end, dest);
    } else {
        while start < end {
            collection.swap(start, dest);
            start += 1;
            dest += 1;
        }
    }
}

/// Sorts `[start, end)` in place: the upper half serves as the scratch
/// region, shrinking by half each round until only one or two unsorted
/// elements remain, which a bounded insertion pass folds in.
fn sort_range<T, C, F>(collection: &mut C, comparator: &mut F, start: usize, end: usize)
where
    C: IndexedCollection<T> + ?Sized,
    F: FnMut(&T, &T) -> bool,
{
    if end - start <= 1 {
        return;
    }

    let middle = start + (end - start) / 2;
    let mut dest = start + end - middle;
    sort_into(collection, comparator, start, middle, dest);

    while dest - start > 2 {
        let n = dest;
        dest = start + (n - start + 1) / 2;
        sort_into(collection, comparator, dest, n, start);
        merge_into(collection, comparator, start, start + n - dest, n, end, dest);
    }

    // One or two staged elements are left in [start, dest); bubble each one
    // forward to its position in the sorted tail.
    let mut i = dest;
    while i > start {
        let mut j = i;
        while j < end && comparator(collection.get(j), collection.get(j - 1)) {
            collection.swap(j, j - 1);
            j += 1;
        }
        i -= 1;
    }
}
