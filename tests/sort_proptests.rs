// MergeSort property tests against slice::sort as the model.
//
// Property 1: sorting yields a permutation of the input in comparator
// order.
// Property 2: sorted() is idempotent and leaves its input untouched.
// Property 3: descending order is the exact reverse of ascending order
// when all elements are distinct.

use kollect::{asc, desc, merge_sort, MergeSort, Sorter};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_sorts_like_std(mut arr in proptest::collection::vec(-1000i32..1000, 0..300)) {
        let mut expected = arr.clone();
        expected.sort_unstable();

        merge_sort(asc, &mut arr);
        prop_assert_eq!(arr, expected);
    }

    #[test]
    fn prop_sorted_is_idempotent(arr in proptest::collection::vec(-1000i32..1000, 0..200)) {
        let original = arr.clone();
        let once = MergeSort.sorted(asc, &arr);
        // non-mutating
        prop_assert_eq!(arr, original);

        let twice = MergeSort.sorted(asc, &once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_desc_reverses_asc_on_distinct(set in proptest::collection::hash_set(-1000i32..1000, 0..150)) {
        let values: Vec<i32> = set.into_iter().collect();

        let mut ascending = values.clone();
        merge_sort(asc, &mut ascending);

        let mut descending = values;
        merge_sort(desc, &mut descending);
        descending.reverse();

        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn prop_all_equal_unchanged(len in 0usize..100, value in -50i32..50) {
        let mut arr = vec![value; len];
        merge_sort(asc, &mut arr);
        prop_assert_eq!(arr, vec![value; len]);
    }
}
