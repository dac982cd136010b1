pub mod error;
pub mod hashing;
pub mod map;
pub mod sort;

pub use error::{Error, Result};
pub use hashing::fnv::{fnv1a, FnvBuildHasher, FnvHasher};
pub use map::chained::{ChainedHashMap, ChainedHashMapBuilder};
pub use sort::collection::IndexedCollection;
pub use sort::merge::{merge_sort, MergeSort};
pub use sort::sorter::{asc, desc, Sorter};
