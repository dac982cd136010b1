//! # Separate Chaining Hash Map
//!
//! This module implements a **hash map** using **separate chaining**: every
//! bucket slot owns the head of a singly linked chain of entries, and
//! collisions extend the chain. It supports:
//! - **Generic** key-value pairs (`K: Hash + Eq, V`).
//! - **Customizable** initial capacity and load factor threshold.
//! - **Configurable** hasher using `BuildHasher`, with `RandomState` by
//!   default or a deterministic hasher such as
//!   [`FnvBuildHasher`](crate::hashing::fnv::FnvBuildHasher).
//! - **Insert**, **get**, **remove**, **iterate** and the usual traversal
//!   combinators with expected **O(1)** average cost per keyed operation.
//!
//! Buckets are allocated lazily: a freshly constructed map owns no storage
//! until its first insertion. Once the ratio of entries to buckets reaches
//! the load factor threshold, the bucket array doubles and every entry is
//! re-linked through the hash relation. Capacity never shrinks; `clear`
//! returns the map to the unallocated state.
//!
//! Iteration order is bucket-index order then chain order — not insertion
//! order, and not stable across rehashes.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::mem;
use std::ops::Add;

use log::debug;

use crate::error::{Error, Result};

/// Bucket count of the first allocation if none was specified.
const DEFAULT_INITIAL_CAPACITY: usize = 32;

/// Default maximum load factor before the bucket array doubles.
const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Capacity multiplier applied on every rehash.
const GROWTH_FACTOR: usize = 2;

/// Owning link to the next node of a chain.
type Link<K, V> = Option<Box<Node<K, V>>>;

/// One entry of a bucket chain.
#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            next: None,
        }
    }
}

/// A separate-chaining hash map with generic `K, V` and a customizable
/// hasher.
///
/// Two maps compare equal iff they hold the same key→value associations,
/// regardless of bucket layout or the order entries were inserted in.
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = RandomState> {
    buckets: Vec<Link<K, V>>,
    /// The number of stored key-value pairs.
    len: usize,
    /// Bucket count of the first allocation.
    initial_capacity: usize,
    /// The maximum load factor (ratio = len / capacity).
    max_load_factor: f64,
    /// Hasher builder.
    build_hasher: S,
}

/// A builder for [`ChainedHashMap`].
/// Typically you'll call `.with_capacity(...)`, `.with_hasher(...)`, etc.,
/// then `.build()`.
#[derive(Debug)]
pub struct ChainedHashMapBuilder<S> {
    capacity: usize,
    max_load_factor: f64,
    hasher: S,
}

impl Default for ChainedHashMapBuilder<RandomState> {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher: RandomState::new(),
        }
    }
}

impl ChainedHashMapBuilder<RandomState> {
    /// Creates a new builder with default capacity and default hasher
    /// (`RandomState`).
    pub fn new() -> Self {
        Default::default()
    }
}

impl<S: BuildHasher> ChainedHashMapBuilder<S> {
    /// Sets the bucket count of the map's first allocation.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Sets the maximum load factor. When `len / capacity` reaches it, the
    /// bucket array doubles.
    pub fn with_max_load_factor(mut self, lf: f64) -> Self {
        assert!(lf > 0.0, "load factor must be > 0");
        self.max_load_factor = lf;
        self
    }

    /// Sets a custom hasher builder.
    pub fn with_hasher<T: BuildHasher>(self, hasher: T) -> ChainedHashMapBuilder<T> {
        ChainedHashMapBuilder {
            capacity: self.capacity,
            max_load_factor: self.max_load_factor,
            hasher,
        }
    }

    /// Build the final [`ChainedHashMap`]. No buckets are allocated until
    /// the first insertion.
    pub fn build<K: Hash + Eq, V>(self) -> ChainedHashMap<K, V, S> {
        ChainedHashMap {
            buckets: Vec::new(),
            len: 0,
            initial_capacity: self.capacity,
            max_load_factor: self.max_load_factor,
            build_hasher: self.hasher,
        }
    }
}

impl<K: Hash + Eq, V> ChainedHashMap<K, V> {
    /// Creates a new map with default capacity and default hasher.
    pub fn new() -> Self {
        ChainedHashMapBuilder::new().build()
    }

    /// Creates a new map with a specified initial capacity and default
    /// hasher.
    pub fn with_capacity(capacity: usize) -> Self {
        ChainedHashMapBuilder::new().with_capacity(capacity).build()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Returns the number of key-value pairs in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current bucket count. Zero until the first insertion.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of entries to buckets, or `0.0` while no buckets
    /// are allocated.
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.len as f64 / self.buckets.len() as f64
    }

    /// Drops every entry and releases the bucket array.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Returns an iterator over `(&K, &V)` pairs in bucket-index order then
    /// chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            node: None,
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainedHashMap<K, V, S> {
    /// Creates a new map with default capacity and the given hasher builder.
    pub fn with_hasher(build_hasher: S) -> Self {
        ChainedHashMapBuilder::new().with_hasher(build_hasher).build()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key already exists its value is replaced and the old value
    /// returned; the entry count does not change. A fresh key is appended
    /// at the end of its bucket's chain, doubling the bucket array first
    /// whenever the insertion would reach the load factor threshold.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.ensure_buckets();
        let index = self.bucket_index(&key);

        let mut link = &mut self.buckets[index];
        while let Some(node) = link {
            if node.key == key {
                return Some(mem::replace(&mut node.value, value));
            }
            link = &mut node.next;
        }

        // Fresh key: grow first so the load factor bound already holds the
        // moment the node is linked.
        let index = if self.would_exceed_load_factor() {
            self.grow();
            self.bucket_index(&key)
        } else {
            index
        };

        let mut link = &mut self.buckets[index];
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(Node::new(key, value)));
        self.len += 1;
        None
    }

    /// Returns a reference to the value for `key`, if present. Never
    /// mutates the map.
    pub fn get(&self, key: &K) -> Option<&V> {
        if self.buckets.is_empty() {
            return None;
        }
        let index = self.bucket_index(key);
        let mut node = self.buckets[index].as_deref();
        while let Some(n) = node {
            if n.key == *key {
                return Some(&n.value);
            }
            node = n.next.as_deref();
        }
        None
    }

    /// Returns a mutable reference to the value for `key`, if present.
    /// Never inserts.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if self.buckets.is_empty() {
            return None;
        }
        let index = self.bucket_index(key);
        let mut link = &mut self.buckets[index];
        while let Some(node) = link {
            if node.key == *key {
                return Some(&mut node.value);
            }
            link = &mut node.next;
        }
        None
    }

    /// Checked lookup: `Err(Error::KeyNotFound)` when the key has no entry.
    pub fn try_get(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value for `key`, or `default` when absent. Never
    /// mutates the map.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Returns a mutable reference to the value for `key`, inserting the
    /// value produced by `make` first when the key has no entry.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.ensure_buckets();

        if !self.contains(&key) {
            if self.would_exceed_load_factor() {
                self.grow();
            }
            let index = self.bucket_index(&key);
            let mut link = &mut self.buckets[index];
            while let Some(node) = link {
                link = &mut node.next;
            }
            *link = Some(Box::new(Node::new(key, make())));
            self.len += 1;
            return match link {
                Some(node) => &mut node.value,
                // the link was filled right above
                None => unreachable!(),
            };
        }

        let index = self.bucket_index(&key);
        let mut link = &mut self.buckets[index];
        while let Some(node) = link {
            if node.key == key {
                return &mut node.value;
            }
            link = &mut node.next;
        }
        // contains() above guarantees the key is chained at `index`
        unreachable!()
    }

    /// Removes the entry for `key` and returns its value, relinking the
    /// chain around the removed node.
    ///
    /// Returns `Err(Error::KeyNotFound)` when the key has no entry; the map
    /// is left untouched. Removal never shrinks the bucket array.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        if self.buckets.is_empty() {
            return Err(Error::KeyNotFound);
        }
        let index = self.bucket_index(key);
        let mut link = &mut self.buckets[index];
        while link.is_some() {
            if link.as_ref().unwrap().key == *key {
                let node = link.take().expect("matched chain link cannot be empty");
                *link = node.next;
                self.len -= 1;
                return Ok(node.value);
            }
            link = &mut link.as_mut().unwrap().next;
        }
        Err(Error::KeyNotFound)
    }

    /// Returns true if the map holds an entry for `key`. Scans the key's
    /// chain, O(chain length).
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a fresh vector of all keys, in iteration order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Returns a fresh vector of all values, in iteration order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Returns a fresh vector of all `(key, value)` pairs, in iteration
    /// order.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Calls `f` on every entry exactly once, in iteration order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }

    /// Returns a new map holding the entries `pred` accepts.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        K: Clone,
        V: Clone,
        S: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        let mut result = self.fresh_like();
        for (k, v) in self.iter() {
            if pred(k, v) {
                result.insert(k.clone(), v.clone());
            }
        }
        result
    }

    /// Folds every entry into an accumulator seeded with `seed`, visiting
    /// each entry exactly once.
    pub fn reduce<R, F>(&self, mut f: F, seed: R) -> R
    where
        F: FnMut(R, &K, &V) -> R,
    {
        let mut acc = seed;
        for (k, v) in self.iter() {
            acc = f(acc, k, v);
        }
        acc
    }

    /// Returns a new map produced by applying `f` to every entry. Entries
    /// mapping to the same new key collapse to the last one visited.
    pub fn map<NK, NV, F>(&self, mut f: F) -> ChainedHashMap<NK, NV, S>
    where
        NK: Hash + Eq,
        S: Clone,
        F: FnMut(&K, &V) -> (NK, NV),
    {
        let mut result = ChainedHashMap {
            buckets: Vec::new(),
            len: 0,
            initial_capacity: self.initial_capacity,
            max_load_factor: self.max_load_factor,
            build_hasher: self.build_hasher.clone(),
        };
        for (k, v) in self.iter() {
            let (nk, nv) = f(k, v);
            result.insert(nk, nv);
        }
        result
    }

    /// Empty map sharing this map's configuration.
    fn fresh_like(&self) -> Self
    where
        S: Clone,
    {
        Self {
            buckets: Vec::new(),
            len: 0,
            initial_capacity: self.initial_capacity,
            max_load_factor: self.max_load_factor,
            build_hasher: self.build_hasher.clone(),
        }
    }

    /// Internal function computing the bucket index for a given key.
    /// Callers must have allocated the bucket array.
    fn bucket_index(&self, key: &K) -> usize {
        let mut hasher = self.build_hasher.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.buckets.len()
    }

    /// True when linking one more entry would reach the load factor
    /// threshold.
    fn would_exceed_load_factor(&self) -> bool {
        (self.len + 1) as f64 / self.buckets.len() as f64 >= self.max_load_factor
    }

    fn ensure_buckets(&mut self) {
        if self.buckets.is_empty() {
            let capacity = self.initial_capacity.max(1);
            debug!("allocating initial bucket array of {} slots", capacity);
            self.buckets.resize_with(capacity, || None);
        }
    }

    /// Doubles the bucket array and re-links every entry through the hash
    /// relation at the new capacity.
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * GROWTH_FACTOR;
        debug!(
            "rehashing {} entries: {} -> {} buckets",
            self.len, old_capacity, new_capacity
        );

        let mut new_buckets = Vec::with_capacity(new_capacity);
        new_buckets.resize_with(new_capacity, || None);
        let old_buckets = mem::replace(&mut self.buckets, new_buckets);

        let mut relinked = 0usize;
        for mut head in old_buckets {
            while let Some(mut node) = head {
                head = node.next.take();
                let index = self.bucket_index(&node.key);
                node.next = self.buckets[index].take();
                self.buckets[index] = Some(node);
                relinked += 1;
            }
        }
        debug_assert_eq!(relinked, self.len, "rehash must relink every entry");
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> Default for ChainedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

/// Merge: entries of the left map overridden by colliding keys from the
/// right map, producing a new map.
impl<K, V, S> Add<&ChainedHashMap<K, V, S>> for &ChainedHashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    type Output = ChainedHashMap<K, V, S>;

    fn add(self, rhs: &ChainedHashMap<K, V, S>) -> Self::Output {
        let mut result = self.clone();
        for (k, v) in rhs.iter() {
            result.insert(k.clone(), v.clone());
        }
        result
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainedHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for ChainedHashMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

/// Borrowing iterator over a map's entries.
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Link<K, V>>,
    node: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                return Some((&node.key, &node.value));
            }
            self.node = self.buckets.next()?.as_deref();
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Draining iterator over a map's entries.
pub struct IntoIter<K, V> {
    buckets: std::vec::IntoIter<Link<K, V>>,
    node: Link<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(boxed) = self.node.take() {
                let node = *boxed;
                self.node = node.next;
                return Some((node.key, node.value));
            }
            self.node = self.buckets.next()?;
        }
    }
}

impl<K, V, S> IntoIterator for ChainedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            node: None,
        }
    }
}
