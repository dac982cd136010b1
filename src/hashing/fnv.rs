//! # FNV-1a Hashing
//!
//! A 64-bit FNV-1a (Fowler–Noll–Vo) hasher implementing the standard
//! `std::hash::Hasher` trait, with a matching `BuildHasher` so it can be
//! plugged into [`ChainedHashMap`](crate::map::chained::ChainedHashMap) or
//! any other hash-based structure.
//!
//! FNV is fast and simple but **not** cryptographically secure. Unlike the
//! default `RandomState`, `FnvBuildHasher` is deterministic: the same key
//! always lands in the same bucket across runs, which makes it the hasher of
//! choice for reproducible layouts in tests and tooling.

use std::hash::{BuildHasher, Hasher};

const FNV64_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV64_PRIME: u64 = 0x100000001b3;

/// A 64-bit FNV-1a hasher.
#[derive(Debug, Clone)]
pub struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    /// Creates a hasher initialized with the FNV-1a offset basis.
    pub fn new() -> Self {
        Self {
            state: FNV64_OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            // FNV-1a: xor the byte in, then multiply by the prime
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(FNV64_PRIME);
        }
    }
}

/// A `BuildHasher` producing [`FnvHasher`] instances, usable wherever a
/// hasher builder is accepted (e.g. `ChainedHashMapBuilder::with_hasher`).
#[derive(Debug, Clone, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> Self::Hasher {
        FnvHasher::new()
    }
}

/// Returns the 64-bit FNV-1a hash of `data`.
pub fn fnv1a(data: &[u8]) -> u64 {
    let mut hasher = FnvHasher::new();
    hasher.write(data);
    hasher.finish()
}
