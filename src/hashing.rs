pub mod fnv;

pub use fnv::*;
