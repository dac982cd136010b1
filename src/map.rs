pub mod chained;

pub use chained::*;
