use thiserror::Error;

/// Errors produced by the containers in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A checked lookup or removal found no entry for the requested key.
    #[error("no entry found for key")]
    KeyNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
