// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Errors returned by filter construction and set operations.
use thiserror::Error;

/// A `Result` alias whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// An error returned when building or combining filters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A sizing parameter was out of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// Two filters with different configurations were combined.
    #[error(
        "incompatible filters: {bits} bits with {hashes} hashes \
         and {other_bits} bits with {other_hashes} hashes"
    )]
    Incompatible {
        /// Bit count of the receiving filter.
        bits: usize,
        /// Hash count of the receiving filter.
        hashes: usize,
        /// Bit count of the other filter.
        other_bits: usize,
        /// Hash count of the other filter.
        other_hashes: usize,
    },
    /// Two filters of the same size whose hash functions are keyed differently
    /// were combined.
    #[error("incompatible filters: same size, but differently keyed hash functions")]
    IncompatibleHasher,
    /// Existing filter data has a bit set beyond the filter size.
    #[error("existing bit data sets index {index}, but the filter only has {nbits} bits")]
    BitsOutOfRange {
        /// Index of the first offending bit.
        index: usize,
        /// Size of the filter being restored.
        nbits: usize,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
