//! A Bloom filter, a space-efficient probabilistic data structure, with
//! pluggable bit storage.
//!
//! # Bloom Filters
//!
//! A Bloom filter is a space-efficient probabilistic data structure that is
//! used to test whether an element is a member of a set. It allows for queries
//! to return: "possibly in set" or "definitely not in set". Elements can be
//! added to the set, but not removed; the more elements that are added to the
//! set, the larger the probability of false positives.
//!
//! A filter can be sized in three ways, see [`Params`]:
//!
//! * from a number of bits per element, an expected element count and a hash count;
//! * from a total size in bits and an expected element count;
//! * from a target false positive probability and an expected element count.
//!
//! A filter can also be rebuilt from previously exported bits, with
//! [`BloomFilter::from_existing`].
//!
//! # Double Hashing
//!
//! Every element is hashed only twice, by a [`HashPair`]. The `k` bit positions
//! are then derived from those two values:
//!
//! g<sub>i</sub>(x) = (H<sub>1</sub>(x) + iH<sub>2</sub>(x)) mod m
//!
//! Adam Kirsch and Michael Mitzenmacher showed in *Less Hashing, Same Performance:
//! Building a Better Bloom Filter* that this does not increase the asymptotic
//! false positive probability. The default [`SipHashPair`] uses two differently
//! keyed SipHash instances.
//!
//! # Bit Storage
//!
//! Filters access their bits through the [`BitStorage`] trait. The default
//! backend is the packed [`BitVec`].
//!
//! # Example
//!
//! ```
//! use bloomset::BloomFilter;
//!
//! # fn main() -> Result<(), bloomset::Error> {
//! let mut filter = BloomFilter::with_rate(0.01, 32)?;
//!
//! filter.add(&"foo");
//! filter.add(&"bar");
//!
//! filter.contains(&"foo"); // true
//! filter.contains(&"bar"); // true
//! filter.contains(&"baz"); // false
//!
//! filter.count(); // 2
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]
#![allow(clippy::bool_assert_comparison)]

pub mod bitvec;
pub mod bloom;
pub mod error;
pub mod hash;
pub mod params;

pub use bitvec::{BitStorage, BitVec};
pub use bloom::{BloomFilter, DEFAULT_FALSE_POSITIVE_RATE};
pub use error::{Error, Result};
pub use hash::{HashPair, SipHashPair};
pub use params::Params;
