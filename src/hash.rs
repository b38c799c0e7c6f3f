// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Sources of the two hash values a filter derives its bit positions from.
use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

/// Seeds used for SipHash.
const HASHER_SEEDS: [[u8; 16]; 2] = [
    [
        136, 168, 28, 251, 141, 239, 69, 38, 166, 209, 98, 201, 2, 169, 146, 170,
    ],
    [
        103, 236, 177, 212, 54, 11, 66, 5, 194, 86, 6, 254, 82, 93, 203, 37,
    ],
];

/// Produces two independent 64-bit hashes per item.
///
/// Both values must be stable (the same item always yields the same pair for a
/// given hasher), uniformly distributed over `u64`, and independent of each
/// other. Two filters are only [compatible] when their hashers compare equal.
///
/// [compatible]: crate::BloomFilter::is_compatible
pub trait HashPair: Clone + PartialEq {
    /// Hash `item` into two values.
    fn hash_pair<T: Hash + ?Sized>(&self, item: &T) -> (u64, u64);
}

/// Two SipHash-1-3 instances keyed with different seeds.
#[derive(Clone, Copy, Debug)]
pub struct SipHashPair {
    hashers: [SipHasher13; 2],
}

impl SipHashPair {
    /// Create a hash pair from two 128-bit keys.
    pub fn with_keys(k1: &[u8; 16], k2: &[u8; 16]) -> Self {
        Self {
            hashers: [SipHasher13::new_with_key(k1), SipHasher13::new_with_key(k2)],
        }
    }
}

impl Default for SipHashPair {
    fn default() -> Self {
        Self::with_keys(&HASHER_SEEDS[0], &HASHER_SEEDS[1])
    }
}

impl PartialEq for SipHashPair {
    fn eq(&self, other: &Self) -> bool {
        self.hashers[0].keys() == other.hashers[0].keys()
            && self.hashers[1].keys() == other.hashers[1].keys()
    }
}

impl Eq for SipHashPair {}

impl HashPair for SipHashPair {
    fn hash_pair<T: Hash + ?Sized>(&self, item: &T) -> (u64, u64) {
        let mut sip1 = self.hashers[0];
        let mut sip2 = self.hashers[1];

        item.hash(&mut sip1);
        item.hash(&mut sip2);

        (sip1.finish(), sip2.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable() {
        let a = SipHashPair::default();
        let b = SipHashPair::default();

        assert_eq!(a.hash_pair("foo"), a.hash_pair("foo"));
        assert_eq!(a.hash_pair(&42u64), b.hash_pair(&42u64));
        assert_eq!(a, b);
    }

    #[test]
    fn test_halves_differ() {
        let pair = SipHashPair::default();

        for item in ["foo", "bar", "baz", ""] {
            let (h1, h2) = pair.hash_pair(item);
            assert_ne!(h1, h2, "halves of {:?} should be independent", item);
        }
        assert_ne!(pair.hash_pair("foo"), pair.hash_pair("bar"));
    }

    #[test]
    fn test_keys() {
        let default = SipHashPair::default();
        let other = SipHashPair::with_keys(&[1; 16], &[2; 16]);

        assert_ne!(default, other);
        assert_ne!(default.hash_pair("foo"), other.hash_pair("foo"));
    }
}
