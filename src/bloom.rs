// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! A Bloom filter using double hashing over pluggable bit storage.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use log::{debug, trace};

use crate::bitvec::{BitStorage, BitVec};
use crate::error::{Error, Result};
use crate::hash::{HashPair, SipHashPair};
use crate::params::{self, Params};

/// The default false positive probability value, 1%.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// A Bloom filter that keeps track of items of type `K`.
///
/// Bits live in a `B` ([`BitVec`] by default) and bit positions are derived
/// from the two hashes an `H` ([`SipHashPair`] by default) computes per item.
#[derive(Clone, Debug)]
pub struct BloomFilter<K, B = BitVec, H = SipHashPair> {
    bits: B,
    nhashes: usize,
    expected: usize,
    count: usize,
    hasher: H,
    key: PhantomData<K>,
}

impl<K: Hash> BloomFilter<K> {
    /// Return a new Bloom filter with a given approximate item capacity.
    /// The false positive probability is [`DEFAULT_FALSE_POSITIVE_RATE`].
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_rate(DEFAULT_FALSE_POSITIVE_RATE, capacity)
    }

    /// Return a new Bloom filter of `ceil(bits_per_element * expected)` bits using
    /// `nhashes` hash functions.
    pub fn with_bits_per_element(
        bits_per_element: f64,
        expected: usize,
        nhashes: usize,
    ) -> Result<Self> {
        let params = Params::from_bits_per_element(bits_per_element, expected, nhashes)?;

        Ok(Self::with_params(params, SipHashPair::default()))
    }

    /// Return a new Bloom filter of `nbits` bits. The number of hash functions is
    /// chosen to minimize false positives at `expected` items.
    pub fn with_size(nbits: usize, expected: usize) -> Result<Self> {
        let params = Params::from_size(nbits, expected)?;

        Ok(Self::with_params(params, SipHashPair::default()))
    }

    /// Return a new Bloom filter with a given approximate item capacity
    /// and a desired false positive rate.
    pub fn with_rate(fp_rate: f64, expected: usize) -> Result<Self> {
        let params = Params::from_rate(fp_rate, expected)?;

        Ok(Self::with_params(params, SipHashPair::default()))
    }

    /// Rebuild a filter from previously exported bits.
    ///
    /// The filter is sized as by [`BloomFilter::with_size`], then every bit set
    /// in `existing` is set in the new filter, and the added item count is
    /// restored to `count`. `existing` may be shorter or longer than `nbits`, as
    /// long as it has no bit set at or beyond `nbits`.
    pub fn from_existing(
        nbits: usize,
        expected: usize,
        count: usize,
        existing: &BitVec,
    ) -> Result<Self> {
        let params = Params::from_size(nbits, expected)?;

        Self::from_existing_with(params, SipHashPair::default(), count, existing)
    }
}

impl<K, B: BitStorage, H: HashPair> BloomFilter<K, B, H> {
    /// Return an empty filter sized by `params`, hashing with `hasher`.
    pub fn with_params(params: Params, hasher: H) -> Self {
        Self {
            bits: B::zeroed(params.bits()),
            nhashes: params.hashes(),
            expected: params.expected(),
            count: 0,
            hasher,
            key: PhantomData,
        }
    }

    /// Rebuild a filter sized by `params` and hashing with `hasher` from
    /// previously exported bits. See [`BloomFilter::from_existing`].
    pub fn from_existing_with(
        params: Params,
        hasher: H,
        count: usize,
        existing: &BitVec,
    ) -> Result<Self> {
        let mut filter = Self::with_params(params, hasher);
        let nbits = filter.bits.len();

        for index in existing.ones() {
            if index >= nbits {
                return Err(Error::BitsOutOfRange { index, nbits });
            }
            filter.bits.set(index, true);
        }
        filter.count = count;

        debug!(
            "restored bloom filter with {} of {} bits set and {} items",
            filter.bits.count_ones(),
            nbits,
            count
        );
        Ok(filter)
    }

    /// Set all bits to zero and reset the added item count.
    pub fn clear(&mut self) {
        self.bits.clear();
        self.count = 0;
    }

    /// Return the number of bits in this filter.
    pub fn bits(&self) -> usize {
        self.bits.len()
    }

    /// Number of hashes used (`k` parameter).
    pub fn hashes(&self) -> usize {
        self.nhashes
    }

    /// Number of items the filter was sized for.
    pub fn expected_count(&self) -> usize {
        self.expected
    }

    /// Number of insertions since the filter was created or last cleared.
    /// Repeated insertions of an item are counted each time.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Count the approximate number of distinct items in the filter, from the
    /// fraction of bits set. Saturates to `usize::MAX` once every bit is set.
    pub fn estimate_count(&self) -> usize {
        let nbits = self.bits.len() as f64;
        let nbits_set = self.bits.count_ones() as f64;
        let nhashes = self.nhashes as f64;
        let count = -(nbits / nhashes) * (1. - (nbits_set / nbits)).ln();

        count.round() as usize
    }

    /// Read a single bit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`BloomFilter::bits`].
    pub fn get_bit(&self, index: usize) -> bool {
        self.bits.get(index)
    }

    /// Write a single bit. Unsetting bits can introduce false negatives.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`BloomFilter::bits`].
    pub fn set_bit(&mut self, index: usize, value: bool) {
        self.bits.set(index, value);
    }

    /// Return the underlying bit storage.
    pub fn storage(&self) -> &B {
        &self.bits
    }

    /// Snapshot the filter bits, eg. for persisting them.
    pub fn export(&self) -> BitVec {
        self.bits.export()
    }

    /// Probability of a false positive given the current item count:
    /// `(1 - e^(-kn/m))^k`.
    pub fn estimated_false_positive_probability(&self) -> f64 {
        self.false_positive_probability_for(self.count)
    }

    /// Probability of a false positive once the expected number of items was added.
    pub fn expected_false_positive_probability(&self) -> f64 {
        self.false_positive_probability_for(self.expected)
    }

    /// Probability of a false positive with `count` items in the filter.
    pub fn false_positive_probability_for(&self, count: usize) -> f64 {
        params::false_positive_probability(self.bits.len(), self.nhashes, count)
    }

    /// Bits per item the filter was sized with.
    pub fn expected_bits_per_element(&self) -> f64 {
        self.bits.len() as f64 / self.expected as f64
    }

    /// Bits per item actually added. Infinite on an empty filter.
    pub fn bits_per_element(&self) -> f64 {
        self.bits.len() as f64 / self.count as f64
    }

    /// Check whether two filters can be merged, unioned and intersected.
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.nhashes == other.nhashes
            && self.bits.len() == other.bits.len()
            && self.hasher == other.hasher
    }

    /// Add all items of `other` to this filter: afterwards, every item contained
    /// in either filter is contained in this one.
    ///
    /// Fails, leaving both filters untouched, if they aren't compatible.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        self.check_compatible(other)?;
        self.bits.union_with(&other.bits);
        self.count = self.count.saturating_add(other.count);

        trace!("merged bloom filter, {} items", self.count);

        Ok(())
    }

    /// Compute the union of two Bloom filters.
    pub fn union(&self, other: &Self) -> Result<Self>
    where
        B: Clone,
    {
        self.check_compatible(other)?;

        let mut bits = self.bits.clone();
        bits.union_with(&other.bits);

        Ok(self.derive(bits, self.count.saturating_add(other.count)))
    }

    /// Compute the intersection of two Bloom filters. The item count of the
    /// result is the smaller of the two counts.
    pub fn intersection(&self, other: &Self) -> Result<Self>
    where
        B: Clone,
    {
        self.check_compatible(other)?;

        let mut bits = self.bits.clone();
        bits.intersect_with(&other.bits);

        Ok(self.derive(bits, self.count.min(other.count)))
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.nhashes != other.nhashes || self.bits.len() != other.bits.len() {
            return Err(Error::Incompatible {
                bits: self.bits.len(),
                hashes: self.nhashes,
                other_bits: other.bits.len(),
                other_hashes: other.nhashes,
            });
        }
        if self.hasher != other.hasher {
            return Err(Error::IncompatibleHasher);
        }
        Ok(())
    }

    fn derive(&self, bits: B, count: usize) -> Self {
        Self {
            bits,
            nhashes: self.nhashes,
            expected: self.expected,
            count,
            hasher: self.hasher.clone(),
            key: PhantomData,
        }
    }

    fn bloom_hash(&self, h1: u64, h2: u64, i: u64) -> usize {
        let r = h1.wrapping_add(i.wrapping_mul(h2));
        (r % self.bits.len() as u64) as usize
    }
}

impl<K: Hash, B: BitStorage, H: HashPair> BloomFilter<K, B, H> {
    /// Set an item in the Bloom filter. With regards to the filter bits, this
    /// operation is idempotent for each unique item.
    pub fn add(&mut self, item: &K) {
        let (h1, h2) = self.hasher.hash_pair(item);

        for i in 0..self.nhashes {
            let index = self.bloom_hash(h1, h2, i as u64);
            self.bits.set(index, true);
        }
        self.count += 1;
    }

    /// Add every item of an iterator.
    pub fn add_all<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        for item in items {
            self.add(item);
        }
    }

    /// Return whether or not a given item is likely in the Bloom filter or not. There is a
    /// possibility for a false positive, but a false negative will never occur.
    pub fn contains(&self, item: &K) -> bool {
        let (h1, h2) = self.hasher.hash_pair(item);

        for i in 0..self.nhashes {
            let index = self.bloom_hash(h1, h2, i as u64);
            if !self.bits.get(index) {
                return false;
            }
        }
        true
    }

    /// Return whether every item of an iterator is likely in the filter.
    pub fn contains_all<'a, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        items.into_iter().all(|item| self.contains(item))
    }

    /// Return the bit positions an item maps to, one per hash function.
    ///
    /// The `i`-th position is `(h1 + i * h2) mod m`, where `h1` and `h2` are the
    /// item's two hash values and `m` the number of bits.
    pub fn indices(&self, item: &K) -> Vec<usize> {
        let (h1, h2) = self.hasher.hash_pair(item);

        (0..self.nhashes)
            .map(|i| self.bloom_hash(h1, h2, i as u64))
            .collect()
    }
}

impl<K, H> BloomFilter<K, BitVec, H> {
    /// Return the underlying bytes storage.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

impl<K, H> AsRef<[u8]> for BloomFilter<K, BitVec, H> {
    fn as_ref(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

impl<K, B: BitStorage + PartialEq, H> PartialEq for BloomFilter<K, B, H> {
    fn eq(&self, other: &Self) -> bool {
        self.expected == other.expected
            && self.nhashes == other.nhashes
            && self.bits.len() == other.bits.len()
            && self.bits == other.bits
    }
}

impl<K, B: BitStorage + Eq, H> Eq for BloomFilter<K, B, H> {}

impl<K, B: BitStorage + Hash, H> Hash for BloomFilter<K, B, H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.expected.hash(state);
        self.nhashes.hash(state);
        self.bits.len().hash(state);
        self.bits.hash(state);
    }
}

impl<K, H> From<BloomFilter<K, BitVec, H>> for BitVec {
    fn from(other: BloomFilter<K, BitVec, H>) -> BitVec {
        other.bits
    }
}
