// Copyright (c) 2020 Helge Wrede, Alexander Schultheiß, Lukas Simon
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Bit storage backends.
//!
//! A [`BloomFilter`](crate::BloomFilter) only ever talks to its bits through
//! the [`BitStorage`] trait, so the representation can be swapped without
//! touching the filter. [`BitVec`] is the packed, byte-backed default.
use std::fmt::Debug;

/// Addressable, fixed-length storage of bits.
///
/// All indices must be in `0..len()`. Implementations must panic on an
/// out-of-range index instead of wrapping or truncating it.
pub trait BitStorage {
    /// Create storage of `nbits` bits, all unset.
    fn zeroed(nbits: usize) -> Self
    where
        Self: Sized;

    /// Length in bits.
    fn len(&self) -> usize;

    /// Check whether the storage has a length of zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the bit at `index`.
    fn get(&self, index: usize) -> bool;

    /// Write the bit at `index`.
    fn set(&mut self, index: usize, value: bool);

    /// Set all bits to zero.
    fn clear(&mut self);

    /// Count the number of `1` bits.
    fn count_ones(&self) -> usize {
        (0..self.len()).filter(|&i| self.get(i)).count()
    }

    /// Bitwise `OR` another storage of the same length into this one.
    fn union_with(&mut self, other: &Self)
    where
        Self: Sized,
    {
        assert_same_len(self.len(), other.len());

        for i in 0..other.len() {
            if other.get(i) {
                self.set(i, true);
            }
        }
    }

    /// Bitwise `AND` another storage of the same length into this one.
    fn intersect_with(&mut self, other: &Self)
    where
        Self: Sized,
    {
        assert_same_len(self.len(), other.len());

        for i in 0..self.len() {
            if self.get(i) && !other.get(i) {
                self.set(i, false);
            }
        }
    }

    /// Snapshot the bits into a [`BitVec`].
    fn export(&self) -> BitVec {
        let mut bits = BitVec::new(self.len());
        for i in (0..self.len()).filter(|&i| self.get(i)) {
            bits.set(i, true);
        }
        bits
    }
}

fn assert_same_len(a: usize, b: usize) {
    if a != b {
        panic!("unable to combine bit storages with different lengths: {a} and {b}");
    }
}

/// A packed bit vector.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    bytes: Vec<u8>,
    nbits: usize,
}

impl BitVec {
    /// Create a new bit vector of the given capacity, in bits.
    pub fn new(capacity: usize) -> Self {
        Self {
            nbits: capacity,
            bytes: vec![0; capacity.div_ceil(8)],
        }
    }

    /// Count the number of `0` bits.
    pub fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Iterate over the indices of all `1` bits, in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bytes
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte != 0)
            .flat_map(|(i, &byte)| {
                (0..8)
                    .filter(move |bit| byte & (1u8 << bit) != 0)
                    .map(move |bit| i * 8 + bit)
            })
    }

    /// Return the underlying bytes storage.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn locate(&self, index: usize) -> (usize, u8) {
        if index >= self.nbits {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.nbits, index,
            )
        }
        (index / 8, 0x01 << (index % 8))
    }
}

impl BitStorage for BitVec {
    fn zeroed(nbits: usize) -> Self {
        Self::new(nbits)
    }

    fn len(&self) -> usize {
        self.nbits
    }

    fn get(&self, index: usize) -> bool {
        let (byte, mask) = self.locate(index);

        self.bytes[byte] & mask == mask
    }

    fn set(&mut self, index: usize, value: bool) {
        let (byte, mask) = self.locate(index);

        if value {
            self.bytes[byte] |= mask;
        } else {
            self.bytes[byte] &= !mask;
        }
    }

    fn clear(&mut self) {
        self.bytes.iter_mut().for_each(|b| *b = 0);
    }

    fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn union_with(&mut self, other: &Self) {
        assert_same_len(self.nbits, other.nbits);

        for (a, b) in self.bytes.iter_mut().zip(&other.bytes) {
            *a |= b;
        }
    }

    fn intersect_with(&mut self, other: &Self) {
        assert_same_len(self.nbits, other.nbits);

        for (a, b) in self.bytes.iter_mut().zip(&other.bytes) {
            *a &= b;
        }
    }

    fn export(&self) -> BitVec {
        self.clone()
    }
}

impl From<Vec<u8>> for BitVec {
    fn from(bytes: Vec<u8>) -> Self {
        let nbits = bytes.len() * 8;

        Self { bytes, nbits }
    }
}

impl From<BitVec> for Vec<u8> {
    fn from(other: BitVec) -> Vec<u8> {
        other.bytes
    }
}

impl Debug for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = (0..self.nbits)
            .map(|i| if self.get(i) { '1' } else { '0' })
            .collect();
        write!(f, "BitVec({})", bits)
    }
}
