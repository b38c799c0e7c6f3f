// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Filter sizing.
//!
//! A filter is fully described by its bit count `m`, its hash count `k` and
//! the number of elements `n` it is designed for. [`Params`] derives all
//! three from whichever quantities the caller knows.
use std::f64::consts::LN_2;

use log::debug;

use crate::error::{Error, Result};

/// Validated sizing of a Bloom filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    nbits: usize,
    nhashes: usize,
    expected: usize,
}

impl Params {
    /// Size a filter at `bits_per_element * expected` bits (rounded up), using
    /// `nhashes` hash functions.
    pub fn from_bits_per_element(
        bits_per_element: f64,
        expected: usize,
        nhashes: usize,
    ) -> Result<Self> {
        check_expected(expected)?;

        if !(bits_per_element.is_finite() && bits_per_element > 0.) {
            return Err(Error::invalid(
                "bits_per_element",
                format!("must be a positive number, got {bits_per_element}"),
            ));
        }
        let nbits = bits_for(bits_per_element, expected);
        if nbits >= usize::MAX as f64 {
            return Err(Error::invalid(
                "bits_per_element",
                format!("{bits_per_element} bits for {expected} elements overflows the filter size"),
            ));
        }
        Self::build(nbits as usize, nhashes, expected)
    }

    /// Size a filter at exactly `nbits` bits, with the hash count that
    /// minimizes the false positive rate for `expected` elements.
    ///
    /// This is [`Params::from_bits_per_element`] with `nbits / expected` bits
    /// per element, without the floating point round trip on the size.
    pub fn from_size(nbits: usize, expected: usize) -> Result<Self> {
        check_expected(expected)?;

        if nbits == 0 {
            return Err(Error::invalid("nbits", "must be greater than zero"));
        }
        Self::build(nbits, hashes_for_size(nbits, expected), expected)
    }

    /// Size a filter so that it has a false positive probability of at most
    /// `fp_rate` once `expected` elements were added.
    pub fn from_rate(fp_rate: f64, expected: usize) -> Result<Self> {
        if !(fp_rate > 0. && fp_rate < 1.) {
            return Err(Error::invalid(
                "fp_rate",
                format!("must lie strictly between 0 and 1, got {fp_rate}"),
            ));
        }
        let nhashes = hashes_for_rate(fp_rate);

        Self::from_bits_per_element(bits_per_element_for_hashes(nhashes), expected, nhashes)
    }

    fn build(nbits: usize, nhashes: usize, expected: usize) -> Result<Self> {
        if nhashes == 0 {
            return Err(Error::invalid("nhashes", "must be at least one"));
        }
        debug!("bloom filter sized at {nbits} bits, {nhashes} hashes, {expected} expected elements");

        Ok(Self {
            nbits,
            nhashes,
            expected,
        })
    }

    /// Number of bits, `m`.
    pub fn bits(&self) -> usize {
        self.nbits
    }

    /// Number of hash functions, `k`.
    pub fn hashes(&self) -> usize {
        self.nhashes
    }

    /// Number of elements the filter is designed for, `n`.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// False positive probability once `expected` elements were added.
    pub fn false_positive_probability(&self) -> f64 {
        false_positive_probability(self.nbits, self.nhashes, self.expected)
    }
}

fn check_expected(expected: usize) -> Result<()> {
    if expected == 0 {
        return Err(Error::invalid("expected", "must be greater than zero"));
    }
    Ok(())
}

/// Return the bit vector size, before conversion, for a number of bits per
/// element and an expected element count.
pub fn bits_for(bits_per_element: f64, expected: usize) -> f64 {
    (bits_per_element * expected as f64).ceil()
}

/// Return the number of hash functions minimizing the false positive rate for
/// a bit vector size and an expected element count: `round(m / n * ln 2)`,
/// never less than one.
pub fn hashes_for_size(nbits: usize, expected: usize) -> usize {
    let k = (nbits as f64 / expected as f64 * LN_2).round() as usize;
    k.max(1)
}

/// Return the number of hash functions needed for a false positive rate:
/// `ceil(-log2(p))`.
pub fn hashes_for_rate(fp_rate: f64) -> usize {
    (-fp_rate.log2()).ceil() as usize
}

/// Return the bits per element an optimally sized filter uses with `nhashes`
/// hash functions: `k / ln 2`.
pub fn bits_per_element_for_hashes(nhashes: usize) -> f64 {
    nhashes as f64 / LN_2
}

/// Return the false positive probability of a filter with `nbits` bits and
/// `nhashes` hashes holding `count` elements: `(1 - e^(-kn/m))^k`.
pub fn false_positive_probability(nbits: usize, nhashes: usize, count: usize) -> f64 {
    let k = nhashes as f64;
    let exponent = -k * count as f64 / nbits as f64;

    (1. - exponent.exp()).powf(k)
}
