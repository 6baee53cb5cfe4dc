//! Run extraction.
//!
//! Splits a [`Sequence`] into its maximal runs of set bits ("chains"),
//! lowest run first.

use crate::core::Sequence;

/// One maximal run of set bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chain {
    /// `length` contiguous ones starting at `offset`.
    pub bitmask: Sequence,
    /// Index of the run's lowest bit.
    pub offset: u32,
    /// Number of bits in the run (at least 1).
    pub length: u32,
}

impl Chain {
    /// Chain covering bits `offset..offset + length`.
    #[inline]
    pub fn new(offset: u32, length: u32) -> Self {
        Self {
            bitmask: run_mask(offset, length),
            offset,
            length,
        }
    }
}

/// `length` ones shifted up by `offset`. `length` must be in `1..=32 - offset`.
#[inline]
pub fn run_mask(offset: u32, length: u32) -> Sequence {
    debug_assert!(length >= 1 && offset + length <= Sequence::BITS);
    (Sequence::MAX >> (Sequence::BITS - length)) << offset
}

/// Iterator over the chains of a sequence, low bit to high bit.
#[derive(Debug, Clone)]
pub struct Chains {
    remaining: Sequence,
}

impl Iterator for Chains {
    type Item = Chain;

    #[inline]
    fn next(&mut self) -> Option<Chain> {
        if self.remaining == 0 {
            return None;
        }

        let offset = self.remaining.trailing_zeros();
        // Ones above `offset` become trailing zeros of the complement.
        let length = (!(self.remaining >> offset)).trailing_zeros();
        let chain = Chain::new(offset, length);

        self.remaining &= !chain.bitmask;
        Some(chain)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let runs = (self.remaining & !(self.remaining << 1)).count_ones() as usize;
        (runs, Some(runs))
    }
}

impl ExactSizeIterator for Chains {}

/// Decompose `sequence` into its maximal runs.
///
/// ```
/// use binary_mesher::chains;
///
/// let found: Vec<_> = chains(0b0110_0110).map(|c| (c.offset, c.length)).collect();
/// assert_eq!(found, vec![(1, 2), (5, 2)]);
/// ```
#[inline]
pub fn chains(sequence: Sequence) -> Chains {
    Chains { remaining: sequence }
}
