//! Bit-indexing primitives: De Bruijn single-bit index and occupancy subset
//! enumeration.

use crate::bitboard::Bitboard;
use crate::error::BitIndexError;

/// 64-bit De Bruijn sequence: every 6-bit window of its 64 rotations is unique.
const DEBRUIJN64: u64 = 0x07ED_D5E5_9A4E_28C2;

/// Maps the top 6 bits of `single_bit * DEBRUIJN64` back to the bit's position.
const DEBRUIJN_TABLE: [u8; 64] = make_debruijn_table();

const fn make_debruijn_table() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        let key = (DEBRUIJN64.wrapping_mul(1u64 << i) >> 58) as usize;
        table[key] = i as u8;
        i += 1;
    }
    table
}

/// Return the 0-based position of the single set bit in `bb`.
///
/// Multiplies by a De Bruijn constant (wrapping at 2^64) and uses the top
/// 6 bits of the product to index a precomputed table — O(1), no loops.
///
/// # Errors
///
/// Returns [`BitIndexError`] if `bb` is empty or has more than one bit set.
#[inline]
pub fn bit_index(bb: Bitboard) -> Result<u8, BitIndexError> {
    let bits = bb.inner();
    let population = bits.count_ones();
    if population != 1 {
        return Err(BitIndexError { population });
    }
    Ok(DEBRUIJN_TABLE[(bits.wrapping_mul(DEBRUIJN64) >> 58) as usize])
}

/// Rook corner masks have the most relevant squares (12).
const MAX_MASK_BITS: usize = 12;

/// Iterator over every occupancy subset of a relevant-occupancy mask.
///
/// A mask with `k` set bits yields exactly `2^k` bitboards, each a distinct
/// subset of the mask's bits, in linear counter order: counter bit `i` maps
/// to the `i`-th lowest set bit of the mask.
pub struct OccupancySubsets {
    positions: [u8; MAX_MASK_BITS],
    bit_count: u32,
    next: u64,
}

impl OccupancySubsets {
    /// Enumerate the subsets of `mask`.
    ///
    /// # Panics
    ///
    /// Panics if `mask` has more than 12 set bits; relevant-occupancy masks
    /// never do.
    pub fn new(mask: Bitboard) -> OccupancySubsets {
        assert!(
            mask.count() as usize <= MAX_MASK_BITS,
            "mask has {} set bits, relevant-occupancy masks have at most {MAX_MASK_BITS}",
            mask.count()
        );
        let mut positions = [0u8; MAX_MASK_BITS];
        let mut remaining = mask.inner();
        let mut count = 0usize;
        while remaining != 0 {
            let lowest = remaining & remaining.wrapping_neg();
            positions[count] =
                bit_index(Bitboard::new(lowest)).expect("isolated lowest bit is a single bit");
            remaining ^= lowest;
            count += 1;
        }
        OccupancySubsets {
            positions,
            bit_count: count as u32,
            next: 0,
        }
    }
}

impl Iterator for OccupancySubsets {
    type Item = Bitboard;

    fn next(&mut self) -> Option<Bitboard> {
        if self.next >= 1u64 << self.bit_count {
            return None;
        }
        let linear = self.next;
        self.next += 1;

        let mut bits = 0u64;
        for i in 0..self.bit_count {
            if linear & (1u64 << i) != 0 {
                bits |= 1u64 << self.positions[i as usize];
            }
        }
        Some(Bitboard::new(bits))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = ((1u64 << self.bit_count) - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OccupancySubsets {}
