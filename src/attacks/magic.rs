//! Magic bitboard tables for sliding piece attack generation.

use std::sync::OnceLock;

use crate::bitboard::Bitboard;
use crate::bits::OccupancySubsets;

use super::magic_data::{BISHOP_RAW, ROOK_RAW};

/// A single entry in the magic lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MagicEntry {
    pub(crate) magic: u64,
    pub(crate) mask: Bitboard,
    pub(crate) shift: u8,
    pub(crate) offset: u32,
}

// ---------------------------------------------------------------------------
// Ray tracers (ground truth, used only for table population and validation)
// ---------------------------------------------------------------------------

const FILE_A: u64 = 0x0101_0101_0101_0101;
const FILE_H: u64 = 0x8080_8080_8080_8080;
const RANK_1: u64 = 0x0000_0000_0000_00FF;
const RANK_8: u64 = 0xFF00_0000_0000_0000;

/// Trace rook attacks from square `sq` under `occupied`, stepping one square
/// at a time along each rank/file ray.
///
/// Each ray stops at the board edge or at the first occupied square, which is
/// included. Horizontal steps are guarded by the file-edge masks so a ray can
/// never wrap from file h to file a of the next rank. Occupancy of the origin
/// square itself is ignored.
pub(crate) const fn rook_ray_attacks(sq: usize, occupied: u64) -> u64 {
    let origin = 1u64 << sq;
    let mut attacks = 0u64;

    // North (+8)
    let mut bit = origin;
    while bit & RANK_8 == 0 {
        bit <<= 8;
        attacks |= bit;
        if occupied & bit != 0 {
            break;
        }
    }
    // South (-8)
    bit = origin;
    while bit & RANK_1 == 0 {
        bit >>= 8;
        attacks |= bit;
        if occupied & bit != 0 {
            break;
        }
    }
    // East (+1)
    bit = origin;
    while bit & FILE_H == 0 {
        bit <<= 1;
        attacks |= bit;
        if occupied & bit != 0 {
            break;
        }
    }
    // West (-1)
    bit = origin;
    while bit & FILE_A == 0 {
        bit >>= 1;
        attacks |= bit;
        if occupied & bit != 0 {
            break;
        }
    }

    attacks
}

/// Trace bishop attacks from square `sq` under `occupied`, stepping one
/// square at a time along each diagonal.
///
/// The combined rank+file steps (±9, ±7) are guarded by edge masks checked
/// before each step, so a diagonal can never wrap across a board edge.
pub(crate) const fn bishop_ray_attacks(sq: usize, occupied: u64) -> u64 {
    let origin = 1u64 << sq;
    let mut attacks = 0u64;

    // North-east (+9)
    let mut bit = origin;
    while bit & (FILE_H | RANK_8) == 0 {
        bit <<= 9;
        attacks |= bit;
        if occupied & bit != 0 {
            break;
        }
    }
    // North-west (+7)
    bit = origin;
    while bit & (FILE_A | RANK_8) == 0 {
        bit <<= 7;
        attacks |= bit;
        if occupied & bit != 0 {
            break;
        }
    }
    // South-east (-7)
    bit = origin;
    while bit & (FILE_H | RANK_1) == 0 {
        bit >>= 7;
        attacks |= bit;
        if occupied & bit != 0 {
            break;
        }
    }
    // South-west (-9)
    bit = origin;
    while bit & (FILE_A | RANK_1) == 0 {
        bit >>= 9;
        attacks |= bit;
        if occupied & bit != 0 {
            break;
        }
    }

    attacks
}

// ---------------------------------------------------------------------------
// Magic index computation
// ---------------------------------------------------------------------------

#[inline(always)]
fn magic_index(entry: &MagicEntry, occupied: Bitboard) -> usize {
    let relevant = (occupied & entry.mask).inner();
    let hash = relevant.wrapping_mul(entry.magic);
    (hash >> entry.shift) as usize
}

// ---------------------------------------------------------------------------
// Lazy-initialized sliding attack tables
// ---------------------------------------------------------------------------

struct SlidingTables {
    rook_entries: [MagicEntry; 64],
    bishop_entries: [MagicEntry; 64],
    rook_attacks: Vec<Bitboard>,
    bishop_attacks: Vec<Bitboard>,
}

static SLIDING_TABLES: OnceLock<SlidingTables> = OnceLock::new();

fn build_entries_and_size(raw: &[super::magic_data::RawMagic; 64]) -> ([MagicEntry; 64], usize) {
    let dummy = MagicEntry { magic: 0, mask: Bitboard::EMPTY, shift: 0, offset: 0 };
    let mut entries = [dummy; 64];
    let mut offset: u32 = 0;
    let mut sq = 0usize;
    while sq < 64 {
        entries[sq] = MagicEntry {
            magic: raw[sq].magic,
            mask: Bitboard::new(raw[sq].mask),
            shift: raw[sq].shift,
            offset,
        };
        let table_size = 1u32 << (64 - raw[sq].shift);
        offset = offset.checked_add(table_size).expect("offset overflow building magic tables");
        sq += 1;
    }
    (entries, offset as usize)
}

fn populate_attacks(
    entries: &[MagicEntry; 64],
    table: &mut [Bitboard],
    ray_attacks: fn(usize, u64) -> u64,
) {
    for (sq, entry) in entries.iter().enumerate() {
        for subset in OccupancySubsets::new(entry.mask) {
            let attacks = Bitboard::new(ray_attacks(sq, subset.inner()));
            let idx = entry.offset as usize + magic_index(entry, subset);
            table[idx] = attacks;
        }
    }
}

/// Force eager construction of both attack tables.
///
/// Queries build the tables lazily on first use; callers that cannot afford
/// the one-time construction cost on the hot path call this during startup.
pub(crate) fn force_init() {
    let _ = tables();
}

fn tables() -> &'static SlidingTables {
    SLIDING_TABLES.get_or_init(|| {
        let (rook_entries, rook_size) = build_entries_and_size(&ROOK_RAW);
        let (bishop_entries, bishop_size) = build_entries_and_size(&BISHOP_RAW);

        let mut rook_attacks = vec![Bitboard::EMPTY; rook_size];
        let mut bishop_attacks = vec![Bitboard::EMPTY; bishop_size];

        populate_attacks(&rook_entries, &mut rook_attacks, rook_ray_attacks);
        populate_attacks(&bishop_entries, &mut bishop_attacks, bishop_ray_attacks);

        tracing::debug!(
            rook_slots = rook_size,
            bishop_slots = bishop_size,
            "built sliding attack tables"
        );

        SlidingTables {
            rook_entries,
            bishop_entries,
            rook_attacks,
            bishop_attacks,
        }
    })
}

// ---------------------------------------------------------------------------
// Lookup functions
// ---------------------------------------------------------------------------

/// Look up rook attacks from square `sq` given `occupied` squares.
#[inline]
pub(crate) fn rook_attacks_lookup(sq: usize, occupied: Bitboard) -> Bitboard {
    let t = tables();
    let entry = &t.rook_entries[sq];
    let idx = entry.offset as usize + magic_index(entry, occupied);
    t.rook_attacks[idx]
}

/// Look up bishop attacks from square `sq` given `occupied` squares.
#[inline]
pub(crate) fn bishop_attacks_lookup(sq: usize, occupied: Bitboard) -> Bitboard {
    let t = tables();
    let entry = &t.bishop_entries[sq];
    let idx = entry.offset as usize + magic_index(entry, occupied);
    t.bishop_attacks[idx]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{
        bishop_ray_attacks, build_entries_and_size, magic_index, rook_ray_attacks,
    };
    use super::super::magic_data::{BISHOP_RAW, ROOK_RAW};
    use crate::bits::OccupancySubsets;

    /// Geometric rook trace over (rank, file) coordinates — the independent
    /// implementation the bit-stepped tracer must agree with.
    fn rook_geometric(sq: usize, occupied: u64) -> u64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut attacks = 0u64;
        for (dr, df) in [(1i8, 0i8), (-1, 0), (0, 1), (0, -1)] {
            let mut r = rank + dr;
            let mut f = file + df;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                let bit = 1u64 << (r as usize * 8 + f as usize);
                attacks |= bit;
                if occupied & bit != 0 {
                    break;
                }
                r += dr;
                f += df;
            }
        }
        attacks
    }

    fn bishop_geometric(sq: usize, occupied: u64) -> u64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut attacks = 0u64;
        for (dr, df) in [(1i8, 1i8), (1, -1), (-1, 1), (-1, -1)] {
            let mut r = rank + dr;
            let mut f = file + df;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                let bit = 1u64 << (r as usize * 8 + f as usize);
                attacks |= bit;
                if occupied & bit != 0 {
                    break;
                }
                r += dr;
                f += df;
            }
        }
        attacks
    }

    #[test]
    fn tracers_match_geometric_implementation() {
        let mut rng: u64 = 0x9E3779B97F4A7C15;
        for sq in 0..64usize {
            for _ in 0..256 {
                rng = rng
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                assert_eq!(
                    rook_ray_attacks(sq, rng),
                    rook_geometric(sq, rng),
                    "rook tracer mismatch on sq {sq} with occ {rng:016x}"
                );
                assert_eq!(
                    bishop_ray_attacks(sq, rng),
                    bishop_geometric(sq, rng),
                    "bishop tracer mismatch on sq {sq} with occ {rng:016x}"
                );
            }
        }
    }

    #[test]
    fn tracer_ignores_origin_square_occupancy() {
        for sq in 0..64usize {
            let origin = 1u64 << sq;
            assert_eq!(rook_ray_attacks(sq, 0), rook_ray_attacks(sq, origin));
            assert_eq!(bishop_ray_attacks(sq, 0), bishop_ray_attacks(sq, origin));
        }
    }

    #[test]
    fn rook_trace_stops_at_and_includes_blocker() {
        // Rook on a1, blocker on a2: the file ray is exactly {a2}.
        let attacks = rook_ray_attacks(0, 1u64 << 8);
        assert_eq!(attacks & 0x0101_0101_0101_0100, 1u64 << 8);
        // The rank ray is unaffected: b1..h1.
        assert_eq!(attacks & 0xFF, 0xFE);
    }

    #[test]
    fn rook_trace_never_wraps_rank() {
        // Rook on h2 with an empty board must not reach a3 (square 16).
        let attacks = rook_ray_attacks(15, 0);
        assert_eq!(attacks & (1u64 << 16), 0);
        // Rook on a3 must not reach h2 going west.
        let attacks = rook_ray_attacks(16, 0);
        assert_eq!(attacks & (1u64 << 15), 0);
    }

    /// Every hash key stays inside its square's table slice, and no two
    /// distinct subsets of a square's mask share a key. With per-square
    /// shifts of `64 - popcount(mask)` the hash is a bijection onto the
    /// table slice; any collision means a defective magic constant.
    fn check_magic_keys(raw: &[super::super::magic_data::RawMagic; 64]) {
        let (entries, _) = build_entries_and_size(raw);
        for (sq, entry) in entries.iter().enumerate() {
            let slots = 1usize << (64 - entry.shift);
            let mut seen: HashSet<usize> = HashSet::with_capacity(slots);
            for subset in OccupancySubsets::new(entry.mask) {
                let key = magic_index(entry, subset);
                assert!(key < slots, "key {key} out of range on square {sq}");
                assert!(
                    seen.insert(key),
                    "key collision on square {sq}, key {key}"
                );
            }
        }
    }

    #[test]
    fn rook_magic_keys_are_injective() {
        check_magic_keys(&ROOK_RAW);
    }

    #[test]
    fn bishop_magic_keys_are_injective() {
        check_magic_keys(&BISHOP_RAW);
    }

    #[test]
    fn bishop_trace_never_wraps_edges() {
        // Bishop on h4: north-east would wrap to a6 (square 40) via <<9.
        let attacks = bishop_ray_attacks(31, 0);
        assert_eq!(attacks & (1u64 << 40), 0);
        // Bishop on a4: north-west would wrap to h4's diagonal via <<7.
        let attacks = bishop_ray_attacks(24, 0);
        assert_eq!(attacks & (1u64 << 31), 0);
    }
}
