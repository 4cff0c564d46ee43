//! Sliding piece attack lookup: the runtime-facing query surface.

mod magic;
mod magic_data;

use crate::bitboard::Bitboard;
use crate::square::Square;

use self::magic::{bishop_attacks_lookup, rook_attacks_lookup};

/// Return rook attacks from `sq` given `occupied` squares.
///
/// The result includes the first occupied square in each direction; callers
/// mask out friendly pieces themselves.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks_lookup(sq.index(), occupied)
}

/// Return bishop attacks from `sq` given `occupied` squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks_lookup(sq.index(), occupied)
}

/// Return queen attacks from `sq` given `occupied` squares.
///
/// Composed as rook | bishop; queens have no table of their own.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Build both attack tables now instead of lazily on first query.
///
/// Construction is a one-time, in-memory pass; after it completes the tables
/// are immutable and shared by any number of concurrent readers.
pub fn init_tables() {
    magic::force_init();
}
