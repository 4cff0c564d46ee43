//! Sliding-piece attack lookup via magic bitboards.
//!
//! For every square and every arrangement of blocking pieces, the set of
//! squares a rook or bishop can reach is precomputed once and retrieved in
//! O(1) by a multiplicative perfect hash: the board occupancy is masked to
//! the squares that can actually shorten the piece's rays, multiplied by a
//! per-square magic constant (wrapping at 64 bits), and shifted down to a
//! small table index.
//!
//! The runtime surface is [`rook_attacks`], [`bishop_attacks`], and
//! [`queen_attacks`]. Callers combine the result with their own side masks;
//! this crate answers only which squares a slider attacks, not whose turn it
//! is or whether a move is legal.

mod attacks;
mod bitboard;
mod bits;
mod error;
mod square;

pub use attacks::{bishop_attacks, init_tables, queen_attacks, rook_attacks};
pub use bitboard::Bitboard;
pub use bits::{OccupancySubsets, bit_index};
pub use error::BitIndexError;
pub use square::Square;
