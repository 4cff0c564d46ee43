//! Error types for the bit-indexing primitives.

/// Error returned by [`bit_index`](crate::bit_index) when the input does not
/// have exactly one set bit.
///
/// This is a programmer-error class: internal callers isolate a single bit
/// before indexing, so hitting this at runtime means a bounds bug upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected exactly one set bit, found {population}")]
pub struct BitIndexError {
    /// Number of set bits in the rejected value.
    pub population: u32,
}
