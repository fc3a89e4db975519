//! Closed-form index arithmetic for the bit-k amplitude pairing.
//!
//! Bit positions are 1-indexed from the most significant bit: bit 1 of an
//! n-bit index is the top bit, bit n the bottom one. For a fixed (n, k)
//! the index space [0, 2^n) partitions into disjoint pairs whose members
//! differ only in bit k; the transform combines exactly those pairs.
//!
//! All functions here are pure and carry no per-iteration mutable state,
//! which is what makes the flattened parallel loop in the transform
//! kernel trivially race-free.

/// Number of contiguous indices sharing the same bits above position k,
/// with bit k fixed: `2^(n - k)`.
#[inline]
pub fn group_size(n: usize, k: usize) -> usize {
    debug_assert!(k >= 1 && k <= n);
    1 << (n - k)
}

/// Span of one group together with its bit-k = 1 partner block.
#[inline]
pub fn block_size(n: usize, k: usize) -> usize {
    group_size(n, k) << 1
}

/// Number of distinct values of the bits above position k: `2^(k - 1)`.
#[inline]
pub fn num_groups(n: usize, k: usize) -> usize {
    debug_assert!(k >= 1 && k <= n);
    1 << (k - 1)
}

/// Total number of pairs: half the index space. Takes no `k` on purpose:
/// `num_groups(n, k) * group_size(n, k) == 2^(n-1)` for every valid k,
/// so the flattened pair range has the same length whichever bit is
/// transformed.
#[inline]
pub fn pair_count(n: usize) -> usize {
    debug_assert!(n >= 1);
    1 << (n - 1)
}

/// Maps a flattened pair index `ij` in [0, pair_count) to the amplitude
/// index pair it addresses. `index1` has bit k clear, `index2` has it
/// set; the two agree on every other bit.
#[inline]
pub fn pair_at(n: usize, k: usize, ij: usize) -> (usize, usize) {
    let gs = group_size(n, k);
    let i = ij / gs;
    let j = ij % gs;
    let index1 = i * block_size(n, k) + j;
    (index1, index1 + gs)
}
