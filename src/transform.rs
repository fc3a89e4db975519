//! Normalized Hadamard kernel over the bit-k amplitude pairing.

use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::SQRT_2;

use crate::indexing;

/// Below this vector size the flattened loop runs sequentially; the
/// fork-join overhead dominates for tiny states.
const PARALLEL_THRESHOLD: usize = 1 << 12;

/// Shared write handle for the flattened parallel loop.
///
/// Safety: `pair_at` maps each flattened index to a distinct
/// (index1, index2) pair, and the pairs partition [0, 2^n) (verified
/// exhaustively in the indexing tests), so no two iterations ever touch
/// the same element. The caller holds the only `&mut` to the buffer for
/// the duration of the loop.
struct AmpsPtr(*mut Complex64);

unsafe impl Send for AmpsPtr {}
unsafe impl Sync for AmpsPtr {}

impl AmpsPtr {
    /// All access goes through `&self` so closures capture the wrapper
    /// itself, not the raw field; a bare `*mut` capture would sidestep
    /// the marker impls above.
    #[inline]
    unsafe fn at(&self, index: usize) -> *mut Complex64 {
        self.0.add(index)
    }
}

/// Applies `[[1, 1], [1, -1]] / sqrt(2)` to every bit-k pair in place.
///
/// Preconditions (`amps.len() == 2^n`, `1 <= k <= n`) are the caller's
/// responsibility; `StateVector::transform` validates them before
/// entering, so nothing can fail mid-loop.
///
/// The (group, offset) nest is flattened to one logical index so the
/// whole pair range parallelizes at a single level: with the nest kept,
/// a transform on the top bit would have a single group and no outer
/// parallelism at all.
pub fn apply_hadamard(amps: &mut [Complex64], n: usize, k: usize) {
    debug_assert_eq!(amps.len(), 1usize << n);
    debug_assert!(k >= 1 && k <= n);

    let pairs = indexing::pair_count(n);
    if amps.len() < PARALLEL_THRESHOLD {
        for ij in 0..pairs {
            let (i1, i2) = indexing::pair_at(n, k, ij);
            let a = amps[i1];
            let b = amps[i2];
            amps[i1] = (a + b) / SQRT_2;
            amps[i2] = (a - b) / SQRT_2;
        }
        return;
    }

    let ptr = AmpsPtr(amps.as_mut_ptr());
    (0..pairs).into_par_iter().for_each(|ij| {
        let (i1, i2) = indexing::pair_at(n, k, ij);
        // Safety: i1 != i2, both below 2^n, and this iteration is the
        // only one addressing either index (see AmpsPtr).
        unsafe {
            let a = *ptr.at(i1);
            let b = *ptr.at(i2);
            *ptr.at(i1) = (a + b) / SQRT_2;
            *ptr.at(i2) = (a - b) / SQRT_2;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::init;

    fn reference_transform(amps: &[Complex64], n: usize, k: usize) -> Vec<Complex64> {
        let mut out = amps.to_vec();
        for ij in 0..indexing::pair_count(n) {
            let (i1, i2) = indexing::pair_at(n, k, ij);
            let a = amps[i1];
            let b = amps[i2];
            out[i1] = (a + b) / SQRT_2;
            out[i2] = (a - b) / SQRT_2;
        }
        out
    }

    #[test]
    fn parallel_path_matches_sequential_reference() {
        // 2^13 amplitudes crosses PARALLEL_THRESHOLD
        let n = 13;
        let mut amps = vec![Complex64::new(0.0, 0.0); 1 << n];
        init::fill_random(&mut amps, 4);
        for k in [1, 7, n] {
            let expected = reference_transform(&amps, n, k);
            apply_hadamard(&mut amps, n, k);
            for (got, want) in amps.iter().zip(&expected) {
                assert!((got - want).norm() < 1e-12, "k={}", k);
            }
        }
    }

    #[test]
    fn parallel_path_is_involutive() {
        let n = 13;
        let mut amps = vec![Complex64::new(0.0, 0.0); 1 << n];
        init::fill_random(&mut amps, 4);
        let before = amps.clone();
        apply_hadamard(&mut amps, n, 5);
        apply_hadamard(&mut amps, n, 5);
        for (got, want) in amps.iter().zip(&before) {
            assert!((got - want).norm() < 1e-9);
        }
    }

    #[test]
    fn single_qubit_superposition() {
        let mut amps = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
        apply_hadamard(&mut amps, 1, 1);
        let r = 1.0 / SQRT_2;
        assert!((amps[0] - Complex64::new(r, 0.0)).norm() < 1e-12);
        assert!((amps[1] - Complex64::new(r, 0.0)).norm() < 1e-12);
    }
}
