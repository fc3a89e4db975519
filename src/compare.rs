//! Fuzzy comparison of state vectors, for validation and regression
//! checks only; the transform path never calls this.

use crate::runtime::state_vector::StateVector;

/// Historical regression-harness default. Deliberately loose: it only
/// catches gross divergence and says nothing about numerical accuracy.
/// Pass a meaningful epsilon (for example 1e-9) for precise checks.
pub const DEFAULT_EPSILON: f64 = 2.0;

/// True iff the vectors have equal length and every pair of amplitudes
/// has magnitudes within `epsilon` of each other. Stops at the first
/// mismatch.
pub fn states_approx_eq(a: &StateVector, b: &StateVector, epsilon: f64) -> bool {
    if a.size() != b.size() {
        return false;
    }
    a.amps()
        .iter()
        .zip(b.amps())
        .all(|(x, y)| (x.norm() - y.norm()).abs() <= epsilon)
}
