use num_complex::Complex64;
use rayon::prelude::*;
use std::io::{self, Write};
use std::mem;

use crate::error::{self, SimError};
use crate::runtime::init;
use crate::transform;

/// Largest supported qubit count: amplitude indices must fit in `usize`.
pub const MAX_QUBITS: u32 = usize::BITS;

/// Amplitude vector of an n-qubit register: exactly `2^qubits_n` complex
/// slots, length fixed at construction. Index 0 is the all-zero bit
/// pattern, index `2^n - 1` the all-one pattern, bit 1 most significant.
///
/// Deliberately not `Clone`: snapshots for validation go through the
/// intention-revealing [`StateVector::snapshot`] instead of an implicit
/// copy on assignment.
///
/// A vector is owned by one caller at a time; the internal parallel
/// regions hand workers disjoint views that end at the join, and there is
/// no locking for concurrent external use.
#[derive(Debug)]
pub struct StateVector {
    qubits_n: usize,
    amps: Vec<Complex64>,
}

impl StateVector {
    /// Allocates the `2^qubits_n` amplitude slots, zeroed.
    ///
    /// Returns [`SimError::Configuration`] for a qubit count of 0 or above
    /// [`MAX_QUBITS`], before any allocation is attempted. If the buffer
    /// cannot fit in memory the process terminates with
    /// [`crate::error::EXIT_RESOURCE`]; the capacity is checked against
    /// the container's limits up front, and the allocation itself is
    /// fallible rather than aborting.
    pub fn new(qubits_n: usize) -> Result<Self, SimError> {
        if qubits_n == 0 || qubits_n > MAX_QUBITS as usize {
            return Err(SimError::Configuration {
                qubits: qubits_n,
                max: MAX_QUBITS,
            });
        }
        let len = match 1usize.checked_shl(qubits_n as u32) {
            Some(len) => len,
            None => error::resource_exhausted(&format!(
                "2^{} amplitudes do not fit in the address space",
                qubits_n
            )),
        };
        // Vec is limited to isize::MAX bytes of payload.
        let max_len = isize::MAX as usize / mem::size_of::<Complex64>();
        if len > max_len {
            error::resource_exhausted(&format!(
                "amplitude buffer of {} elements exceeds the container maximum of {}",
                len, max_len
            ));
        }
        let mut amps: Vec<Complex64> = Vec::new();
        if amps.try_reserve_exact(len).is_err() {
            error::resource_exhausted(&format!(
                "failed to allocate {} amplitudes ({} bytes)",
                len,
                len * mem::size_of::<Complex64>()
            ));
        }
        amps.resize(len, Complex64::new(0.0, 0.0));
        Ok(StateVector { qubits_n, amps })
    }

    pub fn qubits(&self) -> usize {
        self.qubits_n
    }

    /// Number of amplitudes, always `2^qubits_n`.
    pub fn size(&self) -> usize {
        self.amps.len()
    }

    pub fn amps(&self) -> &[Complex64] {
        &self.amps
    }

    /// Bounds-checked amplitude read.
    pub fn get(&self, index: usize) -> Result<Complex64, SimError> {
        self.check_index(index)?;
        Ok(self.amps[index])
    }

    /// Bounds-checked amplitude write.
    pub fn set(&mut self, index: usize, value: Complex64) -> Result<(), SimError> {
        self.check_index(index)?;
        self.amps[index] = value;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), SimError> {
        if index >= self.amps.len() {
            return Err(SimError::Range {
                what: "amplitude index",
                value: index,
                lo: 0,
                hi: self.amps.len() - 1,
            });
        }
        Ok(())
    }

    /// Explicit deep copy for validation against a later state.
    pub fn snapshot(&self) -> StateVector {
        StateVector {
            qubits_n: self.qubits_n,
            amps: self.amps.clone(),
        }
    }

    /// Sum of squared magnitudes over the whole vector; preserved by
    /// [`StateVector::transform`] up to floating-point tolerance.
    pub fn norm_sqr_total(&self) -> f64 {
        self.amps.par_iter().map(|a| a.norm_sqr()).sum()
    }

    /// Fills every slot with a pseudo-random amplitude, partitioned over
    /// `workers` contiguous blocks. See [`init::fill_random`] for the
    /// seeding and reproducibility contract.
    pub fn fill_random(&mut self, workers: usize) {
        init::fill_random(&mut self.amps, workers);
    }

    /// Applies the normalized Hadamard transform to `bit_pos`, counted
    /// 1-indexed from the most significant bit. The precondition is
    /// validated here, before the parallel region, so no error can
    /// originate mid-loop and a failed call leaves the vector untouched.
    pub fn transform(&mut self, bit_pos: usize) -> Result<(), SimError> {
        if bit_pos < 1 || bit_pos > self.qubits_n {
            return Err(SimError::Range {
                what: "bit position",
                value: bit_pos,
                lo: 1,
                hi: self.qubits_n,
            });
        }
        transform::apply_hadamard(&mut self.amps, self.qubits_n, bit_pos);
        Ok(())
    }

    /// Writes one `v[index]: value` line per amplitude. The exact format
    /// is human-oriented and not a compatibility surface.
    pub fn dump<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "vector of size {}", self.amps.len())?;
        writeln!(w, "----------------")?;
        for (i, amp) in self.amps.iter().enumerate() {
            writeln!(w, "v[{}]:\t{}", i, amp)?;
        }
        Ok(())
    }

    /// Dumps the vector to stdout.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        self.dump(&mut stdout.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut sv = StateVector::new(2).unwrap();
        assert!(sv.set(3, Complex64::new(1.0, -1.0)).is_ok());
        assert_eq!(sv.get(3).unwrap(), Complex64::new(1.0, -1.0));
        assert!(matches!(sv.get(4), Err(SimError::Range { .. })));
        assert!(matches!(
            sv.set(4, Complex64::new(0.0, 0.0)),
            Err(SimError::Range { .. })
        ));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut sv = StateVector::new(3).unwrap();
        sv.fill_random(2);
        let snap = sv.snapshot();
        sv.set(0, Complex64::new(42.0, 0.0)).unwrap();
        assert_ne!(snap.get(0).unwrap(), sv.get(0).unwrap());
        assert_eq!(snap.size(), sv.size());
    }

    #[test]
    fn failed_transform_leaves_vector_untouched() {
        let mut sv = StateVector::new(3).unwrap();
        sv.fill_random(1);
        let snap = sv.snapshot();
        assert!(sv.transform(0).is_err());
        assert!(sv.transform(4).is_err());
        assert_eq!(snap.amps(), sv.amps());
    }

    #[test]
    fn dump_emits_one_line_per_amplitude() {
        let sv = StateVector::new(2).unwrap();
        let mut out = Vec::new();
        sv.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2 + 4);
        assert!(text.lines().any(|l| l.starts_with("v[3]:")));
    }
}
