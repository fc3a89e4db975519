//! Error taxonomy and process exit codes.
//!
//! Two failure classes are recoverable and reported as [`SimError`]:
//! configuration errors (bad qubit count) and range errors (bad bit
//! position or amplitude index). Resource exhaustion is fatal: there is
//! no safe partial state to continue from once the amplitude buffer
//! cannot be allocated, so [`resource_exhausted`] terminates the process
//! with its own exit code instead of propagating an error.

use thiserror::Error;

/// Exit code for configuration failures (bad qubit count or bit position).
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for resource exhaustion (amplitude buffer cannot be allocated).
pub const EXIT_RESOURCE: i32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Qubit count outside the supported range. The state vector must not
    /// be used after this; construction returns no instance at all.
    #[error("qubit count {qubits} is outside the supported range 1..={max}")]
    Configuration { qubits: usize, max: u32 },

    /// An index or bit-position argument fell outside its valid bounds.
    /// Checked before any mutation, so the vector is never corrupted.
    #[error("{what} {value} is out of range {lo}..={hi}")]
    Range {
        what: &'static str,
        value: usize,
        lo: usize,
        hi: usize,
    },
}

/// Logs the failure and terminates the process with [`EXIT_RESOURCE`].
pub fn resource_exhausted(message: &str) -> ! {
    log::error!("resource exhausted: {}", message);
    eprintln!("error: resource exhausted: {}", message);
    std::process::exit(EXIT_RESOURCE);
}
