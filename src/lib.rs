pub mod compare; // fuzzy state comparison, validation only
pub mod error; // error taxonomy and exit codes
pub mod indexing; // closed-form pair arithmetic
pub mod runtime; // state vector and initializer
pub mod transform; // hadamard pair kernel
