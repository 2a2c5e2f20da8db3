//! Dense eigen-decomposition for general real matrices.
//!
//! Comparison matrices are not symmetric, so the symmetric (Jacobi)
//! solvers are not applicable. This module implements the Hessenberg +
//! shifted QR scheme used by standard dense eigensolvers.

mod decomposition;

pub use decomposition::EigenDecomposition;
