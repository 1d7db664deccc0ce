//! Utility Modules
//!
//! Helper functions used by the processors.
//!
//! # Modules
//!
//! - `assertions`: Common validation checks (ownership, signer, config address)

pub mod assertions;

pub use assertions::*;
