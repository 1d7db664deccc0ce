//! Error Types
//!
//! Every failure the codec, the resolution engine and the reference hook
//! program can produce. Each variant has a stable numeric code so clients
//! can match on `ProgramError::Custom(code)`.
//!
//! # Error Code Ranges
//!
//! | Range | Category |
//! |-------|----------|
//! | 0-3 | Resolution pipeline (codec, engine, collaborators) |
//! | 4-9 | Reference hook program |
//!
//! # Usage
//!
//! ```ignore
//! use crate::error::ResolutionError;
//!
//! let list = ExtraAccountMetaList::unpack(&data)?;          // library: ResolutionError
//! return Err(ResolutionError::IncorrectAccount.into());     // program: ProgramError
//! ```

use num_traits::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    msg,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Errors that may be returned while decoding or resolving extra account
/// descriptors, or by the reference hook program.
///
/// # Important
///
/// Codes are assigned by variant position. Never reorder variants, only
/// append new ones at the end.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    // =========================================================================
    // RESOLUTION PIPELINE ERRORS (0-3)
    // =========================================================================
    /// Error 0: Buffer too short to hold a whole descriptor (or a list header).
    ///
    /// Raised by the layout codec. A partial record is never recovered.
    #[error("Malformed extra account descriptor")]
    MalformedDescriptor,

    /// Error 1: A delegated-owner descriptor points outside the accounts
    /// resolved so far.
    ///
    /// The referenced list may simply be stale, so callers may re-fetch the
    /// config account and retry.
    #[error("Referenced account not found among resolved accounts")]
    AccountNotFound,

    /// Error 2: The 32-byte address config could not be interpreted as seeds.
    #[error("Invalid seed configuration")]
    InvalidSeedConfig,

    /// Error 3: No bump seed produced a valid program address.
    #[error("Program address space exhausted")]
    AddressSpaceExhausted,

    // =========================================================================
    // HOOK PROGRAM ERRORS (4-9)
    // =========================================================================
    /// Error 4: Could not parse the instruction data.
    #[error("Invalid instruction")]
    InvalidInstruction,

    /// Error 5: A provided extra account does not match its resolved
    /// address or privileges.
    #[error("Incorrect account provided")]
    IncorrectAccount,

    /// Error 6: The config account already holds a descriptor list.
    #[error("Extra account meta list already initialized")]
    AlreadyInitialized,

    /// Error 7: Fewer accounts were supplied than the instruction requires.
    #[error("Not enough accounts provided")]
    NotEnoughAccounts,

    /// Error 8: The config account is not the one derived for this mint.
    #[error("Config account address does not match mint")]
    IncorrectConfigAddress,

    /// Error 9: Arithmetic overflow while computing sizes or counts.
    #[error("Arithmetic overflow")]
    Overflow,
}

// =============================================================================
// CONVERSION TO PROGRAMERROR
// =============================================================================

/// Lets program code use `?` on library results.
///
/// The error code is the variant's position (MalformedDescriptor = 0, ...).
impl From<ResolutionError> for ProgramError {
    fn from(e: ResolutionError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for ResolutionError {
    fn type_of() -> &'static str {
        "ResolutionError"
    }
}

// =============================================================================
// DECODING CUSTOM CODES
// =============================================================================

/// Maps a `ProgramError::Custom` code back to its variant.
///
/// Needed by `PrintProgramError`, which the entrypoint uses to log readable
/// messages instead of bare codes.
impl FromPrimitive for ResolutionError {
    fn from_i64(n: i64) -> Option<Self> {
        u64::try_from(n).ok().and_then(Self::from_u64)
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(match n {
            0 => ResolutionError::MalformedDescriptor,
            1 => ResolutionError::AccountNotFound,
            2 => ResolutionError::InvalidSeedConfig,
            3 => ResolutionError::AddressSpaceExhausted,
            4 => ResolutionError::InvalidInstruction,
            5 => ResolutionError::IncorrectAccount,
            6 => ResolutionError::AlreadyInitialized,
            7 => ResolutionError::NotEnoughAccounts,
            8 => ResolutionError::IncorrectConfigAddress,
            9 => ResolutionError::Overflow,
            _ => return None,
        })
    }
}

impl PrintProgramError for ResolutionError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        msg!("Error: {}", self);
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            ProgramError::from(ResolutionError::MalformedDescriptor),
            ProgramError::Custom(0)
        );
        assert_eq!(
            ProgramError::from(ResolutionError::AccountNotFound),
            ProgramError::Custom(1)
        );
        assert_eq!(
            ProgramError::from(ResolutionError::InvalidSeedConfig),
            ProgramError::Custom(2)
        );
        assert_eq!(
            ProgramError::from(ResolutionError::AddressSpaceExhausted),
            ProgramError::Custom(3)
        );
    }

    /// Every code decodes back to the variant that produced it.
    #[test]
    fn test_from_primitive_matches_discriminant() {
        for code in 0..10u64 {
            let error = ResolutionError::from_u64(code).unwrap();
            assert_eq!(error as u64, code);
        }
        assert_eq!(ResolutionError::from_u64(10), None);
        assert_eq!(ResolutionError::from_i64(-1), None);
    }

    #[test]
    fn test_decode_custom_error() {
        let decoded =
            <ResolutionError as DecodeError<ResolutionError>>::decode_custom_error_to_enum(5);
        assert_eq!(decoded, Some(ResolutionError::IncorrectAccount));
    }
}

/*
=============================================================================
DETAILED EXPLANATION
=============================================================================

TWO KINDS OF CALLERS
====================

Library callers (clients building transactions, other programs reusing the
engine) get a typed `ResolutionError` and can branch on it:

    match resolve_all(...) {
        Err(ResolutionError::AccountNotFound) => { /* re-fetch, retry */ }
        Err(ResolutionError::MalformedDescriptor)
        | Err(ResolutionError::InvalidSeedConfig) => { /* permanent */ }
        ...
    }

Program code works in `ProgramResult`, and the `From` impl turns any
library error into `ProgramError::Custom(code)` through `?`.

NO LOCAL RECOVERY
=================

Nothing in the pipeline swallows an error. Descriptor i+1 may depend on the
address produced by descriptor i, so once one step fails the rest of the
pass cannot be trusted and no partial list is returned.

PRINTING
========

`ProgramError` already implements `PrintProgramError`. For a
`Custom(code)` it calls `ResolutionError::decode_custom_error_to_enum(code)`
(which needs `FromPrimitive`) and then our `print`, which logs the
thiserror message with `msg!`.
*/
