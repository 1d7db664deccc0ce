//! Assertion Helper Functions
//!
//! Validation checks shared by the hook program's processors.
//!
//! # Usage Pattern
//!
//! ```ignore
//! pub fn process(...) -> ProgramResult {
//!     assert_signer(payer_info)?;
//!     assert_writable(config_info)?;
//!     let bump = assert_config_address(program_id, config_info, mint_info.key)?;
//!     ...
//! }
//! ```

use crate::address::get_extra_account_metas_address_and_bump_seed;
use crate::error::ResolutionError;
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program_error::ProgramError,
    pubkey::Pubkey,
};

// =============================================================================
// OWNERSHIP CHECKS
// =============================================================================

/// Assert that an account is owned by the expected program.
///
/// A config account owned by anyone else could hold an arbitrary
/// descriptor list.
pub fn assert_owned_by(account: &AccountInfo, owner: &Pubkey) -> ProgramResult {
    if account.owner != owner {
        Err(ProgramError::IllegalOwner)
    } else {
        Ok(())
    }
}

// =============================================================================
// SIGNER / WRITABLE CHECKS
// =============================================================================

/// Assert that an account is a signer of the transaction.
pub fn assert_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        Err(ProgramError::MissingRequiredSignature)
    } else {
        Ok(())
    }
}

/// Assert that an account is writable.
pub fn assert_writable(account: &AccountInfo) -> ProgramResult {
    if !account.is_writable {
        Err(ProgramError::InvalidAccountData)
    } else {
        Ok(())
    }
}

// =============================================================================
// CONFIG ACCOUNT CHECKS
// =============================================================================

/// Assert that `config_info` is the config account of `mint` under
/// `program_id`. Returns the bump seed.
pub fn assert_config_address(
    program_id: &Pubkey,
    config_info: &AccountInfo,
    mint: &Pubkey,
) -> Result<u8, ProgramError> {
    let (expected, bump_seed) = get_extra_account_metas_address_and_bump_seed(mint, program_id);
    if *config_info.key != expected {
        return Err(ResolutionError::IncorrectConfigAddress.into());
    }
    Ok(bump_seed)
}

/// Assert that an account has not been created yet.
///
/// Any lamports or data mean someone already initialized (or funded) it.
pub fn assert_uninitialized(account: &AccountInfo) -> ProgramResult {
    if account.lamports() != 0 || !account.data_is_empty() {
        Err(ResolutionError::AlreadyInitialized.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
