//! Program Entrypoint
//!
//! Where the runtime calls into the reference hook program.

// Other programs that depend on this crate enable "no-entrypoint" to avoid
// a duplicate `entrypoint` symbol.
#![cfg(not(feature = "no-entrypoint"))]

use crate::{error::ResolutionError, processor::Processor};
use solana_program::{
    account_info::AccountInfo, entrypoint, entrypoint::ProgramResult,
    program_error::PrintProgramError, pubkey::Pubkey,
};

entrypoint!(process_instruction);

/// The main entrypoint for the hook program.
///
/// Errors are logged by name before being returned, so transaction logs show
/// `Error: Incorrect account provided` rather than a
/// bare custom code.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if let Err(error) = Processor::process(program_id, accounts, instruction_data) {
        error.print::<ResolutionError>();
        return Err(error);
    }
    Ok(())
}
