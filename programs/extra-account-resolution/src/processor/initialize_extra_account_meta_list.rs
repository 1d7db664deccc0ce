//! InitializeExtraAccountMetaList Instruction Processor
//!
//! Creates the config account for a mint and stores its descriptor list.

use crate::address::collect_extra_account_metas_signer_seeds;
use crate::error::ResolutionError;
use crate::state::{ExtraAccountMeta, ExtraAccountMetaList};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};

/// Process InitializeExtraAccountMetaList instruction
///
/// Accounts expected:
/// 0. `[writable]` Config account, PDA of `[b"extra-account-metas", mint]`
/// 1. `[]` Mint
/// 2. `[writable, signer]` Payer
/// 3. `[]` System program
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    extra_account_metas: Vec<ExtraAccountMeta>,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let config_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let payer_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;

    // Validate accounts
    assert_signer(payer_info)?;
    assert_writable(config_info)?;
    let bump_seed = assert_config_address(program_id, config_info, mint_info.key)?;
    assert_uninitialized(config_info)?;

    // Size the account to the encoded list exactly
    let list = ExtraAccountMetaList::new(extra_account_metas)?;
    let space = list.packed_len()?;
    let lamports = Rent::get()?.minimum_balance(space);

    // Create the config account, signing as the PDA
    let bump_seed = [bump_seed];
    let signer_seeds = collect_extra_account_metas_signer_seeds(mint_info.key, &bump_seed);
    invoke_signed(
        &system_instruction::create_account(
            payer_info.key,
            config_info.key,
            lamports,
            u64::try_from(space).map_err(|_| ResolutionError::Overflow)?,
            program_id,
        ),
        &[
            payer_info.clone(),
            config_info.clone(),
            system_program_info.clone(),
        ],
        &[&signer_seeds],
    )?;

    // Save the list
    list.pack_into_slice(&mut config_info.try_borrow_mut_data()?)?;
    msg!("Stored {} extra account descriptors", list.entries.len());

    Ok(())
}
