//! Execute Instruction Processor
//!
//! Checks that a transfer carries exactly the extra accounts its mint's
//! descriptor list resolves to.

use crate::derivation::ProgramAddressOracle;
use crate::error::ResolutionError;
use crate::resolver::ExtraAccountResolver;
use crate::seeds::PackedSeedProvider;
use crate::state::ExtraAccountMetaList;
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    instruction::AccountMeta,
    msg,
    pubkey::Pubkey,
};

/// Accounts an `Execute` carries before the extras.
pub const BASE_ACCOUNTS_LEN: usize = 5;

/// Process Execute instruction
///
/// Accounts expected:
/// 0. `[]` Source token account
/// 1. `[]` Mint
/// 2. `[]` Destination token account
/// 3. `[]` Source owner
/// 4. `[]` Config account
/// 5. ..5+N `[]` Extra accounts, in descriptor order
///
/// `instruction_data` is the full instruction data, the same bytes a
/// client resolves `InstructionData` seeds against.
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
    amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let _source_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let _destination_info = next_account_info(account_info_iter)?;
    let _owner_info = next_account_info(account_info_iter)?;
    let config_info = next_account_info(account_info_iter)?;

    // Validate config account
    assert_config_address(program_id, config_info, mint_info.key)?;
    assert_owned_by(config_info, program_id)?;

    let list = ExtraAccountMetaList::unpack(&config_info.try_borrow_data()?)?;

    // Resolve against the accounts that precede the extras
    let (base_infos, extra_infos) = accounts.split_at(BASE_ACCOUNTS_LEN);
    let base_accounts: Vec<AccountMeta> = base_infos.iter().map(account_info_to_meta).collect();
    let expected = ExtraAccountResolver::new(
        program_id,
        instruction_data,
        &PackedSeedProvider,
        &ProgramAddressOracle,
    )
    .with_base_accounts(&base_accounts)
    .resolve_all(list.entries())
    .map_err(|error| {
        msg!("Cannot resolve extra accounts: {}", error);
        error
    })?;

    if extra_infos.len() < expected.len() {
        msg!(
            "Expected {} extra accounts, got {}",
            expected.len(),
            extra_infos.len()
        );
        return Err(ResolutionError::NotEnoughAccounts.into());
    }

    for (meta, info) in expected.iter().zip(extra_infos) {
        if account_info_to_meta(info) != *meta {
            msg!("Extra account {} does not match {}", info.key, meta.pubkey);
            return Err(ResolutionError::IncorrectAccount.into());
        }
    }

    msg!("Validated {} extra accounts for amount {}", expected.len(), amount);
    Ok(())
}

fn account_info_to_meta(info: &AccountInfo) -> AccountMeta {
    AccountMeta {
        pubkey: *info.key,
        is_signer: info.is_signer,
        is_writable: info.is_writable,
    }
}
