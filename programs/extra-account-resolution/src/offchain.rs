//! Client Helpers
//!
//! Append a hook's extra accounts to an instruction being built, given the
//! config account data the client already fetched.
//!
//! ```ignore
//! let data = rpc.get_account_data(&get_extra_account_metas_address(&mint, &hook))?;
//! let mut ix = execute(&hook, &source, &mint, &destination, &owner, amount)?;
//! add_extra_account_metas_to_instruction(&mut ix, &data, &PackedSeedProvider, &ProgramAddressOracle)?;
//! ```

use crate::derivation::AddressOracle;
use crate::error::ResolutionError;
use crate::resolver::ExtraAccountResolver;
use crate::seeds::SeedProvider;
use crate::state::ExtraAccountMetaList;
use solana_program::instruction::{AccountMeta, Instruction};

/// Resolve the descriptor list in `config_account_data` against
/// `instruction` and append the results to `instruction.accounts`.
///
/// The instruction's current accounts are the base of the pass. An extra
/// account that already appears in the instruction keeps the privileges it
/// has there (see [`de_escalate_account_meta`]).
pub fn add_extra_account_metas_to_instruction<S, O>(
    instruction: &mut Instruction,
    config_account_data: &[u8],
    seed_provider: &S,
    oracle: &O,
) -> Result<(), ResolutionError>
where
    S: SeedProvider + ?Sized,
    O: AddressOracle + ?Sized,
{
    let list = ExtraAccountMetaList::unpack(config_account_data)?;

    let extras = ExtraAccountResolver::new(
        &instruction.program_id,
        &instruction.data,
        seed_provider,
        oracle,
    )
    .with_base_accounts(&instruction.accounts)
    .resolve_all(list.entries())?;

    for mut meta in extras {
        de_escalate_account_meta(&mut meta, &instruction.accounts);
        instruction.accounts.push(meta);
    }
    Ok(())
}

/// Drop signer/writable flags the instruction does not already grant.
///
/// If `account_meta.pubkey` appears in `account_metas`, the extra copy may
/// not ask for more privilege than the highest one granted there. Accounts
/// not present are left alone.
pub fn de_escalate_account_meta(account_meta: &mut AccountMeta, account_metas: &[AccountMeta]) {
    let highest = account_metas
        .iter()
        .filter(|existing| existing.pubkey == account_meta.pubkey)
        .map(|existing| (existing.is_signer, existing.is_writable))
        .reduce(|acc, next| (acc.0 || next.0, acc.1 || next.1));

    if let Some((is_signer, is_writable)) = highest {
        account_meta.is_signer &= is_signer;
        account_meta.is_writable &= is_writable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::ProgramAddressOracle;
    use crate::seeds::{PackedSeedProvider, Seed};
    use crate::state::ExtraAccountMeta;
    use solana_program::pubkey::Pubkey;

    #[test]
    fn test_de_escalate() {
        let key = Pubkey::new_unique();
        let existing = [
            AccountMeta::new_readonly(key, false),
            AccountMeta::new_readonly(Pubkey::new_unique(), true),
        ];

        let mut meta = AccountMeta::new(key, true);
        de_escalate_account_meta(&mut meta, &existing);
        assert!(!meta.is_signer);
        assert!(!meta.is_writable);

        // Highest privilege across duplicates wins
        let existing = [
            AccountMeta::new_readonly(key, true),
            AccountMeta::new(key, false),
        ];
        let mut meta = AccountMeta::new(key, true);
        de_escalate_account_meta(&mut meta, &existing);
        assert!(meta.is_signer);
        assert!(meta.is_writable);

        // Unknown accounts keep what they asked for
        let mut meta = AccountMeta::new(Pubkey::new_unique(), true);
        de_escalate_account_meta(&mut meta, &existing);
        assert!(meta.is_signer);
        assert!(meta.is_writable);
    }

    #[test]
    fn test_appends_resolved_accounts() {
        let program_id = Pubkey::new_unique();
        let source = Pubkey::new_unique();
        let literal = Pubkey::new_unique();
        let data = vec![1u8, 2, 3, 4];

        let list = ExtraAccountMetaList::new(vec![
            ExtraAccountMeta::new_with_pubkey(&literal, false, false),
            ExtraAccountMeta::new_with_seeds(
                &[
                    Seed::Literal {
                        bytes: b"pda".to_vec(),
                    },
                    Seed::AccountKey { index: 0 },
                    Seed::InstructionData {
                        index: 0,
                        length: 2,
                    },
                ],
                false,
                true,
            )
            .unwrap(),
        ])
        .unwrap();
        let config_data = list.pack().unwrap();

        let mut instruction = Instruction::new_with_bytes(
            program_id,
            &data,
            vec![AccountMeta::new_readonly(source, false)],
        );
        add_extra_account_metas_to_instruction(
            &mut instruction,
            &config_data,
            &PackedSeedProvider,
            &ProgramAddressOracle,
        )
        .unwrap();

        let (pda, _) =
            Pubkey::find_program_address(&[b"pda", source.as_ref(), &data[..2]], &program_id);
        assert_eq!(
            instruction.accounts,
            vec![
                AccountMeta::new_readonly(source, false),
                AccountMeta::new_readonly(literal, false),
                AccountMeta::new(pda, false),
            ]
        );
    }

    /// A literal extra that duplicates a read-only base account stays read-only.
    #[test]
    fn test_duplicate_extra_is_de_escalated() {
        let program_id = Pubkey::new_unique();
        let source = Pubkey::new_unique();
        let list =
            ExtraAccountMetaList::new(vec![ExtraAccountMeta::new_with_pubkey(&source, true, true)])
                .unwrap();

        let mut instruction = Instruction::new_with_bytes(
            program_id,
            &[],
            vec![AccountMeta::new_readonly(source, false)],
        );
        add_extra_account_metas_to_instruction(
            &mut instruction,
            &list.pack().unwrap(),
            &PackedSeedProvider,
            &ProgramAddressOracle,
        )
        .unwrap();

        assert_eq!(
            instruction.accounts[1],
            AccountMeta::new_readonly(source, false)
        );
    }

    #[test]
    fn test_malformed_config_data() {
        let mut instruction = Instruction::new_with_bytes(Pubkey::new_unique(), &[], vec![]);
        assert_eq!(
            add_extra_account_metas_to_instruction(
                &mut instruction,
                &[0, 0],
                &PackedSeedProvider,
                &ProgramAddressOracle,
            ),
            Err(ResolutionError::MalformedDescriptor)
        );
        assert!(instruction.accounts.is_empty());
    }
}
