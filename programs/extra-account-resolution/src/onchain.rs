//! On-Chain CPI Helper
//!
//! A program that invokes a hook must pass the hook's extra accounts along,
//! both as metas on the instruction and as `AccountInfo`s for the invoke.
//!
//! ```ignore
//! let mut cpi_instruction = execute(&hook, source.key, mint.key, destination.key, owner.key, amount)?;
//! let mut cpi_account_infos = vec![source.clone(), mint.clone(), destination.clone(), owner.clone(), config.clone()];
//! add_extra_accounts_for_cpi(
//!     &mut cpi_instruction,
//!     &mut cpi_account_infos,
//!     &config.try_borrow_data()?,
//!     remaining_accounts,
//!     &PackedSeedProvider,
//!     &ProgramAddressOracle,
//! )?;
//! invoke(&cpi_instruction, &cpi_account_infos)?;
//! ```

use crate::derivation::AddressOracle;
use crate::error::ResolutionError;
use crate::offchain::de_escalate_account_meta;
use crate::resolver::ExtraAccountResolver;
use crate::seeds::SeedProvider;
use crate::state::ExtraAccountMetaList;
use solana_program::{account_info::AccountInfo, instruction::Instruction};

/// Resolve the descriptor list in `config_account_data` against
/// `cpi_instruction` and append each extra account to both the instruction
/// and `cpi_account_infos`.
///
/// The instruction's current accounts are the base of the pass, and each
/// extra is de-escalated against the accounts before it. The matching
/// `AccountInfo` is looked up by key in `account_infos`, in any order.
///
/// # Errors
///
/// - `IncorrectAccount`: a resolved account has no info in `account_infos`
/// - any decode or resolution error from the descriptor list
///
/// On error neither the instruction nor `cpi_account_infos` is modified.
pub fn add_extra_accounts_for_cpi<'a, S, O>(
    cpi_instruction: &mut Instruction,
    cpi_account_infos: &mut Vec<AccountInfo<'a>>,
    config_account_data: &[u8],
    account_infos: &[AccountInfo<'a>],
    seed_provider: &S,
    oracle: &O,
) -> Result<(), ResolutionError>
where
    S: SeedProvider + ?Sized,
    O: AddressOracle + ?Sized,
{
    let list = ExtraAccountMetaList::unpack(config_account_data)?;

    let extras = ExtraAccountResolver::new(
        &cpi_instruction.program_id,
        &cpi_instruction.data,
        seed_provider,
        oracle,
    )
    .with_base_accounts(&cpi_instruction.accounts)
    .resolve_all(list.entries())?;

    let mut accounts = cpi_instruction.accounts.clone();
    let mut extra_infos = Vec::with_capacity(extras.len());
    for mut meta in extras {
        de_escalate_account_meta(&mut meta, &accounts);

        let info = account_infos
            .iter()
            .find(|info| *info.key == meta.pubkey)
            .ok_or(ResolutionError::IncorrectAccount)?;

        accounts.push(meta);
        extra_infos.push(info.clone());
    }

    cpi_instruction.accounts = accounts;
    cpi_account_infos.extend(extra_infos);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::ProgramAddressOracle;
    use crate::seeds::{PackedSeedProvider, Seed};
    use crate::state::ExtraAccountMeta;
    use solana_program::{clock::Epoch, instruction::AccountMeta, pubkey::Pubkey};

    struct Fixture {
        program_id: Pubkey,
        data: Vec<u8>,
        ix_accounts: Vec<AccountMeta>,
        config_data: Vec<u8>,
        expected_extras: Vec<AccountMeta>,
        unrelated: Pubkey,
    }

    /// A CPI whose target needs literal accounts and two PDAs, the second
    /// seeded by the first.
    fn fixture() -> Fixture {
        let program_id = Pubkey::new_unique();

        // 0: u8, 1..9: [u8; 8], 9..17: u64
        let u8_array_arg = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let u64_arg = 208u64;
        let mut data = vec![0u8];
        data.extend_from_slice(&u8_array_arg);
        data.extend_from_slice(&u64_arg.to_le_bytes());

        let ix_accounts = vec![
            AccountMeta::new(Pubkey::new_unique(), false),
            AccountMeta::new(Pubkey::new_unique(), false),
        ];

        let extra_meta1 = AccountMeta::new(Pubkey::new_unique(), false);
        let extra_meta2 = AccountMeta::new(Pubkey::new_unique(), true);
        let extra_meta3 = AccountMeta::new_readonly(Pubkey::new_unique(), false);

        let descriptors = vec![
            ExtraAccountMeta::from(&extra_meta1),
            ExtraAccountMeta::from(&extra_meta2),
            ExtraAccountMeta::from(&extra_meta3),
            // 5: seeded by the second instruction account
            ExtraAccountMeta::new_with_seeds(
                &[
                    Seed::Literal {
                        bytes: b"required_pda1".to_vec(),
                    },
                    Seed::InstructionData {
                        index: 1,
                        length: 8,
                    },
                    Seed::AccountKey { index: 1 },
                ],
                false,
                true,
            )
            .unwrap(),
            // 6: seeded by the PDA at index 5
            ExtraAccountMeta::new_with_seeds(
                &[
                    Seed::Literal {
                        bytes: 4u32.to_le_bytes().to_vec(),
                    },
                    Seed::InstructionData {
                        index: 9,
                        length: 8,
                    },
                    Seed::AccountKey { index: 5 },
                ],
                false,
                true,
            )
            .unwrap(),
            // Already in the instruction without signer privilege
            ExtraAccountMeta::new_with_pubkey(&ix_accounts[0].pubkey, true, true),
        ];

        let pda1 = Pubkey::find_program_address(
            &[
                b"required_pda1",
                &u8_array_arg,
                ix_accounts[1].pubkey.as_ref(),
            ],
            &program_id,
        )
        .0;
        let pda2 = Pubkey::find_program_address(
            &[&4u32.to_le_bytes(), &u64_arg.to_le_bytes(), pda1.as_ref()],
            &program_id,
        )
        .0;

        let expected_extras = vec![
            extra_meta1,
            extra_meta2,
            extra_meta3,
            AccountMeta::new(pda1, false),
            AccountMeta::new(pda2, false),
            AccountMeta::new(ix_accounts[0].pubkey, false),
        ];

        Fixture {
            program_id,
            data,
            ix_accounts,
            config_data: ExtraAccountMetaList::new(descriptors)
                .unwrap()
                .pack()
                .unwrap(),
            expected_extras,
            unrelated: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_cpi_instruction_gets_metas_and_infos() {
        let f = fixture();
        let owner = Pubkey::new_unique();

        // Every account the calling program holds, in no particular order
        let mut keys: Vec<Pubkey> = f.ix_accounts.iter().map(|meta| meta.pubkey).collect();
        keys.extend(f.expected_extras[..5].iter().map(|meta| meta.pubkey));
        keys.push(f.unrelated);
        keys.reverse();

        let mut storage: Vec<(Pubkey, u64, Vec<u8>)> =
            keys.iter().map(|key| (*key, 0, vec![])).collect();
        let account_infos: Vec<AccountInfo> = storage
            .iter_mut()
            .map(|(key, lamports, data)| {
                AccountInfo::new(key, false, true, lamports, data, &owner, false, Epoch::default())
            })
            .collect();

        let mut cpi_instruction =
            Instruction::new_with_bytes(f.program_id, &f.data, f.ix_accounts.clone());
        let mut cpi_account_infos: Vec<AccountInfo> = f
            .ix_accounts
            .iter()
            .map(|meta| {
                account_infos
                    .iter()
                    .find(|info| *info.key == meta.pubkey)
                    .unwrap()
                    .clone()
            })
            .collect();

        add_extra_accounts_for_cpi(
            &mut cpi_instruction,
            &mut cpi_account_infos,
            &f.config_data,
            &account_infos,
            &PackedSeedProvider,
            &ProgramAddressOracle,
        )
        .unwrap();

        let mut expected_metas = f.ix_accounts.clone();
        expected_metas.extend(f.expected_extras.iter().cloned());
        assert_eq!(cpi_instruction.accounts, expected_metas);

        let info_keys: Vec<Pubkey> = cpi_account_infos.iter().map(|info| *info.key).collect();
        let meta_keys: Vec<Pubkey> = expected_metas.iter().map(|meta| meta.pubkey).collect();
        assert_eq!(info_keys, meta_keys);
    }

    #[test]
    fn test_missing_account_info_fails() {
        let f = fixture();
        let owner = Pubkey::new_unique();

        // Second PDA not supplied
        let mut keys: Vec<Pubkey> = f.ix_accounts.iter().map(|meta| meta.pubkey).collect();
        keys.extend(f.expected_extras[..4].iter().map(|meta| meta.pubkey));

        let mut storage: Vec<(Pubkey, u64, Vec<u8>)> =
            keys.iter().map(|key| (*key, 0, vec![])).collect();
        let account_infos: Vec<AccountInfo> = storage
            .iter_mut()
            .map(|(key, lamports, data)| {
                AccountInfo::new(key, false, true, lamports, data, &owner, false, Epoch::default())
            })
            .collect();

        let mut cpi_instruction =
            Instruction::new_with_bytes(f.program_id, &f.data, f.ix_accounts.clone());
        let mut cpi_account_infos: Vec<AccountInfo> = account_infos[..2].to_vec();

        assert_eq!(
            add_extra_accounts_for_cpi(
                &mut cpi_instruction,
                &mut cpi_account_infos,
                &f.config_data,
                &account_infos,
                &PackedSeedProvider,
                &ProgramAddressOracle,
            ),
            Err(ResolutionError::IncorrectAccount)
        );

        // Nothing appended
        assert_eq!(cpi_instruction.accounts, f.ix_accounts);
        assert_eq!(cpi_account_infos.len(), 2);
    }
}
