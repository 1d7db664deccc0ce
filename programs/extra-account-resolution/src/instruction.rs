//! Instruction Types
//!
//! Instructions of the reference hook program.
//!
//! # Instruction Format
//!
//! ```text
//! [discriminant: u8][data: varies]
//! ```
//!
//! | Value | Instruction | Data |
//! |-------|-------------|------|
//! | 0 | InitializeExtraAccountMetaList | encoded descriptor list |
//! | 1 | Execute | amount: u64 LE |

use crate::address::get_extra_account_metas_address;
use crate::error::ResolutionError;
use crate::state::{ExtraAccountMeta, ExtraAccountMetaList};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

// =============================================================================
// INSTRUCTION ENUM
// =============================================================================

/// Instructions supported by the reference hook program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookInstruction {
    /// Create the config account for a mint and store its descriptor list.
    ///
    /// Accounts expected:
    ///
    /// 0. `[writable]` Config account, PDA of `[b"extra-account-metas", mint]`
    /// 1. `[]` Mint
    /// 2. `[writable, signer]` Payer
    /// 3. `[]` System program
    InitializeExtraAccountMetaList {
        /// Descriptors to store, in resolution order.
        extra_account_metas: Vec<ExtraAccountMeta>,
    },

    /// Validate that a transfer carries the extra accounts its mint's
    /// descriptor list resolves to.
    ///
    /// Accounts expected:
    ///
    /// 0. `[]` Source token account
    /// 1. `[]` Mint
    /// 2. `[]` Destination token account
    /// 3. `[]` Source owner
    /// 4. `[]` Config account
    /// 5. ..5+N `[]` Extra accounts, in descriptor order
    Execute {
        /// Amount being transferred.
        amount: u64,
    },
}

// =============================================================================
// INSTRUCTION PARSING (UNPACK)
// =============================================================================

impl HookInstruction {
    /// Parse instruction data.
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&discriminant, rest) = input
            .split_first()
            .ok_or(ResolutionError::InvalidInstruction)?;

        Ok(match discriminant {
            0 => {
                let list = ExtraAccountMetaList::unpack(rest)
                    .map_err(|_| ResolutionError::InvalidInstruction)?;
                HookInstruction::InitializeExtraAccountMetaList {
                    extra_account_metas: list.entries,
                }
            }
            1 => {
                let amount = rest
                    .get(..8)
                    .and_then(|bytes| bytes.try_into().ok())
                    .map(u64::from_le_bytes)
                    .ok_or(ResolutionError::InvalidInstruction)?;
                HookInstruction::Execute { amount }
            }
            _ => return Err(ResolutionError::InvalidInstruction.into()),
        })
    }

    // =========================================================================
    // INSTRUCTION SERIALIZATION (PACK)
    // =========================================================================

    /// Serialize into instruction data.
    ///
    /// Fails with `Overflow` if the descriptor list is too long to encode.
    pub fn pack(&self) -> Result<Vec<u8>, ResolutionError> {
        let mut buf = Vec::new();
        match self {
            HookInstruction::InitializeExtraAccountMetaList {
                extra_account_metas,
            } => {
                buf.push(0);
                buf.extend_from_slice(
                    &ExtraAccountMetaList::new(extra_account_metas.clone())?.pack()?,
                );
            }
            HookInstruction::Execute { amount } => {
                buf.push(1);
                buf.extend_from_slice(&amount.to_le_bytes());
            }
        }
        Ok(buf)
    }
}

// =============================================================================
// INSTRUCTION BUILDERS
// =============================================================================

/// Build an `InitializeExtraAccountMetaList` instruction.
pub fn initialize_extra_account_meta_list(
    program_id: &Pubkey,
    mint: &Pubkey,
    payer: &Pubkey,
    extra_account_metas: &[ExtraAccountMeta],
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(get_extra_account_metas_address(mint, program_id), false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: HookInstruction::InitializeExtraAccountMetaList {
            extra_account_metas: extra_account_metas.to_vec(),
        }
        .pack()?,
    })
}

/// Build an `Execute` instruction without extra accounts.
///
/// Use `offchain::add_extra_account_metas_to_instruction` to append them.
pub fn execute(
    program_id: &Pubkey,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*source, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(*destination, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(get_extra_account_metas_address(mint, program_id), false),
        ],
        data: HookInstruction::Execute { amount }.pack()?,
    })
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::Seed;

    #[test]
    fn test_execute_layout() {
        let data = HookInstruction::Execute { amount: 1_000 }.pack().unwrap();
        assert_eq!(data, vec![1, 0xe8, 0x03, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            HookInstruction::unpack(&data).unwrap(),
            HookInstruction::Execute { amount: 1_000 }
        );
    }

    #[test]
    fn test_initialize_carries_encoded_list() {
        let metas = vec![
            ExtraAccountMeta::new_with_pubkey(&Pubkey::new_unique(), false, true),
            ExtraAccountMeta::new_with_seeds(&[Seed::AccountKey { index: 1 }], false, false)
                .unwrap(),
        ];
        let instruction = HookInstruction::InitializeExtraAccountMetaList {
            extra_account_metas: metas.clone(),
        };
        let data = instruction.pack().unwrap();

        assert_eq!(data[0], 0);
        assert_eq!(
            ExtraAccountMetaList::unpack(&data[1..]).unwrap(),
            ExtraAccountMetaList::new(metas).unwrap()
        );
        assert_eq!(HookInstruction::unpack(&data).unwrap(), instruction);
    }

    #[test]
    fn test_initialize_uses_list_encoder() {
        let metas = vec![ExtraAccountMeta::new_with_pubkey(
            &Pubkey::new_unique(),
            true,
            true,
        )];
        let data = HookInstruction::InitializeExtraAccountMetaList {
            extra_account_metas: metas.clone(),
        }
        .pack()
        .unwrap();

        let mut expected = vec![0u8];
        expected.extend_from_slice(&ExtraAccountMetaList::new(metas).unwrap().pack().unwrap());
        assert_eq!(data, expected);

        let empty = HookInstruction::InitializeExtraAccountMetaList {
            extra_account_metas: vec![],
        }
        .pack()
        .unwrap();
        assert_eq!(empty, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_invalid_data() {
        assert!(HookInstruction::unpack(&[]).is_err());
        assert!(HookInstruction::unpack(&[1, 0, 0]).is_err());
        assert!(HookInstruction::unpack(&[0, 1]).is_err());
        assert_eq!(
            HookInstruction::unpack(&[7]),
            Err(ResolutionError::InvalidInstruction.into())
        );
    }

    #[test]
    fn test_execute_builder_accounts() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ix = execute(
            &program_id,
            &Pubkey::new_unique(),
            &mint,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            5,
        )
        .unwrap();
        assert_eq!(ix.accounts.len(), 5);
        assert_eq!(
            ix.accounts[4].pubkey,
            get_extra_account_metas_address(&mint, &program_id)
        );
    }
}
