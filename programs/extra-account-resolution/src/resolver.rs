//! Resolution Engine
//!
//! Expands descriptors into concrete account metas, strictly left to right.
//!
//! # Per-Descriptor Algorithm
//!
//! ```text
//! Literal              → address_config is the address (no seeds, no derivation)
//! SelfDerived          → seeds = provider(config, resolved, data)
//!                        address = oracle(seeds, hook_program_id)
//! DelegatedDerived(i)  → owner = resolved[i]            (AccountNotFound if absent)
//!                        seeds = provider(config, resolved, data)
//!                        address = oracle(seeds, owner)
//! ```
//!
//! Each result is appended to the resolved list before the next descriptor
//! runs, so later descriptors can use it as a seed or as an owning program.
//! The first failure aborts the pass; no partial list is returned. Nothing
//! here logs; callers report the returned error.

use crate::derivation::AddressOracle;
use crate::error::ResolutionError;
use crate::seeds::SeedProvider;
use crate::state::{AddressStrategy, ExtraAccountMeta};
use solana_program::{instruction::AccountMeta, pubkey::Pubkey};

// =============================================================================
// ONE-SHOT ENTRY POINT
// =============================================================================

/// Resolve `descriptors` with no base accounts.
///
/// Equivalent to `ExtraAccountResolver::new(..).resolve_all(descriptors)`.
pub fn resolve_all<S, O>(
    descriptors: &[ExtraAccountMeta],
    hook_program_id: &Pubkey,
    instruction_data: &[u8],
    seed_provider: &S,
    oracle: &O,
) -> Result<Vec<AccountMeta>, ResolutionError>
where
    S: SeedProvider + ?Sized,
    O: AddressOracle + ?Sized,
{
    ExtraAccountResolver::new(hook_program_id, instruction_data, seed_provider, oracle)
        .resolve_all(descriptors)
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Everything one resolution pass needs besides the descriptors.
///
/// Base accounts (the accounts an instruction already carries) sit at the
/// front of the resolved list: delegated-owner indices and `AccountKey`
/// seeds count from the first base account.
pub struct ExtraAccountResolver<'a, S: ?Sized, O: ?Sized> {
    hook_program_id: &'a Pubkey,
    instruction_data: &'a [u8],
    seed_provider: &'a S,
    oracle: &'a O,
    base_accounts: Vec<AccountMeta>,
}

impl<'a, S, O> ExtraAccountResolver<'a, S, O>
where
    S: SeedProvider + ?Sized,
    O: AddressOracle + ?Sized,
{
    /// Resolver with an empty base.
    pub fn new(
        hook_program_id: &'a Pubkey,
        instruction_data: &'a [u8],
        seed_provider: &'a S,
        oracle: &'a O,
    ) -> Self {
        Self {
            hook_program_id,
            instruction_data,
            seed_provider,
            oracle,
            base_accounts: Vec::new(),
        }
    }

    /// Prefix the resolved list with accounts already in the instruction.
    pub fn with_base_accounts(mut self, base_accounts: &[AccountMeta]) -> Self {
        self.base_accounts = base_accounts.to_vec();
        self
    }

    /// Resolve every descriptor in order.
    ///
    /// Returns only the newly resolved metas (base accounts excluded), one
    /// per descriptor, in descriptor order.
    pub fn resolve_all(
        &self,
        descriptors: &[ExtraAccountMeta],
    ) -> Result<Vec<AccountMeta>, ResolutionError> {
        let base_len = self.base_accounts.len();
        let mut resolved = Vec::with_capacity(base_len.saturating_add(descriptors.len()));
        resolved.extend_from_slice(&self.base_accounts);

        for descriptor in descriptors {
            let meta = self.resolve_one(descriptor, &resolved)?;
            resolved.push(meta);
        }

        Ok(resolved.split_off(base_len))
    }

    /// Resolve a single descriptor against everything resolved before it.
    pub fn resolve_one(
        &self,
        descriptor: &ExtraAccountMeta,
        resolved_so_far: &[AccountMeta],
    ) -> Result<AccountMeta, ResolutionError> {
        let owner = match descriptor.strategy() {
            AddressStrategy::Literal => {
                return Ok(AccountMeta {
                    pubkey: Pubkey::new_from_array(descriptor.address_config),
                    is_signer: descriptor.is_signer,
                    is_writable: descriptor.is_writable,
                });
            }
            AddressStrategy::SelfDerived => self.hook_program_id,
            AddressStrategy::DelegatedDerived { index } => {
                owning_program(index, resolved_so_far)?
            }
        };

        let seeds = self
            .seed_provider
            .unpack_seeds(
                &descriptor.address_config,
                resolved_so_far,
                self.instruction_data,
            )?;
        let seed_refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
        let pubkey = self.oracle.derive(&seed_refs, owner)?;

        Ok(AccountMeta {
            pubkey,
            is_signer: descriptor.is_signer,
            is_writable: descriptor.is_writable,
        })
    }
}

/// Look up the owning program of a delegated descriptor.
fn owning_program(
    index: i16,
    resolved_so_far: &[AccountMeta],
) -> Result<&Pubkey, ResolutionError> {
    usize::try_from(index)
        .ok()
        .and_then(|index| resolved_so_far.get(index))
        .map(|meta| &meta.pubkey)
        .ok_or(ResolutionError::AccountNotFound)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
