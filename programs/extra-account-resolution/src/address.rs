//! Config Account Address
//!
//! Each (hook program, mint) pair has exactly one config account holding its
//! descriptor list, at the PDA of `[b"extra-account-metas", mint]` under the
//! hook program. Nothing here is cached; the address is recomputed on demand.

use crate::derivation::AddressOracle;
use crate::error::ResolutionError;
use solana_program::pubkey::Pubkey;

/// Fixed seed tag of the config account.
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

/// Seeds for the config account of `mint`, without the bump.
pub fn collect_extra_account_metas_seeds(mint: &Pubkey) -> [&[u8]; 2] {
    [EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()]
}

/// Seeds for the config account of `mint`, including the bump, for
/// `invoke_signed`.
pub fn collect_extra_account_metas_signer_seeds<'a>(
    mint: &'a Pubkey,
    bump_seed: &'a [u8],
) -> [&'a [u8]; 3] {
    [EXTRA_ACCOUNT_METAS_SEED, mint.as_ref(), bump_seed]
}

/// Config account address derived through any [`AddressOracle`].
pub fn config_address<O>(
    oracle: &O,
    hook_program_id: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey, ResolutionError>
where
    O: AddressOracle + ?Sized,
{
    oracle.derive(&collect_extra_account_metas_seeds(mint), hook_program_id)
}

/// Config account address and bump seed.
pub fn get_extra_account_metas_address_and_bump_seed(
    mint: &Pubkey,
    hook_program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(&collect_extra_account_metas_seeds(mint), hook_program_id)
}

/// Config account address.
pub fn get_extra_account_metas_address(mint: &Pubkey, hook_program_id: &Pubkey) -> Pubkey {
    get_extra_account_metas_address_and_bump_seed(mint, hook_program_id).0
}
