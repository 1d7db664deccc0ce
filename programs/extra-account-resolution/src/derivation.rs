//! Program Address Derivation
//!
//! The resolution engine never calls `Pubkey::find_program_address`
//! directly. It goes through [`AddressOracle`], so tests can substitute a
//! double that returns fixed addresses and records what it was asked.

use crate::error::ResolutionError;
use solana_program::pubkey::{Pubkey, MAX_SEEDS, MAX_SEED_LEN};

/// Computes a program-derived address from seeds and an owning program.
pub trait AddressOracle {
    /// Deterministic. Fails with `AddressSpaceExhausted` when no bump seed
    /// yields an off-curve address.
    fn derive(&self, seeds: &[&[u8]], owner: &Pubkey) -> Result<Pubkey, ResolutionError>;
}

/// The runtime's derivation: `Pubkey::try_find_program_address`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgramAddressOracle;

impl AddressOracle for ProgramAddressOracle {
    fn derive(&self, seeds: &[&[u8]], owner: &Pubkey) -> Result<Pubkey, ResolutionError> {
        // The bump seed takes one of the MAX_SEEDS slots.
        if seeds.len() >= MAX_SEEDS || seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
            return Err(ResolutionError::InvalidSeedConfig);
        }
        Pubkey::try_find_program_address(seeds, owner)
            .map(|(address, _bump)| address)
            .ok_or(ResolutionError::AddressSpaceExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_find_program_address() {
        let owner = Pubkey::new_unique();
        let seeds: &[&[u8]] = &[b"seed", &[1, 2, 3]];

        let (expected, _) = Pubkey::find_program_address(seeds, &owner);
        assert_eq!(ProgramAddressOracle.derive(seeds, &owner).unwrap(), expected);
    }

    #[test]
    fn test_owner_changes_address() {
        let seeds: &[&[u8]] = &[b"seed"];
        let a = ProgramAddressOracle
            .derive(seeds, &Pubkey::new_unique())
            .unwrap();
        let b = ProgramAddressOracle
            .derive(seeds, &Pubkey::new_unique())
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_oversized_seeds() {
        let owner = Pubkey::new_unique();
        let long = [0u8; MAX_SEED_LEN + 1];
        assert_eq!(
            ProgramAddressOracle.derive(&[&long], &owner),
            Err(ResolutionError::InvalidSeedConfig)
        );

        let seed: &[u8] = b"x";
        let many = vec![seed; MAX_SEEDS];
        assert_eq!(
            ProgramAddressOracle.derive(&many, &owner),
            Err(ResolutionError::InvalidSeedConfig)
        );
    }
}
