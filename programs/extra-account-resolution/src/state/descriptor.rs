//! Extra Account Descriptor
//!
//! One request for an account that must be appended to a hook invocation.
//! The descriptor either carries the address itself or a recipe for deriving
//! it as a program address.
//!
//! # Size: 35 bytes

use crate::error::ResolutionError;
use crate::seeds::{Seed, ADDRESS_CONFIG_LEN};
use crate::state::Pack;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{instruction::AccountMeta, pubkey::Pubkey};

/// Discriminators at or above this value delegate ownership to an account
/// resolved earlier: `index = discriminator - DELEGATED_OWNER_OFFSET`.
pub const DELEGATED_OWNER_OFFSET: u8 = 128;

// =============================================================================
// DESCRIPTOR STRUCTURE
// =============================================================================

/// Extra account descriptor.
///
/// # Memory Layout (35 bytes total)
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────┐
/// │ Offset │ Size │ Field            │ Type                        │
/// ├────────┼──────┼──────────────────┼─────────────────────────────┤
/// │ 0      │ 1    │ discriminator    │ u8                          │
/// │ 1      │ 32   │ address_config   │ [u8; 32]                    │
/// │ 33     │ 1    │ is_signer        │ bool (0 or 1)               │
/// │ 34     │ 1    │ is_writable      │ bool (0 or 1)               │
/// ├────────┼──────┼──────────────────┼─────────────────────────────┤
/// │ Total  │ 35   │                  │                             │
/// └─────────────────────────────────────────────────────────────────┘
/// ```
///
/// # Discriminator
///
/// | Value | Meaning | address_config holds |
/// |-------|---------|----------------------|
/// | 0 | Literal address | the raw pubkey |
/// | 1 | PDA owned by the hook program | packed seeds |
/// | other | PDA owned by resolved account `value - 128` | packed seeds |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtraAccountMeta {
    /// Resolution strategy tag, see [`ExtraAccountMeta::strategy`].
    pub discriminator: u8,

    /// Raw pubkey (literal) or packed seed recipe (derived).
    pub address_config: [u8; ADDRESS_CONFIG_LEN],

    /// Whether the resolved account must sign.
    pub is_signer: bool,

    /// Whether the resolved account is writable.
    pub is_writable: bool,
}

/// How a descriptor's address is obtained, decoded once from the
/// discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressStrategy {
    /// `address_config` is the address.
    Literal,

    /// Derived from seeds under the hook program itself.
    SelfDerived,

    /// Derived from seeds under the account at `index` in the resolved list.
    ///
    /// Discriminators 2..=127 produce a negative index, which can never
    /// name a resolved account.
    DelegatedDerived {
        /// `discriminator - 128`.
        index: i16,
    },
}

// =============================================================================
// CONSTRUCTORS AND CLASSIFICATION
// =============================================================================

impl ExtraAccountMeta {
    /// Descriptor for a fixed address.
    pub fn new_with_pubkey(pubkey: &Pubkey, is_signer: bool, is_writable: bool) -> Self {
        Self {
            discriminator: 0,
            address_config: pubkey.to_bytes(),
            is_signer,
            is_writable,
        }
    }

    /// Descriptor for a PDA owned by the hook program.
    pub fn new_with_seeds(
        seeds: &[Seed],
        is_signer: bool,
        is_writable: bool,
    ) -> Result<Self, ResolutionError> {
        Ok(Self {
            discriminator: 1,
            address_config: Seed::pack_into_address_config(seeds)?,
            is_signer,
            is_writable,
        })
    }

    /// Descriptor for a PDA owned by the program found at `program_index`
    /// in the resolved list.
    ///
    /// Fails with `Overflow` if `program_index` does not fit the
    /// discriminator (must be below 128).
    pub fn new_external_pda_with_seeds(
        program_index: u8,
        seeds: &[Seed],
        is_signer: bool,
        is_writable: bool,
    ) -> Result<Self, ResolutionError> {
        let discriminator = DELEGATED_OWNER_OFFSET
            .checked_add(program_index)
            .ok_or(ResolutionError::Overflow)?;
        Ok(Self {
            discriminator,
            address_config: Seed::pack_into_address_config(seeds)?,
            is_signer,
            is_writable,
        })
    }

    /// Classify the discriminator.
    pub fn strategy(&self) -> AddressStrategy {
        match self.discriminator {
            0 => AddressStrategy::Literal,
            1 => AddressStrategy::SelfDerived,
            other => AddressStrategy::DelegatedDerived {
                index: i16::from(other) - i16::from(DELEGATED_OWNER_OFFSET),
            },
        }
    }
}

impl From<&AccountMeta> for ExtraAccountMeta {
    fn from(meta: &AccountMeta) -> Self {
        Self::new_with_pubkey(&meta.pubkey, meta.is_signer, meta.is_writable)
    }
}

// =============================================================================
// PACK TRAIT IMPLEMENTATION
// =============================================================================

impl Pack for ExtraAccountMeta {
    /// 1 (discriminator) + 32 (address_config) + 1 (is_signer) + 1 (is_writable)
    const LEN: usize = 1 + ADDRESS_CONFIG_LEN + 1 + 1;

    fn unpack(input: &[u8]) -> Result<Self, ResolutionError> {
        if input.len() < Self::LEN {
            return Err(ResolutionError::MalformedDescriptor);
        }
        let input = array_ref![input, 0, ExtraAccountMeta::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (discriminator, address_config, is_signer, is_writable) =
            array_refs![input, 1, ADDRESS_CONFIG_LEN, 1, 1];

        Ok(ExtraAccountMeta {
            discriminator: discriminator[0],
            address_config: *address_config,
            is_signer: is_signer[0] != 0,
            is_writable: is_writable[0] != 0,
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ResolutionError> {
        if output.len() < Self::LEN {
            return Err(ResolutionError::MalformedDescriptor);
        }
        *array_mut_ref![output, 0, ExtraAccountMeta::LEN] = self.to_bytes();
        Ok(())
    }
}

impl ExtraAccountMeta {
    /// Serialize into a fixed 35-byte array.
    pub fn to_bytes(&self) -> [u8; ExtraAccountMeta::LEN] {
        let mut output = [0u8; ExtraAccountMeta::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (discriminator_dst, address_config_dst, is_signer_dst, is_writable_dst) =
            mut_array_refs![&mut output, 1, ADDRESS_CONFIG_LEN, 1, 1];

        discriminator_dst[0] = self.discriminator;
        *address_config_dst = self.address_config;
        is_signer_dst[0] = self.is_signer as u8;
        is_writable_dst[0] = self.is_writable as u8;

        output
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
