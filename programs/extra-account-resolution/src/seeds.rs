//! Seed Configuration
//!
//! A derived descriptor does not store its address. It stores a 32-byte
//! recipe (the "address config") for building the seeds the address is
//! derived from. This module holds:
//!
//! - [`SeedProvider`]: the seam the resolution engine calls to turn an
//!   address config into concrete seed bytes
//! - [`Seed`]: the packed recipe format understood by the default provider
//! - [`PackedSeedProvider`]: the default provider
//!
//! # Packed Layout
//!
//! Seeds are written back-to-back into the 32 bytes, zero padded:
//!
//! ```text
//! ┌─────┬──────────────────┬─────────────────────────┬──────────────────────────┐
//! │ Tag │ Variant          │ Encoding                │ Produces                 │
//! ├─────┼──────────────────┼─────────────────────────┼──────────────────────────┤
//! │ 0   │ (end)            │ [0]                     │ stops parsing            │
//! │ 1   │ Literal          │ [1, len, bytes...]      │ the bytes                │
//! │ 2   │ InstructionData  │ [2, index, length]      │ data[index..index+len]   │
//! │ 3   │ AccountKey       │ [3, index]              │ resolved[index] address  │
//! └─────┴──────────────────┴─────────────────────────┴──────────────────────────┘
//! ```

use crate::error::ResolutionError;
use solana_program::instruction::AccountMeta;

/// Size of the opaque address config carried by every descriptor.
pub const ADDRESS_CONFIG_LEN: usize = 32;

// =============================================================================
// SEED PROVIDER SEAM
// =============================================================================

/// Turns a descriptor's address config into an ordered list of seeds.
///
/// Implementations must be pure: the same `(address_config,
/// resolved_so_far, instruction_data)` always yields the same seeds.
///
/// `resolved_so_far` is every account resolved before the current
/// descriptor (base accounts first, then earlier extras).
pub trait SeedProvider {
    /// Fails with `InvalidSeedConfig` if the config cannot be interpreted.
    fn unpack_seeds(
        &self,
        address_config: &[u8; ADDRESS_CONFIG_LEN],
        resolved_so_far: &[AccountMeta],
        instruction_data: &[u8],
    ) -> Result<Vec<Vec<u8>>, ResolutionError>;
}

/// Default provider: reads the config as a packed list of [`Seed`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackedSeedProvider;

impl SeedProvider for PackedSeedProvider {
    fn unpack_seeds(
        &self,
        address_config: &[u8; ADDRESS_CONFIG_LEN],
        resolved_so_far: &[AccountMeta],
        instruction_data: &[u8],
    ) -> Result<Vec<Vec<u8>>, ResolutionError> {
        Seed::unpack_address_config(address_config)?
            .iter()
            .map(|seed| seed.resolve(resolved_so_far, instruction_data))
            .collect()
    }
}

// =============================================================================
// SEED
// =============================================================================

/// One entry of a packed seed recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    /// Fixed bytes, e.g. a `b"counter"` prefix.
    Literal {
        /// The seed bytes, at most 30 so the entry fits the config.
        bytes: Vec<u8>,
    },

    /// A slice of the instruction data being executed.
    InstructionData {
        /// Start offset into the instruction data.
        index: u8,
        /// Number of bytes to take.
        length: u8,
    },

    /// The address of an account resolved earlier in the pass.
    AccountKey {
        /// Position in the resolved list (base accounts come first).
        index: u8,
    },
}

impl Seed {
    const TAG_END: u8 = 0;
    const TAG_LITERAL: u8 = 1;
    const TAG_INSTRUCTION_DATA: u8 = 2;
    const TAG_ACCOUNT_KEY: u8 = 3;

    /// Number of bytes this seed occupies once packed.
    pub fn packed_len(&self) -> usize {
        match self {
            // tag + length byte + bytes
            Seed::Literal { bytes } => 2usize.saturating_add(bytes.len()),
            Seed::InstructionData { .. } => 3,
            Seed::AccountKey { .. } => 2,
        }
    }

    /// Write this seed at the start of `dst`.
    fn pack(&self, dst: &mut [u8]) -> Result<(), ResolutionError> {
        if dst.len() < self.packed_len() {
            return Err(ResolutionError::InvalidSeedConfig);
        }
        match self {
            Seed::Literal { bytes } => {
                let len =
                    u8::try_from(bytes.len()).map_err(|_| ResolutionError::InvalidSeedConfig)?;
                dst[0] = Self::TAG_LITERAL;
                dst[1] = len;
                dst[2..2 + bytes.len()].copy_from_slice(bytes);
            }
            Seed::InstructionData { index, length } => {
                dst[0] = Self::TAG_INSTRUCTION_DATA;
                dst[1] = *index;
                dst[2] = *length;
            }
            Seed::AccountKey { index } => {
                dst[0] = Self::TAG_ACCOUNT_KEY;
                dst[1] = *index;
            }
        }
        Ok(())
    }

    /// Pack a seed list into a zero-padded 32-byte address config.
    ///
    /// Fails with `InvalidSeedConfig` if the seeds do not fit.
    pub fn pack_into_address_config(
        seeds: &[Seed],
    ) -> Result<[u8; ADDRESS_CONFIG_LEN], ResolutionError> {
        let mut config = [0u8; ADDRESS_CONFIG_LEN];
        let mut offset = 0usize;
        for seed in seeds {
            let end = offset
                .checked_add(seed.packed_len())
                .ok_or(ResolutionError::InvalidSeedConfig)?;
            if end > ADDRESS_CONFIG_LEN {
                return Err(ResolutionError::InvalidSeedConfig);
            }
            seed.pack(&mut config[offset..end])?;
            offset = end;
        }
        Ok(config)
    }

    /// Parse a packed address config back into its seed list.
    ///
    /// Parsing stops at the first zero tag or at the end of the 32 bytes.
    pub fn unpack_address_config(
        config: &[u8; ADDRESS_CONFIG_LEN],
    ) -> Result<Vec<Seed>, ResolutionError> {
        let mut seeds = Vec::new();
        let mut rest: &[u8] = config;

        while let Some((&tag, body)) = rest.split_first() {
            let (seed, remaining) = match tag {
                Self::TAG_END => break,
                Self::TAG_LITERAL => {
                    let (&len, body) = body
                        .split_first()
                        .ok_or(ResolutionError::InvalidSeedConfig)?;
                    let len = len as usize;
                    if body.len() < len {
                        return Err(ResolutionError::InvalidSeedConfig);
                    }
                    let (bytes, remaining) = body.split_at(len);
                    (
                        Seed::Literal {
                            bytes: bytes.to_vec(),
                        },
                        remaining,
                    )
                }
                Self::TAG_INSTRUCTION_DATA => {
                    if body.len() < 2 {
                        return Err(ResolutionError::InvalidSeedConfig);
                    }
                    (
                        Seed::InstructionData {
                            index: body[0],
                            length: body[1],
                        },
                        &body[2..],
                    )
                }
                Self::TAG_ACCOUNT_KEY => {
                    let (&index, remaining) = body
                        .split_first()
                        .ok_or(ResolutionError::InvalidSeedConfig)?;
                    (Seed::AccountKey { index }, remaining)
                }
                _ => return Err(ResolutionError::InvalidSeedConfig),
            };
            seeds.push(seed);
            rest = remaining;
        }

        Ok(seeds)
    }

    /// Produce the concrete seed bytes for this entry.
    ///
    /// # Errors
    ///
    /// - `InvalidSeedConfig`: the instruction data slice is out of range
    /// - `AccountNotFound`: the account index has not been resolved yet
    pub fn resolve(
        &self,
        resolved_so_far: &[AccountMeta],
        instruction_data: &[u8],
    ) -> Result<Vec<u8>, ResolutionError> {
        match self {
            Seed::Literal { bytes } => Ok(bytes.clone()),
            Seed::InstructionData { index, length } => {
                let start = *index as usize;
                let end = start.saturating_add(*length as usize);
                instruction_data
                    .get(start..end)
                    .map(<[u8]>::to_vec)
                    .ok_or(ResolutionError::InvalidSeedConfig)
            }
            Seed::AccountKey { index } => resolved_so_far
                .get(*index as usize)
                .map(|meta| meta.pubkey.to_bytes().to_vec())
                .ok_or(ResolutionError::AccountNotFound),
        }
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
