//! Account State Structures
//!
//! The byte layouts stored in a hook program's config account.
//!
//! # Types
//!
//! | Type | Size | Description |
//! |------|------|-------------|
//! | ExtraAccountMeta | 35 bytes | One extra account descriptor |
//! | ExtraAccountMetaList | 4 + 35 * n bytes | Count header + descriptor run |
//!
//! # Serialization
//!
//! - Little-endian for integers
//! - No padding between fields
//! - Same data always produces same bytes

// =============================================================================
// SUBMODULES
// =============================================================================

pub mod descriptor;
pub mod descriptor_list;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use descriptor::{AddressStrategy, ExtraAccountMeta, DELEGATED_OWNER_OFFSET};
pub use descriptor_list::ExtraAccountMetaList;

use crate::error::ResolutionError;

// =============================================================================
// PACK TRAIT
// =============================================================================

/// Trait for packing/unpacking fixed-size records to/from bytes.
///
/// The layout is a wire contract shared with every client that reads a
/// config account.
///
/// # Example Implementation
///
/// ```ignore
/// impl Pack for MyRecord {
///     const LEN: usize = 40;
///
///     fn unpack(input: &[u8]) -> Result<Self, ResolutionError> {
///         if input.len() < Self::LEN {
///             return Err(ResolutionError::MalformedDescriptor);
///         }
///         let input = array_ref![input, 0, Self::LEN];
///         // Parse fields...
///     }
///
///     fn pack(&self, output: &mut [u8]) -> Result<(), ResolutionError> {
///         let output = array_mut_ref![output, 0, Self::LEN];
///         // Write fields...
///     }
/// }
/// ```
pub trait Pack: Sized {
    /// The fixed size in bytes when serialized.
    const LEN: usize;

    /// Deserialize from the first `LEN` bytes of `input`.
    ///
    /// Trailing bytes are ignored. Fails with `MalformedDescriptor` if fewer
    /// than `LEN` bytes are available.
    fn unpack(input: &[u8]) -> Result<Self, ResolutionError>;

    /// Serialize into the first `LEN` bytes of `output`.
    fn pack(&self, output: &mut [u8]) -> Result<(), ResolutionError>;

    /// Unpack with exact length validation.
    fn unpack_from_slice(src: &[u8]) -> Result<Self, ResolutionError> {
        if src.len() != Self::LEN {
            return Err(ResolutionError::MalformedDescriptor);
        }
        Self::unpack(src)
    }

    /// Pack with exact length validation.
    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), ResolutionError> {
        if dst.len() != Self::LEN {
            return Err(ResolutionError::MalformedDescriptor);
        }
        self.pack(dst)
    }
}
