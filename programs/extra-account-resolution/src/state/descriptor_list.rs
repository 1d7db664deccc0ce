//! Extra Account Descriptor List
//!
//! The content of a hook program's config account: a count header followed
//! by a run of 35-byte descriptors.
//!
//! # Layout
//!
//! ```text
//! ┌────────┬──────────┬─────────┬──────────────────────────────────┐
//! │ Offset │ Size     │ Field   │ Type                             │
//! ├────────┼──────────┼─────────┼──────────────────────────────────┤
//! │ 0      │ 4        │ count   │ u32 little-endian (advisory)     │
//! │ 4      │ 35 * n   │ entries │ ExtraAccountMeta[]               │
//! └────────┴──────────┴─────────┴──────────────────────────────────┘
//! ```
//!
//! # Permissive Tail
//!
//! The decoder reads as many whole descriptors as fit after the header and
//! never cross-checks that number against `count`. Leftover bytes shorter
//! than one descriptor are dropped silently.

use crate::error::ResolutionError;
use crate::state::{ExtraAccountMeta, Pack};
use arrayref::array_ref;

/// A decoded descriptor list.
///
/// `count` is kept exactly as read so that re-encoding reproduces the
/// decoded header, even when it disagrees with `entries.len()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtraAccountMetaList {
    /// The declared count from the header.
    pub count: u32,

    /// Every whole descriptor found after the header, in order.
    pub entries: Vec<ExtraAccountMeta>,
}

impl ExtraAccountMetaList {
    /// Size of the count header.
    pub const HEADER_LEN: usize = 4;

    /// Build a list whose header matches its entries.
    pub fn new(entries: Vec<ExtraAccountMeta>) -> Result<Self, ResolutionError> {
        let count = u32::try_from(entries.len()).map_err(|_| ResolutionError::Overflow)?;
        Ok(Self { count, entries })
    }

    /// Byte size needed to hold `num_items` descriptors.
    pub fn size_of(num_items: usize) -> Result<usize, ResolutionError> {
        num_items
            .checked_mul(ExtraAccountMeta::LEN)
            .and_then(|entries| entries.checked_add(Self::HEADER_LEN))
            .ok_or(ResolutionError::Overflow)
    }

    /// Byte size of this list once encoded.
    pub fn packed_len(&self) -> Result<usize, ResolutionError> {
        Self::size_of(self.entries.len())
    }

    /// The decoded descriptors.
    pub fn entries(&self) -> &[ExtraAccountMeta] {
        &self.entries
    }

    // =========================================================================
    // DECODE
    // =========================================================================

    /// Decode a list from account data.
    ///
    /// # Errors
    ///
    /// `MalformedDescriptor` if the buffer is shorter than the count header.
    /// A short tail after the last whole descriptor is not an error.
    pub fn unpack(input: &[u8]) -> Result<Self, ResolutionError> {
        if input.len() < Self::HEADER_LEN {
            return Err(ResolutionError::MalformedDescriptor);
        }
        let (header, body) = input.split_at(Self::HEADER_LEN);
        let count = u32::from_le_bytes(*array_ref![header, 0, 4]);

        let entries = body
            .chunks_exact(ExtraAccountMeta::LEN)
            .map(ExtraAccountMeta::unpack)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { count, entries })
    }

    // =========================================================================
    // ENCODE
    // =========================================================================

    /// Encode into `output`, which must be at least `packed_len()` bytes.
    ///
    /// Bytes past `packed_len()` are left untouched.
    pub fn pack_into_slice(&self, output: &mut [u8]) -> Result<(), ResolutionError> {
        if output.len() < self.packed_len()? {
            return Err(ResolutionError::MalformedDescriptor);
        }
        let (header, body) = output.split_at_mut(Self::HEADER_LEN);
        header.copy_from_slice(&self.count.to_le_bytes());

        for (entry, dst) in self
            .entries
            .iter()
            .zip(body.chunks_exact_mut(ExtraAccountMeta::LEN))
        {
            entry.pack(dst)?;
        }
        Ok(())
    }

    /// Encode into a freshly allocated buffer of exactly `packed_len()` bytes.
    pub fn pack(&self) -> Result<Vec<u8>, ResolutionError> {
        let mut output = vec![0u8; self.packed_len()?];
        self.pack_into_slice(&mut output)?;
        Ok(output)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::Seed;
    use solana_program::pubkey::Pubkey;

    fn sample_entries() -> Vec<ExtraAccountMeta> {
        vec![
            ExtraAccountMeta::new_with_pubkey(&Pubkey::new_unique(), false, true),
            ExtraAccountMeta::new_with_seeds(
                &[
                    Seed::Literal {
                        bytes: b"counter".to_vec(),
                    },
                    Seed::AccountKey { index: 0 },
                ],
                false,
                true,
            )
            .unwrap(),
            ExtraAccountMeta::new_external_pda_with_seeds(
                0,
                &[Seed::InstructionData {
                    index: 1,
                    length: 8,
                }],
                false,
                false,
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_encode_decode_preserves_entries_and_count() {
        let list = ExtraAccountMetaList::new(sample_entries()).unwrap();
        let packed = list.pack().unwrap();
        assert_eq!(packed.len(), 4 + 3 * 35);
        assert_eq!(&packed[..4], &3u32.to_le_bytes());

        let decoded = ExtraAccountMetaList::unpack(&packed).unwrap();
        assert_eq!(decoded, list);
    }

    /// A header that disagrees with the entries survives a round trip.
    #[test]
    fn test_advisory_count_is_preserved() {
        let list = ExtraAccountMetaList {
            count: 42,
            entries: sample_entries(),
        };
        let decoded = ExtraAccountMetaList::unpack(&list.pack().unwrap()).unwrap();
        assert_eq!(decoded.count, 42);
        assert_eq!(decoded.entries.len(), 3);
        assert_eq!(decoded.pack().unwrap(), list.pack().unwrap());
    }

    #[test]
    fn test_partial_tail_is_dropped() {
        let list = ExtraAccountMetaList::new(sample_entries()).unwrap();
        let packed = list.pack().unwrap();

        for extra in 1..ExtraAccountMeta::LEN {
            let mut buffer = packed.clone();
            buffer.extend(std::iter::repeat(0xab).take(extra));
            let decoded = ExtraAccountMetaList::unpack(&buffer).unwrap();
            assert_eq!(decoded.entries, list.entries);
        }
    }

    /// The count field does not limit or extend what gets decoded.
    #[test]
    fn test_count_is_not_cross_checked() {
        let entries = sample_entries();
        let mut buffer = ExtraAccountMetaList::new(entries.clone())
            .unwrap()
            .pack()
            .unwrap();
        buffer[..4].copy_from_slice(&1u32.to_le_bytes());
        assert_eq!(ExtraAccountMetaList::unpack(&buffer).unwrap().entries, entries);

        buffer[..4].copy_from_slice(&10u32.to_le_bytes());
        assert_eq!(ExtraAccountMetaList::unpack(&buffer).unwrap().entries, entries);
    }

    #[test]
    fn test_header_only_and_short_buffers() {
        let empty = ExtraAccountMetaList::unpack(&[0, 0, 0, 0]).unwrap();
        assert_eq!(empty.count, 0);
        assert!(empty.entries.is_empty());

        assert_eq!(
            ExtraAccountMetaList::unpack(&[1, 0, 0]),
            Err(ResolutionError::MalformedDescriptor)
        );
    }

    #[test]
    fn test_pack_into_short_slice_fails() {
        let list = ExtraAccountMetaList::new(sample_entries()).unwrap();
        let mut output = vec![0u8; list.packed_len().unwrap() - 1];
        assert_eq!(
            list.pack_into_slice(&mut output),
            Err(ResolutionError::MalformedDescriptor)
        );
    }

    #[test]
    fn test_size_of() {
        assert_eq!(ExtraAccountMetaList::size_of(0).unwrap(), 4);
        assert_eq!(ExtraAccountMetaList::size_of(10).unwrap(), 354);
        assert_eq!(
            ExtraAccountMetaList::size_of(usize::MAX),
            Err(ResolutionError::Overflow)
        );
    }
}
