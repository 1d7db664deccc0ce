//! # Extra Account Resolution
//!
//! Resolves the extra accounts a transfer hook needs from a compact list of
//! descriptors stored on chain, and ships a small hook program that stores
//! and enforces such lists.
//!
//! ## Overview
//!
//! A hook program keeps one config account per mint. The config account
//! holds a list of 35-byte descriptors. Each descriptor names one account,
//! either literally or as a program address derived from seeds. Resolution
//! walks the list left to right, and every resolved account can feed the
//! seeds or the owning program of the descriptors after it.
//!
//! ## Layouts
//!
//! | Record | Size | Description |
//! |--------|------|-------------|
//! | ExtraAccountMeta | 35 bytes | disc u8, address config [u8; 32], signer u8, writable u8 |
//! | ExtraAccountMetaList | 4 + 35 * n bytes | u32 LE count + descriptors |
//!
//! ## Instructions
//!
//! | # | Instruction | Description |
//! |---|-------------|-------------|
//! | 0 | InitializeExtraAccountMetaList | Create the config account for a mint |
//! | 1 | Execute | Check the extra accounts of a transfer |
//!
//! ## Seams
//!
//! The engine never decodes seeds or hashes addresses itself. It asks a
//! [`SeedProvider`] for seed bytes and an [`AddressOracle`] for addresses.
//! [`PackedSeedProvider`] and [`ProgramAddressOracle`] are the defaults.

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Config account address derivation
pub mod address;

/// Address derivation oracle
pub mod derivation;

/// Program entrypoint
pub mod entrypoint;

/// Error codes
pub mod error;

/// Hook program instructions and builders
pub mod instruction;

/// Client side helpers
pub mod offchain;

/// CPI helper for programs that invoke a hook
pub mod onchain;

/// Instruction processors
pub mod processor;

/// Resolution engine
pub mod resolver;

/// Seed configuration
pub mod seeds;

/// Descriptor layouts
pub mod state;

/// Account validation
pub mod utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use address::{get_extra_account_metas_address, EXTRA_ACCOUNT_METAS_SEED};
pub use derivation::{AddressOracle, ProgramAddressOracle};
pub use error::ResolutionError;
pub use instruction::HookInstruction;
pub use processor::Processor;
pub use resolver::{resolve_all, ExtraAccountResolver};
pub use seeds::{PackedSeedProvider, Seed, SeedProvider};
pub use state::{AddressStrategy, ExtraAccountMeta, ExtraAccountMetaList, Pack};

// =============================================================================
// PROGRAM ID
// =============================================================================

solana_program::declare_id!("TokenHookExampLe8smaVNrxTBezWTRbEwxwb1Zykrb");
