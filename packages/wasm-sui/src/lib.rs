//! wasm-sui: WASM bridge between a UI layer and a Sui wallet.
//!
//! This crate authorizes seeds held by a custody plugin (Seed Vault),
//! reads balances, resolves SuiNS recipients, builds value transfers,
//! obtains signatures over intent digests, verifies them along two
//! independent paths, and submits the result to a Sui node.
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//!
//! 1. **Core layer** (`src/*.rs`) - Pure Rust pipeline and boundary traits
//!    ([`SeedVault`], [`RpcClient`]), no WASM dependencies in the logic
//! 2. **WASM layer** (`src/wasm/`) - Thin wrappers with `#[wasm_bindgen]`
//!    that adapt JS-provided vault/provider objects into the core traits
//!
//! Key material never enters this crate: the vault signs, this crate only
//! verifies. A signature is submitted only after it checks out against
//! both the raw intent digest and the full transaction payload.

pub mod address;
pub mod bridge;
pub mod client;
mod error;
pub mod intent;
pub mod resolver;
pub mod signature;
pub mod transaction;
pub mod vault;
pub mod verify;
pub mod wasm;

// Re-export core types at crate root
pub use bridge::{InflightTokens, TransferRequest, WalletBridge};
pub use client::{RpcClient, SUI_TYPE_ARG};
pub use error::WasmSuiError;
pub use transaction::{build_transfer, TransferTransaction, MIST_PER_SUI};
pub use vault::{Seed, SeedAuth, SeedVault};

// Re-export WASM types
pub use wasm::{IntentNamespace, ResolverNamespace, VerifierNamespace, WasmWalletBridge};
