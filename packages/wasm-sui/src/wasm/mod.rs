//! WASM bindings for wasm-sui
//!
//! This module contains thin wrappers with #[wasm_bindgen] that delegate
//! to the core Rust implementations, plus the adapters that turn the
//! JS-provided Seed Vault plugin and RPC provider objects into the core
//! boundary traits.

mod bridge;
mod namespaces;

// Re-export WASM types
pub use bridge::{JsRpcProvider, JsSeedVault, WasmWalletBridge};
pub use namespaces::{IntentNamespace, ResolverNamespace, VerifierNamespace};
