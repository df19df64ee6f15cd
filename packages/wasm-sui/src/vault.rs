//! Seed Vault capability boundary
//!
//! The vault holds key material and performs the actual signing; this crate
//! only ever sees opaque auth tokens and the bytes that come back. Any
//! denial or unavailability is a hard failure of the whole attempt.

use crate::error::WasmSuiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An authorized seed handle as listed by the vault.
///
/// The auth token is owned by the vault; the core never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAuth {
    pub name: String,
    pub auth_token: u64,
}

/// A fully fetched seed: address, raw public key, and a balance snapshot.
///
/// The balance is fetched, not authoritative; `None` means "unknown",
/// never "zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    /// Sui address derived from the public key
    pub address: String,
    /// Raw Ed25519 public key bytes (32)
    pub pubkey_bytes: Vec<u8>,
    /// Balance snapshot in display units (SUI)
    pub balance: Option<f64>,
    pub auth: SeedAuth,
}

/// The custody delegate contract: five operations, nothing else.
#[async_trait(?Send)]
pub trait SeedVault {
    /// Ensure the host has granted vault access.
    async fn assert_permissions(&self) -> Result<(), WasmSuiError>;

    /// Ask the vault to authorize a new seed.
    async fn authorize_seed(&self) -> Result<(), WasmSuiError>;

    /// Revoke one authorization.
    async fn deauthorize_seed(&self, auth_token: u64) -> Result<(), WasmSuiError>;

    /// Sign the given bytes with the seed behind `auth_token`.
    ///
    /// Returns the raw signature bytes (64 for Ed25519). The bytes passed
    /// in are always an intent digest, never raw transaction bytes.
    async fn sign_bytes(&self, auth_token: u64, bytes: &[u8]) -> Result<Vec<u8>, WasmSuiError>;

    /// Fetch the raw public key bytes for an authorized seed.
    async fn get_pubkey(&self, auth_token: u64) -> Result<Vec<u8>, WasmSuiError>;

    /// List all currently authorized seeds.
    async fn get_authorized_seeds(&self) -> Result<Vec<SeedAuth>, WasmSuiError>;
}
