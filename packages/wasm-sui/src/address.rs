//! Sui address syntax, parsing, and derivation
//!
//! A Sui address is the Blake2b-256 hash of `scheme_flag || public_key`,
//! rendered as 0x-prefixed lowercase hex.
//! See: https://docs.sui.io/concepts/cryptography/transaction-auth/keys-addresses

use crate::error::WasmSuiError;
use blake2::{digest::consts::U32, Blake2b, Digest};

/// Length of a Sui address in bytes
pub const SUI_ADDRESS_LENGTH: usize = 32;

/// Signature scheme flag for Ed25519, the only scheme this bridge supports
pub const ED25519_SCHEME_FLAG: u8 = 0x00;

/// Check whether a string is a syntactically valid Sui address
///
/// Accepts an optional `0x`/`0X` prefix followed by exactly 64 hex digits.
/// Pure syntax check, no I/O.
pub fn is_valid_sui_address(value: &str) -> bool {
    let hex_part = strip_hex_prefix(value);
    hex_part.len() == SUI_ADDRESS_LENGTH * 2 && hex_part.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a Sui address string to its 32 raw bytes
pub fn parse_sui_address(value: &str) -> Result<[u8; SUI_ADDRESS_LENGTH], WasmSuiError> {
    let hex_part = strip_hex_prefix(value);
    let bytes = hex::decode(hex_part)
        .map_err(|e| WasmSuiError::InvalidAddress(format!("Invalid hex: {}", e)))?;
    if bytes.len() != SUI_ADDRESS_LENGTH {
        return Err(WasmSuiError::InvalidAddress(format!(
            "Address must be {} bytes, got {}",
            SUI_ADDRESS_LENGTH,
            bytes.len()
        )));
    }
    let mut result = [0u8; SUI_ADDRESS_LENGTH];
    result.copy_from_slice(&bytes);
    Ok(result)
}

/// Canonical form: 0x-prefixed lowercase hex
pub fn canonicalize_sui_address(value: &str) -> Result<String, WasmSuiError> {
    let bytes = parse_sui_address(value)?;
    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Derive the Sui address for an Ed25519 public key
///
/// # Arguments
/// * `public_key` - 32-byte Ed25519 public key
pub fn address_from_pubkey(public_key: &[u8]) -> Result<String, WasmSuiError> {
    if public_key.len() != 32 {
        return Err(WasmSuiError::InvalidAddress(format!(
            "Public key must be 32 bytes, got {}",
            public_key.len()
        )));
    }

    let mut hasher = Blake2b::<U32>::new();
    hasher.update([ED25519_SCHEME_FLAG]);
    hasher.update(public_key);
    let hash = hasher.finalize();

    Ok(format!("0x{}", hex::encode(hash)))
}

/// Strip an optional 0x / 0X prefix
fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}
