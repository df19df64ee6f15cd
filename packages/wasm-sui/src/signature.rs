//! Canonical serialized-signature envelope
//!
//! Sui submits signatures as base64 of `flag || signature || pubkey`.
//! For Ed25519 (the only scheme this bridge supports) that is
//! 1 + 64 + 32 = 97 bytes.

use crate::address::ED25519_SCHEME_FLAG;
use crate::error::WasmSuiError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Ed25519 signature length in bytes
pub const SIGNATURE_LENGTH: usize = 64;

/// Ed25519 public key length in bytes
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Serialize scheme flag, signature, and public key into the canonical
/// envelope the execution endpoint expects.
pub fn serialize_signature(signature: &[u8], pubkey: &[u8]) -> Result<String, WasmSuiError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(WasmSuiError::BadSignature(format!(
            "Signature must be {} bytes, got {}",
            SIGNATURE_LENGTH,
            signature.len()
        )));
    }
    if pubkey.len() != PUBLIC_KEY_LENGTH {
        return Err(WasmSuiError::BadSignature(format!(
            "Public key must be {} bytes, got {}",
            PUBLIC_KEY_LENGTH,
            pubkey.len()
        )));
    }

    let mut envelope = Vec::with_capacity(1 + SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH);
    envelope.push(ED25519_SCHEME_FLAG);
    envelope.extend_from_slice(signature);
    envelope.extend_from_slice(pubkey);

    Ok(BASE64.encode(envelope))
}

/// Decode a serialized signature back into (flag, signature, pubkey).
pub fn parse_serialized_signature(
    serialized: &str,
) -> Result<(u8, Vec<u8>, Vec<u8>), WasmSuiError> {
    let bytes = BASE64
        .decode(serialized)
        .map_err(|e| WasmSuiError::BadSignature(format!("Invalid base64: {}", e)))?;

    if bytes.len() != 1 + SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH {
        return Err(WasmSuiError::BadSignature(format!(
            "Serialized signature must be {} bytes, got {}",
            1 + SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH,
            bytes.len()
        )));
    }

    let flag = bytes[0];
    let signature = bytes[1..1 + SIGNATURE_LENGTH].to_vec();
    let pubkey = bytes[1 + SIGNATURE_LENGTH..].to_vec();
    Ok((flag, signature, pubkey))
}
