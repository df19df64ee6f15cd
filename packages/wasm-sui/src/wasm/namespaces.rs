//! Pure-function namespaces exposed to JavaScript
//!
//! Synchronous checks and conversions the UI can call directly, without
//! going through the async bridge.

use crate::{address, intent, resolver, signature, verify};
use wasm_bindgen::prelude::*;

/// Namespace for recipient/address syntax operations.
#[wasm_bindgen]
pub struct ResolverNamespace;

#[wasm_bindgen]
impl ResolverNamespace {
    /// Syntactic Sui address check (optional 0x + 64 hex digits).
    #[wasm_bindgen(js_name = isValidSuiAddress)]
    pub fn is_valid_sui_address(value: &str) -> bool {
        address::is_valid_sui_address(value)
    }

    /// Syntactic SuiNS name check (`alice.sui` / `@alice` forms).
    #[wasm_bindgen(js_name = isValidSuiNsName)]
    pub fn is_valid_sui_ns_name(name: &str) -> bool {
        resolver::is_valid_sui_ns_name(name)
    }

    /// Normalize raw input into the SuiNS query form
    /// (`alice` → `@alice`, never `@@alice`; `.sui` names pass through).
    #[wasm_bindgen(js_name = normalizeNsQuery)]
    pub fn normalize_ns_query(input: &str) -> String {
        resolver::normalize_ns_query(input)
    }

    /// Canonical 0x-prefixed lowercase form of an address.
    #[wasm_bindgen(js_name = canonicalizeAddress)]
    pub fn canonicalize_address(value: &str) -> Result<String, JsValue> {
        address::canonicalize_sui_address(value).map_err(JsValue::from)
    }

    /// Derive the Sui address for a 32-byte Ed25519 public key.
    #[wasm_bindgen(js_name = addressFromPubkey)]
    pub fn address_from_pubkey(pubkey: &[u8]) -> Result<String, JsValue> {
        address::address_from_pubkey(pubkey).map_err(JsValue::from)
    }
}

/// Namespace for signing-intent operations.
#[wasm_bindgen]
pub struct IntentNamespace;

#[wasm_bindgen]
impl IntentNamespace {
    /// The 32-byte signing digest for canonical transaction bytes.
    ///
    /// This — not the raw bytes — is what the vault must be asked to sign.
    #[wasm_bindgen(js_name = signingDigest)]
    pub fn signing_digest(tx_bytes: &[u8]) -> Vec<u8> {
        intent::signing_digest(tx_bytes).to_vec()
    }

    /// Transaction bytes wrapped in the TransactionData intent envelope.
    #[wasm_bindgen(js_name = messageWithIntent)]
    pub fn message_with_intent(tx_bytes: &[u8]) -> Vec<u8> {
        intent::message_with_intent(intent::Intent::transaction_data(), tx_bytes)
    }
}

/// Namespace for signature verification and serialization.
#[wasm_bindgen]
pub struct VerifierNamespace;

#[wasm_bindgen]
impl VerifierNamespace {
    /// Both verification paths; submission requires this to be true.
    #[wasm_bindgen(js_name = verifySignature)]
    pub fn verify_signature(
        pubkey: &[u8],
        digest: &[u8],
        tx_bytes: &[u8],
        signature: &[u8],
    ) -> bool {
        verify::verify_signature(pubkey, digest, tx_bytes, signature)
    }

    /// Check (a) only: signature over the raw intent digest.
    #[wasm_bindgen(js_name = verifyDigest)]
    pub fn verify_digest(pubkey: &[u8], digest: &[u8], signature: &[u8]) -> bool {
        verify::verify_digest(pubkey, digest, signature)
    }

    /// Check (b) only: signature over the full transaction payload.
    #[wasm_bindgen(js_name = verifyTransactionPayload)]
    pub fn verify_transaction_payload(pubkey: &[u8], tx_bytes: &[u8], signature: &[u8]) -> bool {
        verify::verify_transaction_payload(pubkey, tx_bytes, signature)
    }

    /// Canonical base64 signature envelope (`flag || sig || pubkey`).
    #[wasm_bindgen(js_name = serializeSignature)]
    pub fn serialize_signature(sig: &[u8], pubkey: &[u8]) -> Result<String, JsValue> {
        signature::serialize_signature(sig, pubkey).map_err(JsValue::from)
    }
}

// Keep the namespace functions honest against the core without a JS host.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_delegates_match_core() {
        assert!(ResolverNamespace::is_valid_sui_ns_name("alice.sui"));
        assert_eq!(ResolverNamespace::normalize_ns_query("alice"), "@alice");
        assert_eq!(IntentNamespace::signing_digest(b"tx").len(), 32);
        assert_eq!(&IntentNamespace::message_with_intent(b"tx")[..3], &[0, 0, 0]);
    }

    #[test]
    fn test_verifier_namespace_rejects_garbage() {
        assert!(!VerifierNamespace::verify_signature(
            &[0u8; 32],
            &[0u8; 32],
            b"tx",
            &[0u8; 64]
        ));
    }
}
