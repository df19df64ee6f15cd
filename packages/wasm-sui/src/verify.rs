//! Dual-path signature verification
//!
//! A signature coming back from the vault is only trusted after BOTH of
//! these independent checks pass:
//!
//! (a) it verifies over the raw intent digest the vault was handed;
//! (b) it verifies over the digest this module re-derives itself from the
//!     full transaction bytes.
//!
//! Path (b) owns its envelope constant and hashing code and must not call
//! into [`crate::intent`]: the two paths guard against different bug
//! classes, and sharing the digest computation would collapse them into
//! one.

use blake2::{digest::consts::U32, Blake2b, Digest};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Intent envelope for TransactionData, fixed by the Sui signing
/// convention (scope 0, version 0, app 0).
const TRANSACTION_DATA_INTENT: [u8; 3] = [0x00, 0x00, 0x00];

/// Check (a): the signature is valid for the raw intent digest.
pub fn verify_digest(pubkey: &[u8], digest: &[u8], signature: &[u8]) -> bool {
    verify_raw(pubkey, digest, signature)
}

/// Check (b): the signature is valid for the full transaction payload.
///
/// Re-derives the signing digest from the transaction bytes under the
/// chain's transaction-signature rule, independently of the digest the
/// pipeline computed.
pub fn verify_transaction_payload(pubkey: &[u8], tx_bytes: &[u8], signature: &[u8]) -> bool {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(TRANSACTION_DATA_INTENT);
    hasher.update(tx_bytes);
    let derived = hasher.finalize();
    verify_raw(pubkey, &derived, signature)
}

/// Both checks; submission must never proceed unless this returns true.
pub fn verify_signature(pubkey: &[u8], digest: &[u8], tx_bytes: &[u8], signature: &[u8]) -> bool {
    verify_digest(pubkey, digest, signature) && verify_transaction_payload(pubkey, tx_bytes, signature)
}

/// Plain Ed25519 verification over a message.
fn verify_raw(pubkey: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(key_bytes) = <[u8; 32]>::try_from(pubkey) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };
    let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    let signature = Signature::from_bytes(&sig_bytes);
    verifying_key.verify(message, &signature).is_ok()
}
