//! Signing-intent envelope and digest
//!
//! Sui signs a Blake2b-256 digest of the transaction bytes prefixed with a
//! fixed three-byte intent envelope (scope, version, app), never the raw
//! bytes themselves. This digest is exactly what gets handed to the vault.

use blake2::{digest::consts::U32, Blake2b, Digest};

/// Output length of the signing digest
pub const DIGEST_LENGTH: usize = 32;

/// What the signed bytes mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IntentScope {
    TransactionData = 0,
    TransactionEffects = 1,
    CheckpointSummary = 2,
    PersonalMessage = 3,
}

/// Intent envelope version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IntentVersion {
    V0 = 0,
}

/// Application domain of the intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AppId {
    Sui = 0,
}

/// The three-byte intent envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub scope: IntentScope,
    pub version: IntentVersion,
    pub app_id: AppId,
}

impl Intent {
    /// The envelope used for transaction signing
    pub fn transaction_data() -> Self {
        Intent {
            scope: IntentScope::TransactionData,
            version: IntentVersion::V0,
            app_id: AppId::Sui,
        }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.scope as u8, self.version as u8, self.app_id as u8]
    }
}

/// Wrap message bytes in an intent envelope
pub fn message_with_intent(intent: Intent, message: &[u8]) -> Vec<u8> {
    let prefix = intent.to_bytes();
    let mut out = Vec::with_capacity(prefix.len() + message.len());
    out.extend_from_slice(&prefix);
    out.extend_from_slice(message);
    out
}

/// Compute the 32-byte signing digest for transaction bytes.
///
/// Always recomputed from the exact bytes about to be submitted; callers
/// must never cache a digest across a rebuild.
pub fn signing_digest(tx_bytes: &[u8]) -> [u8; DIGEST_LENGTH] {
    let message = message_with_intent(Intent::transaction_data(), tx_bytes);
    blake2b_256(&message)
}

/// Blake2b-256 hash
fn blake2b_256(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; DIGEST_LENGTH];
    hash.copy_from_slice(&result);
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_data_envelope() {
        assert_eq!(Intent::transaction_data().to_bytes(), [0, 0, 0]);
    }

    #[test]
    fn test_message_with_intent_prefixes() {
        let msg = b"tx bytes";
        let wrapped = message_with_intent(Intent::transaction_data(), msg);
        assert_eq!(&wrapped[..3], &[0, 0, 0]);
        assert_eq!(&wrapped[3..], msg);
    }

    #[test]
    fn test_digest_deterministic_32_bytes() {
        let a = signing_digest(b"some transaction bytes");
        let b = signing_digest(b"some transaction bytes");
        assert_eq!(a, b);
        assert_eq!(a.len(), DIGEST_LENGTH);
    }

    #[test]
    fn test_digest_differs_per_input() {
        assert_ne!(signing_digest(b"tx one"), signing_digest(b"tx two"));
    }

    #[test]
    fn test_digest_covers_envelope() {
        // The envelope participates in the hash: a bare Blake2b of the
        // transaction bytes must not equal the signing digest.
        let tx = b"payload";
        assert_ne!(signing_digest(tx), blake2b_256(tx));
    }
}
