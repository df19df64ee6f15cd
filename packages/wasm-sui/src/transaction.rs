//! Unsigned transfer transaction construction
//!
//! A transfer is one operation: split `amount_mist` off the sender's gas
//! coin and send the split coin to the recipient. Gas price and budget are
//! left to network defaults at serialization time.

use crate::address::address_from_pubkey;
use crate::error::WasmSuiError;
use serde::{Deserialize, Serialize};

/// Base units (mist) per display unit (SUI)
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// Serializable, unsigned description of one value transfer.
///
/// Built fresh per submission attempt and never reused: the canonical
/// byte form may differ between builds of the same logical transfer
/// (gas-object references vary with chain state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTransaction {
    /// Sender address, derived from the payer public key
    pub sender: String,
    /// Amount to split off the gas coin, in mist
    pub amount_mist: u64,
    /// Resolved recipient address
    pub recipient: String,
}

/// Build an unsigned transfer.
///
/// # Arguments
/// * `payer_pubkey` - 32-byte Ed25519 public key of the sender
/// * `amount` - display units (SUI); scaled by [`MIST_PER_SUI`] and
///   truncated to an integer mist count
/// * `recipient` - resolved recipient address
pub fn build_transfer(
    payer_pubkey: &[u8],
    amount: f64,
    recipient: &str,
) -> Result<TransferTransaction, WasmSuiError> {
    let sender = address_from_pubkey(payer_pubkey)?;
    let amount_mist = to_mist(amount)?;

    Ok(TransferTransaction {
        sender,
        amount_mist,
        recipient: recipient.to_string(),
    })
}

/// Convert a display amount to an integer mist count, truncating.
pub fn to_mist(amount: f64) -> Result<u64, WasmSuiError> {
    if !amount.is_finite() {
        return Err(WasmSuiError::InvalidAmount(format!(
            "Amount must be finite, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(WasmSuiError::InvalidAmount(format!(
            "Amount must not be negative, got {}",
            amount
        )));
    }

    let scaled = (amount * MIST_PER_SUI as f64).trunc();
    if scaled > u64::MAX as f64 {
        return Err(WasmSuiError::InvalidAmount(format!(
            "Amount {} overflows the base-unit range",
            amount
        )));
    }

    Ok(scaled as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::is_valid_sui_address;

    const RECIPIENT: &str = "0x2d9d0935a1ae5f2c4a7cb6c1f4a6e77e05c6a80b1b0a1e03325fbaf9c0b2d6e1";

    #[test]
    fn test_to_mist_scaling() {
        assert_eq!(to_mist(1.5).unwrap(), 1_500_000_000);
        assert_eq!(to_mist(0.0).unwrap(), 0);
        assert_eq!(to_mist(1.0).unwrap(), MIST_PER_SUI);
        assert_eq!(to_mist(2.0).unwrap(), 2_000_000_000);
    }

    #[test]
    fn test_to_mist_truncates_sub_mist() {
        // Below one mist truncates to zero, never rounds up
        assert_eq!(to_mist(0.000_000_000_4).unwrap(), 0);
    }

    #[test]
    fn test_to_mist_rejects_bad_amounts() {
        assert!(to_mist(-1.0).is_err());
        assert!(to_mist(f64::NAN).is_err());
        assert!(to_mist(f64::INFINITY).is_err());
        // > u64::MAX mist
        assert!(to_mist(2.0e10 * 1.0e9).is_err());
    }

    #[test]
    fn test_build_transfer() {
        let payer = [7u8; 32];
        let tx = build_transfer(&payer, 1.5, RECIPIENT).unwrap();

        assert!(is_valid_sui_address(&tx.sender));
        assert_eq!(tx.amount_mist, 1_500_000_000);
        assert_eq!(tx.recipient, RECIPIENT);
        assert_eq!(tx.sender, address_from_pubkey(&payer).unwrap());
    }

    #[test]
    fn test_build_transfer_rejects_short_pubkey() {
        assert!(build_transfer(&[0u8; 16], 1.0, RECIPIENT).is_err());
    }

    #[test]
    fn test_serde_camel_case() {
        let tx = build_transfer(&[7u8; 32], 1.0, RECIPIENT).unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"amountMist\""));
        assert!(json.contains("\"sender\""));
    }
}
