//! Error types for wasm-sui
//!
//! Every failure that crosses the JS boundary carries a stable kind string
//! (the JS `Error.name`), so the UI can tell an unresolvable recipient from
//! a vault denial from a network failure.

use core::fmt;
use wasm_bindgen::prelude::*;

/// Main error type for wasm-sui operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WasmSuiError {
    /// Malformed Sui address
    InvalidAddress(String),
    /// Recipient could not be resolved to an address
    InvalidRecipient(String),
    /// Transfer amount is not representable in base units
    InvalidAmount(String),
    /// Seed Vault denied or failed an operation
    VaultDenied(String),
    /// Signature failed one of the two verification paths
    BadSignature(String),
    /// RPC or execution failure
    RpcFailure(String),
    /// A submission for this auth token is already in flight
    SubmissionInFlight(u64),
    /// Invalid input
    InvalidInput(String),
    /// Generic string error
    StringError(String),
}

impl std::error::Error for WasmSuiError {}

impl fmt::Display for WasmSuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasmSuiError::InvalidAddress(s) => write!(f, "Invalid address: {}", s),
            WasmSuiError::InvalidRecipient(s) => write!(f, "Unresolvable recipient: {}", s),
            WasmSuiError::InvalidAmount(s) => write!(f, "Invalid amount: {}", s),
            WasmSuiError::VaultDenied(s) => write!(f, "Seed vault error: {}", s),
            WasmSuiError::BadSignature(s) => write!(f, "Bad signature: {}", s),
            WasmSuiError::RpcFailure(s) => write!(f, "RPC failure: {}", s),
            WasmSuiError::SubmissionInFlight(token) => {
                write!(f, "Submission already in flight for auth token {}", token)
            }
            WasmSuiError::InvalidInput(s) => write!(f, "Invalid input: {}", s),
            WasmSuiError::StringError(s) => write!(f, "{}", s),
        }
    }
}

impl WasmSuiError {
    /// Stable machine-readable kind, carried to JS as the `Error.name`.
    pub fn kind(&self) -> &'static str {
        match self {
            WasmSuiError::InvalidAddress(_) => "InvalidAddress",
            WasmSuiError::InvalidRecipient(_) => "InvalidRecipient",
            WasmSuiError::InvalidAmount(_) => "InvalidAmount",
            WasmSuiError::VaultDenied(_) => "VaultDenied",
            WasmSuiError::BadSignature(_) => "BadSignature",
            WasmSuiError::RpcFailure(_) => "RpcFailure",
            WasmSuiError::SubmissionInFlight(_) => "SubmissionInFlight",
            WasmSuiError::InvalidInput(_) => "InvalidInput",
            WasmSuiError::StringError(_) => "Error",
        }
    }
}

impl From<&str> for WasmSuiError {
    fn from(s: &str) -> Self {
        WasmSuiError::StringError(s.to_string())
    }
}

impl From<String> for WasmSuiError {
    fn from(s: String) -> Self {
        WasmSuiError::StringError(s)
    }
}

// REQUIRED: Converts to JS Error with stack trace
impl From<WasmSuiError> for JsValue {
    fn from(err: WasmSuiError) -> Self {
        let js_err = js_sys::Error::new(&err.to_string());
        js_err.set_name(err.kind());
        js_err.into()
    }
}
