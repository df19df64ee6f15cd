//! Network boundary: Sui RPC and SuiNS lookups
//!
//! Everything that needs live chain state goes through this trait,
//! including transaction serialization (gas-object selection happens
//! node-side at serialization time).

use crate::error::WasmSuiError;
use crate::transaction::TransferTransaction;
use async_trait::async_trait;

/// Coin type of the base asset
pub const SUI_TYPE_ARG: &str = "0x2::sui::SUI";

/// The RPC / name-service contract consumed by the bridge.
#[async_trait(?Send)]
pub trait RpcClient {
    /// Total balance of `coin_type` held by `owner`, in base units (mist).
    async fn get_balance(&self, owner: &str, coin_type: &str) -> Result<u128, WasmSuiError>;

    /// Target address bound to a SuiNS name, or `None` when unbound.
    ///
    /// Callers pass only syntactically valid names; the resolver filters
    /// before any network call.
    async fn get_name_record(&self, name: &str) -> Result<Option<String>, WasmSuiError>;

    /// Serialize an unsigned transfer to canonical transaction bytes.
    ///
    /// Needs a live client: the node selects gas objects and fills gas
    /// price/budget defaults. The returned bytes are immutable input to
    /// the digest and submission steps.
    async fn serialize_transaction(
        &self,
        tx: &TransferTransaction,
    ) -> Result<Vec<u8>, WasmSuiError>;

    /// Execute a signed transaction block, requesting effect reporting.
    ///
    /// Returns the finality identifier (transaction digest). Any failure
    /// is terminal for the attempt; the bridge never resubmits.
    async fn execute_transaction(
        &self,
        tx_bytes: &[u8],
        serialized_signature: &str,
    ) -> Result<String, WasmSuiError>;
}
