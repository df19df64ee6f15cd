//! WASM bindings for the wallet bridge
//!
//! The constructor takes the two JS collaborator objects — the Seed Vault
//! plugin and the RPC provider — and adapts them into the core boundary
//! traits by awaiting their promise-returning methods. Bridge methods
//! return a `Promise`; rejections carry a `js_sys::Error` whose `name` is
//! the stable failure kind (see [`crate::WasmSuiError`]).

use crate::bridge::{TransferRequest, WalletBridge};
use crate::client::RpcClient;
use crate::error::WasmSuiError;
use crate::transaction::TransferTransaction;
use crate::vault::{SeedAuth, SeedVault};
use async_trait::async_trait;
use js_sys::Promise;
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

#[wasm_bindgen]
extern "C" {
    /// The Seed Vault custody plugin, as registered on the JS side.
    pub type JsSeedVault;

    #[wasm_bindgen(method, js_name = assertPermissions)]
    fn assert_permissions(this: &JsSeedVault) -> Promise;

    #[wasm_bindgen(method, js_name = authorizeSeed)]
    fn authorize_seed(this: &JsSeedVault) -> Promise;

    #[wasm_bindgen(method, js_name = deauthorizeSeed)]
    fn deauthorize_seed(this: &JsSeedVault, args: JsValue) -> Promise;

    #[wasm_bindgen(method, js_name = signBytes)]
    fn sign_bytes(this: &JsSeedVault, args: JsValue) -> Promise;

    #[wasm_bindgen(method, js_name = getPubkey)]
    fn get_pubkey(this: &JsSeedVault, args: JsValue) -> Promise;

    #[wasm_bindgen(method, js_name = getAuthorizedSeeds)]
    fn get_authorized_seeds(this: &JsSeedVault) -> Promise;

    /// The Sui RPC / name-service provider object.
    pub type JsRpcProvider;

    /// Resolves to the owner's total balance in mist, as a decimal string
    /// (BigInt-safe).
    #[wasm_bindgen(method, js_name = getBalance)]
    fn get_balance(this: &JsRpcProvider, owner: &str, coin_type: &str) -> Promise;

    /// Resolves to the bound target address, or null when unbound.
    #[wasm_bindgen(method, js_name = getNameRecord)]
    fn get_name_record(this: &JsRpcProvider, name: &str) -> Promise;

    /// Resolves to the canonical transaction bytes (Uint8Array). The
    /// provider selects gas objects against live chain state.
    #[wasm_bindgen(method, js_name = serializeTransaction)]
    fn serialize_transaction(this: &JsRpcProvider, tx: JsValue) -> Promise;

    /// Resolves to the finality digest string.
    #[wasm_bindgen(method, js_name = executeTransaction)]
    fn execute_transaction(
        this: &JsRpcProvider,
        tx_bytes: js_sys::Uint8Array,
        serialized_signature: &str,
    ) -> Promise;
}

/// Best-effort message extraction from a JS rejection value.
fn js_value_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        String::from(err.message())
    } else {
        value
            .as_string()
            .unwrap_or_else(|| "opaque JS error".to_string())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthTokenArgs {
    auth_token: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignBytesArgs<'a> {
    auth_token: u64,
    bytes: &'a [u8],
}

#[derive(serde::Deserialize)]
struct SignBytesResult {
    signed: Vec<u8>,
}

#[derive(serde::Deserialize)]
struct PubkeyResult {
    pubkey: Vec<u8>,
}

#[derive(serde::Deserialize)]
struct AuthorizedSeedsResult {
    seeds: Vec<SeedAuth>,
}

/// Adapts the JS vault plugin to the core [`SeedVault`] trait.
struct VaultAdapter {
    plugin: JsSeedVault,
}

impl VaultAdapter {
    async fn call(&self, promise: Promise) -> Result<JsValue, WasmSuiError> {
        JsFuture::from(promise)
            .await
            .map_err(|e| WasmSuiError::VaultDenied(js_value_message(&e)))
    }

    fn args<T: Serialize>(value: &T) -> Result<JsValue, WasmSuiError> {
        serde_wasm_bindgen::to_value(value)
            .map_err(|e| WasmSuiError::InvalidInput(e.to_string()))
    }

    fn parse<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, WasmSuiError> {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| WasmSuiError::VaultDenied(format!("Malformed vault response: {}", e)))
    }
}

#[async_trait(?Send)]
impl SeedVault for VaultAdapter {
    async fn assert_permissions(&self) -> Result<(), WasmSuiError> {
        self.call(self.plugin.assert_permissions()).await?;
        Ok(())
    }

    async fn authorize_seed(&self) -> Result<(), WasmSuiError> {
        self.call(self.plugin.authorize_seed()).await?;
        Ok(())
    }

    async fn deauthorize_seed(&self, auth_token: u64) -> Result<(), WasmSuiError> {
        let args = Self::args(&AuthTokenArgs { auth_token })?;
        self.call(self.plugin.deauthorize_seed(args)).await?;
        Ok(())
    }

    async fn sign_bytes(&self, auth_token: u64, bytes: &[u8]) -> Result<Vec<u8>, WasmSuiError> {
        let args = Self::args(&SignBytesArgs { auth_token, bytes })?;
        let result = self.call(self.plugin.sign_bytes(args)).await?;
        let parsed: SignBytesResult = Self::parse(result)?;
        Ok(parsed.signed)
    }

    async fn get_pubkey(&self, auth_token: u64) -> Result<Vec<u8>, WasmSuiError> {
        let args = Self::args(&AuthTokenArgs { auth_token })?;
        let result = self.call(self.plugin.get_pubkey(args)).await?;
        let parsed: PubkeyResult = Self::parse(result)?;
        Ok(parsed.pubkey)
    }

    async fn get_authorized_seeds(&self) -> Result<Vec<SeedAuth>, WasmSuiError> {
        let result = self.call(self.plugin.get_authorized_seeds()).await?;
        let parsed: AuthorizedSeedsResult = Self::parse(result)?;
        Ok(parsed.seeds)
    }
}

/// Adapts the JS RPC provider to the core [`RpcClient`] trait.
struct ProviderAdapter {
    provider: JsRpcProvider,
}

impl ProviderAdapter {
    async fn call(&self, promise: Promise) -> Result<JsValue, WasmSuiError> {
        JsFuture::from(promise)
            .await
            .map_err(|e| WasmSuiError::RpcFailure(js_value_message(&e)))
    }
}

#[async_trait(?Send)]
impl RpcClient for ProviderAdapter {
    async fn get_balance(&self, owner: &str, coin_type: &str) -> Result<u128, WasmSuiError> {
        let value = self.call(self.provider.get_balance(owner, coin_type)).await?;
        let text = value
            .as_string()
            .ok_or_else(|| WasmSuiError::RpcFailure("Balance must be a string".to_string()))?;
        text.parse::<u128>()
            .map_err(|e| WasmSuiError::RpcFailure(format!("Malformed balance {:?}: {}", text, e)))
    }

    async fn get_name_record(&self, name: &str) -> Result<Option<String>, WasmSuiError> {
        let value = self.call(self.provider.get_name_record(name)).await?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        value
            .as_string()
            .map(Some)
            .ok_or_else(|| WasmSuiError::RpcFailure("Name record must be a string".to_string()))
    }

    async fn serialize_transaction(
        &self,
        tx: &TransferTransaction,
    ) -> Result<Vec<u8>, WasmSuiError> {
        let tx_value = serde_wasm_bindgen::to_value(tx)
            .map_err(|e| WasmSuiError::InvalidInput(e.to_string()))?;
        let value = self.call(self.provider.serialize_transaction(tx_value)).await?;
        Ok(js_sys::Uint8Array::new(&value).to_vec())
    }

    async fn execute_transaction(
        &self,
        tx_bytes: &[u8],
        serialized_signature: &str,
    ) -> Result<String, WasmSuiError> {
        let bytes = js_sys::Uint8Array::from(tx_bytes);
        let value = self
            .call(self.provider.execute_transaction(bytes, serialized_signature))
            .await?;
        value
            .as_string()
            .ok_or_else(|| WasmSuiError::RpcFailure("Finality digest must be a string".to_string()))
    }
}

/// WASM-exposed wallet bridge.
#[wasm_bindgen]
pub struct WasmWalletBridge {
    inner: Rc<WalletBridge<VaultAdapter, ProviderAdapter>>,
}

#[wasm_bindgen]
impl WasmWalletBridge {
    /// Create a bridge over a Seed Vault plugin and an RPC provider.
    #[wasm_bindgen(constructor)]
    pub fn new(vault: JsSeedVault, provider: JsRpcProvider) -> WasmWalletBridge {
        let inner = WalletBridge::new(VaultAdapter { plugin: vault }, ProviderAdapter { provider });
        WasmWalletBridge {
            inner: Rc::new(inner),
        }
    }

    /// Authorize a seed, resolving to the refreshed full list of
    /// `{ name, authToken }` entries.
    #[wasm_bindgen(js_name = authorizeSeeds)]
    pub fn authorize_seeds(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let seeds = inner.authorize_seeds().await?;
            to_js(&seeds)
        })
    }

    /// Revoke one authorization, resolving to the refreshed full list.
    #[wasm_bindgen]
    pub fn deauthorize(&self, auth_token: u64) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let seeds = inner.deauthorize(auth_token).await?;
            to_js(&seeds)
        })
    }

    /// Current balance in display units (SUI). Rejects when unknown —
    /// callers must not treat a rejection as zero.
    #[wasm_bindgen(js_name = refreshBalance)]
    pub fn refresh_balance(&self, address: String) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let balance = inner.refresh_balance(&address).await?;
            Ok(JsValue::from_f64(balance))
        })
    }

    /// Fetch the full seed (address, pubkey bytes, balance snapshot)
    /// behind a `{ name, authToken }` handle.
    #[wasm_bindgen(js_name = fetchSeed)]
    pub fn fetch_seed(&self, auth: JsValue) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let auth: SeedAuth = serde_wasm_bindgen::from_value(auth)
                .map_err(|e| WasmSuiError::InvalidInput(e.to_string()))?;
            let seed = inner.fetch_seed(auth).await?;
            to_js(&seed)
        })
    }

    /// Run the full transfer pipeline for a
    /// `{ recipient, amount, seed }` request, resolving to the finality
    /// digest.
    #[wasm_bindgen(js_name = submitTransfer)]
    pub fn submit_transfer(&self, request: JsValue) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let request: TransferRequest = serde_wasm_bindgen::from_value(request)
                .map_err(|e| WasmSuiError::InvalidInput(e.to_string()))?;
            let digest = inner.submit_transfer(&request).await?;
            Ok(JsValue::from_str(&digest))
        })
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| WasmSuiError::from(e.to_string()).into())
}
