//! Wallet bridge orchestration
//!
//! One task per user action, steps strictly sequenced within a task:
//! resolve → build → serialize → digest → sign → dual verify → submit.
//! The vault and the network are only ever reached through their traits.
//!
//! Overlapping submissions for the same seed are rejected up front rather
//! than racing two signing requests against the vault.

use crate::address::address_from_pubkey;
use crate::client::{RpcClient, SUI_TYPE_ARG};
use crate::error::WasmSuiError;
use crate::intent::signing_digest;
use crate::resolver;
use crate::signature::serialize_signature;
use crate::transaction::{build_transfer, MIST_PER_SUI};
use crate::vault::{Seed, SeedAuth, SeedVault};
use crate::verify::verify_signature;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// One submission attempt: raw recipient input, display amount, and the
/// seed paying for it. Never persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub recipient: String,
    pub amount: f64,
    pub seed: Seed,
}

/// Auth tokens with a submission currently in flight.
#[derive(Debug, Clone, Default)]
pub struct InflightTokens {
    tokens: Arc<Mutex<HashSet<u64>>>,
}

impl InflightTokens {
    /// Reserve a token for one submission attempt.
    ///
    /// Fails with [`WasmSuiError::SubmissionInFlight`] if the token is
    /// already reserved. The reservation is released when the returned
    /// guard drops, on success and failure alike.
    pub fn acquire(&self, auth_token: u64) -> Result<InflightGuard, WasmSuiError> {
        let mut tokens = self.lock();
        if !tokens.insert(auth_token) {
            return Err(WasmSuiError::SubmissionInFlight(auth_token));
        }
        Ok(InflightGuard {
            tokens: Arc::clone(&self.tokens),
            auth_token,
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<u64>> {
        match self.tokens.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Releases the in-flight reservation on drop.
#[derive(Debug)]
pub struct InflightGuard {
    tokens: Arc<Mutex<HashSet<u64>>>,
    auth_token: u64,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        let mut tokens = match self.tokens.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        tokens.remove(&self.auth_token);
    }
}

/// Bridge between the UI layer and the Sui wallet boundaries.
pub struct WalletBridge<V, C> {
    vault: V,
    client: C,
    in_flight: InflightTokens,
}

impl<V: SeedVault, C: RpcClient> WalletBridge<V, C> {
    pub fn new(vault: V, client: C) -> Self {
        WalletBridge {
            vault,
            client,
            in_flight: InflightTokens::default(),
        }
    }

    /// Authorize a new seed, then return the re-fetched full list.
    ///
    /// The list is always a full refresh, never an incremental patch.
    pub async fn authorize_seeds(&self) -> Result<Vec<SeedAuth>, WasmSuiError> {
        self.vault.assert_permissions().await?;
        self.vault.authorize_seed().await?;
        self.vault.get_authorized_seeds().await
    }

    /// Revoke one authorization, then return the re-fetched full list.
    pub async fn deauthorize(&self, auth_token: u64) -> Result<Vec<SeedAuth>, WasmSuiError> {
        self.vault.deauthorize_seed(auth_token).await?;
        self.vault.get_authorized_seeds().await
    }

    /// Current base-asset balance of a wallet, in display units.
    ///
    /// A failure here means "unknown", never "zero"; callers must not
    /// substitute a stale or default value.
    pub async fn refresh_balance(&self, address: &str) -> Result<f64, WasmSuiError> {
        let mist = self.client.get_balance(address, SUI_TYPE_ARG).await?;
        Ok(mist as f64 / MIST_PER_SUI as f64)
    }

    /// Fetch the full seed behind an auth handle: public key, derived
    /// address, and a balance snapshot (`None` when the query fails).
    pub async fn fetch_seed(&self, auth: SeedAuth) -> Result<Seed, WasmSuiError> {
        let pubkey_bytes = self.vault.get_pubkey(auth.auth_token).await?;
        let address = address_from_pubkey(&pubkey_bytes)?;
        let balance = match self.client.get_balance(&address, SUI_TYPE_ARG).await {
            Ok(mist) => Some(mist as f64 / MIST_PER_SUI as f64),
            Err(_) => None,
        };

        Ok(Seed {
            address,
            pubkey_bytes,
            balance,
            auth,
        })
    }

    /// The transaction pipeline. Returns the finality digest.
    ///
    /// The signature coming back from the vault is checked against both
    /// the raw intent digest and the full transaction payload; execution
    /// is unreachable unless both checks passed.
    pub async fn submit_transfer(&self, request: &TransferRequest) -> Result<String, WasmSuiError> {
        let _guard = self.in_flight.acquire(request.seed.auth.auth_token)?;

        let recipient = resolver::resolve(&self.client, &request.recipient)
            .await?
            .ok_or_else(|| WasmSuiError::InvalidRecipient(request.recipient.clone()))?;

        let tx = build_transfer(&request.seed.pubkey_bytes, request.amount, &recipient)?;
        let tx_bytes = self.client.serialize_transaction(&tx).await?;

        // Recomputed from the exact bytes being submitted, never cached
        let digest = signing_digest(&tx_bytes);

        let signature = self
            .vault
            .sign_bytes(request.seed.auth.auth_token, &digest)
            .await?;

        if !verify_signature(&request.seed.pubkey_bytes, &digest, &tx_bytes, &signature) {
            return Err(WasmSuiError::BadSignature(
                "signature failed dual verification".to_string(),
            ));
        }

        let serialized = serialize_signature(&signature, &request.seed.pubkey_bytes)?;
        self.client.execute_transaction(&tx_bytes, &serialized).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::parse_serialized_signature;
    use crate::transaction::TransferTransaction;
    use async_trait::async_trait;
    use ed25519_dalek::{Signer, SigningKey};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    const ADDR: &str = "0x2d9d0935a1ae5f2c4a7cb6c1f4a6e77e05c6a80b1b0a1e03325fbaf9c0b2d6e1";
    const FINALITY: &str = "9WzSXdFzWqcnS5dmHxkMA1fLFHwgE4sW3oSn6pYVYCLb";

    #[derive(Default)]
    struct VaultState {
        seeds: Vec<SeedAuth>,
        sign_calls: u32,
        list_fetches: u32,
    }

    /// Vault double backed by a real Ed25519 key, so the dual
    /// verification paths run for real.
    struct MockVault {
        key: SigningKey,
        state: Rc<RefCell<VaultState>>,
        /// Sign over garbage instead of the requested bytes
        tamper: bool,
        /// Refuse to sign
        deny_signing: bool,
    }

    impl MockVault {
        fn new(seeds: Vec<SeedAuth>) -> (Self, Rc<RefCell<VaultState>>) {
            let state = Rc::new(RefCell::new(VaultState {
                seeds,
                ..VaultState::default()
            }));
            let vault = MockVault {
                key: SigningKey::from_bytes(&[42u8; 32]),
                state: Rc::clone(&state),
                tamper: false,
                deny_signing: false,
            };
            (vault, state)
        }

        fn pubkey_bytes(&self) -> Vec<u8> {
            self.key.verifying_key().to_bytes().to_vec()
        }
    }

    #[async_trait(?Send)]
    impl SeedVault for MockVault {
        async fn assert_permissions(&self) -> Result<(), WasmSuiError> {
            Ok(())
        }

        async fn authorize_seed(&self) -> Result<(), WasmSuiError> {
            Ok(())
        }

        async fn deauthorize_seed(&self, auth_token: u64) -> Result<(), WasmSuiError> {
            self.state
                .borrow_mut()
                .seeds
                .retain(|s| s.auth_token != auth_token);
            Ok(())
        }

        async fn sign_bytes(&self, _auth_token: u64, bytes: &[u8]) -> Result<Vec<u8>, WasmSuiError> {
            self.state.borrow_mut().sign_calls += 1;
            if self.deny_signing {
                return Err(WasmSuiError::VaultDenied("user rejected".to_string()));
            }
            let message: &[u8] = if self.tamper { b"tampered" } else { bytes };
            Ok(self.key.sign(message).to_bytes().to_vec())
        }

        async fn get_pubkey(&self, _auth_token: u64) -> Result<Vec<u8>, WasmSuiError> {
            Ok(self.pubkey_bytes())
        }

        async fn get_authorized_seeds(&self) -> Result<Vec<SeedAuth>, WasmSuiError> {
            let mut state = self.state.borrow_mut();
            state.list_fetches += 1;
            Ok(state.seeds.clone())
        }
    }

    #[derive(Default)]
    struct ClientState {
        executions: Vec<(Vec<u8>, String)>,
        name_queries: Vec<String>,
    }

    struct MockClient {
        names: HashMap<String, String>,
        balances: HashMap<String, u128>,
        state: Rc<RefCell<ClientState>>,
        fail_balance: bool,
        fail_execute: bool,
        /// When set, `serialize_transaction` parks until notified
        serialize_gate: Option<Rc<tokio::sync::Notify>>,
    }

    impl MockClient {
        fn new() -> (Self, Rc<RefCell<ClientState>>) {
            let state = Rc::new(RefCell::new(ClientState::default()));
            let client = MockClient {
                names: HashMap::new(),
                balances: HashMap::new(),
                state: Rc::clone(&state),
                fail_balance: false,
                fail_execute: false,
                serialize_gate: None,
            };
            (client, state)
        }
    }

    #[async_trait(?Send)]
    impl RpcClient for MockClient {
        async fn get_balance(&self, owner: &str, coin_type: &str) -> Result<u128, WasmSuiError> {
            assert_eq!(coin_type, SUI_TYPE_ARG);
            if self.fail_balance {
                return Err(WasmSuiError::RpcFailure("node unreachable".to_string()));
            }
            Ok(self.balances.get(owner).copied().unwrap_or(0))
        }

        async fn get_name_record(&self, name: &str) -> Result<Option<String>, WasmSuiError> {
            self.state.borrow_mut().name_queries.push(name.to_string());
            Ok(self.names.get(name).cloned())
        }

        async fn serialize_transaction(
            &self,
            tx: &TransferTransaction,
        ) -> Result<Vec<u8>, WasmSuiError> {
            if let Some(gate) = &self.serialize_gate {
                gate.notified().await;
            }
            serde_json::to_vec(tx)
                .map_err(|e| WasmSuiError::RpcFailure(format!("serialize: {}", e)))
        }

        async fn execute_transaction(
            &self,
            tx_bytes: &[u8],
            serialized_signature: &str,
        ) -> Result<String, WasmSuiError> {
            if self.fail_execute {
                return Err(WasmSuiError::RpcFailure("execution failed".to_string()));
            }
            self.state
                .borrow_mut()
                .executions
                .push((tx_bytes.to_vec(), serialized_signature.to_string()));
            Ok(FINALITY.to_string())
        }
    }

    fn seed_for(vault: &MockVault, auth_token: u64) -> Seed {
        let pubkey_bytes = vault.pubkey_bytes();
        Seed {
            address: address_from_pubkey(&pubkey_bytes).unwrap(),
            pubkey_bytes,
            balance: Some(10.0),
            auth: SeedAuth {
                name: "Cool wallet".to_string(),
                auth_token,
            },
        }
    }

    fn request(vault: &MockVault, recipient: &str, amount: f64) -> TransferRequest {
        TransferRequest {
            recipient: recipient.to_string(),
            amount,
            seed: seed_for(vault, 1),
        }
    }

    #[tokio::test]
    async fn test_submit_transfer_happy_path() {
        let (vault, vault_state) = MockVault::new(vec![]);
        let (client, client_state) = MockClient::new();
        let req = request(&vault, ADDR, 1.5);
        let bridge = WalletBridge::new(vault, client);

        let digest = bridge.submit_transfer(&req).await.unwrap();
        assert_eq!(digest, FINALITY);

        let state = client_state.borrow();
        assert_eq!(state.executions.len(), 1);
        // Address recipient: no name lookup happened
        assert!(state.name_queries.is_empty());
        assert_eq!(vault_state.borrow().sign_calls, 1);

        // Executed bytes describe exactly the requested transfer
        let (tx_bytes, serialized_sig) = &state.executions[0];
        let tx: TransferTransaction = serde_json::from_slice(tx_bytes).unwrap();
        assert_eq!(tx.amount_mist, 1_500_000_000);
        assert_eq!(tx.recipient, ADDR);
        assert_eq!(tx.sender, req.seed.address);

        // Signature envelope carries the seed's key
        let (_, _, pk) = parse_serialized_signature(serialized_sig).unwrap();
        assert_eq!(pk, req.seed.pubkey_bytes);
    }

    #[tokio::test]
    async fn test_submit_transfer_resolves_handle() {
        let (vault, _) = MockVault::new(vec![]);
        let (mut client, client_state) = MockClient::new();
        client.names.insert("@alice".to_string(), ADDR.to_string());
        let req = request(&vault, "alice", 0.25);
        let bridge = WalletBridge::new(vault, client);

        bridge.submit_transfer(&req).await.unwrap();

        let state = client_state.borrow();
        assert_eq!(state.name_queries, vec!["@alice".to_string()]);
        let tx: TransferTransaction = serde_json::from_slice(&state.executions[0].0).unwrap();
        assert_eq!(tx.recipient, ADDR);
        assert_eq!(tx.amount_mist, 250_000_000);
    }

    #[tokio::test]
    async fn test_unresolvable_recipient_aborts_before_signing() {
        let (vault, vault_state) = MockVault::new(vec![]);
        let (client, client_state) = MockClient::new();
        let req = request(&vault, "ghost.sui", 1.0);
        let bridge = WalletBridge::new(vault, client);

        let err = bridge.submit_transfer(&req).await.unwrap_err();
        assert_eq!(err.kind(), "InvalidRecipient");
        assert_eq!(vault_state.borrow().sign_calls, 0);
        assert!(client_state.borrow().executions.is_empty());
    }

    #[tokio::test]
    async fn test_tampered_signature_never_reaches_execution() {
        let (mut vault, vault_state) = MockVault::new(vec![]);
        vault.tamper = true;
        let (client, client_state) = MockClient::new();
        let req = request(&vault, ADDR, 1.0);
        let bridge = WalletBridge::new(vault, client);

        let err = bridge.submit_transfer(&req).await.unwrap_err();
        assert_eq!(err.kind(), "BadSignature");
        assert_eq!(vault_state.borrow().sign_calls, 1);
        assert!(client_state.borrow().executions.is_empty());
    }

    #[tokio::test]
    async fn test_vault_denial_propagates() {
        let (mut vault, _) = MockVault::new(vec![]);
        vault.deny_signing = true;
        let (client, client_state) = MockClient::new();
        let req = request(&vault, ADDR, 1.0);
        let bridge = WalletBridge::new(vault, client);

        let err = bridge.submit_transfer(&req).await.unwrap_err();
        assert_eq!(err.kind(), "VaultDenied");
        assert!(client_state.borrow().executions.is_empty());
    }

    #[tokio::test]
    async fn test_execution_failure_is_terminal() {
        let (vault, _) = MockVault::new(vec![]);
        let (mut client, client_state) = MockClient::new();
        client.fail_execute = true;
        let req = request(&vault, ADDR, 1.0);
        let bridge = WalletBridge::new(vault, client);

        let err = bridge.submit_transfer(&req).await.unwrap_err();
        assert_eq!(err.kind(), "RpcFailure");
        // No resubmission happened
        assert!(client_state.borrow().executions.is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_submission_rejected() {
        let (vault, _) = MockVault::new(vec![]);
        let (mut client, client_state) = MockClient::new();
        let gate = Rc::new(tokio::sync::Notify::new());
        client.serialize_gate = Some(Rc::clone(&gate));
        let req = request(&vault, ADDR, 1.0);
        let bridge = WalletBridge::new(vault, client);

        let first = bridge.submit_transfer(&req);
        let second = async {
            let err = bridge.submit_transfer(&req).await.unwrap_err();
            assert_eq!(err, WasmSuiError::SubmissionInFlight(1));
            gate.notify_one();
        };

        let (first_result, ()) = tokio::join!(first, second);
        first_result.unwrap();
        assert_eq!(client_state.borrow().executions.len(), 1);
    }

    #[tokio::test]
    async fn test_token_released_after_failed_attempt() {
        let (vault, _) = MockVault::new(vec![]);
        let (client, _) = MockClient::new();
        let req = request(&vault, "ghost.sui", 1.0);
        let bridge = WalletBridge::new(vault, client);

        assert!(bridge.submit_transfer(&req).await.is_err());
        // The reservation from the failed attempt is gone
        let err = bridge.submit_transfer(&req).await.unwrap_err();
        assert_eq!(err.kind(), "InvalidRecipient");
    }

    #[test]
    fn test_inflight_tokens_per_token() {
        let tokens = InflightTokens::default();
        let guard = tokens.acquire(7).unwrap();
        assert_eq!(
            tokens.acquire(7).unwrap_err(),
            WasmSuiError::SubmissionInFlight(7)
        );
        // Other tokens are unaffected
        let _other = tokens.acquire(1).unwrap();
        drop(guard);
        assert!(tokens.acquire(7).is_ok());
    }

    #[tokio::test]
    async fn test_deauthorize_refreshes_full_list() {
        let (vault, vault_state) = MockVault::new(vec![
            SeedAuth {
                name: "Cool wallet".to_string(),
                auth_token: 1,
            },
            SeedAuth {
                name: "Old wallet".to_string(),
                auth_token: 7,
            },
        ]);
        let (client, _) = MockClient::new();
        let bridge = WalletBridge::new(vault, client);

        let list = bridge.deauthorize(7).await.unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.iter().all(|s| s.auth_token != 7));
        // Exactly one full refresh, not an incremental delta
        assert_eq!(vault_state.borrow().list_fetches, 1);
    }

    #[tokio::test]
    async fn test_authorize_returns_refreshed_list() {
        let (vault, vault_state) = MockVault::new(vec![SeedAuth {
            name: "Cool wallet".to_string(),
            auth_token: 1,
        }]);
        let (client, _) = MockClient::new();
        let bridge = WalletBridge::new(vault, client);

        let list = bridge.authorize_seeds().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(vault_state.borrow().list_fetches, 1);
    }

    #[tokio::test]
    async fn test_refresh_balance_converts_to_display_units() {
        let (vault, _) = MockVault::new(vec![]);
        let (mut client, _) = MockClient::new();
        client.balances.insert(ADDR.to_string(), 2_500_000_000);
        let bridge = WalletBridge::new(vault, client);

        let balance = bridge.refresh_balance(ADDR).await.unwrap();
        assert!((balance - 2.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_refresh_balance_failure_is_tagged_unknown() {
        let (vault, _) = MockVault::new(vec![]);
        let (mut client, _) = MockClient::new();
        client.fail_balance = true;
        let bridge = WalletBridge::new(vault, client);

        let err = bridge.refresh_balance(ADDR).await.unwrap_err();
        assert_eq!(err.kind(), "RpcFailure");
    }

    #[tokio::test]
    async fn test_fetch_seed() {
        let (vault, _) = MockVault::new(vec![]);
        let expected_pk = vault.pubkey_bytes();
        let expected_addr = address_from_pubkey(&expected_pk).unwrap();
        let (mut client, _) = MockClient::new();
        client.balances.insert(expected_addr.clone(), 1_000_000_000);
        let bridge = WalletBridge::new(vault, client);

        let auth = SeedAuth {
            name: "Cool wallet".to_string(),
            auth_token: 1,
        };
        let seed = bridge.fetch_seed(auth.clone()).await.unwrap();
        assert_eq!(seed.address, expected_addr);
        assert_eq!(seed.pubkey_bytes, expected_pk);
        assert_eq!(seed.balance, Some(1.0));
        assert_eq!(seed.auth, auth);
    }

    #[tokio::test]
    async fn test_fetch_seed_balance_failure_means_unknown() {
        let (vault, _) = MockVault::new(vec![]);
        let (mut client, _) = MockClient::new();
        client.fail_balance = true;
        let bridge = WalletBridge::new(vault, client);

        let auth = SeedAuth {
            name: "Cool wallet".to_string(),
            auth_token: 1,
        };
        let seed = bridge.fetch_seed(auth).await.unwrap();
        assert_eq!(seed.balance, None);
    }
}
