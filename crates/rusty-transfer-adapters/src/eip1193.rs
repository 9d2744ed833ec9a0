use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::{address, keccak256, Address, B256, U256};
use async_trait::async_trait;
use serde_json::Value;

use rusty_transfer_core::{
    Confirmation, PortError, ProviderEvent, ProviderEventKind, Signer, TransactionHandle,
    TransferRequest, WalletProvider,
};

use crate::TransferAdapterConfig;

/// EIP-1193 error code for a request the user declined.
const USER_REJECTED_CODE: i64 = 4001;

/// Account managed by the deterministic wallet.
pub const DETERMINISTIC_ACCOUNT: Address = address!("1000000000000000000000000000000000000001");

#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    receipt_poll_interval_ms: u64,
    receipt_max_polls: Option<u32>,
    state: Arc<Mutex<ProviderState>>,
    #[cfg(target_arch = "wasm32")]
    hooks: Arc<Mutex<BrowserHooks>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(PortError),
    Deterministic,
    #[cfg(not(target_arch = "wasm32"))]
    Proxy(ProxyRuntime),
    #[cfg(target_arch = "wasm32")]
    Browser,
}

#[derive(Debug, Clone)]
#[cfg(not(target_arch = "wasm32"))]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Default)]
struct ProviderState {
    accounts: Vec<Address>,
    balances: HashMap<Address, U256>,
    receipts: HashMap<B256, Option<u64>>,
    tx_count: u64,
    reject_requests: bool,
    fail_confirmations: bool,
    event_seq: u64,
    events: Vec<ProviderEvent>,
}

impl ProviderState {
    fn push_event(&mut self, kind: ProviderEventKind) {
        self.event_seq = self.event_seq.saturating_add(1);
        let sequence = self.event_seq;
        self.events.push(ProviderEvent { sequence, kind });
    }

    /// Ledger of the deterministic wallet: one account holding 10 ETH.
    fn funded() -> Self {
        let mut balances = HashMap::new();
        balances.insert(
            DETERMINISTIC_ACCOUNT,
            U256::from(10u128 * 1_000_000_000_000_000_000),
        );
        Self {
            accounts: vec![DETERMINISTIC_ACCOUNT],
            balances,
            ..Self::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
struct BrowserHooks {
    accounts_changed: Option<wasm_bindgen::closure::Closure<dyn FnMut(wasm_bindgen::JsValue)>>,
    chain_changed: Option<wasm_bindgen::closure::Closure<dyn FnMut(wasm_bindgen::JsValue)>>,
    disconnect: Option<wasm_bindgen::closure::Closure<dyn FnMut(wasm_bindgen::JsValue)>>,
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(TransferAdapterConfig::from_env())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: TransferAdapterConfig) -> Self {
        #[cfg(target_arch = "wasm32")]
        let mode = if browser_provider_available() {
            ProviderMode::Browser
        } else {
            ProviderMode::Disabled(PortError::NotFound("window.ethereum missing".to_owned()))
        };

        #[cfg(not(target_arch = "wasm32"))]
        let mode = if let Some(ref base_url) = config.eip1193_proxy_url {
            let timeout = std::time::Duration::from_millis(config.request_timeout_ms);
            match reqwest::Client::builder().timeout(timeout).build() {
                Ok(client) => ProviderMode::Proxy(ProxyRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => {
                    if config.strict_runtime_required() {
                        ProviderMode::Disabled(PortError::Policy(format!(
                            "failed to initialize EIP-1193 proxy client in production profile: {e}"
                        )))
                    } else {
                        tracing::warn!(
                            error = %e,
                            "EIP-1193 proxy client unavailable, using deterministic wallet"
                        );
                        ProviderMode::Deterministic
                    }
                }
            }
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(PortError::Policy(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            ))
        } else {
            ProviderMode::Deterministic
        };

        Self::from_mode(mode, &config)
    }

    /// Adapter for a page with no injected wallet.
    pub fn unavailable() -> Self {
        Self::from_mode(
            ProviderMode::Disabled(PortError::NotFound("no EIP-1193 provider injected".to_owned())),
            &TransferAdapterConfig::default(),
        )
    }

    /// In-memory wallet with one funded account, regardless of environment.
    pub fn deterministic() -> Self {
        Self::from_mode(ProviderMode::Deterministic, &TransferAdapterConfig::default())
    }

    fn from_mode(mode: ProviderMode, config: &TransferAdapterConfig) -> Self {
        tracing::debug!(mode = mode_name(&mode), "EIP-1193 adapter initialized");
        let state = if matches!(mode, ProviderMode::Deterministic) {
            ProviderState::funded()
        } else {
            ProviderState::default()
        };
        Self {
            mode,
            receipt_poll_interval_ms: config.receipt_poll_interval_ms,
            receipt_max_polls: config.receipt_max_polls,
            state: Arc::new(Mutex::new(state)),
            #[cfg(target_arch = "wasm32")]
            hooks: Arc::new(Mutex::new(BrowserHooks::default())),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self.mode, ProviderMode::Deterministic)
    }

    fn check_mode(&self) -> Result<(), PortError> {
        if let ProviderMode::Disabled(err) = &self.mode {
            return Err(err.clone());
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    pub fn debug_inject_accounts_changed(&self, accounts: Vec<Address>) -> Result<(), PortError> {
        let mut g = self.lock()?;
        g.accounts = accounts.clone();
        g.push_event(ProviderEventKind::AccountsChanged(accounts));
        Ok(())
    }

    pub fn debug_inject_chain_changed(&self, chain_id: u64) -> Result<(), PortError> {
        self.lock()?.push_event(ProviderEventKind::ChainChanged(chain_id));
        Ok(())
    }

    pub fn debug_inject_disconnect(&self) -> Result<(), PortError> {
        let mut g = self.lock()?;
        g.accounts.clear();
        g.push_event(ProviderEventKind::Disconnected);
        Ok(())
    }

    pub fn debug_set_balance(&self, account: Address, balance: U256) -> Result<(), PortError> {
        self.lock()?.balances.insert(account, balance);
        Ok(())
    }

    pub fn debug_balance(&self, account: Address) -> Result<U256, PortError> {
        Ok(self
            .lock()?
            .balances
            .get(&account)
            .copied()
            .unwrap_or(U256::ZERO))
    }

    /// Makes the deterministic wallet decline account and signing requests.
    pub fn debug_reject_requests(&self, reject: bool) -> Result<(), PortError> {
        self.lock()?.reject_requests = reject;
        Ok(())
    }

    /// Makes deterministic transfers revert instead of confirming.
    pub fn debug_fail_confirmations(&self, fail: bool) -> Result<(), PortError> {
        self.lock()?.fail_confirmations = fail;
        Ok(())
    }

    fn deterministic_guard(&self) -> Result<MutexGuard<'_, ProviderState>, PortError> {
        let g = self.lock()?;
        if g.reject_requests {
            return Err(PortError::UserRejected(
                "deterministic wallet rejected the request".to_owned(),
            ));
        }
        Ok(g)
    }

    fn deterministic_send(&self, request: &TransferRequest) -> Result<B256, PortError> {
        let mut g = self.deterministic_guard()?;
        let available = g.balances.get(&request.from).copied().unwrap_or(U256::ZERO);
        if available < request.value {
            return Err(PortError::Transport(
                "insufficient funds for transfer".to_owned(),
            ));
        }
        g.tx_count = g.tx_count.saturating_add(1);
        let mut seed = Vec::with_capacity(20 + 20 + 32 + 8);
        seed.extend_from_slice(request.from.as_slice());
        seed.extend_from_slice(request.to.as_slice());
        seed.extend_from_slice(&request.value.to_be_bytes::<32>());
        seed.extend_from_slice(&g.tx_count.to_be_bytes());
        let tx_hash = keccak256(seed);

        if g.fail_confirmations {
            g.receipts.insert(tx_hash, None);
        } else {
            let block = g.tx_count;
            g.balances.insert(request.from, available - request.value);
            let credited = g.balances.get(&request.to).copied().unwrap_or(U256::ZERO);
            g.balances
                .insert(request.to, credited.saturating_add(request.value));
            g.receipts.insert(tx_hash, Some(block));
        }
        Ok(tx_hash)
    }

    fn deterministic_receipt(&self, tx_hash: B256) -> Result<Confirmation, PortError> {
        match self.lock()?.receipts.get(&tx_hash) {
            Some(Some(block)) => Ok(Confirmation {
                tx_hash,
                block_number: Some(*block),
            }),
            Some(None) => Err(PortError::Transport(format!(
                "transaction {tx_hash} reverted"
            ))),
            None => Err(PortError::NotFound(format!("unknown transaction {tx_hash}"))),
        }
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, PortError> {
        match &self.mode {
            ProviderMode::Disabled(err) => Err(err.clone()),
            ProviderMode::Deterministic => Err(PortError::NotImplemented(
                "deterministic wallet has no rpc transport",
            )),
            #[cfg(not(target_arch = "wasm32"))]
            ProviderMode::Proxy(proxy) => proxy.call(method, params).await,
            #[cfg(target_arch = "wasm32")]
            ProviderMode::Browser => wasm_request(method, params).await,
        }
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<Confirmation, PortError> {
        let mut polls: u32 = 0;
        loop {
            let receipt = self
                .rpc("eth_getTransactionReceipt", serde_json::json!([tx_hash]))
                .await?;
            if !receipt.is_null() {
                return receipt_confirmation(tx_hash, &receipt);
            }
            polls = polls.saturating_add(1);
            if let Some(max) = self.receipt_max_polls {
                if polls >= max {
                    return Err(PortError::Transport(format!(
                        "no receipt for {tx_hash} after {polls} polls"
                    )));
                }
            }
            tracing::trace!(%tx_hash, polls, "receipt not available yet");
            sleep_ms(self.receipt_poll_interval_ms).await;
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn register_browser_hooks(&self) -> Result<(), PortError> {
        use wasm_bindgen::{closure::Closure, JsCast, JsValue};

        let provider = browser_provider()?;
        let on_fn = get_prop(&provider, "on")
            .ok()
            .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
            .or_else(|| {
                get_prop(&provider, "addListener")
                    .ok()
                    .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
            })
            .ok_or(PortError::NotImplemented(
                "provider does not expose on/addListener",
            ))?;

        let mut hooks = self
            .hooks
            .lock()
            .map_err(|e| PortError::Transport(format!("provider hooks lock poisoned: {e}")))?;
        if hooks.accounts_changed.is_some() {
            return Ok(());
        }

        let state_for_accounts = Arc::clone(&self.state);
        let accounts_cb = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let mut accounts = Vec::new();
            if js_sys::Array::is_array(&value) {
                for item in js_sys::Array::from(&value).iter() {
                    if let Some(addr) = item.as_string().and_then(|raw| raw.parse().ok()) {
                        accounts.push(addr);
                    }
                }
            }
            if let Ok(mut g) = state_for_accounts.lock() {
                g.accounts = accounts.clone();
                g.push_event(ProviderEventKind::AccountsChanged(accounts));
            }
        });

        let state_for_chain = Arc::clone(&self.state);
        let chain_cb = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            if let Some(chain_id) = value.as_string().and_then(|s| parse_chain_id_str(&s).ok()) {
                if let Ok(mut g) = state_for_chain.lock() {
                    g.push_event(ProviderEventKind::ChainChanged(chain_id));
                }
            }
        });

        let state_for_disconnect = Arc::clone(&self.state);
        let disconnect_cb = Closure::<dyn FnMut(JsValue)>::new(move |_value: JsValue| {
            if let Ok(mut g) = state_for_disconnect.lock() {
                g.accounts.clear();
                g.push_event(ProviderEventKind::Disconnected);
            }
        });

        for (event, cb) in [
            ("accountsChanged", &accounts_cb),
            ("chainChanged", &chain_cb),
            ("disconnect", &disconnect_cb),
        ] {
            on_fn
                .call2(&provider, &JsValue::from_str(event), cb.as_ref().unchecked_ref())
                .map_err(|e| PortError::Transport(format!("register {event} failed: {e:?}")))?;
        }

        hooks.accounts_changed = Some(accounts_cb);
        hooks.chain_changed = Some(chain_cb);
        hooks.disconnect = Some(disconnect_cb);
        Ok(())
    }
}

#[async_trait(?Send)]
impl WalletProvider for Eip1193Adapter {
    type Signer = Eip1193Signer;

    async fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        self.check_mode()?;

        if self.is_deterministic() {
            return Ok(self.deterministic_guard()?.accounts.clone());
        }

        let result = self
            .rpc("eth_requestAccounts", serde_json::json!([]))
            .await?;
        let arr = result.as_array().ok_or_else(|| {
            PortError::Transport("eth_requestAccounts: array expected".to_owned())
        })?;
        let mut accounts = Vec::with_capacity(arr.len());
        for item in arr {
            let raw = item.as_str().ok_or_else(|| {
                PortError::Transport("eth_requestAccounts: string expected".to_owned())
            })?;
            let parsed: Address = raw
                .parse()
                .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))?;
            accounts.push(parsed);
        }

        let mut g = self.lock()?;
        if g.accounts != accounts {
            g.accounts = accounts.clone();
            g.push_event(ProviderEventKind::AccountsChanged(accounts.clone()));
        }
        Ok(accounts)
    }

    async fn get_balance(&self, address: Address) -> Result<U256, PortError> {
        self.check_mode()?;

        if self.is_deterministic() {
            return self.debug_balance(address);
        }

        let result = self
            .rpc(
                "eth_getBalance",
                serde_json::json!([address.to_string(), "latest"]),
            )
            .await?;
        parse_quantity(&result, "eth_getBalance")
    }

    async fn get_signer(&self, account: Address) -> Result<Eip1193Signer, PortError> {
        self.check_mode()?;

        if self.is_deterministic() && !self.deterministic_guard()?.accounts.contains(&account) {
            return Err(PortError::Policy(format!(
                "account {account} is not managed by this wallet"
            )));
        }

        Ok(Eip1193Signer {
            adapter: self.clone(),
            account,
        })
    }

    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        self.check_mode()?;
        let mut g = self.lock()?;
        Ok(std::mem::take(&mut g.events))
    }
}

/// Signing capability for one account of an [`Eip1193Adapter`].
#[derive(Debug, Clone)]
pub struct Eip1193Signer {
    adapter: Eip1193Adapter,
    account: Address,
}

#[async_trait(?Send)]
impl Signer for Eip1193Signer {
    type Handle = Eip1193PendingTx;

    fn address(&self) -> Address {
        self.account
    }

    async fn send_transaction(
        &self,
        request: &TransferRequest,
    ) -> Result<Eip1193PendingTx, PortError> {
        self.adapter.check_mode()?;
        if request.from != self.account {
            return Err(PortError::Validation(format!(
                "transfer sender {} does not match signer {}",
                request.from, self.account
            )));
        }

        let tx_hash = if self.adapter.is_deterministic() {
            self.adapter.deterministic_send(request)?
        } else {
            let payload = serde_json::json!({
                "from": request.from.to_string(),
                "to": request.to.to_string(),
                "value": format!("0x{:x}", request.value),
            });
            let result = self
                .adapter
                .rpc("eth_sendTransaction", serde_json::json!([payload]))
                .await?;
            let hash = result.as_str().ok_or_else(|| {
                PortError::Transport("eth_sendTransaction must return hash".to_owned())
            })?;
            hash.parse()
                .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))?
        };

        tracing::debug!(%tx_hash, to = %request.to, "transaction submitted to wallet");
        Ok(Eip1193PendingTx {
            adapter: self.adapter.clone(),
            tx_hash,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Eip1193PendingTx {
    adapter: Eip1193Adapter,
    tx_hash: B256,
}

#[async_trait(?Send)]
impl TransactionHandle for Eip1193PendingTx {
    fn tx_hash(&self) -> B256 {
        self.tx_hash
    }

    async fn wait(&self) -> Result<Confirmation, PortError> {
        self.adapter.check_mode()?;
        if self.adapter.is_deterministic() {
            return self.adapter.deterministic_receipt(self.tx_hash);
        }
        self.adapter.wait_for_receipt(self.tx_hash).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ProxyRuntime {
    async fn call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.base_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Transport(format!("eip1193 proxy request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Transport(format!("eip1193 proxy json decode failed: {e}")))?;
        if let Some(err) = body.get("error") {
            return Err(rpc_error(method, err));
        }
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "eip1193 proxy status {status}: {body}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("eip1193 proxy missing result".to_owned()))
    }
}

fn mode_name(mode: &ProviderMode) -> &'static str {
    match mode {
        ProviderMode::Disabled(_) => "disabled",
        ProviderMode::Deterministic => "deterministic",
        #[cfg(not(target_arch = "wasm32"))]
        ProviderMode::Proxy(_) => "proxy",
        #[cfg(target_arch = "wasm32")]
        ProviderMode::Browser => "browser",
    }
}

fn rpc_error(method: &str, err: &Value) -> PortError {
    let code = err.get("code").and_then(Value::as_i64);
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    if code == Some(USER_REJECTED_CODE) {
        PortError::UserRejected(format!("{method}: {message}"))
    } else {
        PortError::Transport(format!("{method} returned error {code:?}: {message}"))
    }
}

fn parse_quantity(value: &Value, what: &str) -> Result<U256, PortError> {
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Transport(format!("{what}: hex quantity expected")))?;
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| PortError::Validation(format!("{what}: missing 0x prefix in {raw}")))?;
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| PortError::Validation(format!("{what}: invalid quantity {raw}: {e}")))
}

fn receipt_confirmation(tx_hash: B256, receipt: &Value) -> Result<Confirmation, PortError> {
    let status = receipt.get("status").map(|s| parse_quantity(s, "receipt status"));
    if let Some(status) = status {
        if status? == U256::ZERO {
            return Err(PortError::Transport(format!(
                "transaction {tx_hash} reverted"
            )));
        }
    }
    let block_number = match receipt.get("blockNumber") {
        Some(v) if !v.is_null() => {
            let n = parse_quantity(v, "receipt blockNumber")?;
            Some(u64::try_from(n).map_err(|e| {
                PortError::Validation(format!("receipt blockNumber out of range: {e}"))
            })?)
        }
        _ => None,
    };
    Ok(Confirmation {
        tx_hash,
        block_number,
    })
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn parse_chain_id_str(raw: &str) -> Result<u64, PortError> {
    if raw.starts_with("0x") || raw.starts_with("0X") {
        u64::from_str_radix(raw.trim_start_matches("0x").trim_start_matches("0X"), 16)
            .map_err(|e| PortError::Validation(format!("invalid hex chain id: {e}")))
    } else {
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid chain id: {e}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u64) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[cfg(target_arch = "wasm32")]
async fn wasm_request(method: &str, params: Value) -> Result<Value, PortError> {
    use serde::Serialize;
    use wasm_bindgen::JsCast;

    let provider = browser_provider()?;
    let request_fn = get_prop(&provider, "request")
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
        .ok_or(PortError::NotImplemented(
            "window.ethereum.request is unavailable",
        ))?;

    let request = serde_json::json!({
        "method": method,
        "params": params,
    });
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let request_js = request
        .serialize(&serializer)
        .map_err(|e| PortError::Transport(format!("failed to encode wasm request: {e}")))?;
    let promise_js = request_fn
        .call1(&provider, &request_js)
        .map_err(|e| PortError::Transport(format!("provider request dispatch failed: {e:?}")))?;
    let promise = promise_js
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| PortError::Transport("provider request did not return Promise".to_owned()))?;
    let result_js = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| js_rpc_error(method, &e))?;
    serde_wasm_bindgen::from_value(result_js)
        .map_err(|e| PortError::Transport(format!("failed to decode wasm response: {e}")))
}

#[cfg(target_arch = "wasm32")]
fn js_rpc_error(method: &str, err: &wasm_bindgen::JsValue) -> PortError {
    let code = get_prop(err, "code").ok().and_then(|c| c.as_f64());
    let message = get_prop(err, "message")
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    let value = serde_json::json!({ "code": code.map(|c| c as i64), "message": message });
    rpc_error(method, &value)
}

#[cfg(target_arch = "wasm32")]
fn browser_provider_available() -> bool {
    browser_provider().is_ok()
}

#[cfg(target_arch = "wasm32")]
fn browser_provider() -> Result<wasm_bindgen::JsValue, PortError> {
    let window =
        web_sys::window().ok_or_else(|| PortError::NotFound("missing window".to_owned()))?;
    let provider = get_prop(&window.into(), "ethereum")?;
    if provider.is_null() || provider.is_undefined() {
        return Err(PortError::NotFound("window.ethereum missing".to_owned()));
    }
    Ok(provider)
}

#[cfg(target_arch = "wasm32")]
fn get_prop(target: &wasm_bindgen::JsValue, key: &str) -> Result<wasm_bindgen::JsValue, PortError> {
    js_sys::Reflect::get(target, &wasm_bindgen::JsValue::from_str(key))
        .map_err(|e| PortError::Transport(format!("read provider property {key} failed: {e:?}")))
}
