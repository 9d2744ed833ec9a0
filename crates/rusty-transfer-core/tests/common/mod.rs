#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address, B256, U256};
use async_trait::async_trait;
use tokio::sync::Notify;

use rusty_transfer_core::{
    Confirmation, PortError, ProviderEvent, ProviderEventKind, Signer, TransactionHandle,
    TransferController, TransferRequest, WalletProvider,
};

pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

#[derive(Debug)]
struct FakeState {
    accounts: Result<Vec<Address>, PortError>,
    balance: Result<U256, PortError>,
    send_error: Option<PortError>,
    confirm_error: Option<PortError>,
    confirmation_gate: Option<Arc<Notify>>,
    balance_gate: Option<Arc<Notify>>,
    balance_queries: usize,
    sent: Vec<TransferRequest>,
    events: Vec<ProviderEvent>,
    event_seq: u64,
}

/// Scriptable wallet provider double.
#[derive(Debug, Clone)]
pub struct FakeProvider {
    state: Arc<Mutex<FakeState>>,
}

impl FakeProvider {
    pub fn new(account: Address, balance: U256) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                accounts: Ok(vec![account]),
                balance: Ok(balance),
                send_error: None,
                confirm_error: None,
                confirmation_gate: None,
                balance_gate: None,
                balance_queries: 0,
                sent: Vec::new(),
                events: Vec::new(),
                event_seq: 0,
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().expect("fake provider lock"))
    }

    pub fn set_accounts(&self, accounts: Result<Vec<Address>, PortError>) {
        self.with(|s| s.accounts = accounts);
    }

    pub fn set_balance(&self, balance: Result<U256, PortError>) {
        self.with(|s| s.balance = balance);
    }

    pub fn fail_send(&self, err: PortError) {
        self.with(|s| s.send_error = Some(err));
    }

    pub fn fail_confirmation(&self, err: PortError) {
        self.with(|s| s.confirm_error = Some(err));
    }

    /// Confirmation waits until the returned gate is notified.
    pub fn gate_confirmation(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.with(|s| s.confirmation_gate = Some(Arc::clone(&gate)));
        gate
    }

    /// Balance queries wait until the returned gate is notified.
    pub fn gate_balance(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.with(|s| s.balance_gate = Some(Arc::clone(&gate)));
        gate
    }

    pub fn push_event(&self, kind: ProviderEventKind) {
        self.with(|s| {
            s.event_seq += 1;
            let sequence = s.event_seq;
            s.events.push(ProviderEvent { sequence, kind });
        });
    }

    pub fn sent(&self) -> Vec<TransferRequest> {
        self.with(|s| s.sent.clone())
    }

    pub fn balance_queries(&self) -> usize {
        self.with(|s| s.balance_queries)
    }
}

#[async_trait(?Send)]
impl WalletProvider for FakeProvider {
    type Signer = FakeSigner;

    async fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        self.with(|s| s.accounts.clone())
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, PortError> {
        let gate = self.with(|s| {
            s.balance_queries += 1;
            s.balance_gate.clone()
        });
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.with(|s| s.balance.clone())
    }

    async fn get_signer(&self, account: Address) -> Result<FakeSigner, PortError> {
        Ok(FakeSigner {
            provider: self.clone(),
            account,
        })
    }

    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        Ok(self.with(|s| std::mem::take(&mut s.events)))
    }
}

#[derive(Debug)]
pub struct FakeSigner {
    provider: FakeProvider,
    account: Address,
}

#[async_trait(?Send)]
impl Signer for FakeSigner {
    type Handle = FakeHandle;

    fn address(&self) -> Address {
        self.account
    }

    async fn send_transaction(&self, request: &TransferRequest) -> Result<FakeHandle, PortError> {
        self.provider.with(|s| {
            if let Some(err) = s.send_error.clone() {
                return Err(err);
            }
            s.sent.push(*request);
            let tx_hash = keccak256(s.sent.len().to_be_bytes());
            Ok(FakeHandle {
                provider: self.provider.clone(),
                tx_hash,
            })
        })
    }
}

#[derive(Debug)]
pub struct FakeHandle {
    provider: FakeProvider,
    tx_hash: B256,
}

#[async_trait(?Send)]
impl TransactionHandle for FakeHandle {
    fn tx_hash(&self) -> B256 {
        self.tx_hash
    }

    async fn wait(&self) -> Result<Confirmation, PortError> {
        let gate = self.provider.with(|s| s.confirmation_gate.clone());
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.provider.with(|s| s.confirm_error.clone()) {
            Some(err) => Err(err),
            None => Ok(Confirmation {
                tx_hash: self.tx_hash,
                block_number: Some(1),
            }),
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn sender() -> Address {
    "0xaAaAaAaaAaAaAaaAaAAAAAAAAaaaAaAaAaaAaaAa"
        .parse()
        .expect("valid sender address")
}

pub fn recipient() -> Address {
    "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"
        .parse()
        .expect("valid recipient address")
}

pub fn eth(whole: u128, tenths: u128) -> U256 {
    U256::from(whole * WEI_PER_ETH + tenths * (WEI_PER_ETH / 10))
}

pub fn new_controller(balance: U256) -> (TransferController<FakeProvider>, FakeProvider) {
    init_tracing();
    let provider = FakeProvider::new(sender(), balance);
    (TransferController::new(provider.clone()), provider)
}

pub async fn connected_controller(
    balance: U256,
) -> (TransferController<FakeProvider>, FakeProvider) {
    let (controller, provider) = new_controller(balance);
    controller.connect().await.expect("connect");
    (controller, provider)
}
