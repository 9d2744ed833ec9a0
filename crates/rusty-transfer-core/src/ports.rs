use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Confirmation, TransferRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("user rejected request: {0}")]
    UserRejected(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEventKind {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEvent {
    pub sequence: u64,
    pub kind: ProviderEventKind,
}

/// Injected wallet: account access, balance queries and signing.
///
/// Futures are not required to be `Send`; browser providers resolve on the
/// page's single event loop.
#[async_trait(?Send)]
pub trait WalletProvider {
    type Signer: Signer;

    async fn request_accounts(&self) -> Result<Vec<Address>, PortError>;

    /// Balance of `address` in the chain's minimal unit.
    async fn get_balance(&self, address: Address) -> Result<U256, PortError>;

    /// Signing capability bound to `account`.
    async fn get_signer(&self, account: Address) -> Result<Self::Signer, PortError>;

    /// Account/chain notifications received since the last drain.
    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        Ok(Vec::new())
    }
}

#[async_trait(?Send)]
pub trait Signer {
    type Handle: TransactionHandle;

    fn address(&self) -> Address;

    async fn send_transaction(&self, request: &TransferRequest)
        -> Result<Self::Handle, PortError>;
}

#[async_trait(?Send)]
pub trait TransactionHandle {
    fn tx_hash(&self) -> B256;

    /// Resolves once the network reports the transaction as final.
    async fn wait(&self) -> Result<Confirmation, PortError>;
}
