use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Wallet connection for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected(Address),
}

impl ConnectionState {
    pub fn address(&self) -> Option<Address> {
        match self {
            ConnectionState::Disconnected => None,
            ConnectionState::Connected(address) => Some(*address),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }
}

/// On-demand balance snapshot. `None` fields render as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub address: Option<Address>,
    pub balance: Option<String>,
}

impl BalanceInfo {
    pub const PLACEHOLDER: &'static str = "-";

    pub fn display_address(&self) -> String {
        self.address
            .map(|a| a.to_string())
            .unwrap_or_else(|| Self::PLACEHOLDER.to_owned())
    }

    pub fn display_balance(&self) -> &str {
        self.balance.as_deref().unwrap_or(Self::PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftField {
    Recipient,
    Amount,
}

/// Transfer form contents, edited freely by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransferDraft {
    pub recipient: String,
    pub amount: String,
}

impl TransferDraft {
    pub fn new(recipient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Recipient => self.recipient = value,
            DraftField::Amount => self.amount = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl TransactionState {
    pub fn phase(&self) -> TxPhase {
        match self {
            TransactionState::Idle => TxPhase::Idle,
            TransactionState::Pending => TxPhase::Pending,
            TransactionState::Succeeded => TxPhase::Succeeded,
            TransactionState::Failed(_) => TxPhase::Failed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionState::Pending)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            TransactionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Payload-free view of [`TransactionState`] driven by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Native-currency transfer in the chain's minimal unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

/// Everything a view layer needs to render the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub connection: ConnectionState,
    pub balance: BalanceInfo,
    pub draft: TransferDraft,
    pub transaction: TransactionState,
}
