pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod ports;
pub mod state_machine;
pub mod units;
pub mod validation;

pub use config::ControllerConfig;
pub use controller::TransferController;
pub use domain::{
    BalanceInfo, Confirmation, ConnectionState, ControllerSnapshot, DraftField, TransactionState,
    TransferDraft, TransferRequest, TxPhase,
};
pub use error::{Presentation, TransferError, TRANSACTION_FAILED_MESSAGE};
pub use ports::{
    PortError, ProviderEvent, ProviderEventKind, Signer, TransactionHandle, WalletProvider,
};
pub use state_machine::{tx_transition, StateTransition, TransitionError, TxAction};
pub use units::{format_amount, parse_amount};
pub use validation::{build_request, check_draft, validate_transfer, CheckedDraft};
