use thiserror::Error;

use crate::ports::PortError;
use crate::state_machine::TransitionError;

/// Generic text shown for any dispatch or confirmation failure.
pub const TRANSACTION_FAILED_MESSAGE: &str = "Error while processing the transaction.";

/// User-facing failures of controller operations. None of them is fatal;
/// the view decides how to surface each through [`TransferError::presentation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("No wallet provider found. Install a browser wallet to continue.")]
    ProviderMissing,
    #[error("The wallet request was rejected.")]
    UserRejected,
    #[error("Connect your wallet first.")]
    NotConnected,
    #[error("Please enter a recipient address and an amount.")]
    MissingFields,
    #[error("You cannot send funds to yourself.")]
    SelfTransfer,
    #[error("Insufficient balance.")]
    InsufficientBalance,
    #[error("Invalid recipient address.")]
    InvalidRecipient,
    #[error("Invalid amount.")]
    InvalidAmount,
    #[error("The wallet provider did not respond.")]
    ProviderUnavailable,
    #[error("A transfer is already in progress.")]
    TransferInFlight,
    #[error("The wallet session changed; please retry.")]
    SessionChanged,
    #[error("{0}")]
    TransactionFailed(String),
    #[error("Action not available right now.")]
    InvalidTransition(#[from] TransitionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Blocking prompt the user must dismiss.
    Prompt,
    /// Inline text next to the form.
    Inline,
}

impl TransferError {
    pub fn presentation(&self) -> Presentation {
        match self {
            TransferError::ProviderMissing
            | TransferError::NotConnected
            | TransferError::MissingFields => Presentation::Prompt,
            _ => Presentation::Inline,
        }
    }

    pub fn transaction_failed() -> Self {
        TransferError::TransactionFailed(TRANSACTION_FAILED_MESSAGE.to_owned())
    }

    /// Maps a provider failure on account access or balance queries.
    pub(crate) fn from_provider(err: &PortError) -> Self {
        match err {
            PortError::NotFound(_) => TransferError::ProviderMissing,
            PortError::UserRejected(_) => TransferError::UserRejected,
            _ => TransferError::ProviderUnavailable,
        }
    }
}
