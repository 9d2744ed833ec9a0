//! Pre-submission checks for a transfer draft.

use alloy::primitives::{Address, U256};

use crate::domain::{TransferDraft, TransferRequest};
use crate::error::TransferError;
use crate::units::parse_amount;

/// Draft that passed the checks needing no provider round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedDraft {
    /// `None` when the recipient text is not an address.
    pub recipient: Option<Address>,
    pub value: U256,
}

/// Runs the submission checks in order and stops at the first failure:
/// missing fields, self-transfer, amount/balance, connection, recipient.
///
/// `balance` is the connected account's balance in minimal units. The
/// self-transfer and balance checks need a connection and pass vacuously
/// while disconnected, leaving the connection check to report it.
pub fn validate_transfer(
    draft: &TransferDraft,
    connected: Option<Address>,
    balance: Option<U256>,
    decimals: u8,
) -> Result<TransferRequest, TransferError> {
    let checked = check_draft(draft, connected, decimals)?;
    build_request(checked, connected, balance)
}

/// Missing fields, self-transfer and amount syntax. A draft rejected here
/// never costs a balance query.
pub fn check_draft(
    draft: &TransferDraft,
    connected: Option<Address>,
    decimals: u8,
) -> Result<CheckedDraft, TransferError> {
    let recipient = draft.recipient.trim();
    let amount = draft.amount.trim();

    if recipient.is_empty() || amount.is_empty() {
        return Err(TransferError::MissingFields);
    }

    let parsed_recipient = recipient.parse::<Address>().ok();
    if let Some(from) = connected {
        let same_text = recipient.eq_ignore_ascii_case(&from.to_string());
        if same_text || parsed_recipient == Some(from) {
            return Err(TransferError::SelfTransfer);
        }
    }

    let value = parse_amount(amount, decimals)?;
    Ok(CheckedDraft {
        recipient: parsed_recipient,
        value,
    })
}

/// Balance sufficiency, connection and recipient checks on a checked draft.
pub fn build_request(
    checked: CheckedDraft,
    connected: Option<Address>,
    balance: Option<U256>,
) -> Result<TransferRequest, TransferError> {
    if connected.is_some() && balance.unwrap_or(U256::ZERO) < checked.value {
        return Err(TransferError::InsufficientBalance);
    }

    let from = connected.ok_or(TransferError::NotConnected)?;
    let to = checked.recipient.ok_or(TransferError::InvalidRecipient)?;

    Ok(TransferRequest {
        from,
        to,
        value: checked.value,
    })
}
