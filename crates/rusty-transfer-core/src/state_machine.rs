use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TxPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxAction {
    Submit,
    Confirm,
    Fail,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    pub from: TxPhase,
    pub to: TxPhase,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal tx transition: {from:?} --{action:?}-->")]
pub struct TransitionError {
    pub from: TxPhase,
    pub action: TxAction,
}

/// Applies `action` to `from`. There is no way out of `Pending` other than
/// `Confirm` or `Fail`, and terminal states only leave through `Reset`.
pub fn tx_transition(
    from: TxPhase,
    action: TxAction,
) -> Result<(TxPhase, StateTransition), TransitionError> {
    let (to, reason) = match (from, action) {
        (TxPhase::Idle, TxAction::Submit) => (TxPhase::Pending, "transfer dispatched"),
        (TxPhase::Pending, TxAction::Confirm) => (TxPhase::Succeeded, "transfer confirmed"),
        (TxPhase::Pending, TxAction::Fail) => (TxPhase::Failed, "transfer failed"),
        (TxPhase::Succeeded | TxPhase::Failed, TxAction::Reset) => {
            (TxPhase::Idle, "reset by user")
        }
        _ => return Err(TransitionError { from, action }),
    };
    Ok((to, StateTransition { from, to, reason }))
}
