//! Session controller: wallet connection, balance, transfer draft and the
//! transaction lifecycle.
//!
//! All mutation goes through the operations below. State lives behind a
//! mutex that is never held across an await, so the view can read a
//! [`ControllerSnapshot`] while an operation is suspended on the provider.

use std::sync::{Mutex, MutexGuard, PoisonError};

use alloy::primitives::{Address, U256};
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::domain::{
    BalanceInfo, Confirmation, ConnectionState, ControllerSnapshot, DraftField, TransactionState,
    TransferDraft, TransferRequest,
};
use crate::error::TransferError;
use crate::ports::{PortError, ProviderEventKind, Signer, TransactionHandle, WalletProvider};
use crate::state_machine::{tx_transition, StateTransition, TxAction};
use crate::units::format_amount;
use crate::validation::{build_request, check_draft};

#[derive(Debug, Default)]
struct SessionState {
    connection: ConnectionState,
    balance: BalanceInfo,
    draft: TransferDraft,
    transaction: TransactionState,
    /// Advances whenever the connected account changes or goes away.
    epoch: u64,
    /// Set from the start of a submission until it has settled.
    submitting: bool,
    history: Vec<StateTransition>,
}

impl SessionState {
    fn apply(&mut self, action: TxAction, next: TransactionState) -> Result<(), TransferError> {
        let (to, transition) = tx_transition(self.transaction.phase(), action)?;
        debug_assert_eq!(to, next.phase());
        debug!(
            from = ?transition.from,
            to = ?transition.to,
            reason = transition.reason,
            "tx transition"
        );
        self.transaction = next;
        self.history.push(transition);
        Ok(())
    }

    fn set_account(&mut self, address: Option<Address>) {
        if self.connection.address() != address {
            self.epoch = self.epoch.saturating_add(1);
            self.balance = BalanceInfo {
                address,
                balance: None,
            };
        }
        self.connection = match address {
            Some(address) => ConnectionState::Connected(address),
            None => ConnectionState::Disconnected,
        };
    }
}

/// Clears the submission reservation however `submit_transfer` returns.
struct SubmitGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .submitting = false;
    }
}

pub struct TransferController<P: WalletProvider> {
    provider: P,
    config: ControllerConfig,
    state: Mutex<SessionState>,
}

impl<P: WalletProvider> TransferController<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ControllerConfig::default())
    }

    pub fn with_config(provider: P, config: ControllerConfig) -> Self {
        Self {
            provider,
            config,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        let s = self.state();
        ControllerSnapshot {
            connection: s.connection,
            balance: s.balance.clone(),
            draft: s.draft.clone(),
            transaction: s.transaction.clone(),
        }
    }

    pub fn connection(&self) -> ConnectionState {
        self.state().connection
    }

    pub fn draft(&self) -> TransferDraft {
        self.state().draft.clone()
    }

    pub fn transaction_state(&self) -> TransactionState {
        self.state().transaction.clone()
    }

    /// Applied transaction-state transitions, oldest first.
    pub fn history(&self) -> Vec<StateTransition> {
        self.state().history.clone()
    }

    /// Balance with the currency symbol, e.g. "1.5 ETH" or "- ETH".
    pub fn balance_label(&self) -> String {
        let s = self.state();
        format!("{} {}", s.balance.display_balance(), self.config.native_symbol)
    }

    /// Requests account access and connects the first returned account.
    pub async fn connect(&self) -> Result<Address, TransferError> {
        let accounts = self.provider.request_accounts().await.map_err(|e| {
            warn!(error = %e, "wallet connection failed");
            TransferError::from_provider(&e)
        })?;
        let address = accounts.first().copied().ok_or_else(|| {
            warn!("wallet returned no accounts");
            TransferError::UserRejected
        })?;

        self.state().set_account(Some(address));
        info!(%address, "wallet connected");
        Ok(address)
    }

    /// Returns to the disconnected state. Draft and transaction state are
    /// kept; a transfer already in flight still settles.
    pub fn disconnect(&self) {
        let mut s = self.state();
        if s.connection.is_connected() {
            info!("wallet disconnected");
        }
        s.set_account(None);
    }

    /// Queries the connected account's balance and stores it as a decimal
    /// string.
    pub async fn refresh_balance(&self) -> Result<BalanceInfo, TransferError> {
        let (address, epoch) = {
            let s = self.state();
            let address = s.connection.address().ok_or(TransferError::NotConnected)?;
            (address, s.epoch)
        };

        let wei = self.provider.get_balance(address).await.map_err(|e| {
            warn!(%address, error = %e, "balance query failed");
            TransferError::from_provider(&e)
        })?;
        let formatted = format_amount(wei, self.config.native_decimals)?;

        let mut s = self.state();
        if s.epoch != epoch {
            debug!(%address, "discarding balance for a stale session");
            return Err(TransferError::SessionChanged);
        }
        s.balance = BalanceInfo {
            address: Some(address),
            balance: Some(formatted),
        };
        debug!(%address, balance = ?s.balance.balance, "balance refreshed");
        Ok(s.balance.clone())
    }

    pub fn update_draft(&self, field: DraftField, value: impl Into<String>) {
        self.state().draft.set(field, value.into());
    }

    /// Validates the draft, dispatches the transfer and waits for its
    /// confirmation.
    ///
    /// Validation failures leave the transaction state untouched. Once
    /// dispatched the state is `Pending` until the provider confirms
    /// (`Succeeded`) or fails (`Failed`).
    pub async fn submit_transfer(&self) -> Result<Confirmation, TransferError> {
        let (draft, connected, epoch) = {
            let mut s = self.state();
            if s.submitting || s.transaction.is_pending() {
                debug!("submission rejected: transfer in flight");
                return Err(TransferError::TransferInFlight);
            }
            // only Idle may submit; terminal states wait for reset()
            tx_transition(s.transaction.phase(), TxAction::Submit)?;
            s.submitting = true;
            (s.draft.clone(), s.connection.address(), s.epoch)
        };
        let _guard = SubmitGuard { state: &self.state };

        let decimals = self.config.native_decimals;
        let checked = check_draft(&draft, connected, decimals)
            .inspect_err(|e| debug!(error = ?e, "transfer draft rejected"))?;
        let balance = match connected {
            Some(address) => Some(self.current_balance(address, epoch).await?),
            None => None,
        };
        let request = build_request(checked, connected, balance)
            .inspect_err(|e| debug!(error = ?e, "transfer draft rejected"))?;

        {
            let mut s = self.state();
            if s.epoch != epoch {
                return Err(TransferError::SessionChanged);
            }
            s.apply(TxAction::Submit, TransactionState::Pending)?;
        }
        info!(
            from = %request.from,
            to = %request.to,
            value = %request.value,
            amount = draft.amount.trim(),
            "dispatching transfer"
        );

        // single-flight and a forbidden reset keep the state Pending until here
        let outcome = self.dispatch(&request).await;

        let mut s = self.state();
        match outcome {
            Ok(confirmation) => {
                s.apply(TxAction::Confirm, TransactionState::Succeeded)?;
                info!(tx_hash = %confirmation.tx_hash, "transfer confirmed");
                Ok(confirmation)
            }
            Err(e) => {
                warn!(error = %e, "transfer failed");
                let failure = TransferError::transaction_failed();
                s.apply(TxAction::Fail, TransactionState::Failed(failure.to_string()))?;
                Err(failure)
            }
        }
    }

    /// Returns a settled transaction to `Idle`. Rejected while `Idle` or
    /// `Pending`; connection, balance and draft are left as they are.
    pub fn reset(&self) -> Result<(), TransferError> {
        let mut s = self.state();
        s.apply(TxAction::Reset, TransactionState::Idle)?;
        Ok(())
    }

    /// Applies account and connection notifications queued by the provider.
    /// Returns the number of events drained.
    pub fn sync_provider_events(&self) -> Result<usize, TransferError> {
        let events = self.provider.drain_events().map_err(|e| {
            warn!(error = %e, "draining provider events failed");
            TransferError::from_provider(&e)
        })?;

        let mut s = self.state();
        for event in &events {
            match &event.kind {
                ProviderEventKind::AccountsChanged(accounts) => {
                    if !s.connection.is_connected() {
                        continue;
                    }
                    let next = accounts.first().copied();
                    if next != s.connection.address() {
                        info!(sequence = event.sequence, account = ?next, "wallet account changed");
                    }
                    s.set_account(next);
                }
                ProviderEventKind::Disconnected => {
                    info!(sequence = event.sequence, "wallet provider disconnected");
                    s.set_account(None);
                }
                ProviderEventKind::ChainChanged(chain_id) => {
                    debug!(sequence = event.sequence, chain_id, "wallet chain changed");
                }
            }
        }
        Ok(events.len())
    }

    /// Fresh balance for the sufficiency check; also updates the snapshot.
    async fn current_balance(&self, address: Address, epoch: u64) -> Result<U256, TransferError> {
        let wei = self.provider.get_balance(address).await.map_err(|e| {
            warn!(%address, error = %e, "balance query before transfer failed");
            TransferError::transaction_failed()
        })?;
        let mut s = self.state();
        if s.epoch != epoch {
            return Err(TransferError::SessionChanged);
        }
        if let Ok(formatted) = format_amount(wei, self.config.native_decimals) {
            s.balance = BalanceInfo {
                address: Some(address),
                balance: Some(formatted),
            };
        }
        Ok(wei)
    }

    async fn dispatch(&self, request: &TransferRequest) -> Result<Confirmation, PortError> {
        let signer = self.provider.get_signer(request.from).await?;
        if signer.address() != request.from {
            return Err(PortError::Validation(format!(
                "signer {} does not match connected account {}",
                signer.address(),
                request.from
            )));
        }
        let handle = signer.send_transaction(request).await?;
        debug!(tx_hash = %handle.tx_hash(), "transfer broadcast, awaiting confirmation");
        handle.wait().await
    }
}
