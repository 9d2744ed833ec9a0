mod common;

use rusty_transfer_core::{
    DraftField, PortError, Presentation, TransactionState, TransferError, TxPhase,
};

use common::{connected_controller, eth, new_controller, recipient, sender};

#[tokio::test]
async fn empty_fields_yield_missing_fields_and_leave_state_unchanged() {
    let (controller, provider) = connected_controller(eth(5, 0)).await;
    let cases = [
        ("", ""),
        ("", "1.0"),
        ("0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB", ""),
        ("   ", " "),
    ];

    for (to, amount) in cases {
        controller.update_draft(DraftField::Recipient, to);
        controller.update_draft(DraftField::Amount, amount);
        let err = controller.submit_transfer().await.expect_err("must fail");
        assert_eq!(err, TransferError::MissingFields);
        assert_eq!(err.presentation(), Presentation::Prompt);
        assert_eq!(controller.transaction_state(), TransactionState::Idle);
    }
    assert!(provider.sent().is_empty());
    assert!(controller.history().is_empty());
}

#[tokio::test]
async fn recipient_equal_to_sender_in_any_case_is_self_transfer() {
    let (controller, provider) = connected_controller(eth(1, 5)).await;
    let lower = sender().to_string().to_lowercase();
    let upper = format!("0x{}", lower.trim_start_matches("0x").to_uppercase());

    for to in [lower, upper, sender().to_string()] {
        controller.update_draft(DraftField::Recipient, to);
        controller.update_draft(DraftField::Amount, "0.1");
        let err = controller.submit_transfer().await.expect_err("self transfer");
        assert_eq!(err, TransferError::SelfTransfer);
        assert_eq!(err.presentation(), Presentation::Inline);
    }
    assert!(provider.sent().is_empty());
    assert_eq!(provider.balance_queries(), 0);
    assert_eq!(controller.transaction_state(), TransactionState::Idle);
}

#[tokio::test]
async fn draft_checks_run_before_the_balance_query() {
    let (controller, provider) = connected_controller(eth(3, 0)).await;
    provider.set_balance(Err(PortError::Transport("node down".to_owned())));

    controller.update_draft(DraftField::Recipient, sender().to_string());
    controller.update_draft(DraftField::Amount, "1");
    assert_eq!(
        controller.submit_transfer().await,
        Err(TransferError::SelfTransfer)
    );

    controller.update_draft(DraftField::Recipient, recipient().to_string());
    controller.update_draft(DraftField::Amount, "1,5");
    assert_eq!(
        controller.submit_transfer().await,
        Err(TransferError::InvalidAmount)
    );

    assert_eq!(provider.balance_queries(), 0);
    assert_eq!(controller.transaction_state(), TransactionState::Idle);
}

#[tokio::test]
async fn amount_above_balance_is_insufficient_and_nothing_is_dispatched() {
    let (controller, provider) = connected_controller(eth(1, 5)).await;
    controller.update_draft(DraftField::Recipient, recipient().to_string());
    controller.update_draft(DraftField::Amount, "2.0");

    let err = controller.submit_transfer().await.expect_err("insufficient");
    assert_eq!(err, TransferError::InsufficientBalance);
    assert!(provider.sent().is_empty());
    assert_eq!(controller.transaction_state(), TransactionState::Idle);
    // the check runs against a fresh balance which also lands in the snapshot
    assert_eq!(provider.balance_queries(), 1);
    assert_eq!(controller.snapshot().balance.balance.as_deref(), Some("1.5"));
}

#[tokio::test]
async fn submit_while_disconnected_is_not_connected() {
    let (controller, provider) = new_controller(eth(1, 0));
    controller.update_draft(DraftField::Recipient, recipient().to_string());
    controller.update_draft(DraftField::Amount, "0.5");

    let err = controller.submit_transfer().await.expect_err("not connected");
    assert_eq!(err, TransferError::NotConnected);
    assert_eq!(err.presentation(), Presentation::Prompt);
    assert_eq!(provider.balance_queries(), 0);
    assert!(provider.sent().is_empty());
}

#[tokio::test]
async fn malformed_amount_and_recipient_are_rejected_before_dispatch() {
    let (controller, provider) = connected_controller(eth(3, 0)).await;

    controller.update_draft(DraftField::Recipient, recipient().to_string());
    controller.update_draft(DraftField::Amount, "one");
    let err = controller.submit_transfer().await.expect_err("bad amount");
    assert_eq!(err, TransferError::InvalidAmount);

    controller.update_draft(DraftField::Recipient, "0x1234");
    controller.update_draft(DraftField::Amount, "1");
    let err = controller.submit_transfer().await.expect_err("bad recipient");
    assert_eq!(err, TransferError::InvalidRecipient);

    assert!(provider.sent().is_empty());
    assert_eq!(controller.transaction_state().phase(), TxPhase::Idle);
}

#[tokio::test]
async fn balance_lookup_failure_before_dispatch_keeps_idle() {
    let (controller, provider) = connected_controller(eth(3, 0)).await;
    provider.set_balance(Err(PortError::Transport("node down".to_owned())));
    controller.update_draft(DraftField::Recipient, recipient().to_string());
    controller.update_draft(DraftField::Amount, "1");

    let err = controller.submit_transfer().await.expect_err("balance failure");
    assert!(matches!(err, TransferError::TransactionFailed(_)));
    assert!(!err.to_string().contains("node down"));
    assert_eq!(controller.transaction_state(), TransactionState::Idle);
    assert!(provider.sent().is_empty());
}
