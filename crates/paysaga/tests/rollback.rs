//! Integration tests for rollback ordering.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use paysaga::{Transaction, TransactionError};
use paysaga_core::{
    ApiConfig, ApiError, CustomerParams, Invoice, MockPaymentsClient, PaymentMethodParams,
    PaymentsClient, SubscriptionParams,
};

fn test_config() -> ApiConfig {
    ApiConfig::new("sk_test_mock")
}

fn mock_pair() -> (Arc<MockPaymentsClient>, Arc<dyn PaymentsClient>) {
    let mock = Arc::new(MockPaymentsClient::new());
    let client: Arc<dyn PaymentsClient> = mock.clone();
    (mock, client)
}

#[tokio::test]
async fn failing_operation_rolls_back_in_reverse_order() -> anyhow::Result<()> {
    let (mock, client) = mock_pair();
    let mut tx = Transaction::new(&test_config(), client)?;

    let customer = tx
        .execute(|c| async move { c.create_customer(CustomerParams::default()).await })
        .await?;

    let customer_id = customer.id.clone();
    tx.execute(|c| async move {
        c.attach_payment_method(PaymentMethodParams {
            customer: customer_id,
            token: "tok_visa".to_string(),
        })
        .await
    })
    .await?;

    let customer_id = customer.id.clone();
    tx.execute(|c| async move {
        c.create_subscription(SubscriptionParams {
            customer: customer_id,
            price: "price_basic".to_string(),
        })
        .await
    })
    .await?;

    let result: Result<Invoice, _> = tx
        .execute(|_| async { Err(ApiError::request("create_invoice", "card declined")) })
        .await;

    assert!(matches!(result, Err(TransactionError::Operation(_))));
    assert_eq!(
        mock.calls(),
        vec![
            "create_customer cus_1",
            "attach_payment_method pm_2",
            "create_subscription sub_3",
            "cancel_subscription sub_3",
            "detach_payment_method pm_2",
            "delete_customer cus_1",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn first_operation_failure_has_nothing_to_roll_back() -> anyhow::Result<()> {
    let (mock, client) = mock_pair();
    let mut tx = Transaction::new(&test_config(), client)?;

    let result = tx
        .execute_unit(|_| async { Err(ApiError::request("create_customer", "unreachable")) })
        .await;

    assert!(matches!(result, Err(TransactionError::Operation(_))));
    assert!(mock.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn absent_result_registers_nothing_but_earlier_steps_still_roll_back() -> anyhow::Result<()> {
    let (mock, client) = mock_pair();
    let mut tx = Transaction::new(&test_config(), client)?;

    tx.execute(|c| async move { c.create_customer(CustomerParams::default()).await })
        .await?;

    let looked_up: Option<Invoice> = tx.execute_optional(|_| async { Ok(None) }).await?;
    assert!(looked_up.is_none());
    assert_eq!(tx.pending_compensations(), 1);

    let result = tx
        .execute_unit(|_| async { Err(ApiError::request("create_subscription", "boom")) })
        .await;

    assert!(result.is_err());
    assert_eq!(
        mock.calls(),
        vec!["create_customer cus_1", "delete_customer cus_1"]
    );
    Ok(())
}

#[tokio::test]
async fn rolled_back_transaction_rejects_further_operations() -> anyhow::Result<()> {
    let (mock, client) = mock_pair();
    let mut tx = Transaction::new(&test_config(), client)?;

    tx.execute(|c| async move { c.create_customer(CustomerParams::default()).await })
        .await?;
    let failed = tx
        .execute_unit(|_| async { Err(ApiError::request("create_invoice", "boom")) })
        .await;
    assert!(failed.is_err());

    let invoked = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&invoked);
    let result = tx
        .execute_unit(|_| async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;

    assert!(matches!(result, Err(TransactionError::InvalidState(_))));
    assert!(!invoked.load(Ordering::SeqCst));
    assert_eq!(
        mock.calls(),
        vec!["create_customer cus_1", "delete_customer cus_1"]
    );
    Ok(())
}
