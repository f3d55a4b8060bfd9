//! In-memory [`PaymentsClient`] for tests.
//!
//! Records every call in invocation order, hands out deterministic
//! prefixed identifiers, and can be scripted to fail named calls.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::client::{
    CustomerParams, InvoiceParams, PaymentIntentParams, PaymentMethodParams, PaymentsClient,
    SubscriptionParams, WebhookEndpointParams,
};
use crate::error::ApiError;
use crate::resources::{
    Customer, Invoice, InvoiceStatus, PaymentIntent, PaymentIntentStatus, PaymentMethod,
    Subscription, SubscriptionStatus, WebhookEndpoint,
};

#[derive(Debug, Default)]
pub struct MockPaymentsClient {
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashSet<String>>,
    next_id: AtomicU64,
}

impl MockPaymentsClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the named call to fail with [`ApiError::Request`].
    ///
    /// The attempt is still recorded in the call log.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_failure(self, call: &str) -> Self {
        self.failures
            .lock()
            .expect("lock poisoned")
            .insert(call.to_string());
        self
    }

    /// All calls made so far, in invocation order, as `"name id"` entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}_{n}")
    }

    fn record(&self, call: &'static str, id: &str) -> Result<(), ApiError> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(format!("{call} {id}"));
        if self.failures.lock().expect("lock poisoned").contains(call) {
            return Err(ApiError::request(call, "scripted failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentsClient for MockPaymentsClient {
    async fn create_customer(&self, params: CustomerParams) -> Result<Customer, ApiError> {
        let id = self.next_id("cus");
        self.record("create_customer", &id)?;
        Ok(Customer {
            id,
            name: params.name,
            email: params.email,
        })
    }

    async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete_customer", id)
    }

    async fn attach_payment_method(
        &self,
        params: PaymentMethodParams,
    ) -> Result<PaymentMethod, ApiError> {
        let id = self.next_id("pm");
        self.record("attach_payment_method", &id)?;
        Ok(PaymentMethod {
            id,
            customer: Some(params.customer),
        })
    }

    async fn detach_payment_method(&self, id: &str) -> Result<(), ApiError> {
        self.record("detach_payment_method", id)
    }

    async fn create_subscription(
        &self,
        params: SubscriptionParams,
    ) -> Result<Subscription, ApiError> {
        let id = self.next_id("sub");
        self.record("create_subscription", &id)?;
        Ok(Subscription {
            id,
            customer: params.customer,
            status: SubscriptionStatus::Active,
        })
    }

    async fn cancel_subscription(&self, id: &str) -> Result<(), ApiError> {
        self.record("cancel_subscription", id)
    }

    async fn create_webhook_endpoint(
        &self,
        params: WebhookEndpointParams,
    ) -> Result<WebhookEndpoint, ApiError> {
        let id = self.next_id("we");
        self.record("create_webhook_endpoint", &id)?;
        Ok(WebhookEndpoint {
            id,
            url: params.url,
        })
    }

    async fn delete_webhook_endpoint(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete_webhook_endpoint", id)
    }

    async fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> Result<PaymentIntent, ApiError> {
        let id = self.next_id("pi");
        self.record("create_payment_intent", &id)?;
        Ok(PaymentIntent {
            id,
            amount: params.amount,
            currency: params.currency,
            status: PaymentIntentStatus::RequiresPaymentMethod,
        })
    }

    async fn cancel_payment_intent(&self, id: &str) -> Result<(), ApiError> {
        self.record("cancel_payment_intent", id)
    }

    async fn create_invoice(&self, params: InvoiceParams) -> Result<Invoice, ApiError> {
        let id = self.next_id("in");
        self.record("create_invoice", &id)?;
        Ok(Invoice {
            id,
            customer: params.customer,
            status: InvoiceStatus::Draft,
        })
    }

    async fn void_invoice(&self, id: &str) -> Result<(), ApiError> {
        self.record("void_invoice", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_deterministic_and_prefixed() -> anyhow::Result<()> {
        let mock = MockPaymentsClient::new();

        let customer = mock.create_customer(CustomerParams::default()).await?;
        let subscription = mock
            .create_subscription(SubscriptionParams {
                customer: customer.id.clone(),
                price: "price_basic".to_string(),
            })
            .await?;

        assert_eq!(customer.id, "cus_1");
        assert_eq!(subscription.id, "sub_2");
        Ok(())
    }

    #[tokio::test]
    async fn calls_are_recorded_in_order() -> anyhow::Result<()> {
        let mock = MockPaymentsClient::new();

        let customer = mock.create_customer(CustomerParams::default()).await?;
        mock.delete_customer(&customer.id).await?;

        assert_eq!(
            mock.calls(),
            vec!["create_customer cus_1", "delete_customer cus_1"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn scripted_failure_is_recorded_and_returned() {
        let mock = MockPaymentsClient::new().with_failure("delete_customer");

        let result = mock.delete_customer("cus_9").await;

        assert!(matches!(result, Err(ApiError::Request { .. })));
        assert_eq!(mock.calls(), vec!["delete_customer cus_9"]);
    }
}
