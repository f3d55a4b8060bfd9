//! The collaborator trait the coordinator is written against.
//!
//! Every resource kind exposes a create-style forward call returning a
//! typed handle and a matching destroy/detach/cancel/void-style inverse
//! call taking the handle's identifier. Transport concerns (HTTP, retry,
//! authentication headers) belong to implementations of this trait.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiError;
use crate::resources::{
    Customer, Invoice, PaymentIntent, PaymentMethod, Subscription, WebhookEndpoint,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerParams {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentMethodParams {
    /// Customer the method is attached to on creation.
    pub customer: String,
    /// Tokenized card or bank details from the client side.
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionParams {
    pub customer: String,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebhookEndpointParams {
    pub url: String,
    pub enabled_events: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentIntentParams {
    /// Amount in the smallest currency unit.
    pub amount: i64,
    pub currency: String,
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceParams {
    pub customer: String,
}

/// Asynchronous client for the payments API.
///
/// Object-safe so the coordinator can hold it behind `Arc<dyn ...>` and
/// tests can substitute a mock.
#[async_trait]
pub trait PaymentsClient: Send + Sync {
    async fn create_customer(&self, params: CustomerParams) -> Result<Customer, ApiError>;
    async fn delete_customer(&self, id: &str) -> Result<(), ApiError>;

    async fn attach_payment_method(
        &self,
        params: PaymentMethodParams,
    ) -> Result<PaymentMethod, ApiError>;
    async fn detach_payment_method(&self, id: &str) -> Result<(), ApiError>;

    async fn create_subscription(
        &self,
        params: SubscriptionParams,
    ) -> Result<Subscription, ApiError>;
    async fn cancel_subscription(&self, id: &str) -> Result<(), ApiError>;

    async fn create_webhook_endpoint(
        &self,
        params: WebhookEndpointParams,
    ) -> Result<WebhookEndpoint, ApiError>;
    async fn delete_webhook_endpoint(&self, id: &str) -> Result<(), ApiError>;

    async fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> Result<PaymentIntent, ApiError>;
    async fn cancel_payment_intent(&self, id: &str) -> Result<(), ApiError>;

    async fn create_invoice(&self, params: InvoiceParams) -> Result<Invoice, ApiError>;
    async fn void_invoice(&self, id: &str) -> Result<(), ApiError>;
}
