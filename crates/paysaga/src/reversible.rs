use std::sync::Arc;

use paysaga_core::{
    Customer, Invoice, PaymentIntent, PaymentMethod, PaymentsClient, Subscription, WebhookEndpoint,
};

use crate::compensation::Compensation;

/// Capability of a forward-call result to describe its own inverse.
///
/// The transaction resolves a [`Compensation`] from every value a
/// successful forward operation returns. Result kinds with no meaningful
/// inverse keep the default no-op method; new resource kinds implement
/// the trait without any change to the transaction itself.
pub trait Reversible {
    /// Build the inverse action for this value.
    ///
    /// The default is a no-op compensation that runs without error.
    fn compensation(&self, client: Arc<dyn PaymentsClient>) -> Compensation {
        let _ = client;
        Compensation::noop()
    }
}

impl Reversible for Customer {
    fn compensation(&self, client: Arc<dyn PaymentsClient>) -> Compensation {
        let id = self.id.clone();
        Compensation::new(format!("delete customer {id}"), async move {
            client.delete_customer(&id).await
        })
    }
}

impl Reversible for PaymentMethod {
    fn compensation(&self, client: Arc<dyn PaymentsClient>) -> Compensation {
        let id = self.id.clone();
        Compensation::new(format!("detach payment method {id}"), async move {
            client.detach_payment_method(&id).await
        })
    }
}

impl Reversible for Subscription {
    fn compensation(&self, client: Arc<dyn PaymentsClient>) -> Compensation {
        let id = self.id.clone();
        Compensation::new(format!("cancel subscription {id}"), async move {
            client.cancel_subscription(&id).await
        })
    }
}

impl Reversible for WebhookEndpoint {
    fn compensation(&self, client: Arc<dyn PaymentsClient>) -> Compensation {
        let id = self.id.clone();
        Compensation::new(format!("delete webhook endpoint {id}"), async move {
            client.delete_webhook_endpoint(&id).await
        })
    }
}

impl Reversible for PaymentIntent {
    fn compensation(&self, client: Arc<dyn PaymentsClient>) -> Compensation {
        let id = self.id.clone();
        Compensation::new(format!("cancel payment intent {id}"), async move {
            client.cancel_payment_intent(&id).await
        })
    }
}

impl Reversible for Invoice {
    fn compensation(&self, client: Arc<dyn PaymentsClient>) -> Compensation {
        let id = self.id.clone();
        Compensation::new(format!("void invoice {id}"), async move {
            client.void_invoice(&id).await
        })
    }
}
