//! Shared foundation for the paysaga workspace.
//!
//! Provides the API configuration, the error types shared between the
//! coordinator and its collaborators, the typed resource handles returned
//! by forward calls, and the [`PaymentsClient`] trait that transport
//! implementations plug into.

pub mod client;
pub mod config;
pub mod error;
pub mod resources;

#[cfg(feature = "testing")]
pub mod mock;

pub use client::{
    CustomerParams, InvoiceParams, PaymentIntentParams, PaymentMethodParams, PaymentsClient,
    SubscriptionParams, WebhookEndpointParams,
};
pub use config::ApiConfig;
pub use error::{ApiError, ConfigError};
pub use resources::{
    Customer, Invoice, InvoiceStatus, PaymentIntent, PaymentIntentStatus, PaymentMethod,
    Subscription, SubscriptionStatus, WebhookEndpoint,
};

#[cfg(feature = "testing")]
pub use mock::MockPaymentsClient;
