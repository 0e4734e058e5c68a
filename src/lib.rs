//! Mobile-money payment gateway client
//!
//! Authenticates against a third-party mobile-money collection API,
//! submits payment-collection requests, tracks their asynchronous
//! settlement status and normalizes user-entered phone numbers into the
//! provider's subscriber format.
//!
//! The entry point is [`MomoClient`], constructed from a validated
//! [`MomoConfig`]; the payment controller consumes it through the
//! [`PaymentGateway`] trait. Settlement is asynchronous: `submit` returns
//! an accepted reference id and `query_status` (or a webhook, outside
//! this crate) discovers the outcome later.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod phone;
pub mod status;
pub mod token;
pub mod tracker;

pub use client::{MomoClient, PaymentGateway, StatusReport, SubmitReceipt};
pub use config::{Environment, MomoConfig};
pub use error::{GatewayError, GatewayResult};
pub use status::PaymentStatus;
pub use token::{AccessToken, CredentialCache};
pub use tracker::PaymentRequestTracker;
