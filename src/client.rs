//! Mobile-money gateway client
//!
//! Owns request construction, reference-id generation and error
//! translation for the two operations exposed to the payment controller:
//! submitting a collection request and querying its settlement status.

use crate::api::{CollectionApi, HttpCollectionApi, Party, RequestToPayBody};
use crate::config::MomoConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::phone;
use crate::status::PaymentStatus;
use crate::token::CredentialCache;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Party identifier type used for mobile-money subscribers
const PARTY_ID_TYPE: &str = "MSISDN";

/// Acknowledgement of a submitted collection request. Acceptance means
/// the provider received the request; settlement is asynchronous and
/// discovered via [`PaymentGateway::query_status`] or a webhook.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub reference_id: String,
    pub accepted: bool,
}

/// Normalized settlement status of a submission
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub reference_id: String,
    pub status: PaymentStatus,
    /// Fixed copy derived from `status`, never provider free text
    pub message: String,
}

/// Contract exposed to the payment controller. A second provider family
/// substitutes behind this trait.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit(
        &self,
        amount: f64,
        phone_number: &str,
        description: &str,
    ) -> GatewayResult<SubmitReceipt>;

    async fn query_status(&self, reference_id: &str) -> GatewayResult<StatusReport>;
}

/// Gateway client for the provider's collection API
pub struct MomoClient {
    api: Arc<dyn CollectionApi>,
    credentials: CredentialCache,
    config: MomoConfig,
}

impl MomoClient {
    /// Build a client over the real HTTP transport. The config must
    /// already be validated; see [`MomoConfig::from_env`].
    pub fn new(config: MomoConfig) -> GatewayResult<Self> {
        config.validate()?;
        let api: Arc<dyn CollectionApi> = Arc::new(HttpCollectionApi::new(config.clone()));
        Ok(Self::with_api(config, api))
    }

    /// Build a client over a custom [`CollectionApi`] implementation
    pub fn with_api(config: MomoConfig, api: Arc<dyn CollectionApi>) -> Self {
        Self {
            credentials: CredentialCache::new(api.clone()),
            api,
            config,
        }
    }

    /// Millisecond timestamp plus a random suffix: unique within the
    /// process lifetime with overwhelming probability, used as both the
    /// provider idempotency key and the status lookup key.
    fn new_reference_id() -> String {
        let timestamp = Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{timestamp}-{}", &suffix[..12])
    }
}

#[async_trait]
impl PaymentGateway for MomoClient {
    async fn submit(
        &self,
        amount: f64,
        phone_number: &str,
        description: &str,
    ) -> GatewayResult<SubmitReceipt> {
        // Fail fast on caller input before any token fetch or network call
        if !amount.is_finite() || amount <= 0.0 {
            return Err(GatewayError::InvalidAmount { amount });
        }
        let party_id = phone::normalize(phone_number)?;

        let token = self.credentials.get_token().await?;
        let reference_id = Self::new_reference_id();
        let currency = self.config.currency().to_string();

        info!(%reference_id, amount, %currency, "submitting collection request");

        let body = RequestToPayBody {
            amount: format!("{amount}"),
            currency,
            external_id: reference_id.clone(),
            payer: Party {
                party_id_type: PARTY_ID_TYPE.to_string(),
                party_id,
            },
            payer_message: description.to_string(),
            payee_note: description.to_string(),
        };

        match self
            .api
            .request_to_pay(&reference_id, &token.value, &body)
            .await
        {
            Ok(()) => {
                info!(%reference_id, "collection request accepted");
                Ok(SubmitReceipt {
                    reference_id,
                    accepted: true,
                })
            }
            Err(e) => {
                error!(%reference_id, "collection request failed: {e}");
                // The reference id still reaches the caller: the provider
                // may have processed the request despite the failure, and
                // a status query can confirm either way.
                Err(GatewayError::SubmissionFailed {
                    reference_id,
                    message: e.to_string(),
                })
            }
        }
    }

    async fn query_status(&self, reference_id: &str) -> GatewayResult<StatusReport> {
        let token = self.credentials.get_token().await?;

        let body = self
            .api
            .payment_status(reference_id, &token.value)
            .await
            .map_err(|e| {
                error!(%reference_id, "status query failed: {e}");
                GatewayError::StatusQueryFailed {
                    reference_id: reference_id.to_string(),
                    message: e.to_string(),
                }
            })?;

        let status = PaymentStatus::from_provider(&body.status);
        info!(%reference_id, %status, "collection status retrieved");

        Ok(StatusReport {
            reference_id: reference_id.to_string(),
            status,
            message: status.message().to_string(),
        })
    }
}
