//! Provider collection API
//!
//! `CollectionApi` is the seam between the gateway client and the wire: a
//! second provider family can be substituted behind it, and tests mock it
//! without touching the client logic. `HttpCollectionApi` is the real
//! implementation against the provider's collection endpoints.

use crate::config::MomoConfig;
use async_trait::async_trait;
use base64::prelude::{Engine, BASE64_STANDARD};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Wire-level failure, wrapped into the operation-specific
/// `GatewayError` variant by the caller
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `message` carries the provider's diagnostic text
    #[error("provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("invalid provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Token grant returned by the provider's authentication endpoint
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Time to live in seconds
    pub expires_in: u64,
}

/// Payer party of a collection request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub party_id_type: String,
    pub party_id: String,
}

/// Body of a request-to-pay submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestToPayBody {
    /// Decimal string; minor-unit precision is the provider's concern
    pub amount: String,
    pub currency: String,
    pub external_id: String,
    pub payer: Party,
    pub payer_message: String,
    pub payee_note: String,
}

/// Settlement state of a previously submitted collection request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusBody {
    pub status: String,
    #[serde(default)]
    pub financial_transaction_id: Option<String>,
    #[serde(default)]
    pub reason: Option<serde_json::Value>,
}

/// The provider's three wire operations
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Exchange the static application credentials for a bearer token
    async fn create_access_token(&self) -> Result<TokenGrant, ApiError>;

    /// Submit a collection request. A 2xx response means the provider
    /// accepted the request, not that it settled.
    async fn request_to_pay(
        &self,
        reference_id: &str,
        bearer: &str,
        body: &RequestToPayBody,
    ) -> Result<(), ApiError>;

    /// Look up the settlement state of a submission
    async fn payment_status(
        &self,
        reference_id: &str,
        bearer: &str,
    ) -> Result<PaymentStatusBody, ApiError>;
}

/// reqwest-backed implementation of [`CollectionApi`]
pub struct HttpCollectionApi {
    client: reqwest::Client,
    config: MomoConfig,
}

impl HttpCollectionApi {
    pub fn new(config: MomoConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn basic_credentials(&self) -> String {
        BASE64_STANDARD.encode(format!("{}:{}", self.config.api_user, self.config.api_key))
    }
}

#[async_trait]
impl CollectionApi for HttpCollectionApi {
    async fn create_access_token(&self) -> Result<TokenGrant, ApiError> {
        let url = format!("{}/collection/token/", self.config.base_url);
        debug!(%url, "requesting collection access token");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Basic {}", self.basic_credentials()),
            )
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .timeout(self.config.auth_timeout())
            .send()
            .await?;

        read_json(response).await
    }

    async fn request_to_pay(
        &self,
        reference_id: &str,
        bearer: &str,
        body: &RequestToPayBody,
    ) -> Result<(), ApiError> {
        let url = format!("{}/collection/v1_0/requesttopay", self.config.base_url);
        debug!(%url, %reference_id, "submitting request-to-pay");

        let response = self
            .client
            .post(&url)
            .bearer_auth(bearer)
            .header("X-Reference-Id", reference_id)
            .header("X-Target-Environment", self.config.environment.as_str())
            .header("X-Callback-Url", &self.config.callback_host)
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .timeout(self.config.submit_timeout())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Provider {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }
        Ok(())
    }

    async fn payment_status(
        &self,
        reference_id: &str,
        bearer: &str,
    ) -> Result<PaymentStatusBody, ApiError> {
        let url = format!(
            "{}/collection/v1_0/requesttopay/{}",
            self.config.base_url, reference_id
        );
        debug!(%url, %reference_id, "querying request-to-pay status");

        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer)
            .header("X-Target-Environment", self.config.environment.as_str())
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .timeout(self.config.status_timeout())
            .send()
            .await?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(ApiError::Provider {
            status: status.as_u16(),
            message: provider_message(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Pull the human-readable diagnostic out of a provider error body when it
/// is JSON with a `message` field; otherwise keep the raw body.
fn provider_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_prefers_json_message_field() {
        let body = r#"{"code":"PAYER_NOT_FOUND","message":"Payee does not exist"}"#;
        assert_eq!(provider_message(body), "Payee does not exist");
    }

    #[test]
    fn provider_message_falls_back_to_raw_body() {
        assert_eq!(provider_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(provider_message(""), "");
    }

    #[test]
    fn request_to_pay_body_uses_provider_field_names() {
        let body = RequestToPayBody {
            amount: "1000".to_string(),
            currency: "EUR".to_string(),
            external_id: "1700000000000-abcdef".to_string(),
            payer: Party {
                party_id_type: "MSISDN".to_string(),
                party_id: "250788123456".to_string(),
            },
            payer_message: "Waste collection".to_string(),
            payee_note: "Waste collection".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["externalId"], "1700000000000-abcdef");
        assert_eq!(json["payer"]["partyIdType"], "MSISDN");
        assert_eq!(json["payer"]["partyId"], "250788123456");
        assert_eq!(json["payerMessage"], "Waste collection");
    }
}
