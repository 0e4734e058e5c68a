//! Gateway error taxonomy
//!
//! Validation errors are detected locally before any network call and are
//! recoverable by correcting caller input. Provider errors preserve the
//! provider's diagnostic text; retry policy belongs to the caller.

use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Amount must be a positive finite number
    #[error("invalid amount {amount}: must be a positive number")]
    InvalidAmount { amount: f64 },

    /// Phone number could not be normalized into a subscriber identifier.
    /// The raw caller input is kept for diagnostics.
    #[error("invalid phone number {raw:?}")]
    InvalidPhoneNumber { raw: String },

    /// Provider rejected or failed the access-token request
    #[error("authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Payment submission failed. The reference id generated for the
    /// attempt is preserved so the caller can still query its status:
    /// the provider may have processed the request despite a client-side
    /// timeout (at-least-once submission).
    #[error("payment submission {reference_id} failed: {message}")]
    SubmissionFailed {
        reference_id: String,
        message: String,
    },

    /// Status lookup failed; the query itself is side-effect-free and
    /// safe to repeat
    #[error("status query for {reference_id} failed: {message}")]
    StatusQueryFailed {
        reference_id: String,
        message: String,
    },

    /// A required configuration value is missing or invalid. Fatal at
    /// construction time.
    #[error("missing or invalid configuration: {name}")]
    ConfigurationMissing { name: String },
}

impl GatewayError {
    /// Whether the caller may reasonably retry the operation. Validation
    /// and configuration errors require corrected input, not a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::AuthenticationFailed { .. }
                | GatewayError::SubmissionFailed { .. }
                | GatewayError::StatusQueryFailed { .. }
        )
    }
}
