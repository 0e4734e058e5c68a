//! Internal payment status vocabulary
//!
//! The provider reports settlement as a free-form status string; this
//! module pins the translation into a closed enum with an explicit
//! default arm so an unrecognized provider value degrades to `Unknown`
//! instead of failing the caller.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Successful,
    Failed,
    Cancelled,
    Unknown,
}

impl PaymentStatus {
    /// Map the provider's raw status string into the internal vocabulary.
    /// Never fails: anything unrecognized is `Unknown`.
    pub fn from_provider(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Self::Pending,
            "SUCCESSFUL" => Self::Successful,
            "FAILED" => Self::Failed,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    /// Fixed user-facing copy per status, independent of provider wording
    pub fn message(&self) -> &'static str {
        match self {
            Self::Pending => "Payment is pending confirmation",
            Self::Successful => "Payment completed successfully",
            Self::Failed => "Payment failed",
            Self::Cancelled => "Payment was cancelled",
            Self::Unknown => "Payment status could not be determined",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "PENDING",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}
