//! Error types for the booking funnel.

use thiserror::Error;

/// Validation failures raised before any network call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required selection field is still empty
    #[error("selection is incomplete: missing {0}")]
    IncompleteSelection(&'static str),

    /// No seats have been picked yet
    #[error("no seats selected")]
    NoSeats,

    /// A seat code could not be split into row and number
    #[error("invalid seat code: {0}")]
    InvalidSeatCode(String),
}

/// Errors that can occur in the booking funnel
///
/// The submission-side variants follow the purchase endpoint's contract:
/// `401` is an authorization failure, other `4xx` are business rejections
/// carrying the server message when one is present, `5xx` are generic
/// retry-safe server failures. Every failure after a draft exists retains
/// the draft so the purchase can be retried explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunnelError {
    /// Attempted to continue with an incomplete selection
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport-level failure (connect, timeout, DNS)
    #[error("network error: {0}")]
    Network(String),

    /// `401` from the purchase endpoint - missing or invalid authentication
    #[error("authorization required")]
    Unauthorized,

    /// Non-401 `4xx` from the purchase endpoint, e.g. a seat already taken
    #[error("purchase rejected (status {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Server-provided message, or a generic fallback
        message: String,
    },

    /// `5xx` from the purchase endpoint
    #[error("server error (status {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Server-provided message, or a generic fallback
        message: String,
    },

    /// Draft slot I/O failed
    #[error("draft storage error: {0}")]
    Storage(String),

    /// A response payload could not be decoded
    #[error("response decoding failed: {0}")]
    Decode(String),
}

impl FunnelError {
    /// Whether the originating draft is retained for an explicit retry
    ///
    /// Only validation fails before a draft is submitted; every
    /// submission-side failure leaves the stored draft untouched.
    #[must_use]
    pub const fn retains_draft(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }

    /// Whether resubmitting the identical draft is expected to succeed
    ///
    /// Deterministic key derivation makes any replay safe server-side; this
    /// flags the failures where a replay is also *useful* (transient ones).
    #[must_use]
    pub const fn is_retry_safe(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_failures_retain_the_draft() {
        assert!(FunnelError::Network("timeout".to_string()).retains_draft());
        assert!(FunnelError::Unauthorized.retains_draft());
        assert!(
            FunnelError::Rejected {
                status: 422,
                message: "seat taken".to_string()
            }
            .retains_draft()
        );
        assert!(!FunnelError::Validation(ValidationError::NoSeats).retains_draft());
    }

    #[test]
    fn transient_failures_are_retry_safe() {
        assert!(FunnelError::Network("reset".to_string()).is_retry_safe());
        assert!(
            FunnelError::Server {
                status: 503,
                message: "unavailable".to_string()
            }
            .is_retry_safe()
        );
        assert!(
            !FunnelError::Rejected {
                status: 409,
                message: "seat taken".to_string()
            }
            .is_retry_safe()
        );
    }
}
