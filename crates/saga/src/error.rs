//! Downstream call outcome taxonomy.

use thiserror::Error;

/// A failed call to a downstream service behind the API gateway.
///
/// Every downstream call resolves into one of exactly three kinds:
/// success, [`Rejected`](GatewayError::Rejected) (the service answered
/// with a non-success status and an error payload), or
/// [`Unreachable`](GatewayError::Unreachable) (the call never produced a
/// usable response: timeout, connection refused, malformed body framing).
/// Steps log the two failure kinds distinctly but map both onto the same
/// failure-path state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The service answered with a non-success status.
    #[error("{endpoint} returned {status}: {body}")]
    Rejected {
        /// The endpoint path that was called.
        endpoint: String,
        /// HTTP status code of the response.
        status: u16,
        /// Error payload extracted from the response body, verbatim.
        body: String,
    },

    /// The service could not be reached or did not produce a response.
    #[error("{endpoint} unreachable: {detail}")]
    Unreachable {
        /// The endpoint path that was called.
        endpoint: String,
        /// Transport-level failure detail.
        detail: String,
    },
}

impl GatewayError {
    /// Creates a rejection outcome.
    pub fn rejected(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        GatewayError::Rejected {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates an unreachable outcome.
    pub fn unreachable(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        GatewayError::Unreachable {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_status_and_body() {
        let err = GatewayError::rejected("/stocks", 409, "{\"error\":\"conflict\"}");
        assert_eq!(err.to_string(), "/stocks returned 409: {\"error\":\"conflict\"}");
    }

    #[test]
    fn unreachable_display_includes_detail() {
        let err = GatewayError::unreachable("/payments", "connection refused");
        assert_eq!(err.to_string(), "/payments unreachable: connection refused");
    }
}
