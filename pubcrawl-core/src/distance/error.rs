use thiserror::Error;

use crate::{PubIndex, RouteElement};

/// Errors from [`crate::DistanceOracle`] and [`crate::DirectionsProvider`]
/// implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// No coordinates were provided.
    ///
    /// Callers should pre-filter input to avoid this condition.
    #[error("at least one coordinate is required")]
    EmptyInput,
    /// The routing service could not be reached.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying transport message.
        message: String,
    },
    /// The request exceeded its timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The routing service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },
    /// The routing service rejected the request.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service-specific status code, e.g. `"NoRoute"`.
        code: String,
        /// Service-provided message.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Description of the failure.
        message: String,
    },
    /// The response did not contain one distance per requested coordinate.
    #[error("expected {expected} distances but received {actual}")]
    LengthMismatch {
        /// Number of distances requested.
        expected: usize,
        /// Number of distances received.
        actual: usize,
    },
}

/// A route element pair whose distance cannot be resolved.
///
/// Every venue on a route must belong to the candidate set whose endpoint
/// distances were fetched before optimisation began, so these errors signal
/// a programming fault rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceLookupError {
    /// A venue index lies outside the distance matrix.
    #[error("pub {index} is outside the distance matrix")]
    OutOfRange {
        /// The offending index.
        index: PubIndex,
    },
    /// An endpoint leg was never fetched for this venue.
    #[error("distance unavailable for {from} -> {to}")]
    Unavailable {
        /// Leg origin.
        from: RouteElement,
        /// Leg destination.
        to: RouteElement,
    },
    /// The pair can never be resolved, e.g. start to end or a venue back to
    /// the start.
    #[error("invalid route leg {from} -> {to}")]
    InvalidPair {
        /// Leg origin.
        from: RouteElement,
        /// Leg destination.
        to: RouteElement,
    },
}
