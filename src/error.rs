use thiserror::Error;

// Caller-input problems, checked in a fixed order by the combination
// engine. Never retried, always reported verbatim to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required search parameters.")]
    MissingParameter,

    #[error("Origin and destination airports cannot be the same.")]
    SameAirport,

    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    BadDateFormat,

    #[error("Departure date cannot be in the past.")]
    DepartureInPast,

    #[error("Return date cannot be before the departure date.")]
    ReturnBeforeDeparture,

    #[error("One or both airports could not be found in our database.")]
    AirportNotFound,
}

// Collaborator/network failure. Propagated unchanged to the caller; retry
// policy, if any, belongs to the provider implementation.
#[derive(Error, Debug, Clone)]
pub enum UpstreamError {
    #[error("request to the provider timed out")]
    Timeout,

    #[error("could not connect to the provider: {0}")]
    Connection(String),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("could not decode the provider response: {0}")]
    Decode(String),

    #[error("provider request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return UpstreamError::Timeout;
        }
        if let Some(status) = err.status() {
            return UpstreamError::Status(status.as_u16());
        }
        if err.is_connect() {
            return UpstreamError::Connection(err.to_string());
        }
        if err.is_decode() {
            return UpstreamError::Decode(err.to_string());
        }
        UpstreamError::Request(err.to_string())
    }
}

// Malformed domain values reaching pricing or enrichment. The provider
// contract rules these out, so hitting one means the upstream data is
// broken; it is surfaced, not coerced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("fare cannot be negative: {0}")]
    NegativeFare(f64),

    #[error("malformed offer timestamp: {0}")]
    BadTimestamp(String),

    #[error("offer arrives before it departs ({arrival} < {departure})")]
    ArrivalBeforeDeparture { departure: String, arrival: String },
}

/// Request-level error of a combination search.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("External API Error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Offer(#[from] InvalidInput),
}

// How an HTTP boundary should classify a failure. The status codes
// themselves belong to the routing layer, not this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    Unavailable,
    Internal,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Validation(_) => ErrorKind::InvalidRequest,
            SearchError::Upstream(_) => ErrorKind::Unavailable,
            SearchError::Offer(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_reported_verbatim() {
        assert_eq!(
            ValidationError::MissingParameter.to_string(),
            "Missing required search parameters."
        );
        assert_eq!(
            ValidationError::SameAirport.to_string(),
            "Origin and destination airports cannot be the same."
        );
        assert_eq!(
            ValidationError::BadDateFormat.to_string(),
            "Invalid date format. Please use YYYY-MM-DD."
        );
    }

    #[test]
    fn kind_maps_the_taxonomy_to_boundary_classes() {
        let validation = SearchError::from(ValidationError::DepartureInPast);
        assert_eq!(validation.kind(), ErrorKind::InvalidRequest);

        let upstream = SearchError::from(UpstreamError::Status(503));
        assert_eq!(upstream.kind(), ErrorKind::Unavailable);

        let offer = SearchError::from(InvalidInput::NegativeFare(-1.0));
        assert_eq!(offer.kind(), ErrorKind::Internal);
    }
}
