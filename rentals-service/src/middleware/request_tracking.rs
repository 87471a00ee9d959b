//! Request tracking middleware
//!
//! Every request gets an `x-request-id` (a UUIDv7, so ids sort by arrival
//! time) that is echoed on the response. Credentials in request headers are
//! marked sensitive so the trace layer never prints them.

use http::{HeaderName, HeaderValue, Request};
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};
use uuid::Uuid;

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Generates time-ordered request ids
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeUuidV7RequestId;

impl MakeRequestId for MakeUuidV7RequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        let header_value = HeaderValue::from_str(&id).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Create a layer that assigns a request id unless the caller sent one
pub fn request_id_layer() -> SetRequestIdLayer<MakeUuidV7RequestId> {
    SetRequestIdLayer::x_request_id(MakeUuidV7RequestId)
}

/// Create a layer that copies the request id onto the response
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Create a sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(
        SENSITIVE_HEADERS
            .iter()
            .copied()
            .map(HeaderName::from_static),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header;

    #[test]
    fn test_request_ids_are_uuid_v7() {
        let mut maker = MakeUuidV7RequestId;
        let request = Request::builder().body(()).unwrap();

        let id = maker.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();
        let uuid = Uuid::parse_str(value).unwrap();
        assert_eq!(uuid.get_version_num(), 7);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let mut maker = MakeUuidV7RequestId;
        let request = Request::builder().body(()).unwrap();

        let first = maker.make_request_id(&request).unwrap();
        let second = maker.make_request_id(&request).unwrap();
        assert_ne!(first.header_value(), second.header_value());
    }

    #[test]
    fn test_sensitive_headers_constant() {
        assert!(SENSITIVE_HEADERS.contains(&header::AUTHORIZATION.as_str()));
        assert!(SENSITIVE_HEADERS.contains(&"x-api-key"));
    }
}
