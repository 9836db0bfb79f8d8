use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;

use crate::model::RequestContext;

/// Axum extractor for RequestContext from request headers
///
/// - X-Msgid (or X-Request-Id): caller message id, echoed in the response
/// - X-Channel-Id, X-Device-Id, X-App-Id: carried into telemetry
///
/// Every header is optional.
#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        Ok(RequestContext {
            msg_id: extract_header_value(headers, "x-msgid")
                .or_else(|| extract_header_value(headers, "x-request-id")),
            channel_id: extract_header_value(headers, "x-channel-id"),
            device_id: extract_header_value(headers, "x-device-id"),
            app_id: extract_header_value(headers, "x-app-id"),
        })
    }
}

/// Extract header value as string
fn extract_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
