//! HTTP transport layer.
//!
//! * [`blocking_transport::UreqBlocking`] backs the blocking client.
//! * [`async_transport::ReqwestAsync`] backs the async client.
//!
//! Transports only move bytes: parameter placement, token injection and
//! response validation happen in the clients.

use crate::auth::is_secret_param;
use http::{HeaderMap, Method, StatusCode};
use std::{fmt, time::Duration};
use url::Url;

#[cfg(feature = "async")]
pub mod async_transport;
#[cfg(feature = "blocking")]
pub mod blocking_transport;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;
pub mod middleware;
pub mod request;

#[derive(Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Fully resolved endpoint URL, without query.
    pub url: Url,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    /// Encoded as `application/x-www-form-urlencoded` when non-empty.
    pub form: Vec<(String, String)>,
    pub timeout: Duration,
}

/// Debug view of parameter pairs with secret values masked.
struct RedactedParams<'a>(&'a [(String, String)]);

impl fmt::Debug for RedactedParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|(key, value)| {
                let value = if is_secret_param(key) {
                    "<redacted>"
                } else {
                    value.as_str()
                };
                (key.as_str(), value)
            }))
            .finish()
    }
}

impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("query", &RedactedParams(&self.query))
            .field("form", &RedactedParams(&self.form))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// `GET` and `HEAD` carry parameters in the query string; every other verb
/// sends them as a form body.
pub(crate) fn params_in_query(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

pub(crate) fn place_params(
    method: &Method,
    params: Vec<(String, String)>,
) -> (Vec<(String, String)>, Vec<(String, String)>) {
    if params_in_query(method) {
        (params, Vec::new())
    } else {
        (Vec::new(), params)
    }
}
