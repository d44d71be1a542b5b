//! Caller-supplied hook run on every outgoing request.

use crate::{Error, auth::TOKEN_PARAM};
use http::{HeaderMap, Method};
use std::sync::Arc;
use url::Url;

/// What a [`RequestHook`] sees of an outgoing Gumroad call.
///
/// `params` are final: the session token has already been injected. Only
/// headers can be changed.
pub struct RequestHookContext<'a> {
    pub method: &'a Method,
    /// Endpoint URL without query.
    pub url: &'a Url,
    pub headers: &'a mut HeaderMap,
    /// Parameters in the order they are sent.
    pub params: &'a [(String, String)],
    /// `true` when `params` travel in the query string (`GET`/`HEAD`),
    /// `false` when they form the request body.
    pub in_query: bool,
}

impl RequestHookContext<'_> {
    /// Last value sent for `key`, if any.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.param(TOKEN_PARAM).is_some()
    }
}

/// Returning an error aborts the call before anything is sent.
pub type RequestHook =
    Arc<dyn for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static>;
