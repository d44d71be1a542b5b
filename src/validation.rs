//! Response validation policies.

use crate::{
    ApiResponse, BodySnippetConfig, Error, HttpError, SecretString,
    transport::TransportResponse,
    util::{diagnostics, redact::redact_text, url::sanitize_url_for_error},
};
use http::Method;
use serde_json::{Map, Value};
use url::Url;

/// Key under which permissive validation merges the HTTP status into the body.
pub const HTTP_CODE_KEY: &str = "http_code";

/// How responses are checked before they reach the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum Validation {
    /// HTTP status `>= 300` and `success: false` bodies become errors.
    #[default]
    Strict,
    /// Only transport failures are errors. The decoded body is returned as-is
    /// with the HTTP status merged in under [`HTTP_CODE_KEY`]; a body that is
    /// not a JSON object is replaced by an empty one.
    Permissive,
}

/// Everything needed to turn a raw response into an [`ApiResponse`].
pub(crate) struct ResponseContext<'a> {
    pub(crate) method: &'a Method,
    pub(crate) url: &'a Url,
    pub(crate) token: Option<&'a SecretString>,
    pub(crate) body_snippet: BodySnippetConfig,
    pub(crate) validation: Validation,
}

impl ResponseContext<'_> {
    pub(crate) fn finish(&self, resp: TransportResponse) -> Result<ApiResponse, Error> {
        let request_id = diagnostics::request_id(&resp.headers);

        if self.validation == Validation::Strict && resp.status.as_u16() >= 300 {
            let message = diagnostics::extract_message(&resp.body)
                .map(|msg| redact_text(msg.into(), self.token).into_boxed_str());
            return Err(Error::Http(HttpError {
                status: resp.status,
                method: self.method.clone(),
                url: Box::new(sanitize_url_for_error(self.url)),
                message,
                request_id,
                body_snippet: diagnostics::body_snippet(
                    &resp.body,
                    self.body_snippet,
                    self.token,
                ),
            }));
        }

        let mut data = match decode_object(&resp.body) {
            Ok(data) => data,
            // Error pages from proxies are still a response in permissive mode.
            Err(_err) if self.validation == Validation::Permissive => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    status = resp.status.as_u16(),
                    error = %_err,
                    "response body is not a JSON object; returning status only"
                );
                Map::new()
            }
            Err(source) => {
                return Err(Error::Decode {
                    status: resp.status,
                    method: self.method.clone(),
                    path: self.url.path().to_string().into_boxed_str(),
                    request_id,
                    body_snippet: diagnostics::body_snippet(
                        &resp.body,
                        self.body_snippet,
                        self.token,
                    ),
                    source: Box::new(source),
                });
            }
        };

        match self.validation {
            Validation::Strict => {
                if data.get("success") == Some(&Value::Bool(false)) {
                    let message = diagnostics::message_from_value(&Value::Object(data))
                        .map(|msg| redact_text(msg.into(), self.token))
                        .unwrap_or_else(|| "request was not successful".to_owned());
                    return Err(Error::Api {
                        status: resp.status,
                        method: self.method.clone(),
                        path: self.url.path().to_string().into_boxed_str(),
                        message: message.into_boxed_str(),
                        request_id,
                    });
                }
            }
            Validation::Permissive => {
                data.insert(HTTP_CODE_KEY.to_owned(), Value::from(resp.status.as_u16()));
            }
        }

        Ok(ApiResponse::new(resp.status, resp.headers, data))
    }
}

/// Empty bodies (e.g. `HEAD`) decode to an empty object.
fn decode_object(body: &[u8]) -> Result<Map<String, Value>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    serde_json::from_slice(body)
}
