//! Decoded API responses.

use super::Link;
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// A decoded JSON object together with the HTTP status it arrived with.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    data: Map<String, Value>,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, data: Map<String, Value>) -> Self {
        Self {
            status,
            headers,
            data,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The application-level `success` flag, when present.
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        self.data.get("success").and_then(Value::as_bool)
    }

    /// Session token issued by `POST /sessions`.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.data.get("token").and_then(Value::as_str)
    }

    /// `error.message` or `message`, whichever the API sent.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.data
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .or_else(|| self.data.get("message").and_then(Value::as_str))
    }

    /// Deserialize the whole body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(Value::Object(self.data.clone()))
    }

    /// The `link` object of a single-link response.
    pub fn link(&self) -> Result<Option<Link>, serde_json::Error> {
        self.data
            .get("link")
            .map(|v| Link::deserialize(v.clone()))
            .transpose()
    }

    /// The `links` array of a list response.
    pub fn links(&self) -> Result<Vec<Link>, serde_json::Error> {
        match self.data.get("links") {
            Some(v) => Vec::<Link>::deserialize(v.clone()),
            None => Ok(Vec::new()),
        }
    }
}
