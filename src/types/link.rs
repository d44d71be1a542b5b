//! Link (product) payloads and form parameters.

use super::LinkId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A link as returned under `link` / `links` by the `/links` endpoints.
///
/// Every field is optional; unknown fields are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Link {
    pub id: Option<LinkId>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub short_url: Option<String>,
    pub description: Option<String>,
    pub preview_url: Option<String>,
    /// Price in the smallest currency unit (cents).
    pub price: Option<u64>,
    pub currency: Option<String>,
    pub formatted_price: Option<String>,
    pub published: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Form fields for `POST /links` and `PUT /links/<id>`.
///
/// Values are sent verbatim; the API does the validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkParams {
    pairs: Vec<(String, String)>,
}

impl LinkParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.param("name", name)
    }

    #[must_use]
    pub fn url(self, url: impl Into<String>) -> Self {
        self.param("url", url)
    }

    /// Price in cents.
    #[must_use]
    pub fn price(self, cents: u64) -> Self {
        self.param("price", cents.to_string())
    }

    #[must_use]
    pub fn description(self, description: impl Into<String>) -> Self {
        self.param("description", description)
    }

    #[must_use]
    pub fn preview_url(self, preview_url: impl Into<String>) -> Self {
        self.param("preview_url", preview_url)
    }

    /// Any other field accepted by the API.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl IntoIterator for LinkParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}
