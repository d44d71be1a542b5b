use crate::transport::request::Request;
use crate::{ApiResponse, Error, LinkId};

/// Resource path of the links endpoint.
const LINKS: &str = "links";

fn list_request() -> Request {
    Request::get([LINKS])
}

fn item_request(method: http::Method, id: &LinkId) -> Request {
    Request::new(method, [LINKS, id.as_str()])
}

fn toggle_request(id: &LinkId, action: &str) -> Request {
    Request::put([LINKS, id.as_str(), action])
}

/// Gumroad link (product) APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct LinksService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl LinksService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl LinksService {
    /// `GET /links`
    pub async fn list(&self) -> Result<ApiResponse, Error> {
        self.client.execute_request(&list_request()).await
    }

    /// `GET /links/<id>`
    pub async fn get(&self, id: impl Into<LinkId>) -> Result<ApiResponse, Error> {
        let id = id.into();
        self.client
            .execute_request(&item_request(http::Method::GET, &id))
            .await
    }

    /// `POST /links`
    pub async fn create<I, K, V>(&self, params: I) -> Result<ApiResponse, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.client
            .execute_request(&Request::post([LINKS]).params(params))
            .await
    }

    /// `PUT /links/<id>`
    pub async fn update<I, K, V>(
        &self,
        id: impl Into<LinkId>,
        params: I,
    ) -> Result<ApiResponse, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let id = id.into();
        self.client
            .execute_request(&item_request(http::Method::PUT, &id).params(params))
            .await
    }

    /// `DELETE /links/<id>`
    pub async fn delete(&self, id: impl Into<LinkId>) -> Result<ApiResponse, Error> {
        let id = id.into();
        self.client
            .execute_request(&item_request(http::Method::DELETE, &id))
            .await
    }

    /// `PUT /links/<id>/enable`
    pub async fn enable(&self, id: impl Into<LinkId>) -> Result<ApiResponse, Error> {
        let id = id.into();
        self.client
            .execute_request(&toggle_request(&id, "enable"))
            .await
    }

    /// `PUT /links/<id>/disable`
    pub async fn disable(&self, id: impl Into<LinkId>) -> Result<ApiResponse, Error> {
        let id = id.into();
        self.client
            .execute_request(&toggle_request(&id, "disable"))
            .await
    }
}

/// Gumroad link (product) APIs (blocking).
#[derive(Clone)]
#[cfg(feature = "blocking")]
pub struct BlockingLinksService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingLinksService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingLinksService {
    /// `GET /links`
    pub fn list(&self) -> Result<ApiResponse, Error> {
        self.client.execute_request(&list_request())
    }

    /// `GET /links/<id>`
    pub fn get(&self, id: impl Into<LinkId>) -> Result<ApiResponse, Error> {
        let id = id.into();
        self.client
            .execute_request(&item_request(http::Method::GET, &id))
    }

    /// `POST /links`
    pub fn create<I, K, V>(&self, params: I) -> Result<ApiResponse, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.client
            .execute_request(&Request::post([LINKS]).params(params))
    }

    /// `PUT /links/<id>`
    pub fn update<I, K, V>(&self, id: impl Into<LinkId>, params: I) -> Result<ApiResponse, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let id = id.into();
        self.client
            .execute_request(&item_request(http::Method::PUT, &id).params(params))
    }

    /// `DELETE /links/<id>`
    pub fn delete(&self, id: impl Into<LinkId>) -> Result<ApiResponse, Error> {
        let id = id.into();
        self.client
            .execute_request(&item_request(http::Method::DELETE, &id))
    }

    /// `PUT /links/<id>/enable`
    pub fn enable(&self, id: impl Into<LinkId>) -> Result<ApiResponse, Error> {
        let id = id.into();
        self.client.execute_request(&toggle_request(&id, "enable"))
    }

    /// `PUT /links/<id>/disable`
    pub fn disable(&self, id: impl Into<LinkId>) -> Result<ApiResponse, Error> {
        let id = id.into();
        self.client.execute_request(&toggle_request(&id, "disable"))
    }
}
