use crate::transport::request::Request;
use crate::{ApiResponse, Credentials, Error};

/// Resource path of the sessions endpoint.
const SESSIONS: &str = "sessions";

fn create_session_request(credentials: &Credentials) -> Request {
    Request::post([SESSIONS]).params(credentials.form_pairs())
}

fn destroy_session_request() -> Request {
    Request::delete([SESSIONS])
}

/// Gumroad session (login/logout) APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct SessionsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl SessionsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl SessionsService {
    /// `POST /sessions`
    ///
    /// Stores the returned `token` on the client; it is sent with every
    /// following request.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<ApiResponse, Error> {
        let resp = self
            .client
            .execute_request(&create_session_request(credentials))
            .await?;
        self.client.store_token(resp.token());
        #[cfg(feature = "metrics")]
        crate::transport::metrics::record_session(crate::transport::metrics::SessionEvent::Login);
        Ok(resp)
    }

    /// `DELETE /sessions`
    ///
    /// Clears the stored token once the call returns without error.
    pub async fn deauthenticate(&self) -> Result<ApiResponse, Error> {
        let resp = self
            .client
            .execute_request(&destroy_session_request())
            .await?;
        self.client.clear_token();
        #[cfg(feature = "metrics")]
        crate::transport::metrics::record_session(crate::transport::metrics::SessionEvent::Logout);
        Ok(resp)
    }
}

/// Gumroad session (login/logout) APIs (blocking).
#[derive(Clone)]
#[cfg(feature = "blocking")]
pub struct BlockingSessionsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingSessionsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingSessionsService {
    /// `POST /sessions`
    ///
    /// Stores the returned `token` on the client; it is sent with every
    /// following request.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<ApiResponse, Error> {
        let resp = self
            .client
            .execute_request(&create_session_request(credentials))?;
        self.client.store_token(resp.token());
        #[cfg(feature = "metrics")]
        crate::transport::metrics::record_session(crate::transport::metrics::SessionEvent::Login);
        Ok(resp)
    }

    /// `DELETE /sessions`
    ///
    /// Clears the stored token once the call returns without error.
    pub fn deauthenticate(&self) -> Result<ApiResponse, Error> {
        let resp = self.client.execute_request(&destroy_session_request())?;
        self.client.clear_token();
        #[cfg(feature = "metrics")]
        crate::transport::metrics::record_session(crate::transport::metrics::SessionEvent::Logout);
        Ok(resp)
    }
}
