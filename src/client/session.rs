//! Scoped sessions for the blocking client.

use super::blocking_client::BlockingClient;
use crate::{ApiResponse, Error};
use std::{fmt, ops::Deref};

/// An authenticated [`BlockingClient`] that logs out when it goes out of scope.
///
/// Dropping the guard while the client still holds a token sends one
/// `DELETE /sessions`; failures are logged and the token is forgotten either
/// way. Nothing is sent when no token is held (for example after an explicit
/// [`BlockingClient::deauthenticate`]).
pub struct Session {
    client: BlockingClient,
    released: bool,
}

impl Session {
    pub(crate) fn new(client: BlockingClient) -> Self {
        Self {
            client,
            released: false,
        }
    }

    #[must_use]
    pub fn client(&self) -> &BlockingClient {
        &self.client
    }

    /// Log out now and report the outcome instead of logging it.
    ///
    /// The local token is cleared even when the call fails.
    pub fn end(mut self) -> Result<Option<ApiResponse>, Error> {
        self.released = true;
        if !self.client.is_authenticated() {
            return Ok(None);
        }
        let result = self.client.deauthenticate();
        self.client.clear_token();
        result.map(Some)
    }
}

impl Deref for Session {
    type Target = BlockingClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.client.is_authenticated())
            .finish()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.released || !self.client.is_authenticated() {
            return;
        }

        if let Err(_err) = self.client.deauthenticate() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "failed to release Gumroad session");
            #[cfg(feature = "metrics")]
            crate::transport::metrics::record_session(
                crate::transport::metrics::SessionEvent::ReleaseFailed,
            );
        }
        self.client.clear_token();
    }
}
