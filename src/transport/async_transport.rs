use super::{TransportRequest, TransportResponse};
use crate::error::{Error, TransportErrorKind};
use async_trait::async_trait;
use http::Method;
use reqwest::Client;
use std::{sync::Arc, time::Duration};

#[cfg(feature = "rustls")]
fn ensure_rustls_provider() {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

#[cfg(not(feature = "rustls"))]
fn ensure_rustls_provider() {}

/// Trait implemented by any async HTTP layer.
#[async_trait]
pub trait AsyncTransport: Send + Sync + 'static {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error>;
}

pub type DynAsyncTransport = Arc<dyn AsyncTransport>;

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Arc<T> {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        (**self).send(req).await
    }
}

/// Default async transport built on `reqwest`.
#[derive(Clone)]
pub struct ReqwestAsync {
    client: Client,
}

impl ReqwestAsync {
    /// Construct a new transport.
    ///
    /// * See [`crate::transport::blocking_transport::UreqBlocking::try_new`] for parameter meaning.
    pub fn try_new(
        insecure: bool,
        ua: &str,
        timeout: Duration,
        connect_timeout: Duration,
        no_proxy: bool,
    ) -> Result<Self, Error> {
        ensure_rustls_provider();

        let mut builder = Client::builder()
            .danger_accept_invalid_certs(insecure)
            .user_agent(ua)
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(connect_timeout)
            .timeout(timeout);

        if no_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(|err| Error::InvalidConfig {
            message: "failed to build async HTTP client".into(),
            source: Some(Box::new(err)),
        })?;

        Ok(Self { client })
    }
}

/// The URL is stripped from the source: its query may carry the session token.
fn transport_error(method: &Method, path: &str, err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };
    Error::Transport {
        method: method.clone(),
        path: path.to_string().into_boxed_str(),
        kind,
        source: Box::new(err.without_url()),
    }
}

#[async_trait]
impl AsyncTransport for ReqwestAsync {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let TransportRequest {
            method,
            url,
            headers,
            query,
            form,
            timeout,
        } = req;
        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers)
            .timeout(timeout);

        if !query.is_empty() {
            req = req.query(&query);
        }
        if !form.is_empty() {
            req = req.form(&form);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| transport_error(&method, url.path(), e))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| transport_error(&method, url.path(), e))?;

        Ok(TransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
