use super::{TransportRequest, TransportResponse};
use crate::error::{Error, TransportErrorKind};
use http::{HeaderValue, Method, header::CONTENT_TYPE};
use std::{sync::Arc, time::Duration};
use ureq::Agent;

/// Trait implemented by any blocking HTTP layer.
pub trait BlockingTransport: Send + Sync + 'static {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error>;
}

pub type DynBlockingTransport = Arc<dyn BlockingTransport>;

impl<T: BlockingTransport + ?Sized> BlockingTransport for Arc<T> {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        (**self).send(req)
    }
}

/// Default blocking transport built on `ureq`.
#[derive(Clone)]
pub struct UreqBlocking {
    agent: Agent,
}

impl UreqBlocking {
    /// Construct a new transport.
    ///
    /// * `insecure` – accept invalid TLS certificates.
    /// * `ua` – User-Agent header.
    /// * `timeout` – whole-request timeout.
    /// * `connect_timeout` – connection establishment timeout.
    /// * `no_proxy` – ignore system proxy environment variables.
    pub fn try_new(
        insecure: bool,
        ua: &str,
        timeout: Duration,
        connect_timeout: Duration,
        no_proxy: bool,
    ) -> Result<Self, Error> {
        let mut builder = Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .timeout_global(Some(timeout))
            .timeout_connect(Some(connect_timeout))
            .user_agent(ua);

        if no_proxy {
            builder = builder.proxy(None);
        }

        if insecure {
            builder = builder.tls_config(
                ureq::tls::TlsConfig::builder()
                    .disable_verification(true)
                    .build(),
            );
        }

        Ok(Self {
            agent: Agent::new_with_config(builder.build()),
        })
    }
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn send_with_form(
    req: ureq::RequestBuilder<ureq::typestate::WithBody>,
    form: &[(String, String)],
) -> Result<http::Response<ureq::Body>, ureq::Error> {
    if form.is_empty() {
        req.send_empty()
    } else {
        req.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .send(encode_form(form))
    }
}

fn encode_form(form: &[(String, String)]) -> Vec<u8> {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish()
        .into_bytes()
}

impl BlockingTransport for UreqBlocking {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let TransportRequest {
            method,
            url,
            headers,
            query,
            form,
            timeout,
        } = req;
        let path = url.path().to_string().into_boxed_str();
        let url = url.as_str();
        let method_for_error = method.clone();

        let map_err = |err: ureq::Error| {
            let kind = match &err {
                ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
                ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
                    TransportErrorKind::Connect
                }
                ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => {
                    TransportErrorKind::Timeout
                }
                ureq::Error::Io(io)
                    if matches!(
                        io.kind(),
                        std::io::ErrorKind::ConnectionRefused
                            | std::io::ErrorKind::ConnectionReset
                            | std::io::ErrorKind::ConnectionAborted
                            | std::io::ErrorKind::NotConnected
                    ) =>
                {
                    TransportErrorKind::Connect
                }
                _ => TransportErrorKind::Other,
            };

            Error::Transport {
                method: method_for_error.clone(),
                path: path.clone(),
                kind,
                source: Box::new(err),
            }
        };

        let mut response = match method {
            Method::GET => {
                drop(form);
                let mut req = self.agent.get(url).query_pairs(query);
                for (name, value) in headers.iter() {
                    req = req.header(name, value);
                }
                req.config()
                    .timeout_global(Some(timeout))
                    .build()
                    .call()
                    .map_err(map_err)?
            }
            Method::HEAD => {
                drop(form);
                let mut req = self.agent.head(url).query_pairs(query);
                for (name, value) in headers.iter() {
                    req = req.header(name, value);
                }
                req.config()
                    .timeout_global(Some(timeout))
                    .build()
                    .call()
                    .map_err(map_err)?
            }
            Method::POST => {
                let mut req = self.agent.post(url).query_pairs(query);
                for (name, value) in headers.iter() {
                    req = req.header(name, value);
                }
                let req = req.config().timeout_global(Some(timeout)).build();
                send_with_form(req, &form).map_err(map_err)?
            }
            Method::PUT => {
                let mut req = self.agent.put(url).query_pairs(query);
                for (name, value) in headers.iter() {
                    req = req.header(name, value);
                }
                let req = req.config().timeout_global(Some(timeout)).build();
                send_with_form(req, &form).map_err(map_err)?
            }
            Method::PATCH => {
                let mut req = self.agent.patch(url).query_pairs(query);
                for (name, value) in headers.iter() {
                    req = req.header(name, value);
                }
                let req = req.config().timeout_global(Some(timeout)).build();
                send_with_form(req, &form).map_err(map_err)?
            }
            Method::DELETE => {
                let mut req = self.agent.delete(url).query_pairs(query);
                for (name, value) in headers.iter() {
                    req = req.header(name, value);
                }
                let req = req.config().timeout_global(Some(timeout)).build();
                if form.is_empty() {
                    req.call().map_err(map_err)?
                } else {
                    send_with_form(req.force_send_body(), &form).map_err(map_err)?
                }
            }
            other => {
                // Custom verbs go through a plain `http::Request`; the agent-wide
                // timeout applies.
                let mut builder = http::Request::builder().method(other).uri(url);
                for (name, value) in headers.iter() {
                    builder = builder.header(name, value);
                }
                if !form.is_empty() {
                    builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                }
                let request =
                    builder
                        .body(encode_form(&form))
                        .map_err(|err| Error::InvalidConfig {
                            message: "failed to build custom-method request".into(),
                            source: Some(Box::new(err)),
                        })?;
                self.agent.run(request).map_err(map_err)?
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(map_err)?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
