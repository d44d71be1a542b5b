//! High-level blocking Gumroad client.

use super::session::Session;
use crate::{
    ApiResponse, BodySnippetConfig, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, Error,
    RequestHookContext, SecretString, Validation, api,
    auth::{SessionToken, inject_token},
    transport::{
        TransportRequest,
        blocking_transport::{DynBlockingTransport, UreqBlocking},
        middleware::HookedBlocking,
        place_params,
        request::Request,
    },
    util::url::{endpoint_url, normalize_base_url},
    validation::ResponseContext,
};
use http::HeaderMap;
use std::{sync::Arc, time::Duration};
use url::Url;

#[cfg(feature = "tracing")]
use tracing::field;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and constructs [`BlockingClient`].
pub struct BlockingClientBuilder {
    base_url: String,
    insecure: bool,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    no_proxy: bool,
    validation: Validation,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    request_hook: Option<crate::RequestHook>,
}

impl BlockingClientBuilder {
    fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            insecure: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_TIMEOUT,
            no_proxy: false,
            validation: Validation::default(),
            default_headers: HeaderMap::new(),
            body_snippet: BodySnippetConfig::default(),
            request_hook: None,
        }
    }

    /// Override the API root (e.g. a mock server in tests).
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.insecure = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    /// Convenience for [`Self::timeout`] in milliseconds.
    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn default_header(
        mut self,
        name: http::header::HeaderName,
        value: http::HeaderValue,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.body_snippet.enabled = enabled;
        self
    }

    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.body_snippet.max_bytes = max_bytes;
        self
    }

    /// Add a hook invoked for every request right before it is sent.
    pub fn request_hook<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.request_hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<BlockingClient, Error> {
        let base = normalize_base_url(&self.base_url)?;

        let mut transport: DynBlockingTransport = Arc::new(UreqBlocking::try_new(
            self.insecure,
            &self.user_agent,
            self.timeout,
            self.connect_timeout,
            self.no_proxy,
        )?);

        if let Some(hook) = self.request_hook {
            transport = Arc::new(HookedBlocking::new(transport, hook));
        }

        Ok(BlockingClient {
            inner: Arc::new(Inner {
                base,
                timeout: self.timeout,
                validation: self.validation,
                default_headers: self.default_headers,
                body_snippet: self.body_snippet,
                session: SessionToken::default(),
                transport,
            }),
        })
    }
}

/// Blocking Gumroad client.
///
/// Clones share one transport and one session token.
#[derive(Clone)]
pub struct BlockingClient {
    inner: Arc<Inner>,
}

struct Inner {
    base: Url,
    timeout: Duration,
    validation: Validation,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    session: SessionToken,
    transport: DynBlockingTransport,
}

impl BlockingClient {
    #[must_use]
    pub fn builder() -> BlockingClientBuilder {
        BlockingClientBuilder::new()
    }

    /// Client for the public API with default settings.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    #[must_use]
    pub fn sessions(&self) -> api::BlockingSessionsService {
        api::BlockingSessionsService::new(self.clone())
    }

    #[must_use]
    pub fn links(&self) -> api::BlockingLinksService {
        api::BlockingLinksService::new(self.clone())
    }

    /// Shortcut for [`api::BlockingSessionsService::authenticate`].
    pub fn authenticate(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<ApiResponse, Error> {
        self.sessions()
            .authenticate(&Credentials::new(email, password))
    }

    /// Shortcut for [`api::BlockingSessionsService::deauthenticate`].
    pub fn deauthenticate(&self) -> Result<ApiResponse, Error> {
        self.sessions().deauthenticate()
    }

    /// Authenticate and return a guard that releases the session when dropped.
    pub fn session(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Session, Error> {
        self.authenticate(email, password)?;
        Ok(Session::new(self.clone()))
    }

    /// Run `f` inside an authenticated session, releasing it afterwards.
    ///
    /// Release failures are logged, not returned.
    pub fn with_session<F, T, E>(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&BlockingClient) -> Result<T, E>,
        E: From<Error>,
    {
        let session = self.session(email, password)?;
        let out = f(session.client());
        drop(session);
        out
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.is_set()
    }

    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.inner.session.get()
    }

    /// Install a token obtained elsewhere (e.g. a previous run).
    pub fn set_token(&self, token: impl Into<String>) {
        self.inner.session.set(Some(SecretString::new(token)));
    }

    /// Forget the token locally without calling the API.
    pub fn clear_token(&self) {
        self.inner.session.clear();
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    #[must_use]
    pub fn validation(&self) -> Validation {
        self.inner.validation
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// Send a request relative to the base URL with the session token attached.
    pub fn request(&self, req: &Request) -> Result<ApiResponse, Error> {
        self.execute_request(req)
    }

    pub(crate) fn store_token(&self, token: Option<&str>) {
        #[cfg(feature = "tracing")]
        {
            if token.is_none() {
                tracing::warn!("authentication response carried no token");
            }
        }
        self.inner.session.set(token.map(SecretString::new));
    }

    pub(crate) fn execute_request(&self, req: &Request) -> Result<ApiResponse, Error> {
        let url = endpoint_url(&self.inner.base, req.segments.iter().map(|s| s.as_str()))?;
        let token = self.inner.session.get();
        let (query, form) = place_params(&req.method, inject_token(&req.params, token.as_ref()));

        #[cfg(feature = "metrics")]
        let timer = crate::transport::metrics::RequestTimer::start(
            &req.method,
            req.segments.first().map(String::as_str),
            self.inner.validation,
        );
        #[cfg(feature = "tracing")]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "gumroad.request",
            http.method = %req.method,
            http.host = %self.inner.base.host_str().unwrap_or_default(),
            http.path = %url.path(),
            http.status = field::Empty,
            request_id = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let resp = match self.inner.transport.send(TransportRequest {
            method: req.method.clone(),
            url: url.clone(),
            headers: self.inner.default_headers.clone(),
            query,
            form,
            timeout: self.inner.timeout,
        }) {
            Ok(resp) => resp,
            Err(err) => {
                #[cfg(feature = "metrics")]
                timer.finish(None, Some(err.kind()));
                #[cfg(feature = "tracing")]
                {
                    span.record("error_kind", field::debug(err.kind()));
                    span.record("latency_ms", start.elapsed().as_millis() as i64);
                }
                return Err(err);
            }
        };

        #[cfg(any(feature = "tracing", feature = "metrics"))]
        let status = resp.status;

        #[cfg(feature = "tracing")]
        {
            span.record("http.status", status.as_u16() as i64);
            span.record("latency_ms", start.elapsed().as_millis() as i64);
            if let Some(rid) = crate::util::diagnostics::request_id(&resp.headers) {
                span.record("request_id", field::display(rid));
            }
        }

        let result = ResponseContext {
            method: &req.method,
            url: &url,
            token: token.as_ref(),
            body_snippet: self.inner.body_snippet,
            validation: self.inner.validation,
        }
        .finish(resp);

        #[cfg(feature = "metrics")]
        timer.finish(Some(status), result.as_ref().err().map(Error::kind));
        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &result {
                span.record("error_kind", field::debug(err.kind()));
            }
        }

        result
    }
}
