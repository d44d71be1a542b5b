use http::{Method, StatusCode};
use std::{error::Error as StdError, fmt};
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy)]
pub struct BodySnippetConfig {
    pub enabled: bool,
    pub max_bytes: usize,
}

impl Default for BodySnippetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    Http,
    Api,
    Transport,
    Decode,
    InvalidConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

/// A response rejected because of its HTTP status (`>= 300`).
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub method: Method,
    /// Sanitized URL: no query/fragment/userinfo.
    pub url: Box<Url>,
    pub message: Option<Box<str>>,
    pub request_id: Option<Box<str>>,
    pub body_snippet: Option<Box<str>>,
}

impl HttpError {
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// All errors returned by the SDK.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Non-success HTTP status (strict validation only).
    #[error("{0}")]
    Http(HttpError),

    /// The API answered with `success: false` (strict validation only).
    #[error("API error (HTTP {status}) during {method} {path}: {message}")]
    Api {
        status: StatusCode,
        method: Method,
        path: Box<str>,
        message: Box<str>,
        request_id: Option<Box<str>>,
    },

    #[error("Transport error during {method} {path}: {source}")]
    Transport {
        method: Method,
        path: Box<str>,
        kind: TransportErrorKind,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Decode error (HTTP {status}) during {method} {path}: {source}")]
    Decode {
        status: StatusCode,
        method: Method,
        path: Box<str>,
        request_id: Option<Box<str>>,
        body_snippet: Option<Box<str>>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) => ErrorKind::Http,
            Self::Api { .. } => ErrorKind::Api,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => Some(e.status),
            Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Transport { .. } | Self::InvalidConfig { .. } => None,
        }
    }

    /// Human readable message reported by the API, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.message.as_deref(),
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.request_id.as_deref(),
            Self::Api { request_id, .. } | Self::Decode { request_id, .. } => {
                request_id.as_deref()
            }
            Self::Transport { .. } | Self::InvalidConfig { .. } => None,
        }
    }

    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Http(e) if matches!(e.status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http(e) if e.status == StatusCode::NOT_FOUND)
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                kind: TransportErrorKind::Timeout,
                ..
            }
        )
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} ({} {})", self.status, self.method, self.path())?;
        if let Some(message) = self.message.as_deref() {
            write!(f, ": {message}")?;
        }
        if let Some(request_id) = self.request_id.as_deref() {
            write!(f, " [request-id: {request_id}]")?;
        }
        Ok(())
    }
}
