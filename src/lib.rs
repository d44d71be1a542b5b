//! Gumroad-SDK – choose **blocking** *or* **async** at compile time.
//!
//! ```no_run
//! # #[cfg(feature = "blocking")]
//! # fn main() -> Result<(), gumroad_sdk::Error> {
//! use gumroad_sdk::{BlockingClient, LinkParams};
//!
//! let client = BlockingClient::new()?;
//! let session = client.session("seller@example.com", "hunter2")?;
//! let created = session
//!     .links()
//!     .create(LinkParams::new().name("Widget").price(500))?;
//! println!("{:?}", created.link());
//! session.end()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "blocking"))]
//! # fn main() {}
//! ```

// compile-time guard: enable at least one client kind.
#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("Enable at least one of: `blocking` (default) or `async`.");

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod request_hook;
pub mod transport;
pub mod types;
pub mod validation;

mod util;

pub use api::*;
pub use auth::{Credentials, SecretString};
#[cfg(feature = "async")]
pub use client::{Client, ClientBuilder};
#[cfg(feature = "blocking")]
pub use client::{BlockingClient, BlockingClientBuilder, Session};
pub use error::{BodySnippetConfig, Error, ErrorKind, HttpError, Result, TransportErrorKind};
pub use request_hook::{RequestHook, RequestHookContext};
pub use transport::request::Request;
pub use types::*;
pub use validation::Validation;

/// Root of the public Gumroad API.
pub const DEFAULT_BASE_URL: &str = "https://gumroad.com/api/v1";

/// Request timeout applied when the builder does not override it.
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(3000);
