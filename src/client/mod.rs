//! Client implementations (blocking + optional async).

#[cfg(feature = "async")]
pub mod async_client;
#[cfg(feature = "blocking")]
pub mod blocking_client;
#[cfg(feature = "blocking")]
pub mod session;

#[cfg(feature = "async")]
pub use async_client::{Client, ClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{BlockingClient, BlockingClientBuilder};
#[cfg(feature = "blocking")]
pub use session::Session;
