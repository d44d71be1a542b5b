//! Gumroad API services.
//!
//! Services are exposed via accessors on clients and share the client's
//! transport and session token:
//! - `Client::sessions()` / `BlockingClient::sessions()`
//! - `Client::links()` / `BlockingClient::links()`

pub mod links;
pub mod sessions;

pub use links::*;
pub use sessions::*;
