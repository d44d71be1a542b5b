//! Shared request/response types.

pub mod common;
pub mod link;
pub mod response;

pub use common::*;
pub use link::*;
pub use response::*;
