//! Transport wrappers applied by the client builders.

use crate::{
    Error, RequestHook, RequestHookContext,
    transport::{TransportRequest, params_in_query},
};

#[cfg(feature = "async")]
pub mod hook_async;
#[cfg(feature = "blocking")]
pub mod hook_blocking;

#[cfg(feature = "async")]
pub use hook_async::HookedAsync;
#[cfg(feature = "blocking")]
pub use hook_blocking::HookedBlocking;

/// Runs `hook` against the parameters that will actually go out.
pub(crate) fn apply_hook(hook: &RequestHook, req: &mut TransportRequest) -> Result<(), Error> {
    let in_query = params_in_query(&req.method);
    let params = if in_query { &req.query } else { &req.form };

    let result = hook(RequestHookContext {
        method: &req.method,
        url: &req.url,
        headers: &mut req.headers,
        params,
        in_query,
    });

    #[cfg(feature = "tracing")]
    {
        if let Err(err) = &result {
            tracing::debug!(error = %err, path = req.url.path(), "request hook rejected call");
        }
    }
    result
}
