use super::apply_hook;
use crate::transport::{TransportRequest, TransportResponse, async_transport::AsyncTransport};
use crate::{Error, RequestHook};
use async_trait::async_trait;

/// Async transport that runs the builder's request hook first.
#[derive(Clone)]
pub struct HookedAsync<T> {
    transport: T,
    hook: RequestHook,
}

impl<T: AsyncTransport> HookedAsync<T> {
    pub fn new(transport: T, hook: RequestHook) -> Self {
        Self { transport, hook }
    }
}

#[async_trait]
impl<T: AsyncTransport> AsyncTransport for HookedAsync<T> {
    async fn send(&self, mut req: TransportRequest) -> Result<TransportResponse, Error> {
        apply_hook(&self.hook, &mut req)?;
        self.transport.send(req).await
    }
}
