use super::apply_hook;
use crate::transport::{TransportRequest, TransportResponse, blocking_transport::BlockingTransport};
use crate::{Error, RequestHook};

/// Blocking transport that runs the builder's request hook first.
#[derive(Clone)]
pub struct HookedBlocking<T> {
    transport: T,
    hook: RequestHook,
}

impl<T: BlockingTransport> HookedBlocking<T> {
    pub fn new(transport: T, hook: RequestHook) -> Self {
        Self { transport, hook }
    }
}

impl<T: BlockingTransport> BlockingTransport for HookedBlocking<T> {
    fn send(&self, mut req: TransportRequest) -> Result<TransportResponse, Error> {
        apply_hook(&self.hook, &mut req)?;
        self.transport.send(req)
    }
}
