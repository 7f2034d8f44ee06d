// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io;

use tokio::sync::mpsc;
use tracing::debug;

use crate::authority::MessageResponse;
use crate::proto::op::Header;

/// Information about the response sent for a query
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct ResponseInfo(Header);

impl From<Header> for ResponseInfo {
    fn from(header: Header) -> Self {
        Self(header)
    }
}

impl std::ops::Deref for ResponseInfo {
    type Target = Header;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A handler for sending a response towards the querier
#[async_trait::async_trait]
pub trait ResponseHandler: Clone + Send + Sync + Unpin + 'static {
    /// Hands a finished message to the wrapped transport.
    ///
    /// A task may call this more than once, sub-type answers get split off
    /// into messages of their own.
    async fn send_response(&mut self, response: MessageResponse) -> io::Result<ResponseInfo>;
}

/// A handler which queues responses for whatever transport drains the
/// receiving half of its channel. The engine never touches sockets itself.
#[derive(Clone, Debug)]
pub struct ResponseHandle {
    sender: mpsc::UnboundedSender<MessageResponse>,
}

impl ResponseHandle {
    /// Returns a new `ResponseHandle` and the receiver it feeds
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MessageResponse>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait::async_trait]
impl ResponseHandler for ResponseHandle {
    async fn send_response(&mut self, response: MessageResponse) -> io::Result<ResponseInfo> {
        debug!(
            id = response.header().id(),
            records = response.record_count(),
            dst = ?response.dst(),
            "sending response",
        );

        let info = ResponseInfo::from(*response.header());
        self.sender
            .send(response)
            .map_err(|_| io::Error::other("response receiver closed"))?;

        Ok(info)
    }
}
