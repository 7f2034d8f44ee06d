// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::net::SocketAddr;

use crate::proto::current_time_millis;
use crate::proto::multicast::MAX_PAYLOAD_TYPICAL;
use crate::proto::op::{Header, MessageType, Query};
use crate::proto::rr::Record;

/// A Message which captures the data from an inbound query datagram.
///
/// Wire decoding is the transport's business, this type starts where the
/// parser left off: questions, the known answers the querier attached, the
/// source address the datagram came from, and the instant it arrived.
#[derive(Clone, Debug)]
pub struct MessageRequest {
    header: Header,
    queries: Vec<Query>,
    answers: Vec<Record>,
    src: SocketAddr,
    max_payload: u16,
    received: u64,
}

impl MessageRequest {
    /// Capture a parsed query datagram, stamping its arrival with the current
    /// time
    pub fn new(header: Header, queries: Vec<Query>, answers: Vec<Record>, src: SocketAddr) -> Self {
        Self {
            header,
            queries,
            answers,
            src,
            max_payload: MAX_PAYLOAD_TYPICAL,
            received: current_time_millis(),
        }
    }

    /// Override the UDP payload size the querier advertised
    pub fn set_max_payload(&mut self, max_payload: u16) -> &mut Self {
        self.max_payload = max_payload;
        self
    }

    /// Override the arrival stamp, in milliseconds since the UNIX epoch
    pub fn set_received(&mut self, received: u64) -> &mut Self {
        self.received = received;
        self
    }

    /// Return the request header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// see `Header::id()`
    pub fn id(&self) -> u16 {
        self.header.id()
    }

    /// see `Header::message_type()`
    pub fn message_type(&self) -> MessageType {
        self.header.message_type()
    }

    /// see `Header::truncated()`
    pub fn truncated(&self) -> bool {
        self.header.truncated()
    }

    /// ```text
    /// Question        Carries the query name and other query parameters.
    /// ```
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// The known answers the querier attached, the records it claims to
    /// already hold.
    /// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-7.1)
    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    /// The address and port the query datagram came from
    pub fn src(&self) -> SocketAddr {
        self.src
    }

    /// The UDP payload size the querier can accept
    pub fn max_payload(&self) -> u16 {
        self.max_payload
    }

    /// When the query arrived, in milliseconds since the UNIX epoch
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Milliseconds elapsed between the query's arrival and `now`
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.received)
    }

    /// True when the query came from a port other than the mDNS port, the
    /// legacy "one-shot" query form whose response goes back unicast and
    /// restates the question.
    /// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-6.7)
    pub fn is_unicast_query(&self, mdns_port: u16) -> bool {
        self.src.port() != mdns_port
    }
}
