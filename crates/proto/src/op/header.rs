// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Message metadata

use std::fmt;

/// Metadata for the `Message` struct.
///
/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
///
/// ```text
/// 4.1.1. Header section format
///
/// The header contains the following fields
///
///                                    1  1  1  1  1  1
///      0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                      ID                       |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |QR|   Opcode  |AA|TC|RD|RA|ZZ|AD|CD|   RCODE   |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    QDCOUNT                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    ANCOUNT                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    NSCOUNT                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    ARCOUNT                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// mDNS ignores most of the unicast-DNS flag set, so only the fields RFC 6762
/// gives meaning to are carried here.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Header {
    id: u16,
    message_type: MessageType,
    authoritative: bool,
    truncation: bool,
    query_count: u16,
    answer_count: u16,
    name_server_count: u16,
    additional_count: u16,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{id}:{message_type}:{flags}:{queries}:{answers}/{authorities}/{additionals}",
            id = self.id,
            message_type = self.message_type,
            flags = self.flags(),
            queries = self.query_count,
            answers = self.answer_count,
            authorities = self.name_server_count,
            additionals = self.additional_count,
        )
    }
}

/// Message types are either Query or Response
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MessageType {
    /// Queries are Client requests
    Query,
    /// Response message from the Server
    Response,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            Self::Query => "QUERY",
            Self::Response => "RESPONSE",
        };

        f.write_str(s)
    }
}

/// The header flags mDNS gives meaning to
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Flags {
    authoritative: bool,
    truncation: bool,
}

/// We are following the `dig` commands display format for the header flags
///
/// Example: "AA,TC" is Authoritative-Answer, Truncation.
impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        const SEPARATOR: &str = ",";

        let flags = [(self.authoritative, "AA"), (self.truncation, "TC")];

        let mut iter = flags
            .iter()
            .cloned()
            .filter_map(|(flag, s)| if flag { Some(s) } else { None });

        // print first without a separator, then print the rest.
        if let Some(s) = iter.next() {
            f.write_str(s)?
        }
        for s in iter {
            f.write_str(SEPARATOR)?;
            f.write_str(s)?;
        }

        Ok(())
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    /// A default Header, a query with nothing in it
    pub const fn new() -> Self {
        Self {
            id: 0,
            message_type: MessageType::Query,
            authoritative: false,
            truncation: false,
            query_count: 0,
            answer_count: 0,
            name_server_count: 0,
            additional_count: 0,
        }
    }

    /// Construct a new header based off the request header. This copies over the
    ///   id of the request and marks the response authoritative.
    ///
    /// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-18.4)
    ///
    /// ```text
    /// 18.4.  AA (Authoritative Answer) Bit
    ///
    ///    In query messages, the Authoritative Answer bit MUST be zero on
    ///    transmission, and MUST be ignored on reception.
    ///
    ///    In response messages for Multicast domains, the Authoritative Answer
    ///    bit MUST be set to one (not setting this bit would imply there's some
    ///    other place where "better" information may be found) and MUST be
    ///    ignored on reception.
    /// ```
    pub fn response_from_request(header: &Self) -> Self {
        Self {
            id: header.id,
            message_type: MessageType::Response,
            authoritative: true,
            truncation: false,
            query_count: 0,
            answer_count: 0,
            name_server_count: 0,
            additional_count: 0,
        }
    }

    /// Sets the id of the message, multicast responses use 0
    pub fn set_id(&mut self, id: u16) -> &mut Self {
        self.id = id;
        self
    }

    /// Sets the message type, Query or Response
    pub fn set_message_type(&mut self, message_type: MessageType) -> &mut Self {
        self.message_type = message_type;
        self
    }

    /// From the server is specifies that it is an authoritative response
    pub fn set_authoritative(&mut self, authoritative: bool) -> &mut Self {
        self.authoritative = authoritative;
        self
    }

    /// Specifies that the records were too large for the payload.
    ///
    /// In mDNS a truncated query announces that more known answers follow in
    /// another datagram.
    pub fn set_truncated(&mut self, truncated: bool) -> &mut Self {
        self.truncation = truncated;
        self
    }

    /// Number of query records in the message
    pub fn set_query_count(&mut self, query_count: u16) -> &mut Self {
        self.query_count = query_count;
        self
    }

    /// Number of answer records in the message
    pub fn set_answer_count(&mut self, answer_count: u16) -> &mut Self {
        self.answer_count = answer_count;
        self
    }

    /// Number of name server records in the message
    pub fn set_name_server_count(&mut self, name_server_count: u16) -> &mut Self {
        self.name_server_count = name_server_count;
        self
    }

    /// Number of additional records in the message
    pub fn set_additional_count(&mut self, additional_count: u16) -> &mut Self {
        self.additional_count = additional_count;
        self
    }

    /// A method to get all header flags (useful for Display purposes)
    pub fn flags(&self) -> Flags {
        Flags {
            authoritative: self.authoritative,
            truncation: self.truncation,
        }
    }

    /// ID of the message, 0 in multicast responses
    pub fn id(&self) -> u16 {
        self.id
    }

    /// The type of the message, Query or Response
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Whether the message is an authoritative response
    pub fn authoritative(&self) -> bool {
        self.authoritative
    }

    /// Whether the message was truncated
    pub fn truncated(&self) -> bool {
        self.truncation
    }

    /// Number of query records in the message
    pub fn query_count(&self) -> u16 {
        self.query_count
    }

    /// Number of answer records in the message
    pub fn answer_count(&self) -> u16 {
        self.answer_count
    }

    /// Number of name server records in the message
    pub fn name_server_count(&self) -> u16 {
        self.name_server_count
    }

    /// Number of additional records in the message
    pub fn additional_count(&self) -> u16 {
        self.additional_count
    }
}
