// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::net::SocketAddr;

use crate::proto::op::{Header, Query};
use crate::proto::rr::Record;

/// A built response packet on its way to the transport.
///
/// `dst` carries the delivery decision: a concrete address for a unicast
/// reply, `None` for the multicast group. Encoding the packet to the wire
/// within `max_size` is the transport's business.
#[derive(Clone, Debug)]
pub struct MessageResponse {
    header: Header,
    queries: Vec<Query>,
    answers: Vec<Record>,
    additionals: Vec<Record>,
    dst: Option<SocketAddr>,
    max_size: u16,
}

impl MessageResponse {
    /// Returns the header of the message
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The questions restated in the response, non-empty only for replies to
    /// legacy unicast queries
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Records of the primary answer section
    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    /// Records of the additional section
    pub fn additionals(&self) -> &[Record] {
        &self.additionals
    }

    /// Where the response goes: a concrete address, or `None` for the
    /// multicast group
    pub fn dst(&self) -> Option<SocketAddr> {
        self.dst
    }

    /// The byte budget the encoded packet must fit in
    pub fn max_size(&self) -> u16 {
        self.max_size
    }

    /// The first record of the packet, answers before additionals
    pub fn first_record(&self) -> Option<&Record> {
        self.answers.first().or_else(|| self.additionals.first())
    }

    /// Count of records across both sections
    pub fn record_count(&self) -> usize {
        self.answers.len() + self.additionals.len()
    }

    /// True when the packet carries no records at all
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.additionals.is_empty()
    }
}

/// Returns a section length as a u16 header count, saturating at `u16::MAX`
fn section_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

/// A builder for MessageResponses
#[derive(Clone, Debug)]
pub struct MessageResponseBuilder {
    queries: Vec<Query>,
    answers: Vec<Record>,
    additionals: Vec<Record>,
    dst: Option<SocketAddr>,
    max_size: u16,
}

impl MessageResponseBuilder {
    /// Constructs a new response builder
    ///
    /// # Arguments
    ///
    /// * `dst` - destination of the response, `None` for the multicast group
    /// * `max_size` - byte budget the querier advertised for the response
    pub fn new(dst: Option<SocketAddr>, max_size: u16) -> Self {
        Self {
            queries: Vec::new(),
            answers: Vec::new(),
            additionals: Vec::new(),
            dst,
            max_size,
        }
    }

    /// Restate a question in the response, a no-op if it is already present
    pub fn add_query(&mut self, query: Query) -> &mut Self {
        if !self.queries.contains(&query) {
            self.queries.push(query);
        }
        self
    }

    /// Add a record, routed to its section by type: pointer records carry the
    /// discovery answer itself and go in the answer section, every other type
    /// supplements one and goes in the additional section.
    ///
    /// A record already present in either section is not added again, record
    /// identity covers name, type, class and payload.
    pub fn add_answer(&mut self, record: Record) -> &mut Self {
        if self.answers.contains(&record) || self.additionals.contains(&record) {
            return self;
        }
        if record.record_type().is_pointer() {
            self.answers.push(record);
        } else {
            self.additionals.push(record);
        }
        self
    }

    /// Count of records added so far across both sections
    pub fn record_count(&self) -> usize {
        self.answers.len() + self.additionals.len()
    }

    /// True when no records have been added
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.additionals.is_empty()
    }

    /// Constructs the new MessageResponse with associated Header.
    ///
    /// The section counts of the header are overwritten with the counts of
    /// what was actually added, saturating at what the u16 fields can carry.
    pub fn build(self, header: Header) -> MessageResponse {
        let mut header = header;
        header
            .set_query_count(section_count(self.queries.len()))
            .set_answer_count(section_count(self.answers.len()))
            .set_name_server_count(0)
            .set_additional_count(section_count(self.additionals.len()));

        MessageResponse {
            header,
            queries: self.queries,
            answers: self.answers,
            additionals: self.additionals,
            dst: self.dst,
            max_size: self.max_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use crate::proto::rr::rdata::SRV;
    use crate::proto::rr::{Name, RData, RecordType};

    use super::*;

    fn ptr_record() -> Record {
        Record::from_rdata(
            Name::from_utf8("_printer._tcp.local.").unwrap(),
            4500,
            RData::PTR(Name::from_utf8("hpxxx._printer._tcp.local.").unwrap()),
        )
    }

    fn srv_record() -> Record {
        Record::from_rdata(
            Name::from_utf8("hpxxx._printer._tcp.local.").unwrap(),
            120,
            RData::SRV(SRV::new(0, 0, 515, Name::from_utf8("hpxxx.local.").unwrap())),
        )
    }

    #[test]
    fn test_section_routing() {
        let mut builder = MessageResponseBuilder::new(None, 1460);
        builder.add_answer(ptr_record());
        builder.add_answer(srv_record());
        builder.add_answer(Record::from_rdata(
            Name::from_utf8("hpxxx.local.").unwrap(),
            120,
            RData::A(Ipv4Addr::new(10, 0, 0, 7)),
        ));

        let response = builder.build(Header::new());
        assert_eq!(response.answers().len(), 1);
        assert_eq!(response.answers()[0].record_type(), RecordType::PTR);
        assert_eq!(response.additionals().len(), 2);
        assert_eq!(response.header().answer_count(), 1);
        assert_eq!(response.header().additional_count(), 2);
    }

    #[test]
    fn test_duplicates_collapse_across_sections() {
        let mut builder = MessageResponseBuilder::new(None, 1460);
        let mut aging = srv_record();
        aging.set_ttl(10).set_created(99);

        builder.add_answer(srv_record());
        builder.add_answer(aging);
        assert_eq!(builder.record_count(), 1);
    }

    #[test]
    fn test_queries_deduplicate() {
        let mut builder = MessageResponseBuilder::new(None, 1460);
        let query = Query::query(
            Name::from_utf8("_printer._tcp.local.").unwrap(),
            RecordType::PTR,
        );
        builder.add_query(query.clone());
        builder.add_query(query);

        let response = builder.build(Header::new());
        assert_eq!(response.queries().len(), 1);
        assert_eq!(response.header().query_count(), 1);
    }

    #[test]
    fn test_section_counts_saturate() {
        assert_eq!(section_count(0), 0);
        assert_eq!(section_count(usize::from(u16::MAX)), u16::MAX);
        assert_eq!(section_count(usize::from(u16::MAX) + 1), u16::MAX);
    }

    #[test]
    fn test_first_record_prefers_answers() {
        let mut builder = MessageResponseBuilder::new(None, 1460);
        builder.add_answer(srv_record());
        builder.add_answer(ptr_record());

        let response = builder.build(Header::new());
        let first = response.first_record().unwrap();
        assert_eq!(first.record_type(), RecordType::PTR);
    }
}
