// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! resource record implementation

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::rr::dns_class::DNSClass;
use crate::rr::record_data::RData;
use crate::rr::record_type::RecordType;
use crate::rr::service_info::ServiceKey;
use crate::rr::Name;

/// An mDNS resource record: the DNS fields plus the mDNS bookkeeping that
/// hangs off them.
///
/// `created` stamps when this copy of the record came into being
/// (milliseconds since the UNIX epoch): registration time for authoritative
/// records, arrival time for known answers parsed off the wire. Together with
/// the TTL it drives the RFC 6762 §7.1 half-TTL staleness rule.
///
/// `cache_flush` is the RFC 6762 §10.2 top class bit: the record's owner
/// claims unique authority over the name. `service` is a lookup-only
/// back-reference to the DNS-SD service that published the record; resolving
/// it is the service index's job.
#[derive(Clone, Debug)]
pub struct Record {
    name: Name,
    rr_type: RecordType,
    dns_class: DNSClass,
    ttl: u32,
    rdata: RData,
    cache_flush: bool,
    created: u64,
    service: Option<ServiceKey>,
}

impl Record {
    /// Create a record with the type implied by the record data, class IN, no
    /// cache-flush bit, and an unset creation stamp.
    pub fn from_rdata(name: Name, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rr_type: rdata.to_record_type(),
            dns_class: DNSClass::IN,
            ttl,
            rdata,
            cache_flush: false,
            created: 0,
            service: None,
        }
    }

    /// Replace the record's name
    pub fn set_name(&mut self, name: Name) -> &mut Self {
        self.name = name;
        self
    }

    /// Set the DNS class of the record
    pub fn set_dns_class(&mut self, dns_class: DNSClass) -> &mut Self {
        self.dns_class = dns_class;
        self
    }

    /// Set the time-to-live of the record, in seconds
    pub fn set_ttl(&mut self, ttl: u32) -> &mut Self {
        self.ttl = ttl;
        self
    }

    /// Changes the cache-flush (unique ownership) bit
    /// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-10.2)
    pub fn set_cache_flush(&mut self, flag: bool) -> &mut Self {
        self.cache_flush = flag;
        self
    }

    /// Stamp when this copy of the record came into being, in milliseconds
    /// since the UNIX epoch
    pub fn set_created(&mut self, created: u64) -> &mut Self {
        self.created = created;
        self
    }

    /// Attach the key of the DNS-SD service that published this record
    pub fn set_service_key(&mut self, service: ServiceKey) -> &mut Self {
        self.service = Some(service);
        self
    }

    /// The name of the record, lowercase and fully qualified
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The type of the record
    pub fn record_type(&self) -> RecordType {
        self.rr_type
    }

    /// The DNS class of the record
    pub fn dns_class(&self) -> DNSClass {
        self.dns_class
    }

    /// The time-to-live of the record, in seconds
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// The record data
    pub fn data(&self) -> &RData {
        &self.rdata
    }

    /// Whether the cache-flush (unique ownership) bit is set
    pub fn cache_flush(&self) -> bool {
        self.cache_flush
    }

    /// When this copy of the record came into being, in milliseconds since
    /// the UNIX epoch; 0 when never stamped
    pub fn created(&self) -> u64 {
        self.created
    }

    /// The owning DNS-SD service, when the record was published by one
    pub fn service_key(&self) -> Option<&ServiceKey> {
        self.service.as_ref()
    }

    /// The instant, in milliseconds since the UNIX epoch, at which `percent`
    /// of this record's TTL has elapsed since creation
    pub fn expiration_time(&self, percent: u32) -> u64 {
        // ttl is seconds, percent of it in milliseconds is percent * ttl * 10
        self.created + u64::from(percent) * u64::from(self.ttl) * 10
    }

    /// True once the record has outlived half of its TTL at `now`.
    ///
    /// The RFC 6762 §7.1 rule: a known answer whose remaining TTL has decayed
    /// to half or below no longer suppresses a response.
    pub fn is_stale(&self, now: u64) -> bool {
        self.expiration_time(50) <= now
    }

    /// True once the record has outlived its whole TTL at `now`
    pub fn is_expired(&self, now: u64) -> bool {
        self.expiration_time(100) <= now
    }
}

/// Equality covers the record identity only: name, type, class, and payload.
/// TTL, timestamps, the cache-flush bit, and the service back-reference never
/// take part, so a fresh copy and an aging copy of the same record compare
/// equal and collapse in a set.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.rr_type == other.rr_type
            && self.dns_class == other.dns_class
            && self.rdata == other.rdata
    }
}

impl Eq for Record {}

/// Hashes the same fields equality compares
impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.rr_type.hash(state);
        self.dns_class.hash(state);
        self.rdata.hash(state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{name} {ttl} {class} {tipe} {rdata}",
            name = self.name,
            ttl = self.ttl,
            class = self.dns_class,
            tipe = self.rr_type,
            rdata = self.rdata,
        )
    }
}
