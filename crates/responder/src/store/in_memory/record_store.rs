// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! In-memory authoritative record storage

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::trace;

use crate::authority::{MessageRequest, RecordStore};
use crate::proto::multicast::META_QUERY_NAME;
use crate::proto::op::Query;
use crate::proto::rr::{DNSClass, Name, RData, Record, RecordType};

/// A name-keyed table of the records this host answers for.
///
/// Registration upserts by record identity, so re-registering a record
/// refreshes its TTL and creation stamp instead of growing the table. Lookups
/// resolve sub-type query names to their base service type, and the DNS-SD
/// meta-query is answered by synthesizing one enumeration pointer per
/// registered service type.
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<Name, Vec<Record>>>,
    queries_observed: AtomicU64,
}

impl InMemoryRecordStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            queries_observed: AtomicU64::new(0),
        }
    }

    /// Register a record, refreshing the stored copy when one with the same
    /// identity is already present. Returns true when a copy was refreshed.
    pub fn upsert(&self, record: Record) -> bool {
        let mut records = self.records.write().expect("record store poisoned");
        let slot = records.entry(record.name().clone()).or_default();
        match slot.iter_mut().find(|current| **current == record) {
            Some(current) => {
                *current = record;
                true
            }
            None => {
                slot.push(record);
                false
            }
        }
    }

    /// How many queries this store has been shown via
    /// [`RecordStore::notify_query_observed`]
    pub fn queries_observed(&self) -> u64 {
        self.queries_observed.load(Ordering::Relaxed)
    }

    fn matches(record: &Record, query: &Query) -> bool {
        let class_matches =
            query.query_class() == DNSClass::ANY || record.dns_class() == query.query_class();
        let type_matches = query.query_type() == RecordType::ANY
            || record.record_type() == query.query_type();
        class_matches && type_matches
    }

    /// Sub-type questions are answered out of the base service type
    fn lookup_name(query: &Query) -> Name {
        match query.name().base_type() {
            Some(base) => base,
            None => query.name().clone(),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn append_answers(&self, query: &Query, now: u64, answers: &mut HashSet<Record>) {
        let records = self.records.read().expect("record store poisoned");

        if query.name().as_str() == META_QUERY_NAME {
            // RFC 6763 section 9: one enumeration pointer per service type
            if query.query_type() != RecordType::PTR && query.query_type() != RecordType::ANY {
                return;
            }
            let meta_name = query.name().clone();
            for (type_domain, slot) in records.iter() {
                for record in slot {
                    if record.record_type().is_pointer() && !record.is_expired(now) {
                        let mut meta = Record::from_rdata(
                            meta_name.clone(),
                            record.ttl(),
                            RData::PTR(type_domain.clone()),
                        );
                        meta.set_created(record.created());
                        answers.insert(meta);
                    }
                }
            }
            return;
        }

        let Some(slot) = records.get(&Self::lookup_name(query)) else {
            return;
        };
        for record in slot {
            if Self::matches(record, query) && !record.is_expired(now) {
                answers.insert(record.clone());
            }
        }
    }

    fn is_sole_authority(&self, query: &Query) -> bool {
        // every host on the link answers the meta-query
        if query.name().as_str() == META_QUERY_NAME {
            return false;
        }

        let records = self.records.read().expect("record store poisoned");
        let Some(slot) = records.get(&Self::lookup_name(query)) else {
            return false;
        };
        let mut any = false;
        for record in slot {
            if Self::matches(record, query) {
                if !record.cache_flush() {
                    return false;
                }
                any = true;
            }
        }
        any
    }

    fn notify_query_observed(&self, request: &MessageRequest) {
        self.queries_observed.fetch_add(1, Ordering::Relaxed);
        trace!(id = request.id(), src = %request.src(), "query observed");
    }
}
