// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The answering task, one per inbound query

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::authority::{MessageRequest, MessageResponseBuilder, RecordStore, ServiceIndex};
use crate::config::ResponderConfig;
use crate::error::{Error, ErrorKind};
use crate::proto::multicast::PRIVATE_SUB_TYPE_PREFIX;
use crate::proto::op::{Header, Query};
use crate::proto::rr::{loose_contains, Record, ServiceKey};
use crate::responder::{ResponseHandler, ResponseInfo};

/// A single-shot answering task for one inbound query.
///
/// A `Responder` is built when the query arrives, sits out its
/// collision-avoidance delay, runs exactly once and terminates. There is no
/// retry state: a failure during the run is terminal for the task, and the
/// driving future decides what it means for the engine as a whole.
pub struct Responder<S: RecordStore, I: ServiceIndex> {
    request: MessageRequest,
    store: Arc<S>,
    services: Arc<I>,
    config: Arc<ResponderConfig>,
    unicast: bool,
}

impl<S: RecordStore, I: ServiceIndex> Responder<S, I> {
    /// Construct the task for one inbound query against the shared stores
    pub fn new(
        request: MessageRequest,
        store: Arc<S>,
        services: Arc<I>,
        config: Arc<ResponderConfig>,
    ) -> Self {
        let unicast = request.is_unicast_query(config.get_mdns_port());
        Self {
            request,
            store,
            services,
            config,
            unicast,
        }
    }

    /// The request this task answers
    pub fn request(&self) -> &MessageRequest {
        &self.request
    }

    /// True when the querier expects a direct reply because it sent from a
    /// non-standard port.
    /// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-6.7)
    pub fn is_unicast(&self) -> bool {
        self.unicast
    }

    /// Milliseconds to hold the answer back before sending.
    ///
    /// A host that is the sole authority for every question answers at once.
    /// Everything else defers by a random amount inside the configured
    /// window, less the time the query has already spent waiting, so that
    /// simultaneous responders on the link do not collide. A truncated query
    /// announces more known answers in flight and always waits for them.
    /// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-6)
    pub fn response_delay<R: Rng>(&self, now: u64, rng: &mut R) -> u64 {
        let sole_authority = self
            .request
            .queries()
            .iter()
            .all(|query| self.store.is_sole_authority(query));

        if sole_authority && !self.request.truncated() {
            return 0;
        }

        let min = self.config.get_response_min_wait();
        let max = self.config.get_response_max_wait().max(min);
        rng.random_range(min..=max)
            .saturating_sub(self.request.elapsed(now))
    }

    /// Run the task: gather, filter and send the answer for this query.
    ///
    /// Returns the info of the primary response sent, or `None` when every
    /// candidate answer was filtered away, which is a valid outcome and not
    /// an error. Any `Err` is fatal to the task.
    pub async fn execute<R: ResponseHandler>(
        &self,
        now: u64,
        handler: &mut R,
    ) -> Result<Option<ResponseInfo>, Error> {
        self.store.notify_query_observed(&self.request);

        let (queries, mut answers) = self.gather(now);
        self.remove_known_fresh(&mut answers, now);

        if self.config.unicast_response() {
            self.retain_source_affinity(&mut answers)?;
        }

        if answers.is_empty() {
            debug!(id = self.request.id(), "no answer available");
            return Ok(None);
        }

        let mut builder =
            MessageResponseBuilder::new(self.destination(), self.request.max_payload());
        for query in queries {
            builder.add_query(query);
        }
        for answer in answers {
            builder.add_answer(answer);
        }

        let response = builder.build(Header::response_from_request(self.request.header()));
        let first = response.first_record().cloned();
        let info = handler.send_response(response).await?;

        if self.config.unicast_response() {
            if let Some(first) = first {
                self.split_sub_types(first, handler).await?;
            }
        }

        Ok(Some(info))
    }

    /// Collect the candidate answers for every question of the query.
    ///
    /// Only replies to legacy unicast queriers restate the questions, so the
    /// echoed set stays empty for multicast queries.
    fn gather(&self, now: u64) -> (Vec<Query>, HashSet<Record>) {
        let mut queries = Vec::new();
        let mut answers = HashSet::new();

        for query in self.request.queries() {
            debug!(query = %query, "responding to query");

            if self.unicast {
                queries.push(query.clone());
            }
            self.store.append_answers(query, now, &mut answers);
        }

        (queries, answers)
    }

    /// Drop candidates the querier already holds a fresh copy of.
    ///
    /// A known answer only suppresses while at least half its TTL remains,
    /// stale knowledge is answered again.
    /// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-7.1)
    fn remove_known_fresh(&self, answers: &mut HashSet<Record>, now: u64) {
        for known in self.request.answers() {
            if !known.is_stale(now) && answers.remove(known) {
                debug!(answer = %known, "suppressed by known answer");
            }
        }
    }

    /// Keep only the answers tied to services the querier's address is bound
    /// to in the service index, dropping everything else.
    ///
    /// An address record survives when its key, or failing that its name,
    /// contains one of the server host names registered for the address. Any
    /// record survives when its owning service key contains one of the keys
    /// registered for the address. Containment is loose, dashes do not
    /// count, see [`loose_contains`].
    fn retain_source_affinity(&self, answers: &mut HashSet<Record>) -> Result<(), Error> {
        let src = match self.request.src().ip() {
            IpAddr::V4(addr) => addr,
            other => return Err(ErrorKind::Ipv4Expected(other).into()),
        };

        let keys = self.services.service_keys(src);
        let servers = keys
            .iter()
            .filter_map(|key| self.services.service(key))
            .filter_map(|info| info.server().cloned())
            .collect::<Vec<_>>();

        let before = answers.len();
        answers.retain(|record| {
            if record.record_type().is_address() {
                let host = record
                    .service_key()
                    .map_or_else(|| record.name().as_str(), ServiceKey::as_str);
                if servers
                    .iter()
                    .any(|server| loose_contains(host, server.as_str()))
                {
                    return true;
                }
            }

            record.service_key().map_or(false, |key| {
                keys.iter().any(|needle| key.loosely_matches(needle))
            })
        });

        debug!(
            pruned = before - answers.len(),
            kept = answers.len(),
            src = %src,
            "pruned answers without source affinity",
        );
        Ok(())
    }

    /// Re-issue the first emitted record under each queried sub-type name,
    /// one single-record response per public sub-type question.
    async fn split_sub_types<R: ResponseHandler>(
        &self,
        first: Record,
        handler: &mut R,
    ) -> Result<(), Error> {
        for query in self.request.queries() {
            let name = query.name();
            if !name.is_sub_type() || name.as_str().starts_with(PRIVATE_SUB_TYPE_PREFIX) {
                continue;
            }

            let mut renamed = first.clone();
            renamed.set_name(name.clone());
            debug!(name = %name, "splitting sub type answer");

            let mut builder =
                MessageResponseBuilder::new(self.destination(), self.request.max_payload());
            builder.add_answer(renamed);
            let response = builder.build(Header::response_from_request(self.request.header()));
            handler.send_response(response).await?;
        }

        Ok(())
    }

    /// Where responses for this task go, `None` meaning the multicast group
    fn destination(&self) -> Option<SocketAddr> {
        if self.unicast || self.config.unicast_response() {
            Some(self.request.src())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use test_support::subscribe;

    use crate::authority::MessageResponse;
    use crate::proto::rr::rdata::SRV;
    use crate::proto::rr::{Name, RData, RecordType, ServiceInfo};
    use crate::responder::ResponseHandle;
    use crate::store::{InMemoryRecordStore, InMemoryServiceIndex};

    use super::*;

    fn name(name: &str) -> Name {
        Name::from_utf8(name).unwrap()
    }

    fn ptr_query() -> Query {
        Query::query(name("_printer._tcp.local."), RecordType::PTR)
    }

    fn ptr_record() -> Record {
        Record::from_rdata(
            name("_printer._tcp.local."),
            120,
            RData::PTR(name("hpxxx._printer._tcp.local.")),
        )
    }

    fn host_a_record() -> Record {
        let mut record = Record::from_rdata(
            name("hpxxx.local."),
            120,
            RData::A(Ipv4Addr::new(10, 0, 0, 7)),
        );
        record.set_cache_flush(true);
        record
    }

    fn request(queries: Vec<Query>, answers: Vec<Record>, src: &str) -> MessageRequest {
        let mut header = Header::new();
        header.set_id(0xf00d);
        let mut request = MessageRequest::new(header, queries, answers, src.parse().unwrap());
        request.set_received(0);
        request
    }

    fn responder(
        store: Arc<InMemoryRecordStore>,
        services: Arc<InMemoryServiceIndex>,
        config: ResponderConfig,
        request: MessageRequest,
    ) -> Responder<InMemoryRecordStore, InMemoryServiceIndex> {
        Responder::new(request, store, services, Arc::new(config))
    }

    #[test]
    fn test_delay_zero_for_sole_authority() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.upsert(host_a_record());

        let query = Query::query(name("hpxxx.local."), RecordType::A);
        let task = responder(
            store,
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request(vec![query], vec![], "10.0.0.5:5353"),
        );

        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(task.response_delay(0, &mut rng), 0);
    }

    #[test]
    fn test_delay_window_when_truncated() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.upsert(host_a_record());

        // sole authority, but more known answers are on their way
        let mut header = Header::new();
        header.set_truncated(true);
        let query = Query::query(name("hpxxx.local."), RecordType::A);
        let mut request =
            MessageRequest::new(header, vec![query], vec![], "10.0.0.5:5353".parse().unwrap());
        request.set_received(0);

        let task = responder(
            store,
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request,
        );

        let mut rng = SmallRng::seed_from_u64(0);
        let delay = task.response_delay(0, &mut rng);
        assert!((20..=120).contains(&delay));
    }

    #[test]
    fn test_delay_shrinks_with_elapsed_time() {
        let store = Arc::new(InMemoryRecordStore::new());
        // a shared pointer record, other hosts may answer too
        store.upsert(ptr_record());

        let task = responder(
            store,
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request(vec![ptr_query()], vec![], "10.0.0.5:5353"),
        );

        let base = task.response_delay(0, &mut SmallRng::seed_from_u64(7));
        assert!((20..=120).contains(&base));

        // the same draw, fifteen milliseconds after arrival
        let later = task.response_delay(15, &mut SmallRng::seed_from_u64(7));
        assert_eq!(later, base - 15);

        // long past the window, the delay floors at zero
        assert_eq!(task.response_delay(10_000, &mut SmallRng::seed_from_u64(7)), 0);
    }

    #[tokio::test]
    async fn test_execute_answers_on_multicast() {
        subscribe();

        let store = Arc::new(InMemoryRecordStore::new());
        store.upsert(ptr_record());

        let task = responder(
            store.clone(),
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request(vec![ptr_query()], vec![], "10.0.0.5:5353"),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        let info = task.execute(1_000, &mut handle).await.unwrap();
        assert!(info.is_some());

        let response = receiver.try_recv().unwrap();
        assert_eq!(response.dst(), None);
        assert!(response.queries().is_empty());
        assert_eq!(response.answers().len(), 1);
        assert_eq!(response.header().id(), 0xf00d);
        assert!(response.header().authoritative());
        assert_eq!(store.queries_observed(), 1);
    }

    #[tokio::test]
    async fn test_execute_echoes_question_for_legacy_querier() {
        subscribe();

        let store = Arc::new(InMemoryRecordStore::new());
        store.upsert(ptr_record());

        let task = responder(
            store,
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request(vec![ptr_query()], vec![], "10.0.0.5:49152"),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        task.execute(1_000, &mut handle).await.unwrap();

        let response = receiver.try_recv().unwrap();
        assert_eq!(response.dst(), Some("10.0.0.5:49152".parse().unwrap()));
        assert_eq!(response.queries(), &[ptr_query()]);
        assert_eq!(response.header().query_count(), 1);
    }

    #[tokio::test]
    async fn test_known_answer_suppression_honors_half_ttl() {
        subscribe();

        let store = Arc::new(InMemoryRecordStore::new());
        store.upsert(ptr_record());

        let task = responder(
            store,
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request(vec![ptr_query()], vec![ptr_record()], "10.0.0.5:5353"),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();

        // 50s into a 120s TTL the querier's copy is still fresh
        let info = task.execute(50_000, &mut handle).await.unwrap();
        assert!(info.is_none());
        assert!(receiver.try_recv().is_err());

        // 70s in it has crossed half life and deserves a refresh
        let info = task.execute(70_000, &mut handle).await.unwrap();
        assert!(info.is_some());
        assert_eq!(receiver.try_recv().unwrap().answers().len(), 1);
    }

    #[tokio::test]
    async fn test_known_answer_must_match_payload() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.upsert(ptr_record());

        // the querier knows a different instance of the same type
        let known = Record::from_rdata(
            name("_printer._tcp.local."),
            120,
            RData::PTR(name("brother._printer._tcp.local.")),
        );

        let task = responder(
            store,
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request(vec![ptr_query()], vec![known], "10.0.0.5:5353"),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        let info = task.execute(1_000, &mut handle).await.unwrap();
        assert!(info.is_some());
        assert_eq!(receiver.try_recv().unwrap().answers().len(), 1);
    }

    #[tokio::test]
    async fn test_affinity_keeps_records_bound_to_the_querier() {
        subscribe();

        let store = Arc::new(InMemoryRecordStore::new());
        let mine: ServiceKey = "_printer._tcp.local.#hpxxx-2".parse().unwrap();
        let mut record = ptr_record();
        record.set_service_key(mine);
        store.upsert(record.clone());

        let mut unrelated = Record::from_rdata(
            name("_printer._tcp.local."),
            120,
            RData::PTR(name("brother._printer._tcp.local.")),
        );
        unrelated.set_service_key("_printer._tcp.local.#brother".parse().unwrap());
        store.upsert(unrelated);

        let indexed: ServiceKey = "_printer._tcp.local.#hpxxx".parse().unwrap();
        let services = Arc::new(InMemoryServiceIndex::new());
        services.register(ServiceInfo::new(indexed.clone()));
        services.bind_address(Ipv4Addr::new(10, 0, 0, 5), indexed);

        let mut config = ResponderConfig::default();
        config.set_unicast_response(true);

        let task = responder(
            store,
            services,
            config,
            request(vec![ptr_query()], vec![], "10.0.0.5:5353"),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        task.execute(1_000, &mut handle).await.unwrap();

        let response = receiver.try_recv().unwrap();
        assert_eq!(response.dst(), Some("10.0.0.5:5353".parse().unwrap()));
        assert_eq!(response.answers(), &[record]);
    }

    #[tokio::test]
    async fn test_affinity_keeps_address_records_of_the_server() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.upsert(host_a_record());
        let mut other = Record::from_rdata(
            name("unrelated.local."),
            120,
            RData::A(Ipv4Addr::new(10, 0, 0, 9)),
        );
        other.set_cache_flush(true);
        store.upsert(other);

        let key: ServiceKey = "_printer._tcp.local.#hpxxx".parse().unwrap();
        let mut info = ServiceInfo::new(key.clone());
        info.set_server(name("hpxxx.local."));
        let services = Arc::new(InMemoryServiceIndex::new());
        services.register(info);
        services.bind_address(Ipv4Addr::new(10, 0, 0, 5), key);

        let mut config = ResponderConfig::default();
        config.set_unicast_response(true);

        let queries = vec![
            Query::query(name("hpxxx.local."), RecordType::A),
            Query::query(name("unrelated.local."), RecordType::A),
        ];
        let task = responder(
            store,
            services,
            config,
            request(queries, vec![], "10.0.0.5:5353"),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        task.execute(1_000, &mut handle).await.unwrap();

        let response = receiver.try_recv().unwrap();
        assert_eq!(response.record_count(), 1);
        assert_eq!(response.additionals()[0].name(), &name("hpxxx.local."));
    }

    #[tokio::test]
    async fn test_affinity_requires_ipv4_querier() {
        let mut config = ResponderConfig::default();
        config.set_unicast_response(true);

        let task = responder(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(InMemoryServiceIndex::new()),
            config,
            request(vec![ptr_query()], vec![], "[fe80::1]:5353"),
        );

        let (mut handle, _receiver) = ResponseHandle::new();
        let error = task.execute(1_000, &mut handle).await.unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Ipv4Expected(_)));
    }

    #[tokio::test]
    async fn test_sub_type_question_gets_split_answer() {
        subscribe();

        let store = Arc::new(InMemoryRecordStore::new());
        let key: ServiceKey = "_googlecast._tcp.local.#livingroom".parse().unwrap();
        let mut record = Record::from_rdata(
            name("_googlecast._tcp.local."),
            120,
            RData::PTR(name("livingroom._googlecast._tcp.local.")),
        );
        record.set_service_key(key.clone());
        store.upsert(record);

        let services = Arc::new(InMemoryServiceIndex::new());
        services.register(ServiceInfo::new(key.clone()));
        services.bind_address(Ipv4Addr::new(10, 0, 0, 5), key);

        let mut config = ResponderConfig::default();
        config.set_unicast_response(true);

        let sub = name("_ABC123._sub._googlecast._tcp.local.");
        let task = responder(
            store,
            services,
            config,
            request(
                vec![Query::query(sub.clone(), RecordType::PTR)],
                vec![],
                "10.0.0.5:5353",
            ),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        task.execute(1_000, &mut handle).await.unwrap();

        let primary = receiver.try_recv().unwrap();
        assert_eq!(primary.answers()[0].name(), &name("_googlecast._tcp.local."));

        let split = receiver.try_recv().unwrap();
        assert_eq!(split.record_count(), 1);
        assert_eq!(split.answers()[0].name(), &sub);
        assert_eq!(split.dst(), Some("10.0.0.5:5353".parse().unwrap()));

        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_private_sub_type_is_not_split() {
        let store = Arc::new(InMemoryRecordStore::new());
        let key: ServiceKey = "_googlecast._tcp.local.#livingroom".parse().unwrap();
        let mut record = Record::from_rdata(
            name("_googlecast._tcp.local."),
            120,
            RData::PTR(name("livingroom._googlecast._tcp.local.")),
        );
        record.set_service_key(key.clone());
        store.upsert(record);

        let services = Arc::new(InMemoryServiceIndex::new());
        services.register(ServiceInfo::new(key.clone()));
        services.bind_address(Ipv4Addr::new(10, 0, 0, 5), key);

        let mut config = ResponderConfig::default();
        config.set_unicast_response(true);

        let task = responder(
            store,
            services,
            config,
            request(
                vec![Query::query(
                    name("_%9001._sub._googlecast._tcp.local."),
                    RecordType::PTR,
                )],
                vec![],
                "10.0.0.5:5353",
            ),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        task.execute(1_000, &mut handle).await.unwrap();

        assert!(receiver.try_recv().is_ok());
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_no_response_without_answers() {
        subscribe();

        let store = Arc::new(InMemoryRecordStore::new());
        let task = responder(
            store.clone(),
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request(vec![ptr_query()], vec![], "10.0.0.5:5353"),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        let info = task.execute(1_000, &mut handle).await.unwrap();
        assert!(info.is_none());
        assert!(receiver.try_recv().is_err());

        // the query still counts as observed
        assert_eq!(store.queries_observed(), 1);
    }

    #[tokio::test]
    async fn test_execute_is_repeatable() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.upsert(ptr_record());
        let srv = Record::from_rdata(
            name("hpxxx._printer._tcp.local."),
            120,
            RData::SRV(SRV::new(0, 0, 515, name("hpxxx.local."))),
        );
        store.upsert(srv);

        let queries = vec![
            ptr_query(),
            Query::query(name("hpxxx._printer._tcp.local."), RecordType::SRV),
        ];
        let task = responder(
            store,
            Arc::new(InMemoryServiceIndex::new()),
            ResponderConfig::default(),
            request(queries, vec![], "10.0.0.5:5353"),
        );

        let (mut handle, mut receiver) = ResponseHandle::new();
        task.execute(1_000, &mut handle).await.unwrap();
        task.execute(1_000, &mut handle).await.unwrap();

        let once = receiver.try_recv().unwrap();
        let twice = receiver.try_recv().unwrap();

        let collect = |response: &MessageResponse| -> HashSet<Record> {
            response
                .answers()
                .iter()
                .chain(response.additionals())
                .cloned()
                .collect()
        };
        assert_eq!(collect(&once), collect(&twice));
        assert_eq!(once.header().answer_count(), twice.header().answer_count());
    }
}
