// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::HashSet;

use crate::authority::MessageRequest;
use crate::proto::op::Query;
use crate::proto::rr::Record;

/// The authoritative record store as the responder engine sees it.
///
/// The rest of the stack registers, probes and expires records under its own
/// discipline; responder tasks only read. Many tasks read concurrently, so
/// implementations must tolerate that, an `RwLock` around the record table is
/// enough.
pub trait RecordStore: Send + Sync + 'static {
    /// Append every record that answers `query` into `answers`.
    ///
    /// `answers` is a set keyed by record identity, appending a record that
    /// is already present is a no-op. Records expired at `now` must not be
    /// appended.
    fn append_answers(&self, query: &Query, now: u64, answers: &mut HashSet<Record>);

    /// True when this host is the only responder on the link that can answer
    /// `query`, which permits answering without the collision-avoidance
    /// delay.
    /// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-6)
    fn is_sole_authority(&self, query: &Query) -> bool;

    /// Bookkeeping hook fired exactly once per responder task, before any
    /// filtering. Stores use it to refresh their query log or probe-conflict
    /// detection.
    fn notify_query_observed(&self, request: &MessageRequest);
}
