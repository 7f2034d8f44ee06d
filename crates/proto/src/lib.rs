// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![warn(
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::unimplemented,
    missing_copy_implementations,
    missing_docs,
    non_snake_case,
    non_upper_case_globals,
    rust_2018_idioms,
    unreachable_pub
)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Pecan proto: the data model shared by the Pecan mDNS responder engine.
//!
//! Multicast DNS (RFC 6762) reuses the DNS message format but layers its own
//! semantics on top: records carry a cache-flush bit, questions carry a
//! unicast-response bit, and every record's remaining lifetime matters for
//! known-answer suppression. The types here model exactly that slice of the
//! protocol; wire encoding and decoding belong to the transport layer.

use std::time::{SystemTime, UNIX_EPOCH};

mod error;
pub mod multicast;
pub mod op;
pub mod rr;

pub use error::{ProtoError, ProtoErrorKind, ProtoResult};

/// Milliseconds since the UNIX epoch.
///
/// The single time base for record creation stamps, query arrival stamps, and
/// the staleness arithmetic built on them.
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
