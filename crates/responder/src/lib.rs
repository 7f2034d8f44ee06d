// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

// LIBRARY WARNINGS
#![warn(
    clippy::default_trait_access,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::unimplemented,
    clippy::use_self,
    missing_copy_implementations,
    missing_docs,
    non_snake_case,
    non_upper_case_globals,
    rust_2018_idioms,
    unreachable_pub
)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Pecan is a multicast DNS (RFC 6762) and DNS-SD (RFC 6763) query responder
//! engine, the half of an mDNS stack that answers questions other hosts put
//! on the link.
//!
//! For every incoming query the engine schedules a response task. The task
//! waits out the collision-avoidance delay, drops answers the querier already
//! holds fresh copies of, deduplicates records across response sections, and
//! decides whether the reply goes back unicast to the querier or multicast to
//! the whole link. Reading queries off the wire and writing responses back is
//! the caller's business, a [`ResponseHandler`](responder::ResponseHandler)
//! bridges the two.
//!
//! # Goals
//!
//! * Only safe Rust
//! * All errors handled
//! * Verifiable timing, the delay logic is pure and separately testable
//! * Transport agnostic, bring your own sockets

pub use pecan_proto as proto;

pub mod authority;
pub mod config;
pub mod error;
pub mod responder;
pub mod store;

pub use self::responder::ResponderFuture;

/// Returns the current version of Pecan
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
