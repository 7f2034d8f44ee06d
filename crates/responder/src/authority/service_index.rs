// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::net::Ipv4Addr;

use crate::proto::rr::{ServiceInfo, ServiceKey};

/// The mapping from querier addresses to the services they are bound to,
/// read by the source-affinity filter of unicast responders.
///
/// How addresses get associated with services is the registration side's
/// business; responder tasks only read, concurrently.
pub trait ServiceIndex: Send + Sync + 'static {
    /// The keys of every service believed to be bound to `addr`, empty when
    /// the address is unknown
    fn service_keys(&self, addr: Ipv4Addr) -> Vec<ServiceKey>;

    /// Resolve a service registration by its key
    fn service(&self, key: &ServiceKey) -> Option<ServiceInfo>;
}
