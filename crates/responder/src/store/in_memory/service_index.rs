// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! In-memory service registrations and their address bindings

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::RwLock;

use crate::authority::ServiceIndex;
use crate::proto::rr::{ServiceInfo, ServiceKey};

/// Service registrations filed by key, with the address bindings the
/// source-affinity filter consults.
#[derive(Default)]
pub struct InMemoryServiceIndex {
    services: RwLock<HashMap<ServiceKey, ServiceInfo>>,
    by_address: RwLock<HashMap<Ipv4Addr, Vec<ServiceKey>>>,
}

impl InMemoryServiceIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// File a service registration under its key, replacing any previous
    /// registration with the same key
    pub fn register(&self, info: ServiceInfo) {
        let mut services = self.services.write().expect("service index poisoned");
        services.insert(info.key().clone(), info);
    }

    /// Associate `addr` with the service under `key`, a no-op if the binding
    /// already exists
    pub fn bind_address(&self, addr: Ipv4Addr, key: ServiceKey) {
        let mut by_address = self.by_address.write().expect("service index poisoned");
        let keys = by_address.entry(addr).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
}

impl ServiceIndex for InMemoryServiceIndex {
    fn service_keys(&self, addr: Ipv4Addr) -> Vec<ServiceKey> {
        let by_address = self.by_address.read().expect("service index poisoned");
        by_address.get(&addr).cloned().unwrap_or_default()
    }

    fn service(&self, key: &ServiceKey) -> Option<ServiceInfo> {
        let services = self.services.read().expect("service index poisoned");
        services.get(key).cloned()
    }
}
