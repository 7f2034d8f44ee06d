// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! DNS-SD service identity: the key a registration is filed under and the
//! registration details a responder consults when pruning answers.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProtoError, ProtoErrorKind};
use crate::rr::Name;

/// Loose containment: `haystack` contains `needle` either verbatim or with
/// every dash stripped from both sides.
///
/// Service instance names drift between dashed and undashed spellings of the
/// same qualifier ("HP-LaserJet" vs "HPLaserJet"), so exact substring search
/// alone misses renames of the same service. An empty needle matches nothing.
pub fn loose_contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    if haystack.contains(needle) {
        return true;
    }
    haystack.replace('-', "").contains(&needle.replace('-', ""))
}

/// The key a DNS-SD service registration is filed under: the fully qualified
/// service type joined to the instance qualifier by `#`.
///
/// Keys are stored lowercase, like [`Name`]s, so lookups never depend on the
/// case a query arrived with.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Compose a key from the service type domain and the instance qualifier
    pub fn new(type_domain: &Name, qualifier: &str) -> Self {
        Self(format!("{}#{}", type_domain.as_str(), qualifier).to_lowercase())
    }

    /// The key as a string, `<type>#<qualifier>`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The service type domain half of the key
    pub fn type_domain(&self) -> &str {
        self.0.split_once('#').map_or(&*self.0, |(tipe, _)| tipe)
    }

    /// The instance qualifier half of the key
    pub fn qualifier(&self) -> &str {
        self.0.split_once('#').map_or("", |(_, qualifier)| qualifier)
    }

    /// Loose containment over whole keys, see [`loose_contains`]
    pub fn loosely_matches(&self, needle: &ServiceKey) -> bool {
        loose_contains(self.as_str(), needle.as_str())
    }
}

impl FromStr for ServiceKey {
    type Err = ProtoError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if !key.contains('#') {
            return Err(ProtoErrorKind::InvalidServiceKey(key.to_string()).into());
        }
        Ok(Self(key.to_lowercase()))
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A DNS-SD service registration as the responder sees it: its key and the
/// host the service runs on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceInfo {
    key: ServiceKey,
    server: Option<Name>,
}

impl ServiceInfo {
    /// Create a registration with no server host attached yet
    pub fn new(key: ServiceKey) -> Self {
        Self { key, server: None }
    }

    /// Set the host name the service runs on
    pub fn set_server(&mut self, server: Name) -> &mut Self {
        self.server = Some(server);
        self
    }

    /// The key the registration is filed under
    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    /// The host name the service runs on, when known
    pub fn server(&self) -> Option<&Name> {
        self.server.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_contains_verbatim() {
        assert!(loose_contains("printer._tcp.local.#hp-laserjet", "hp-laserjet"));
        assert!(!loose_contains("printer._tcp.local.#hp-laserjet", "brother"));
    }

    #[test]
    fn test_loose_contains_ignores_dashes() {
        assert!(loose_contains("office-printer.local.", "officeprinter"));
        assert!(loose_contains("officeprinter.local.", "office-printer"));
    }

    #[test]
    fn test_loose_contains_empty_needle() {
        assert!(!loose_contains("anything", ""));
        assert!(!loose_contains("", ""));
    }

    #[test]
    fn test_key_lowercases() {
        let tipe = Name::from_utf8("_Printer._tcp.local.").unwrap();
        let key = ServiceKey::new(&tipe, "HPxxx");
        assert_eq!(key.as_str(), "_printer._tcp.local.#hpxxx");
        assert_eq!(key.type_domain(), "_printer._tcp.local.");
        assert_eq!(key.qualifier(), "hpxxx");
    }

    #[test]
    fn test_key_parse_requires_separator() {
        assert!("_printer._tcp.local.#hpxxx".parse::<ServiceKey>().is_ok());
        assert!("_printer._tcp.local.".parse::<ServiceKey>().is_err());
    }

    #[test]
    fn test_key_loose_matching() {
        let indexed: ServiceKey = "_printer._tcp.local.#hpxxx-2".parse().unwrap();
        let needle: ServiceKey = "_printer._tcp.local.#hpxxx".parse().unwrap();
        assert!(indexed.loosely_matches(&needle));
        assert!(!needle.loosely_matches(&indexed));
    }
}
