// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Configuration module for the responder engine

use serde::Deserialize;

use crate::proto::multicast::MDNS_PORT;

static DEFAULT_MIN_WAIT_MILLIS: u64 = 20;
static DEFAULT_MAX_WAIT_MILLIS: u64 = 120;

/// Responder configuration.
///
/// The delay bounds come from [RFC 6762](https://tools.ietf.org/html/rfc6762#section-6):
/// a responder that is not the sole authority for a query defers its answer
/// by a random amount inside them so that simultaneous responders on the
/// link do not collide.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct ResponderConfig {
    /// Lower bound of the collision-avoidance delay, in milliseconds
    response_min_wait: Option<u64>,
    /// Upper bound of the collision-avoidance delay, in milliseconds
    response_max_wait: Option<u64>,
    /// The port the responder's own transport is bound to
    mdns_port: Option<u16>,
    /// Answer directly to the querier instead of multicasting to the link
    #[serde(default)]
    unicast_response: bool,
}

impl ResponderConfig {
    /// Lower bound of the collision-avoidance delay, in milliseconds
    pub fn get_response_min_wait(&self) -> u64 {
        self.response_min_wait.unwrap_or(DEFAULT_MIN_WAIT_MILLIS)
    }

    /// Upper bound of the collision-avoidance delay, in milliseconds
    pub fn get_response_max_wait(&self) -> u64 {
        self.response_max_wait.unwrap_or(DEFAULT_MAX_WAIT_MILLIS)
    }

    /// The port the responder's own transport is bound to, queries from any
    /// other source port are legacy one-shot queries
    pub fn get_mdns_port(&self) -> u16 {
        self.mdns_port.unwrap_or(MDNS_PORT)
    }

    /// Whether responses go directly to the querier instead of the multicast
    /// group. Unicast operation also turns on source-affinity pruning and
    /// sub-type answer splitting.
    pub fn unicast_response(&self) -> bool {
        self.unicast_response
    }

    /// Override the lower bound of the collision-avoidance delay
    pub fn set_response_min_wait(&mut self, millis: u64) -> &mut Self {
        self.response_min_wait = Some(millis);
        self
    }

    /// Override the upper bound of the collision-avoidance delay
    pub fn set_response_max_wait(&mut self, millis: u64) -> &mut Self {
        self.response_max_wait = Some(millis);
        self
    }

    /// Override the port the responder's own transport is bound to
    pub fn set_mdns_port(&mut self, port: u16) -> &mut Self {
        self.mdns_port = Some(port);
        self
    }

    /// Turn unicast operation on or off
    pub fn set_unicast_response(&mut self, flag: bool) -> &mut Self {
        self.unicast_response = flag;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResponderConfig::default();
        assert_eq!(config.get_response_min_wait(), 20);
        assert_eq!(config.get_response_max_wait(), 120);
        assert_eq!(config.get_mdns_port(), MDNS_PORT);
        assert!(!config.unicast_response());
    }

    #[test]
    fn test_parse_toml() {
        let config: ResponderConfig = basic_toml::from_str("").unwrap();
        assert_eq!(config.get_response_min_wait(), 20);
        assert_eq!(config.get_response_max_wait(), 120);
        assert_eq!(config.get_mdns_port(), MDNS_PORT);
        assert!(!config.unicast_response());

        let config: ResponderConfig = basic_toml::from_str("response_max_wait = 40").unwrap();
        assert_eq!(config.get_response_min_wait(), 20);
        assert_eq!(config.get_response_max_wait(), 40);

        let config: ResponderConfig = basic_toml::from_str(
            r#"
response_min_wait = 0
response_max_wait = 5
mdns_port = 5454
unicast_response = true
"#,
        )
        .unwrap();
        assert_eq!(config.get_response_min_wait(), 0);
        assert_eq!(config.get_response_max_wait(), 5);
        assert_eq!(config.get_mdns_port(), 5454);
        assert!(config.unicast_response());
    }

    #[test]
    fn test_overrides() {
        let mut config = ResponderConfig::default();
        config
            .set_response_min_wait(0)
            .set_response_max_wait(5)
            .set_mdns_port(5454)
            .set_unicast_response(true);
        assert_eq!(config.get_response_min_wait(), 0);
        assert_eq!(config.get_response_max_wait(), 5);
        assert_eq!(config.get_mdns_port(), 5454);
        assert!(config.unicast_response());
    }
}
