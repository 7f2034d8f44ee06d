// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Well-known mDNS addresses, ports and names
//! See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-3)

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// The port assigned to mDNS, queries from any other source port are legacy
/// "one-shot" queries.
/// See [RFC 6762](https://tools.ietf.org/html/rfc6762#section-6.7)
pub const MDNS_PORT: u16 = 5353;

/// The IPv4 multicast group all mDNS traffic goes to
pub const MDNS_IPV4: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(224, 0, 0, 251)), MDNS_PORT);

/// The IPv6 link-local multicast group all mDNS traffic goes to
pub const MDNS_IPV6: SocketAddr = SocketAddr::new(
    IpAddr::V6(Ipv6Addr::new(0xFF02, 0, 0, 0, 0, 0, 0, 0x00FB)),
    MDNS_PORT,
);

/// The name of the DNS-SD meta-query enumerating all service types on the
/// link.
/// See [RFC 6763](https://tools.ietf.org/html/rfc6763#section-9)
pub const META_QUERY_NAME: &str = "_services._dns-sd._udp.local.";

/// Typical ethernet datagram budget for an mDNS message: 1500 byte MTU less
/// the IP and UDP headers with room for options.
pub const MAX_PAYLOAD_TYPICAL: u16 = 1460;

/// Prefix marking a sub-type label as private. Questions for such sub-types
/// never get the per-question answer split that public sub-types do.
pub const PRIVATE_SUB_TYPE_PREFIX: &str = "_%";
