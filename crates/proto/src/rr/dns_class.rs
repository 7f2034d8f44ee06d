// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! class of DNS operations, in general always IN for internet

use std::fmt;
use std::fmt::{Display, Formatter};

/// The DNS class of a record or question. mDNS traffic is IN in practice;
/// the top bit of the wire class field is not part of the class here, it is
/// carried as the cache-flush/unicast-response bool on records and queries.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DNSClass {
    /// Internet
    IN,
    /// Any class, aka `*`
    ANY,
    /// Unknown class value
    Unknown(u16),
}

impl From<u16> for DNSClass {
    /// Convert from the wire `u16` to a `DNSClass`
    fn from(value: u16) -> Self {
        match value {
            1 => Self::IN,
            255 => Self::ANY,
            _ => Self::Unknown(value),
        }
    }
}

impl From<DNSClass> for u16 {
    /// Convert a `DNSClass` to its wire `u16` form
    fn from(class: DNSClass) -> Self {
        match class {
            DNSClass::IN => 1,
            DNSClass::ANY => 255,
            DNSClass::Unknown(value) => value,
        }
    }
}

impl Display for DNSClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Self::IN => f.write_str("IN"),
            Self::ANY => f.write_str("ANY"),
            Self::Unknown(value) => write!(f, "CLASS{value}"),
        }
    }
}
