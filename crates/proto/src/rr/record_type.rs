// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Record type declarations

use std::fmt;
use std::fmt::{Display, Formatter};

/// The type of a resource record or question, narrowed to the set DNS-SD
/// traffic actually carries.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RecordType {
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) IPv4 Address record
    A,
    /// [RFC 3596](https://tools.ietf.org/html/rfc3596) IPv6 address record
    AAAA,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) All cached records, aka `*`
    ANY,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Pointer record; DNS-SD
    /// service enumeration rides on these
    PTR,
    /// [RFC 2782](https://tools.ietf.org/html/rfc2782) Service locator
    SRV,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Text record; DNS-SD
    /// attribute lists ride on these
    TXT,
    /// Unknown record type
    Unknown(u16),
}

impl RecordType {
    /// True for host-address record types (A and AAAA)
    pub fn is_address(self) -> bool {
        matches!(self, Self::A | Self::AAAA)
    }

    /// True for the pointer/enumeration record type
    pub fn is_pointer(self) -> bool {
        self == Self::PTR
    }
}

impl From<u16> for RecordType {
    /// Convert from the wire `u16` to a `RecordType`
    fn from(value: u16) -> Self {
        match value {
            1 => Self::A,
            28 => Self::AAAA,
            255 => Self::ANY,
            12 => Self::PTR,
            33 => Self::SRV,
            16 => Self::TXT,
            _ => Self::Unknown(value),
        }
    }
}

impl From<RecordType> for u16 {
    /// Convert a `RecordType` to its wire `u16` form
    fn from(rt: RecordType) -> Self {
        match rt {
            RecordType::A => 1,
            RecordType::AAAA => 28,
            RecordType::ANY => 255,
            RecordType::PTR => 12,
            RecordType::SRV => 33,
            RecordType::TXT => 16,
            RecordType::Unknown(value) => value,
        }
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Self::A => f.write_str("A"),
            Self::AAAA => f.write_str("AAAA"),
            Self::ANY => f.write_str("ANY"),
            Self::PTR => f.write_str("PTR"),
            Self::SRV => f.write_str("SRV"),
            Self::TXT => f.write_str("TXT"),
            Self::Unknown(value) => write!(f, "TYPE{value}"),
        }
    }
}
