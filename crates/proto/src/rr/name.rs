// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Domain names in the canonical form mDNS compares them in

use std::fmt;
use std::str::FromStr;

use crate::error::{ProtoError, ProtoErrorKind, ProtoResult};

/// The label that marks a DNS-SD sub-type question, as in
/// `_ABC123._sub._googlecast._tcp.local.` (RFC 6763 §7.1)
const SUB_TYPE_SEPARATOR: &str = "._sub.";

/// A domain name held in its canonical mDNS comparison form: ASCII
/// lowercased and fully qualified (trailing dot).
///
/// RFC 6762 §16 requires name comparison to be case insensitive, so the
/// canonical form is fixed at construction and every later comparison is a
/// plain string comparison. Wire-format label handling is out of scope here;
/// the transport layer deals in labels, this engine deals in whole names.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name {
    name: String,
}

impl Name {
    /// Create a new domain name with no associated labels, i.e. an empty name
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize a UTF-8 name: trim, lowercase, append the root dot if
    /// missing. Empty names and names with embedded whitespace or control
    /// characters are rejected.
    pub fn from_utf8(name: impl AsRef<str>) -> ProtoResult<Self> {
        let raw = name.as_ref().trim();
        if raw.is_empty() || raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ProtoError::from(ProtoErrorKind::InvalidName(
                name.as_ref().to_string(),
            )));
        }

        let mut name = raw.to_ascii_lowercase();
        if !name.ends_with('.') {
            name.push('.');
        }

        Ok(Self { name })
    }

    /// The canonical string form, always lowercase and fully qualified
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// True for names of the `<sub>._sub.<type-domain>` form, the DNS-SD
    /// sub-type question shape
    pub fn is_sub_type(&self) -> bool {
        self.name.contains(SUB_TYPE_SEPARATOR)
    }

    /// For a sub-type name, the base service type it specializes;
    /// `None` when the name carries no `_sub` label
    pub fn base_type(&self) -> Option<Self> {
        let (_, base) = self.name.split_once(SUB_TYPE_SEPARATOR)?;
        Some(Self {
            name: base.to_string(),
        })
    }
}

impl FromStr for Name {
    type Err = ProtoError;

    fn from_str(name: &str) -> ProtoResult<Self> {
        Self::from_utf8(name)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form() {
        let name = Name::from_utf8("Living-Room.Local").unwrap();
        assert_eq!(name.as_str(), "living-room.local.");

        let already = Name::from_utf8("_googlecast._tcp.local.").unwrap();
        assert_eq!(already.as_str(), "_googlecast._tcp.local.");
    }

    #[test]
    fn test_case_insensitive_equality() {
        let upper = Name::from_utf8("HPXXX.local.").unwrap();
        let lower = Name::from_utf8("hpxxx.local.").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(Name::from_utf8("").is_err());
        assert!(Name::from_utf8("   ").is_err());
        assert!(Name::from_utf8("bad name.local.").is_err());
    }

    #[test]
    fn test_sub_type_detection() {
        let sub = Name::from_utf8("_ABC123._sub._googlecast._tcp.local.").unwrap();
        assert!(sub.is_sub_type());
        assert_eq!(
            sub.base_type().unwrap().as_str(),
            "_googlecast._tcp.local."
        );

        let base = Name::from_utf8("_googlecast._tcp.local.").unwrap();
        assert!(!base.is_sub_type());
        assert!(base.base_type().is_none());
    }
}
