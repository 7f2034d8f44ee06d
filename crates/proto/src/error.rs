// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Error types for the crate

use std::fmt;

use thiserror::Error;

/// An alias for results returned by functions of this crate
pub type ProtoResult<T> = Result<T, ProtoError>;

/// The error kind for errors that get returned in the crate
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtoErrorKind {
    /// An error with an arbitrary message, referenced as `&'static str`
    #[error("{0}")]
    Message(&'static str),

    /// An error with an arbitrary message, stored as `String`
    #[error("{0}")]
    Msg(String),

    /// A domain name was empty or not expressible in canonical form
    #[error("invalid domain name: {0:?}")]
    InvalidName(String),

    /// A service key was missing its type/qualifier separator
    #[error("invalid service key: {0:?}")]
    InvalidServiceKey(String),
}

/// The error type for errors that get returned in the crate
#[derive(Debug, Error)]
pub struct ProtoError {
    kind: ProtoErrorKind,
}

impl ProtoError {
    /// Get the kind of the error
    pub fn kind(&self) -> &ProtoErrorKind {
        &self.kind
    }
}

impl fmt::Display for ProtoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl From<ProtoErrorKind> for ProtoError {
    fn from(kind: ProtoErrorKind) -> Self {
        Self { kind }
    }
}

impl From<&'static str> for ProtoError {
    fn from(msg: &'static str) -> Self {
        ProtoErrorKind::Message(msg).into()
    }
}

impl From<String> for ProtoError {
    fn from(msg: String) -> Self {
        ProtoErrorKind::Msg(msg).into()
    }
}
