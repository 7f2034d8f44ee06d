// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! All defined errors for the responder engine

use std::net::IpAddr;
use std::{fmt, io};

use thiserror::Error;

use crate::proto::ProtoError;

/// The error kind for errors that get returned in the crate
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An error with an arbitrary message, referenced as `&'static str`
    #[error("{0}")]
    Message(&'static str),

    /// Source-affinity pruning was requested for a querier that did not
    /// arrive over IPv4
    #[error("expected an IPv4 querier address, got: {0}")]
    Ipv4Expected(IpAddr),

    // foreign
    /// An error got returned from IO
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// An error got returned by the pecan-proto crate
    #[error("proto error: {0}")]
    Proto(#[from] ProtoError),
}

/// The error type for errors that get returned in the crate
#[derive(Debug, Error)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl Error {
    /// Get the kind of the error
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl<E> From<E> for Error
where
    E: Into<ErrorKind>,
{
    fn from(error: E) -> Self {
        Self {
            kind: Box::new(error.into()),
        }
    }
}

impl From<&'static str> for ErrorKind {
    fn from(msg: &'static str) -> Self {
        Self::Message(msg)
    }
}
