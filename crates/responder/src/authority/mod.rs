// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Module for the message types passing through the responder and the traits
//! the shared stores answer to.

mod message_request;
mod message_response;
mod record_store;
mod service_index;

pub use self::message_request::MessageRequest;
pub use self::message_response::{MessageResponse, MessageResponseBuilder};
pub use self::record_store::RecordStore;
pub use self::service_index::ServiceIndex;
