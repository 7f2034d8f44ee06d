// Copyright 2015-2018 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! `Responder` component answering mDNS queries from the shared stores.

mod responder_future;
mod response_handler;
mod task;

pub use self::responder_future::ResponderFuture;
pub use self::response_handler::{ResponseHandle, ResponseHandler, ResponseInfo};
pub use self::task::Responder;
