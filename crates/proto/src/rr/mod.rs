// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Resource record related components, e.g. `Record`, `RData`, ...

pub mod dns_class;
mod name;
pub mod rdata;
pub mod record_data;
pub mod record_type;
pub mod resource;
pub mod service_info;

pub use self::dns_class::DNSClass;
pub use self::name::Name;
pub use self::record_data::RData;
pub use self::record_type::RecordType;
pub use self::resource::Record;
pub use self::service_info::{loose_contains, ServiceInfo, ServiceKey};
