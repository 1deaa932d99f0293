//! Typed resource-record variants and their wire codec (spec §3, §4.1).

pub mod flags;
pub mod gns_type;
pub mod record;

pub use flags::GNSFlags;
pub use gns_type::{GNSType, TypeList};
pub use record::ResourceRecord;
