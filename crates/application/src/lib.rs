//! Application layer: collaborator ports, per-type record handlers, DNS
//! fallback, and the recursive resolver built on top of `gns-domain`.

pub mod dns_fallback;
pub mod handlers;
pub mod ports;
pub mod resolver;

pub use resolver::{LookupMode, LookupOptions, Resolver};
