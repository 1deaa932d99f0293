//! Unix-domain-socket adapters for the collaborator services (spec §6).

mod dht;
mod framing;
mod namecache;
mod revocation;

pub use dht::UnixDhtClient;
pub use namecache::UnixNamecacheClient;
pub use revocation::UnixRevocationClient;
