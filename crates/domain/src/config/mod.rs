//! Configuration, organized by concern, following the same per-concern
//! submodule layout the rest of this codebase's config lives in:
//! - `root`: `GnsConfig` and CLI overrides.
//! - `namecache` / `dht` / `revocation`: collaborator endpoints.
//! - `root_zones`: the locally configured root-zone map.
//! - `logging`: log level.
//! - `errors`: configuration load/validation errors.

pub mod dht;
pub mod errors;
pub mod logging;
pub mod namecache;
pub mod revocation;
pub mod root;
pub mod root_zones;

pub use dht::DhtConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use namecache::NamecacheConfig;
pub use revocation::RevocationConfig;
pub use root::{CliOverrides, GnsConfig};
pub use root_zones::RootZonesConfig;
