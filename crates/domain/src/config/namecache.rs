use serde::{Deserialize, Serialize};

/// Namecache collaborator settings (spec §6: `LOOKUP`/`CACHE` messages).
/// The namecache service itself is out of scope; this only configures
/// how to reach it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamecacheConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for NamecacheConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "unix:///var/run/gns/namecache.sock".to_string()
}

fn default_request_timeout_ms() -> u64 {
    500
}
