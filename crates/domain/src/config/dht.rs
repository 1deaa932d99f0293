use serde::{Deserialize, Serialize};

/// DHT collaborator settings (spec §6: `CLIENT_GET`/`CLIENT_GET_STOP`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DhtConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Default `repl_level` attached to `CLIENT_GET` requests.
    #[serde(default = "default_replication_level")]
    pub replication_level: u32,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Preserved verbatim on `LookupOptions` and passed through to
    /// `CLIENT_GET` unmodified (spec §A.2 supplement 5).
    #[serde(default)]
    pub demultiplex_everywhere: bool,
}

impl Default for DhtConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            replication_level: default_replication_level(),
            request_timeout_ms: default_request_timeout_ms(),
            demultiplex_everywhere: false,
        }
    }
}

fn default_endpoint() -> String {
    "unix:///var/run/gns/dht.sock".to_string()
}

fn default_replication_level() -> u32 {
    10
}

fn default_request_timeout_ms() -> u64 {
    5_000
}
