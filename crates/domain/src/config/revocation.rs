use serde::{Deserialize, Serialize};

/// Revocation collaborator settings (spec §6: `QUERY`/`REVOKE`). The
/// revocation check is optional and skippable (spec §A.2 supplement 4).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "unix:///var/run/gns/revocation.sock".to_string()
}

fn default_request_timeout_ms() -> u64 {
    1_000
}
