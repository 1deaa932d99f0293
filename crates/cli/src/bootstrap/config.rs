use std::path::Path;

use gns_domain::config::{CliOverrides, GnsConfig};
use tracing::info;

pub fn load_config(config_path: &Path, cli_overrides: CliOverrides) -> anyhow::Result<GnsConfig> {
    let config = GnsConfig::load(config_path, cli_overrides)?;

    info!(
        config_file = %config_path.display(),
        namecache = %config.namecache.endpoint,
        dht = %config.dht.endpoint,
        "Configuration loaded"
    );

    Ok(config)
}
